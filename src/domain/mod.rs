// Domain layer - Pure transformation core, no I/O
pub mod color;
pub mod trajectory;
