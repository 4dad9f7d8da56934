// Application layer - Use cases and the backend repository seam
pub mod backend_repository;
pub mod report_service;
pub mod trajectory_service;
