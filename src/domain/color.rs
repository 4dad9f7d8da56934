// Deterministic color assignment for map rendering

/// CSS hex color, always drawn from a fixed palette.
pub type Color = &'static str;

/// Palette for station polylines. Stations hash into this table, so the
/// mapping is stable across fetches but collisions between different
/// stations are possible and accepted.
pub const STATION_PALETTE: [Color; 10] = [
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FFA500", "#800080",
    "#008000", "#FFC0CB",
];

/// Marker color for coordinates without a recognized communication state.
pub const UNKNOWN_COMM_COLOR: Color = "#666666";

/// Maps a station identifier to a palette color by summing its UTF-16 code
/// units modulo the palette size. The empty string hashes to index 0.
pub fn station_color(station: &str) -> Color {
    let sum = station
        .encode_utf16()
        .fold(0usize, |acc, unit| acc.wrapping_add(unit as usize));
    STATION_PALETTE[sum % STATION_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_color_is_deterministic() {
        assert_eq!(station_color("Alpha"), station_color("Alpha"));
        assert_eq!(station_color("Bravo"), station_color("Bravo"));
    }

    #[test]
    fn test_empty_station_hashes_to_first_color() {
        assert_eq!(station_color(""), STATION_PALETTE[0]);
    }

    #[test]
    fn test_station_color_uses_char_code_sum() {
        // 'A' = 65, 65 % 10 = 5
        assert_eq!(station_color("A"), STATION_PALETTE[5]);
        // 'A' + 'B' = 131, 131 % 10 = 1
        assert_eq!(station_color("AB"), STATION_PALETTE[1]);
    }

    #[test]
    fn test_station_color_sums_utf16_code_units() {
        // U+1F600 is the surrogate pair 0xD83D + 0xDE00 = 112189, 112189 % 10 = 9
        assert_eq!(station_color("\u{1F600}"), STATION_PALETTE[9]);
    }
}
