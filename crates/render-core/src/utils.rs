/// Convert a top-down layout Y coordinate to a bottom-up PDF Y
/// coordinate (flip origin). Both values in the same unit.
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Lossy WinAnsi/Latin-1 encoding for PDF literal strings; anything
/// outside the 8-bit range becomes `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_y_is_an_involution() {
        assert_eq!(flip_y(flip_y(7.5, 25.0), 25.0), 7.5);
    }

    #[test]
    fn win_ansi_replaces_out_of_range() {
        assert_eq!(to_win_ansi("ab→c"), b"ab?c".to_vec());
    }
}
