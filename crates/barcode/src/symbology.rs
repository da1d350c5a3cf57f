/// The barcode symbologies the provider can ask the encoder for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    /// Retail symbology for exactly 13 numeric digits.
    Ean13,
    /// General-purpose symbology for arbitrary digit strings.
    Code128,
}

/// Picks the symbology for a digit string.
///
/// Exactly 13 digits go down the EAN-13 path; everything else,
/// including the empty string, is encoded as Code 128.
pub fn select_symbology(digits: &str) -> Symbology {
    if digits.len() == 13 && digits.bytes().all(|b| b.is_ascii_digit()) {
        Symbology::Ean13
    } else {
        Symbology::Code128
    }
}
