// ABOUTME: GSM 03.38 default alphabet and single-shift extension table
// ABOUTME: Fixed lookup data for the packed 7-bit text codec, with a defined replacement for unknown code points

/// Emitted for code points neither table defines
pub const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Escape to the extension table
pub const ESCAPE: u8 = 0x1B;

/// GSM 03.38 default alphabet, indexed by septet value
pub const DEFAULT_ALPHABET: [char; 128] = [
    // 0x00
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å',
    // 0x10 (0x1B is the escape and never reaches the table)
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', REPLACEMENT, 'Æ', 'æ', 'ß', 'É',
    // 0x20
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    // 0x30
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    // 0x40
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    // 0x50
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§',
    // 0x60
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    // 0x70
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à',
];

/// Single-shift extension table, reached through `ESCAPE`
pub const EXTENSION_TABLE: [(u8, char); 10] = [
    (0x0A, '\u{0C}'),
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2F, '\\'),
    (0x3C, '['),
    (0x3D, '~'),
    (0x3E, ']'),
    (0x40, '|'),
    (0x65, '€'),
];

/// Look up a septet in the default alphabet
pub fn default_char(septet: u8) -> char {
    DEFAULT_ALPHABET
        .get(usize::from(septet))
        .copied()
        .unwrap_or(REPLACEMENT)
}

/// Look up the septet following an escape
pub fn extension_char(septet: u8) -> char {
    EXTENSION_TABLE
        .iter()
        .find(|(code, _)| *code == septet)
        .map(|(_, c)| *c)
        .unwrap_or(REPLACEMENT)
}
