// ABOUTME: TP-DCS data coding scheme with the character-width decision table and message class
// ABOUTME: Character width comes from a lookup table keyed by the coding group in bits 7-6

use crate::error::{DecodeError, DecodeResult};
use num_enum::TryFromPrimitive;
use std::fmt;

/// Character width of the user data, as bits per character
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    /// GSM 7-bit default alphabet, packed
    SevenBit = 7,
    /// Raw octets
    EightBit = 8,
    /// UCS-2, big-endian
    SixteenBit = 16,
}

impl EncodingKind {
    pub fn bits_per_char(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            EncodingKind::SevenBit => "GSM-7",
            EncodingKind::EightBit => "8-bit",
            EncodingKind::SixteenBit => "UCS-2",
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per coding group (DCS bits 7-6): the shift that selects the 2-bit width field, and the
/// bits-per-character for each value of that field.
const CODING_GROUPS: [(u8, [u8; 4]); 4] = [
    // 00xx_xxxx general data coding: bits 3-2
    (2, [7, 8, 16, 7]),
    // 01xx_xxxx
    (0, [7, 7, 7, 7]),
    // 10xx_xxxx
    (0, [7, 7, 7, 7]),
    // 11xx_xxxx message class coding: bits 5-4
    (4, [7, 7, 16, 8]),
];

/// Bits per character selected by a DCS byte
pub fn bits_per_char(dcs: u8) -> u8 {
    let (shift, widths) = CODING_GROUPS[usize::from(dcs >> 6)];
    widths[usize::from((dcs >> shift) & 0b11)]
}

/// Map a DCS byte to the text codec that decodes its user data
pub fn detect_encoding_kind(dcs: u8) -> DecodeResult<EncodingKind> {
    let bits = bits_per_char(dcs);
    EncodingKind::try_from(bits).map_err(|_| DecodeError::UnknownEncoding { dcs, bits })
}

/// Message class, from DCS bits 1-0
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageClass {
    /// Class 0: displayed immediately, not stored
    Flash = 0,
    /// Class 1: mobile equipment specific
    MobileEquipment = 1,
    /// Class 2: SIM specific
    SimSpecific = 2,
    /// Class 3: terminal equipment specific
    TerminalEquipment = 3,
}

impl MessageClass {
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

/// Raw TP-DCS byte with typed accessors
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataCodingScheme(pub u8);

impl DataCodingScheme {
    pub fn to_byte(&self) -> u8 {
        self.0
    }

    pub fn encoding(&self) -> DecodeResult<EncodingKind> {
        detect_encoding_kind(self.0)
    }

    /// Message class, present only when bit 4 is set
    pub fn message_class(&self) -> Option<MessageClass> {
        if self.0 & 0x10 == 0 {
            return None;
        }
        MessageClass::try_from(self.0 & 0b11).ok()
    }

    /// "class N" when a class is present, empty otherwise
    pub fn class_descriptor(&self) -> String {
        self.message_class()
            .map(|class| format!("class {}", class.number()))
            .unwrap_or_default()
    }
}

impl From<u8> for DataCodingScheme {
    fn from(value: u8) -> Self {
        DataCodingScheme(value)
    }
}
