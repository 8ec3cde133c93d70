// ABOUTME: Type-of-address byte and decoded address fields for SMSC, sender and recipient numbers
// ABOUTME: Bits 6-4 of the TOA select numeric (semi-octet) versus alphanumeric (7-bit) decoding

use num_enum::TryFromPrimitive;
use std::fmt;

/// Type of number, TOA bits 6-4
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeOfNumber {
    Unknown = 0b000,
    International = 0b001,
    National = 0b010,
    NetworkSpecific = 0b011,
    SubscriberNumber = 0b100,
    Alphanumeric = 0b101,
    Abbreviated = 0b110,
    Reserved = 0b111,
}

/// Numbering plan identification, TOA bits 3-0
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumberingPlan {
    Unknown = 0b0000,
    Isdn = 0b0001,
    Data = 0b0011,
    Telex = 0b0100,
    National = 0b1000,
    Private = 0b1001,
    Ermes = 0b1010,
}

/// Raw type-of-address byte
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeOfAddress(pub u8);

impl TypeOfAddress {
    const TON_MASK: u8 = 0b0111_0000;
    const ALPHANUMERIC: u8 = 0b0101_0000;

    pub fn to_byte(&self) -> u8 {
        self.0
    }

    pub fn type_of_number(&self) -> TypeOfNumber {
        // all eight 3-bit values are defined
        TypeOfNumber::try_from((self.0 & Self::TON_MASK) >> 4).unwrap_or(TypeOfNumber::Unknown)
    }

    /// Numbering plan, `None` for reserved values
    pub fn numbering_plan(&self) -> Option<NumberingPlan> {
        NumberingPlan::try_from(self.0 & 0b0000_1111).ok()
    }

    pub fn is_alphanumeric(&self) -> bool {
        self.0 & Self::TON_MASK == Self::ALPHANUMERIC
    }
}

impl From<u8> for TypeOfAddress {
    fn from(value: u8) -> Self {
        TypeOfAddress(value)
    }
}

/// A decoded originator or destination address
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AddressField {
    /// Length as carried on the wire, in semi-octets; alphanumeric values unpack this many septets
    pub length: u8,
    pub type_of_address: TypeOfAddress,
    /// Decoded digits or alphanumeric text
    pub value: String,
}

impl AddressField {
    pub fn is_alphanumeric(&self) -> bool {
        self.type_of_address.is_alphanumeric()
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.type_of_address.type_of_number() == TypeOfNumber::International {
            f.write_str("+")?;
        }
        f.write_str(&self.value)
    }
}

/// Service centre prefix of a PDU
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ServiceCenter {
    pub type_of_address: TypeOfAddress,
    /// Empty when the PDU carries no SMSC number
    pub number: String,
}
