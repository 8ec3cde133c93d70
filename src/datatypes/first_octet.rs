// ABOUTME: First octet of a TP-PDU: message type indicator plus the per-type flag bits
// ABOUTME: Bit 3 carries loop-prevention or validity-period-format depending on direction

use crate::codec::decompose_bits;
use num_enum::TryFromPrimitive;

/// TP-MTI, first octet bits 1-0
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// SMS-DELIVER
    Deliver = 0b00,
    /// SMS-SUBMIT
    Submit = 0b01,
    /// SMS-STATUS-REPORT
    StatusReport = 0b10,
    Reserved = 0b11,
}

/// Raw first octet with named flag accessors
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FirstOctet {
    raw: u8,
    bits: [bool; 8],
}

impl FirstOctet {
    pub fn new(raw: u8) -> Self {
        Self {
            raw,
            bits: decompose_bits(raw),
        }
    }

    pub fn to_byte(&self) -> u8 {
        self.raw
    }

    pub fn message_type(&self) -> MessageType {
        MessageType::try_from(self.raw & 0b11).unwrap_or(MessageType::Reserved)
    }

    /// Bit 0
    pub fn is_submit(&self) -> bool {
        self.bits[0]
    }

    /// Bit 1
    pub fn is_command_or_status_report(&self) -> bool {
        self.bits[1]
    }

    /// Bit 2: TP-RD on submit, TP-MMS on deliver and status report
    pub fn reject_duplicates_or_more_messages(&self) -> bool {
        self.bits[2]
    }

    /// Bit 3 read as TP-LP
    pub fn loop_prevention(&self) -> bool {
        self.bits[3]
    }

    /// Bit 3 read as the low TP-VPF bit
    pub fn validity_period_format(&self) -> bool {
        self.bits[3]
    }

    /// Bit 4: a relative validity period byte follows in SMS-SUBMIT
    pub fn validity_period_follows(&self) -> bool {
        self.bits[4]
    }

    /// Bit 5: TP-SRR / TP-SRI / TP-SRQ
    pub fn status_report_requested(&self) -> bool {
        self.bits[5]
    }

    /// Bit 6: TP-UDHI
    pub fn has_user_data_header(&self) -> bool {
        self.bits[6]
    }

    /// Bit 7: TP-RP
    pub fn reply_path(&self) -> bool {
        self.bits[7]
    }
}

impl From<u8> for FirstOctet {
    fn from(raw: u8) -> Self {
        FirstOctet::new(raw)
    }
}
