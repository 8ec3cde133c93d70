// ABOUTME: Offline SMS recovery: GSM 03.40 PDU decoding plus vendor container and flat-record walkers
// ABOUTME: Pure, synchronous decoding over caller-owned byte buffers; the library performs no I/O

pub mod codec;
pub mod container;
pub mod cursor;
pub mod datatypes;
pub mod error;
pub mod flat_record;
pub mod gsm7;
pub mod hex;
pub mod pdu;


pub use container::{ContainerDecoder, ContainerResult, FileFormat, FileFormatDescriptor};
pub use cursor::ByteCursor;
pub use datatypes::{
    AddressField, EncodingKind, Folder, MessageClass, MessageKind, MessageRecord, SmsTimestamp,
    UserContent,
};
pub use error::{DecodeError, DecodeResult};
pub use flat_record::{FlatRecordParser, StoredRecord};
pub use pdu::PduDecoder;

/// Decode a single SMSC-prefixed PDU.
///
/// # Examples
///
/// ```
/// use sms_recover::decode_pdu;
///
/// let pdu = [
///     0x07, 0x91, 0x13, 0x26, 0x04, 0x00, 0x00, 0xF0, // SMSC
///     0x04, 0x0B, 0x91, 0x13, 0x46, 0x61, 0x00, 0x89, 0xF6, // sender
///     0x00, 0x00, // PID, DCS
///     0x21, 0x01, 0x71, 0x41, 0x32, 0x54, 0x40, // SCTS
///     0x02, 0x41, 0x21, // "AB"
/// ];
/// let record = decode_pdu(&pdu).unwrap();
/// assert_eq!(record.text(), "AB");
/// assert_eq!(record.counterpart().to_string(), "+31641600986");
/// ```
pub fn decode_pdu(buf: &[u8]) -> DecodeResult<MessageRecord> {
    PduDecoder::new().decode(buf)
}

/// Decode a multi-segment vendor container
pub fn decode_container(buf: &[u8]) -> DecodeResult<Option<ContainerResult>> {
    ContainerDecoder::new().decode(buf)
}

/// Decode every live record of a flat record file
pub fn parse_flat_records(buf: &[u8]) -> DecodeResult<Vec<StoredRecord>> {
    FlatRecordParser::new().parse(buf)
}
