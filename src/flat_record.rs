// ABOUTME: Flat record file walker: 2-byte slot markers each followed by a 176-byte folder-prefixed PDU
// ABOUTME: Empty slots are skipped, live slots decoded in file order, any other marker aborts the walk

use crate::cursor::ByteCursor;
use crate::datatypes::{Folder, MessageRecord};
use crate::error::{DecodeError, DecodeResult};
use crate::pdu::PduDecoder;
use tracing::{debug, warn};

/// Size of one stored record following its marker
pub const RECORD_SIZE: usize = 176;

pub const MARKER_LEN: usize = 2;

/// Marker of an unused slot
pub const EMPTY_MARKER: [u8; MARKER_LEN] = [0xFF, 0xFF];

/// Marker of a slot holding a message
pub const LIVE_MARKER: [u8; MARKER_LEN] = [0x11, 0x11];

/// One marker and one full record
pub const MIN_FILE_LEN: usize = MARKER_LEN + RECORD_SIZE;

/// A live record and where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Index of the marker among all markers read, empty ones included
    pub slot: usize,
    pub folder: Folder,
    pub message: MessageRecord,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRecordParser {
    pdu: PduDecoder,
}

impl FlatRecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every live record in file order.
    ///
    /// An empty marker consumes only its two bytes. A live record that is nothing but
    /// padding is skipped, as is a partial final record that fails to decode; any other
    /// decode failure is returned.
    pub fn parse(&self, buf: &[u8]) -> DecodeResult<Vec<StoredRecord>> {
        if buf.len() < MIN_FILE_LEN {
            return Err(DecodeError::TooShort {
                length: buf.len(),
                minimum: MIN_FILE_LEN,
            });
        }

        let mut cursor = ByteCursor::new(buf);
        let mut records = Vec::new();
        let mut slot = 0;

        while cursor.remaining() >= MARKER_LEN {
            let offset = cursor.position();
            let marker: [u8; MARKER_LEN] = cursor.take_array()?;
            let this_slot = slot;
            slot += 1;

            match marker {
                EMPTY_MARKER => continue,
                LIVE_MARKER => {}
                _ => return Err(DecodeError::InvalidRecordHeader { marker, offset }),
            }

            let truncated = cursor.remaining() < RECORD_SIZE;
            if truncated {
                warn!(
                    slot = this_slot,
                    available = cursor.remaining(),
                    expected = RECORD_SIZE,
                    "record incomplete, attempting a partial read"
                );
            }
            let record = cursor.take_up_to(RECORD_SIZE);

            match self.pdu.decode_with_folder(record) {
                Ok((folder, message)) => {
                    debug!(slot = this_slot, %folder, length = message.length(), "decoded record");
                    records.push(StoredRecord {
                        slot: this_slot,
                        folder,
                        message,
                    });
                }
                Err(DecodeError::TooShort { .. }) => {
                    debug!(slot = this_slot, "live slot holds no PDU");
                }
                Err(err) if truncated => {
                    warn!(slot = this_slot, error = %err, "skipping undecodable partial record");
                }
                Err(err) => return Err(err),
            }
        }

        if cursor.remaining() > 0 {
            debug!(trailing = cursor.remaining(), "ignoring trailing bytes after last marker");
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // folder 0x03, deliver from +31641600986, "AB"
    const LIVE_RECORD_BODY: [u8; 29] = [
        0x03, // folder
        0x07, 0x91, 0x13, 0x26, 0x04, 0x00, 0x00, 0xF0, // SMSC
        0x04, 0x0B, 0x91, 0x13, 0x46, 0x61, 0x00, 0x89, 0xF6, // FO, sender
        0x00, 0x00, // PID, DCS
        0x21, 0x01, 0x71, 0x41, 0x32, 0x54, 0x40, // SCTS
        0x02, 0x41, // UDL and first byte of "AB"
    ];

    fn live_record(buf: &mut Vec<u8>) {
        buf.extend_from_slice(&LIVE_MARKER);
        let start = buf.len();
        buf.extend_from_slice(&LIVE_RECORD_BODY);
        buf.push(0x21);
        buf.resize(start + RECORD_SIZE, 0xFF);
    }

    #[test]
    fn single_live_record() {
        let mut buf = Vec::new();
        live_record(&mut buf);

        let records = FlatRecordParser::new().parse(&buf).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slot, 0);
        assert_eq!(records[0].folder, Folder::InboxUnread);
        assert_eq!(records[0].message.text(), "AB");
        assert_eq!(records[0].message.counterpart().to_string(), "+31641600986");
    }

    #[test]
    fn empty_markers_skip_two_bytes() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&EMPTY_MARKER);
        buf.extend_from_slice(&EMPTY_MARKER);
        live_record(&mut buf);

        let records = FlatRecordParser::new().parse(&buf).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slot, 2);
    }

    #[test]
    fn unknown_marker_is_fatal() {
        let mut buf = Vec::new();
        live_record(&mut buf);
        buf.extend_from_slice(&[0x12, 0x34]);
        buf.extend_from_slice(&[0xFF; RECORD_SIZE]);

        assert_eq!(
            FlatRecordParser::new().parse(&buf),
            Err(DecodeError::InvalidRecordHeader {
                marker: [0x12, 0x34],
                offset: MIN_FILE_LEN,
            })
        );
    }

    #[test]
    fn truncated_final_record_is_decoded() {
        let mut buf = Vec::new();
        live_record(&mut buf);
        buf.extend_from_slice(&LIVE_MARKER);
        buf.extend_from_slice(&LIVE_RECORD_BODY);
        buf.push(0x21);

        let records = FlatRecordParser::new().parse(&buf).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].slot, 1);
        assert_eq!(records[1].message.text(), "AB");
    }

    #[test]
    fn tail_cut_inside_header_keeps_earlier_records() {
        let mut buf = Vec::new();
        live_record(&mut buf);
        buf.extend_from_slice(&LIVE_MARKER);
        // folder, SMSC, first octet, then the sender length byte only
        buf.extend_from_slice(&LIVE_RECORD_BODY[..11]);

        let records = FlatRecordParser::new().parse(&buf).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slot, 0);
        assert_eq!(records[0].message.text(), "AB");
    }

    #[test]
    fn full_size_record_failure_is_fatal() {
        let mut buf = Vec::new();
        live_record(&mut buf);
        buf.extend_from_slice(&LIVE_MARKER);
        let start = buf.len();
        // reserved message type
        buf.extend_from_slice(&LIVE_RECORD_BODY[..9]);
        buf.push(0x03);
        buf.resize(start + RECORD_SIZE, 0x00);

        assert_eq!(
            FlatRecordParser::new().parse(&buf),
            Err(DecodeError::UnsupportedMessageType(3))
        );
    }

    #[test]
    fn padding_only_live_slot_is_skipped() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&LIVE_MARKER);
        buf.extend_from_slice(&[0xFF; RECORD_SIZE]);
        live_record(&mut buf);

        let records = FlatRecordParser::new().parse(&buf).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slot, 1);
    }

    #[test]
    fn too_short_file() {
        assert_eq!(
            FlatRecordParser::new().parse(&[0x11, 0x11, 0x01]),
            Err(DecodeError::TooShort {
                length: 3,
                minimum: MIN_FILE_LEN,
            })
        );
    }
}
