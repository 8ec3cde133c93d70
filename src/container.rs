// ABOUTME: Vendor container decoder: signature detection, layout-specific header, 176-byte segment walk
// ABOUTME: Segments are decoded independently and their text concatenated in file order

use crate::codec::decode_timestamp;
use crate::cursor::ByteCursor;
use crate::datatypes::{MessageRecord, SmsTimestamp};
use crate::error::{DecodeError, DecodeResult};
use crate::hex::HexData;
use crate::pdu::PduDecoder;
use std::fmt;
use tracing::{debug, warn};

/// Fixed size of one stored segment, including its status byte where the layout has one
pub const SEGMENT_SIZE: usize = 176;

pub const SIGNATURE_LEN: usize = 5;

/// Header layout of one vendor container format.
///
/// Offsets are absolute from the start of the file; `None` means the layout does not
/// carry that field and it is not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFormatDescriptor {
    pub name: &'static str,
    pub signature: [u8; SIGNATURE_LEN],
    /// Parts-total byte, immediately followed by the parts-stored byte
    pub parts_offset: Option<usize>,
    pub type_offset: Option<usize>,
    pub status_offset: Option<usize>,
    pub timestamp_offset: Option<usize>,
    /// Leading status byte of each segment
    pub segment_status_offset: Option<usize>,
    /// Start of the first SMSC block
    pub smsc_offset: usize,
}

impl FileFormatDescriptor {
    /// Filler between the 7-byte timestamp and the first segment status byte
    fn timestamp_filler(&self) -> usize {
        match (self.timestamp_offset, self.segment_status_offset) {
            (Some(ts), Some(status)) => status.saturating_sub(ts).saturating_sub(7),
            _ => 0,
        }
    }
}

/// Known container layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Sl4x,
    X55Me45,
    X55X65X75,
}

const SL4X: FileFormatDescriptor = FileFormatDescriptor {
    name: "SL4x",
    signature: [0x0B, 0x0B, 0x00, 0x00, 0x00],
    parts_offset: None,
    type_offset: None,
    status_offset: None,
    timestamp_offset: None,
    segment_status_offset: Some(5),
    smsc_offset: 6,
};

const X55_ME45: FileFormatDescriptor = FileFormatDescriptor {
    name: "X55/ME45",
    signature: [0x0B, 0x0B, 0x01, 0x01, 0x00],
    parts_offset: Some(5),
    type_offset: Some(7),
    status_offset: Some(8),
    timestamp_offset: Some(9),
    segment_status_offset: Some(16),
    smsc_offset: 17,
};

const X55_X65_X75: FileFormatDescriptor = FileFormatDescriptor {
    name: "X55/X65/X75",
    signature: [0x0B, 0x0B, 0x02, 0x0C, 0x00],
    parts_offset: Some(5),
    type_offset: Some(7),
    status_offset: Some(8),
    timestamp_offset: Some(9),
    segment_status_offset: Some(17),
    smsc_offset: 18,
};

impl FileFormat {
    pub const ALL: [FileFormat; 3] = [FileFormat::Sl4x, FileFormat::X55Me45, FileFormat::X55X65X75];

    pub fn descriptor(&self) -> &'static FileFormatDescriptor {
        match self {
            FileFormat::Sl4x => &SL4X,
            FileFormat::X55Me45 => &X55_ME45,
            FileFormat::X55X65X75 => &X55_X65_X75,
        }
    }

    pub fn from_signature(signature: &[u8; SIGNATURE_LEN]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.descriptor().signature == *signature)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

/// One logical message reassembled from a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerResult {
    pub format: FileFormat,
    pub parts_total: u8,
    pub parts_stored: u8,
    pub message_type: Option<u8>,
    pub status: Option<u8>,
    /// Container-level timestamp; takes precedence over the PDU's own
    pub timestamp: Option<SmsTimestamp>,
    pub segments_decoded: usize,
    /// First decoded segment with the text of every later segment appended
    pub message: MessageRecord,
}

impl ContainerResult {
    pub fn text(&self) -> &str {
        self.message.text()
    }

    pub fn length(&self) -> usize {
        self.message.length()
    }

    /// Container timestamp, falling back to the first segment's
    pub fn effective_timestamp(&self) -> Option<SmsTimestamp> {
        self.timestamp.or_else(|| self.message.timestamp())
    }
}

/// Header fields read ahead of the segments
struct ContainerHeader {
    format: FileFormat,
    parts_total: u8,
    parts_stored: u8,
    /// Segments to walk; exceeds `parts_total` only when the block count overflows a byte
    segment_count: usize,
    message_type: Option<u8>,
    status: Option<u8>,
    timestamp: Option<SmsTimestamp>,
}

/// Decodes multi-segment vendor container files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerDecoder {
    pdu: PduDecoder,
}

impl ContainerDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identify the layout from the leading signature
    pub fn detect(&self, buf: &[u8]) -> DecodeResult<FileFormat> {
        let mut cursor = ByteCursor::new(buf);
        read_signature(&mut cursor)
    }

    /// Decode a container into one message.
    ///
    /// Returns `Ok(None)` when no segment decodes. Segments that fail are skipped; a
    /// short final segment is decoded from the bytes available.
    pub fn decode(&self, buf: &[u8]) -> DecodeResult<Option<ContainerResult>> {
        if buf.len() <= SIGNATURE_LEN {
            return Err(DecodeError::TooShort {
                length: buf.len(),
                minimum: SIGNATURE_LEN + 1,
            });
        }
        let mut cursor = ByteCursor::new(buf);
        let header = read_header(&mut cursor)?;
        let descriptor = header.format.descriptor();

        let mut result: Option<ContainerResult> = None;
        let mut first_reference = None;

        for part in 1..=header.segment_count {
            if cursor.remaining() == 0 {
                warn!(part, parts_total = header.parts_total, "container ends before segment");
                break;
            }
            if cursor.remaining() < SEGMENT_SIZE {
                warn!(
                    part,
                    available = cursor.remaining(),
                    expected = SEGMENT_SIZE,
                    "segment incomplete, decoding anyway"
                );
            }
            let mut segment = cursor.take_up_to(SEGMENT_SIZE);
            if descriptor.segment_status_offset.is_some() {
                segment = segment.get(1..).unwrap_or_default();
            }

            let record = match self.pdu.decode(segment) {
                Ok(record) => record,
                Err(err) => {
                    warn!(part, error = %err, "skipping undecodable segment");
                    continue;
                }
            };
            debug!(part, length = record.length(), "decoded segment");

            // informational only: segments are joined in file order regardless
            let reference = record
                .content()
                .and_then(|c| c.udh.concatenation())
                .map(|c| c.reference);
            match (first_reference, reference) {
                (None, _) => first_reference = reference,
                (Some(first), Some(this)) if first != this => {
                    warn!(part, first, this, "segment concatenation reference differs");
                }
                _ => {}
            }

            match result.as_mut() {
                None => {
                    result = Some(ContainerResult {
                        format: header.format,
                        parts_total: header.parts_total,
                        parts_stored: header.parts_stored,
                        message_type: header.message_type,
                        status: header.status,
                        timestamp: header.timestamp,
                        segments_decoded: 1,
                        message: record,
                    });
                }
                Some(aggregate) => {
                    if let Some(content) = aggregate.message.content_mut() {
                        content.append(record.text(), record.length());
                    } else {
                        debug!(part, "first segment is a status report, not appending text");
                    }
                    aggregate.segments_decoded += 1;
                }
            }
        }

        Ok(result)
    }
}

fn read_signature(cursor: &mut ByteCursor<'_>) -> DecodeResult<FileFormat> {
    let signature: [u8; SIGNATURE_LEN] = cursor.take_array()?;
    let format = FileFormat::from_signature(&signature)
        .ok_or(DecodeError::UnknownFileFormat { signature })?;
    debug!(%format, signature = %HexData(&signature), "detected container format");
    Ok(format)
}

fn read_header(cursor: &mut ByteCursor<'_>) -> DecodeResult<ContainerHeader> {
    let format = read_signature(cursor)?;
    let descriptor = format.descriptor();

    let (parts_total, parts_stored, segment_count) = match descriptor.parts_offset {
        Some(_) => {
            let total = cursor.take_byte()?;
            let stored = cursor.take_byte()?;
            (total, stored, usize::from(total))
        }
        None => {
            // layouts without a parts field hold as many segments as the file has room for
            let blocks = cursor.remaining().div_ceil(SEGMENT_SIZE);
            let parts = u8::try_from(blocks).unwrap_or_else(|_| {
                warn!(blocks, reported = u8::MAX, "block count exceeds the parts field");
                u8::MAX
            });
            (parts, parts, blocks)
        }
    };
    let message_type = match descriptor.type_offset {
        Some(_) => Some(cursor.take_byte()?),
        None => None,
    };
    let status = match descriptor.status_offset {
        Some(_) => Some(cursor.take_byte()?),
        None => None,
    };
    let timestamp = match descriptor.timestamp_offset {
        Some(_) => decode_timestamp(&cursor.take_array::<7>()?),
        None => None,
    };

    let filler = descriptor.timestamp_filler();
    if filler > 0 {
        cursor.take(filler)?;
    }

    Ok(ContainerHeader {
        format,
        parts_total,
        parts_stored,
        segment_count,
        message_type,
        status,
        timestamp,
    })
}
