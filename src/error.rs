// ABOUTME: Decode error taxonomy shared by the cursor, PDU, container and flat-record decoders
// ABOUTME: Every fatal failure carries the offending bytes or offset for diagnostics

use crate::hex::HexData;
use thiserror::Error;

/// Fatal decode failures.
///
/// Non-fatal conditions (truncated segments or records, skipped segments) are not
/// represented here; they are reported through `tracing` and decoding continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read requested more bytes than remain in the buffer
    #[error("Buffer underrun at offset {offset}: requested {requested} bytes, {remaining} remaining")]
    BufferUnderrun {
        requested: usize,
        remaining: usize,
        offset: usize,
    },

    /// The buffer is below the minimum size for the entry point
    #[error("Buffer too short: {length} bytes, need at least {minimum}")]
    TooShort { length: usize, minimum: usize },

    /// Container signature matches no known layout
    #[error("Unknown file format. First 5 bytes: {}", HexData(.signature))]
    UnknownFileFormat { signature: [u8; 5] },

    /// Data coding scheme maps to an unsupported character width
    #[error("Unknown encoding: {bits} bits per character (DCS {dcs:#04x})")]
    UnknownEncoding { dcs: u8, bits: u8 },

    /// TP-MTI value with no decode path (reserved value 3)
    #[error("Unsupported message type: {0}")]
    UnsupportedMessageType(u8),

    /// Flat-record marker is neither the empty-slot nor the live-record value
    #[error("Invalid record header {} at offset {offset}", HexData(.marker))]
    InvalidRecordHeader { marker: [u8; 2], offset: usize },
}

/// Result type alias for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;
