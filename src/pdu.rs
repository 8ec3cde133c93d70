// ABOUTME: Single-PDU decoder: SMSC prefix plus SMS-SUBMIT, SMS-DELIVER or SMS-STATUS-REPORT body
// ABOUTME: Each call owns a fresh cursor, so decoding is reentrant and safe to run in parallel

use crate::codec::{
    decode_eight_bit_text, decode_semi_octet_phone, decode_sixteen_bit_text, decode_timestamp,
    strip_trailing_padding, unpack_seven_bit,
};
use crate::cursor::ByteCursor;
use crate::datatypes::{
    AddressField, DataCodingScheme, EncodingKind, FirstOctet, Folder, MessageKind, MessageRecord,
    MessageType, ServiceCenter, SmsTimestamp, StatusReport, TypeOfAddress, UserContent,
    UserDataHeader,
};
use crate::error::{DecodeError, DecodeResult};
use tracing::trace;

/// Smallest PDU worth decoding: SMSC length and type bytes
pub const MIN_PDU_LEN: usize = 2;

/// Decodes one Protocol Description Unit into a [`MessageRecord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PduDecoder;

impl PduDecoder {
    pub fn new() -> Self {
        PduDecoder
    }

    /// Decode an SMSC-prefixed PDU. Trailing `0xFF` padding is ignored.
    pub fn decode(&self, buf: &[u8]) -> DecodeResult<MessageRecord> {
        let buf = strip_trailing_padding(buf);
        if buf.len() < MIN_PDU_LEN {
            return Err(DecodeError::TooShort {
                length: buf.len(),
                minimum: MIN_PDU_LEN,
            });
        }
        let mut cursor = ByteCursor::new(buf);

        let smsc = decode_service_center(&mut cursor)?;
        let first_octet = FirstOctet::new(cursor.take_byte()?);
        trace!(first_octet = first_octet.to_byte(), "decoding TP-PDU");

        let kind = match first_octet.message_type() {
            MessageType::StatusReport => decode_status_report(&mut cursor)?,
            MessageType::Deliver | MessageType::Submit => {
                decode_submit_or_deliver(&mut cursor, first_octet)?
            }
            MessageType::Reserved => {
                return Err(DecodeError::UnsupportedMessageType(first_octet.to_byte() & 0b11));
            }
        };

        Ok(MessageRecord {
            smsc,
            first_octet,
            kind,
        })
    }

    /// Decode a PDU preceded by one storage-folder byte, discarding the folder
    pub fn decode_stored(&self, buf: &[u8]) -> DecodeResult<MessageRecord> {
        self.decode_with_folder(buf).map(|(_, record)| record)
    }

    /// Decode a PDU preceded by one storage-folder byte
    pub fn decode_with_folder(&self, buf: &[u8]) -> DecodeResult<(Folder, MessageRecord)> {
        let mut cursor = ByteCursor::new(buf);
        let folder = Folder::from_byte(cursor.take_byte()?);
        let record = self.decode(cursor.take_rest())?;
        Ok((folder, record))
    }
}

fn decode_service_center(cursor: &mut ByteCursor<'_>) -> DecodeResult<ServiceCenter> {
    let length = cursor.take_byte()?;
    let type_of_address = TypeOfAddress(cursor.take_byte()?);
    let number = if length > 1 {
        decode_semi_octet_phone(cursor.take(usize::from(length) - 1)?)
    } else {
        String::new()
    };
    Ok(ServiceCenter {
        type_of_address,
        number,
    })
}

/// Address length counts semi-octet digits; the value occupies ceil(length / 2) bytes
fn decode_address(cursor: &mut ByteCursor<'_>) -> DecodeResult<AddressField> {
    let length = cursor.take_byte()?;
    let type_of_address = TypeOfAddress(cursor.take_byte()?);
    let raw = cursor.take(usize::from(length).div_ceil(2))?;
    let value = if type_of_address.is_alphanumeric() {
        unpack_seven_bit(raw, 0, usize::from(length))
    } else {
        decode_semi_octet_phone(raw)
    };
    Ok(AddressField {
        length,
        type_of_address,
        value,
    })
}

fn take_timestamp(cursor: &mut ByteCursor<'_>) -> DecodeResult<Option<SmsTimestamp>> {
    Ok(decode_timestamp(&cursor.take_array::<7>()?))
}

fn decode_submit_or_deliver(
    cursor: &mut ByteCursor<'_>,
    first_octet: FirstOctet,
) -> DecodeResult<MessageKind> {
    let is_submit = first_octet.is_submit();
    let message_ref = if is_submit {
        Some(cursor.take_byte()?)
    } else {
        None
    };

    let address = decode_address(cursor)?;
    let protocol_id = cursor.take_byte()?;
    let dcs = DataCodingScheme(cursor.take_byte()?);
    let encoding = dcs.encoding()?;

    let timestamp = if is_submit {
        if first_octet.validity_period_follows() {
            cursor.take_byte()?;
        }
        None
    } else {
        take_timestamp(cursor)?
    };

    let user_data_len = cursor.take_byte()?;
    let body = cursor.take_rest();
    trace!(
        address = %address.value,
        dcs = dcs.to_byte(),
        user_data_len,
        body_len = body.len(),
        "decoding user data"
    );

    let content = decode_user_data(
        body,
        first_octet.has_user_data_header(),
        encoding,
        user_data_len,
        protocol_id,
        dcs,
    );

    Ok(match message_ref {
        Some(message_ref) => MessageKind::Outgoing {
            recipient: address,
            message_ref,
            content,
        },
        None => MessageKind::Incoming {
            sender: address,
            timestamp,
            content,
        },
    })
}

fn decode_user_data(
    body: &[u8],
    has_header: bool,
    encoding: EncodingKind,
    user_data_len: u8,
    protocol_id: u8,
    dcs: DataCodingScheme,
) -> UserContent {
    let (udh, skip) = match body.first() {
        Some(&header_len) if has_header => {
            let skip = usize::from(header_len) + 1;
            let header = body.get(..skip).unwrap_or(body);
            (UserDataHeader::new(header.to_vec()), skip)
        }
        _ => (UserDataHeader::default(), 0),
    };

    let (text, length) = match encoding {
        EncodingKind::SixteenBit => (
            decode_sixteen_bit_text(body, skip),
            body.len().saturating_sub(skip) / 2,
        ),
        EncodingKind::EightBit => (
            decode_eight_bit_text(body, skip),
            usize::from(user_data_len).saturating_sub(skip),
        ),
        EncodingKind::SevenBit => (
            // septets do not align to octets: a header of n octets covers ceil(8n / 7) septets
            unpack_seven_bit(body, (skip * 8).div_ceil(7), usize::from(user_data_len)),
            usize::from(user_data_len).saturating_sub(skip),
        ),
    };

    UserContent {
        protocol_id,
        dcs,
        class: dcs.message_class(),
        udh,
        text,
        length,
        encoding,
    }
}

fn decode_status_report(cursor: &mut ByteCursor<'_>) -> DecodeResult<MessageKind> {
    let message_ref = cursor.take_byte()?;
    let length = cursor.take_byte()?;
    let type_of_address = TypeOfAddress(cursor.take_byte()?);
    let value = decode_semi_octet_phone(cursor.take(usize::from(length).div_ceil(2))?);
    let timestamp = take_timestamp(cursor)?;
    let discharge_timestamp = take_timestamp(cursor)?;
    let status = cursor.take_byte()?;

    Ok(MessageKind::StatusReport(StatusReport {
        message_ref,
        recipient: AddressField {
            length,
            type_of_address,
            value,
        },
        timestamp,
        discharge_timestamp,
        status,
    }))
}
