// ABOUTME: Stateless byte-level codecs for GSM 03.40 fields: bits, semi-octets, timestamps and text
// ABOUTME: Pure functions over borrowed bytes; the PDU decoder composes them through its cursor

use crate::datatypes::{SmsTimestamp, UtcOffset};
use crate::gsm7;

pub use crate::datatypes::detect_encoding_kind;

/// Padding value of unused PDU storage
pub const PADDING: u8 = 0xFF;

/// Semi-octet digit alphabet; 0xF is the filler nibble
const SEMI_OCTET_DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '*', '#', 'a', 'b', 'c', 'f',
];
const FILLER: char = 'f';

/// The eight bits of a byte, least significant first
pub fn decompose_bits(byte: u8) -> [bool; 8] {
    std::array::from_fn(|i| (byte >> i) & 1 == 1)
}

/// Drop trailing `0xFF` padding
pub fn strip_trailing_padding(buf: &[u8]) -> &[u8] {
    let end = buf
        .iter()
        .rposition(|&b| b != PADDING)
        .map_or(0, |last| last + 1);
    &buf[..end]
}

/// Decode semi-octet (swapped BCD) digits, low nibble first.
///
/// A filler nibble is dropped only when it is the final character.
pub fn decode_semi_octet_phone(bytes: &[u8]) -> String {
    let mut out: String = bytes
        .iter()
        .flat_map(|b| [b & 0x0F, b >> 4])
        .map(|nibble| SEMI_OCTET_DIGITS[usize::from(nibble)])
        .collect();
    if out.ends_with(FILLER) {
        out.pop();
    }
    out
}

fn swap_nibbles(byte: u8) -> u8 {
    byte.rotate_left(4)
}

/// High nibble as tens, low nibble as units
fn bcd_value(byte: u8) -> u8 {
    (byte >> 4) * 10 + (byte & 0x0F)
}

/// Decode a timezone byte already in swapped nibble order.
///
/// Bit 3 of the high nibble is the sign; the remaining seven bits are the BCD count of
/// quarter hours.
pub fn decode_timezone(byte: u8) -> UtcOffset {
    let high = byte >> 4;
    UtcOffset {
        negative: high & 0x8 != 0,
        quarter_hours: (high & 0x7) * 10 + (byte & 0x0F),
    }
}

/// Decode a 7-byte TP-SCTS. All-zero input means "no timestamp".
pub fn decode_timestamp(bytes: &[u8; 7]) -> Option<SmsTimestamp> {
    if bytes.iter().all(|&b| b == 0) {
        return None;
    }
    let [year, month, day, hour, minute, second, tz] = bytes.map(swap_nibbles);
    Some(SmsTimestamp {
        year: 2000 + u16::from(bcd_value(year)),
        month: bcd_value(month),
        day: bcd_value(day),
        hour: bcd_value(hour),
        minute: bcd_value(minute),
        second: bcd_value(second),
        offset: decode_timezone(tz),
    })
}

/// Unpack `total_units` septets from a packed stream, dropping the first `skip_units`.
///
/// Bits past the end of `bytes` read as zero. An escape septet selects the extension
/// table for the following septet and produces no output itself.
pub fn unpack_seven_bit(bytes: &[u8], skip_units: usize, total_units: usize) -> String {
    let byte_at = |i: usize| u16::from(bytes.get(i).copied().unwrap_or(0));
    let mut out = String::with_capacity(total_units.saturating_sub(skip_units));
    let mut escaped = false;

    for unit in 0..total_units {
        let bit_pos = unit * 7;
        let index = bit_pos / 8;
        let shift = bit_pos % 8;
        let pair = byte_at(index) | (byte_at(index + 1) << 8);
        let septet = ((pair >> shift) & 0x7F) as u8;

        if unit < skip_units {
            continue;
        }
        if escaped {
            out.push(gsm7::extension_char(septet));
            escaped = false;
        } else if septet == gsm7::ESCAPE {
            escaped = true;
        } else {
            out.push(gsm7::default_char(septet));
        }
    }
    out
}

/// Decode big-endian UCS-2 from `skip_octets` on. Lone surrogates and a dangling odd
/// byte become U+FFFD.
pub fn decode_sixteen_bit_text(bytes: &[u8], skip_octets: usize) -> String {
    let body = bytes.get(skip_octets..).unwrap_or_default();
    let chunks = body.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| u16::from_be_bytes([pair[0], pair[1]]));

    let mut out: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        out.push(char::REPLACEMENT_CHARACTER);
    }
    out
}

/// Decode raw octets from `skip_octets` on, one code point per byte
pub fn decode_eight_bit_text(bytes: &[u8], skip_octets: usize) -> String {
    bytes
        .get(skip_octets..)
        .unwrap_or_default()
        .iter()
        .map(|&b| char::from(b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_bits_lsb_first() {
        assert_eq!(
            decompose_bits(0b1000_0101),
            [true, false, true, false, false, false, false, true]
        );
        assert_eq!(decompose_bits(0), [false; 8]);
        assert_eq!(decompose_bits(0xFF), [true; 8]);
    }

    #[test]
    fn strip_padding_only_at_end() {
        assert_eq!(strip_trailing_padding(&[1, 0xFF, 2, 0xFF, 0xFF]), &[1, 0xFF, 2]);
        assert!(strip_trailing_padding(&[0xFF; 4]).is_empty());
        assert!(strip_trailing_padding(&[]).is_empty());
    }

    #[test]
    fn semi_octet_phone_low_nibble_first() {
        assert_eq!(decode_semi_octet_phone(&[0x21, 0x43]), "1234");
        assert_eq!(decode_semi_octet_phone(&[0x13, 0x46, 0x61, 0x00, 0x89, 0xF6]), "31641600986");
    }

    #[test]
    fn semi_octet_filler_dropped_only_at_end() {
        assert_eq!(decode_semi_octet_phone(&[0x21, 0xF3]), "123");
        // mid-string filler is kept
        assert_eq!(decode_semi_octet_phone(&[0xF1, 0x32]), "1f23");
        // only one trailing filler is removed
        assert_eq!(decode_semi_octet_phone(&[0xFF]), "f");
    }

    #[test]
    fn semi_octet_extended_digits() {
        assert_eq!(decode_semi_octet_phone(&[0xBA, 0xDC, 0xFE]), "*#abc");
        assert_eq!(decode_semi_octet_phone(&[]), "");
    }

    #[test]
    fn timezone_sign_and_quarters() {
        assert_eq!(decode_timezone(0x04).to_string(), "+01:00");
        assert_eq!(decode_timezone(0x96).to_string(), "-04:00");
        assert_eq!(decode_timezone(0x22).to_string(), "+05:30");
        assert_eq!(decode_timezone(0x80).to_string(), "-00:00");
    }

    #[test]
    fn timestamp_all_zero_is_none() {
        assert_eq!(decode_timestamp(&[0; 7]), None);
    }

    #[test]
    fn timestamp_golden() {
        let raw = [0x21, 0x01, 0x71, 0x41, 0x32, 0x54, 0x40];
        let ts = decode_timestamp(&raw).unwrap();
        assert_eq!(ts.to_string(), "2012-10-17 14:23:45 +01:00");

        let raw = [0x20, 0x80, 0x62, 0x91, 0x73, 0x14, 0x08];
        let ts = decode_timestamp(&raw).unwrap();
        assert_eq!(ts.to_string(), "2002-08-26 19:37:41 -00:00");
        assert_eq!(ts.year, 2002);
        assert_eq!(ts.second, 41);
    }

    #[test]
    fn unpack_default_alphabet() {
        let packed = [0xE8, 0x32, 0x9B, 0xFD, 0x46, 0x97, 0xD9, 0xEC, 0x37];
        assert_eq!(unpack_seven_bit(&packed, 0, 10), "hellohello");

        let packed = [0xC8, 0xF7, 0x1D, 0x14, 0x96, 0x97, 0x41, 0xF9, 0x77, 0xFD, 0x07];
        assert_eq!(unpack_seven_bit(&packed, 0, 12), "How are you?");
    }

    #[test]
    fn unpack_escape_sequences() {
        // "Price 5€ [ok]": € is 1B 65, [ is 1B 3C, ] is 1B 3E
        let packed = [
            0x50, 0x79, 0x7A, 0x5C, 0x06, 0xD5, 0x36, 0x65, 0xD0, 0x86, 0xF7, 0x5E, 0x6F, 0x7C,
        ];
        assert_eq!(unpack_seven_bit(&packed, 0, 16), "Price 5€ [ok]");
    }

    #[test]
    fn unpack_skips_leading_units() {
        // six header octets followed by "Hi" aligned on the next septet boundary
        let body = [0x05, 0x00, 0x03, 0x2A, 0x02, 0x01, 0x90, 0x69];
        assert_eq!(unpack_seven_bit(&body, 7, 9), "Hi");
    }

    #[test]
    fn unpack_past_end_reads_zero_bits() {
        assert_eq!(unpack_seven_bit(&[0x41], 0, 3), "A@@");
        assert_eq!(unpack_seven_bit(&[], 0, 0), "");
    }

    #[test]
    fn unpack_unknown_extension_is_replaced() {
        // 1B 41: 'A' has no extension mapping
        let packed = [0x9B, 0x20];
        assert_eq!(unpack_seven_bit(&packed, 0, 2), "\u{FFFD}");
    }

    #[test]
    fn sixteen_bit_text() {
        let body = [0x00, 0x48, 0x00, 0x69, 0x20, 0xAC];
        assert_eq!(decode_sixteen_bit_text(&body, 0), "Hi€");
        assert_eq!(decode_sixteen_bit_text(&body, 2), "i€");
        assert_eq!(decode_sixteen_bit_text(&body, 10), "");
    }

    #[test]
    fn sixteen_bit_text_recovers_from_bad_input() {
        assert_eq!(decode_sixteen_bit_text(&[0x00, 0x41, 0x00], 0), "A\u{FFFD}");
        assert_eq!(decode_sixteen_bit_text(&[0xD8, 0x00, 0x00, 0x41], 0), "\u{FFFD}A");
        // surrogate pair
        assert_eq!(decode_sixteen_bit_text(&[0xD8, 0x3D, 0xDE, 0x00], 0), "😀");
    }

    #[test]
    fn eight_bit_text_is_latin1() {
        assert_eq!(decode_eight_bit_text(&[0x41, 0x42, 0xE9], 0), "ABé");
        assert_eq!(decode_eight_bit_text(&[0x41, 0x42, 0x43], 1), "BC");
        assert_eq!(decode_eight_bit_text(&[0x41], 4), "");
    }
}
