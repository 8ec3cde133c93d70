// ABOUTME: User data header (UDH) bytes with information-element parsing
// ABOUTME: Exposes the concatenated-SMS reference for inspection; reassembly does not reorder by it

use crate::hex::HexData;

/// Concatenated short message information element
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Concatenation {
    pub reference: u16,
    pub total: u8,
    pub sequence: u8,
}

/// One information element of a UDH
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InformationElement<'a> {
    pub id: u8,
    pub data: &'a [u8],
}

/// User data header, including its leading length octet
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UserDataHeader {
    raw: Vec<u8>,
}

impl UserDataHeader {
    const CONCAT_8BIT: u8 = 0x00;
    const CONCAT_16BIT: u8 = 0x08;

    pub fn new(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Uppercase hex of the header bytes, empty when absent
    pub fn hex(&self) -> String {
        HexData(&self.raw).to_string()
    }

    /// Information elements, stopping at the first one that runs past the header
    pub fn elements(&self) -> Vec<InformationElement<'_>> {
        let body = self.raw.get(1..).unwrap_or_default();
        let mut out = Vec::new();
        let mut offset = 0;
        while let (Some(&id), Some(&len)) = (body.get(offset), body.get(offset + 1)) {
            let start = offset + 2;
            let end = start + usize::from(len);
            let Some(data) = body.get(start..end) else {
                break;
            };
            out.push(InformationElement { id, data });
            offset = end;
        }
        out
    }

    pub fn concatenation(&self) -> Option<Concatenation> {
        self.elements().into_iter().find_map(|ie| match (ie.id, ie.data) {
            (Self::CONCAT_8BIT, &[reference, total, sequence]) => Some(Concatenation {
                reference: u16::from(reference),
                total,
                sequence,
            }),
            (Self::CONCAT_16BIT, &[hi, lo, total, sequence]) => Some(Concatenation {
                reference: u16::from_be_bytes([hi, lo]),
                total,
                sequence,
            }),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_bit_concatenation() {
        let udh = UserDataHeader::new(vec![0x05, 0x00, 0x03, 0x2A, 0x02, 0x01]);
        assert_eq!(udh.hex(), "0500032A0201");
        assert_eq!(
            udh.concatenation(),
            Some(Concatenation {
                reference: 0x2A,
                total: 2,
                sequence: 1,
            })
        );
    }

    #[test]
    fn sixteen_bit_concatenation_after_other_element() {
        // port addressing IE, then 16-bit concat IE
        let udh = UserDataHeader::new(vec![
            0x0A, 0x05, 0x04, 0x0B, 0x84, 0x23, 0xF0, 0x08, 0x04, 0x12, 0x34, 0x03, 0x02,
        ]);
        let elements = udh.elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].id, 0x05);
        assert_eq!(
            udh.concatenation(),
            Some(Concatenation {
                reference: 0x1234,
                total: 3,
                sequence: 2,
            })
        );
    }

    #[test]
    fn truncated_element_is_ignored() {
        let udh = UserDataHeader::new(vec![0x05, 0x00, 0x03, 0x2A]);
        assert!(udh.elements().is_empty());
        assert_eq!(udh.concatenation(), None);
    }

    #[test]
    fn empty_header() {
        let udh = UserDataHeader::default();
        assert!(udh.is_empty());
        assert_eq!(udh.hex(), "");
        assert!(udh.elements().is_empty());
    }
}
