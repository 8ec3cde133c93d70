// ABOUTME: Storage-folder flag that prefixes each PDU in flat SMS.dat style record files

use std::fmt;

/// Folder a stored PDU was filed under
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Folder {
    InboxRead,
    InboxUnread,
    OutboxSent,
    OutboxUnsent,
    Other(u8),
}

impl Folder {
    pub fn from_byte(value: u8) -> Self {
        match value {
            0x01 => Folder::InboxRead,
            0x03 => Folder::InboxUnread,
            0x05 => Folder::OutboxSent,
            0x07 => Folder::OutboxUnsent,
            _ => Folder::Other(value),
        }
    }

    pub fn to_byte(&self) -> u8 {
        match self {
            Folder::InboxRead => 0x01,
            Folder::InboxUnread => 0x03,
            Folder::OutboxSent => 0x05,
            Folder::OutboxUnsent => 0x07,
            Folder::Other(value) => *value,
        }
    }

    pub fn is_inbox(&self) -> bool {
        matches!(self, Folder::InboxRead | Folder::InboxUnread)
    }

    pub fn is_outbox(&self) -> bool {
        matches!(self, Folder::OutboxSent | Folder::OutboxUnsent)
    }
}

impl From<u8> for Folder {
    fn from(value: u8) -> Self {
        Self::from_byte(value)
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Folder::InboxRead => f.write_str("inbox (read)"),
            Folder::InboxUnread => f.write_str("inbox (unread)"),
            Folder::OutboxSent => f.write_str("outbox (sent)"),
            Folder::OutboxUnsent => f.write_str("outbox (unsent)"),
            Folder::Other(value) => write!(f, "folder {value:#04x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_flags() {
        assert_eq!(Folder::from_byte(0x03), Folder::InboxUnread);
        assert!(Folder::from_byte(0x01).is_inbox());
        assert!(Folder::from_byte(0x07).is_outbox());
        assert_eq!(Folder::OutboxSent.to_byte(), 0x05);
    }

    #[test]
    fn unknown_flag_is_preserved() {
        let folder = Folder::from(0x09);
        assert_eq!(folder, Folder::Other(0x09));
        assert_eq!(folder.to_byte(), 0x09);
        assert_eq!(folder.to_string(), "folder 0x09");
    }
}
