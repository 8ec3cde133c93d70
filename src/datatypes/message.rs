// ABOUTME: Decoded message records: a shared base plus Outgoing, Incoming and StatusReport payloads
// ABOUTME: Records are immutable values once returned by a decoder

use crate::datatypes::{
    AddressField, DataCodingScheme, DeliveryStatus, EncodingKind, FirstOctet, MessageClass,
    ServiceCenter, SmsTimestamp, UserDataHeader,
};

/// Decoded text body shared by SMS-SUBMIT and SMS-DELIVER
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserContent {
    pub protocol_id: u8,
    pub dcs: DataCodingScheme,
    pub class: Option<MessageClass>,
    pub udh: UserDataHeader,
    pub text: String,
    /// Logical character count as reported by the user data length
    pub length: usize,
    pub encoding: EncodingKind,
}

impl UserContent {
    /// "class N" when the DCS carries a class, empty otherwise
    pub fn class_descriptor(&self) -> String {
        self.class
            .map(|class| format!("class {}", class.number()))
            .unwrap_or_default()
    }

    /// Append the text of a following segment
    pub fn append(&mut self, text: &str, length: usize) {
        self.text.push_str(text);
        self.length += length;
    }
}

/// SMS-STATUS-REPORT payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub message_ref: u8,
    pub recipient: AddressField,
    pub timestamp: Option<SmsTimestamp>,
    pub discharge_timestamp: Option<SmsTimestamp>,
    pub status: u8,
}

impl StatusReport {
    /// Typed status, `None` for reserved or SC-specific codes
    pub fn delivery_status(&self) -> Option<DeliveryStatus> {
        DeliveryStatus::try_from(self.status).ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// SMS-SUBMIT
    Outgoing {
        recipient: AddressField,
        message_ref: u8,
        content: UserContent,
    },
    /// SMS-DELIVER
    Incoming {
        sender: AddressField,
        timestamp: Option<SmsTimestamp>,
        content: UserContent,
    },
    StatusReport(StatusReport),
}

/// One decoded PDU
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRecord {
    pub smsc: ServiceCenter,
    pub first_octet: FirstOctet,
    pub kind: MessageKind,
}

impl MessageRecord {
    pub fn content(&self) -> Option<&UserContent> {
        match &self.kind {
            MessageKind::Outgoing { content, .. } | MessageKind::Incoming { content, .. } => {
                Some(content)
            }
            MessageKind::StatusReport(_) => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut UserContent> {
        match &mut self.kind {
            MessageKind::Outgoing { content, .. } | MessageKind::Incoming { content, .. } => {
                Some(content)
            }
            MessageKind::StatusReport(_) => None,
        }
    }

    /// Decoded text, empty for status reports
    pub fn text(&self) -> &str {
        self.content().map(|c| c.text.as_str()).unwrap_or_default()
    }

    pub fn length(&self) -> usize {
        self.content().map(|c| c.length).unwrap_or_default()
    }

    /// Service-centre timestamp, where the message type carries one
    pub fn timestamp(&self) -> Option<SmsTimestamp> {
        match &self.kind {
            MessageKind::Incoming { timestamp, .. } => *timestamp,
            MessageKind::StatusReport(report) => report.timestamp,
            MessageKind::Outgoing { .. } => None,
        }
    }

    /// Sender for incoming messages, recipient otherwise
    pub fn counterpart(&self) -> &AddressField {
        match &self.kind {
            MessageKind::Outgoing { recipient, .. } => recipient,
            MessageKind::Incoming { sender, .. } => sender,
            MessageKind::StatusReport(report) => &report.recipient,
        }
    }

    pub fn is_outgoing(&self) -> bool {
        matches!(self.kind, MessageKind::Outgoing { .. })
    }

    pub fn is_incoming(&self) -> bool {
        matches!(self.kind, MessageKind::Incoming { .. })
    }

    pub fn is_status_report(&self) -> bool {
        matches!(self.kind, MessageKind::StatusReport(_))
    }
}
