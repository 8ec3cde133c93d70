mod address;
mod data_coding;
mod delivery_status;
mod first_octet;
mod folder;
mod message;
mod timestamp;
mod user_data_header;

pub use address::{AddressField, NumberingPlan, ServiceCenter, TypeOfAddress, TypeOfNumber};
pub use data_coding::{
    DataCodingScheme, EncodingKind, MessageClass, bits_per_char, detect_encoding_kind,
};
pub use delivery_status::DeliveryStatus;
pub use first_octet::{FirstOctet, MessageType};
pub use folder::Folder;
pub use message::{MessageKind, MessageRecord, StatusReport, UserContent};
pub use timestamp::{SmsTimestamp, UtcOffset};
pub use user_data_header::{Concatenation, InformationElement, UserDataHeader};
