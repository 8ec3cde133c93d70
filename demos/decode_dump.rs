// ABOUTME: Command line dump tool: reads a phone memory dump and prints every recoverable message
// ABOUTME: Tries the vendor container first, then the flat record layout, then a single raw PDU

pub(crate) use argh::FromArgs;
use sms_recover::{
    ContainerDecoder, DecodeError, FlatRecordParser, MessageKind, MessageRecord, PduDecoder,
};
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Decode SMS messages from a container, flat record file, or raw PDU
#[derive(FromArgs)]
struct CliArgs {
    /// log decoder diagnostics down to trace level
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// treat the input as hex text instead of binary
    #[argh(switch, short = 'x')]
    hex: bool,

    /// file to decode
    #[argh(positional)]
    path: String,
}

fn parse_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(digits)
}

fn print_record(label: &str, record: &MessageRecord) {
    let direction = match &record.kind {
        MessageKind::Outgoing { .. } => "to",
        MessageKind::Incoming { .. } => "from",
        MessageKind::StatusReport(_) => "report for",
    };
    println!("{label}: {direction} {}", record.counterpart());
    if !record.smsc.number.is_empty() {
        println!("  smsc: {}", record.smsc.number);
    }
    if let Some(timestamp) = record.timestamp() {
        println!("  time: {timestamp}");
    }
    match &record.kind {
        MessageKind::StatusReport(report) => {
            println!("  status: {:#04x} ({:?})", report.status, report.delivery_status());
        }
        _ => {
            if let Some(content) = record.content() {
                println!("  encoding: {} {}", content.encoding, content.class_descriptor());
                if !content.udh.is_empty() {
                    println!("  udh: {}", content.udh.hex());
                }
            }
            println!("  length: {}", record.length());
            println!("  text: {}", record.text());
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging {
            Level::TRACE
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let raw = std::fs::read(&cli_args.path)?;
    let buf = if cli_args.hex {
        parse_hex(std::str::from_utf8(&raw)?)?
    } else {
        raw
    };

    match ContainerDecoder::new().decode(&buf) {
        Ok(Some(result)) => {
            println!(
                "{} container, {}/{} parts stored, {} decoded",
                result.format, result.parts_stored, result.parts_total, result.segments_decoded
            );
            if let Some(timestamp) = result.timestamp {
                println!("container time: {timestamp}");
            }
            print_record("message", &result.message);
            return Ok(());
        }
        Ok(None) => {
            println!("container holds no decodable segment");
            return Ok(());
        }
        Err(DecodeError::UnknownFileFormat { .. } | DecodeError::TooShort { .. }) => {}
        Err(err) => return Err(err.into()),
    }

    match FlatRecordParser::new().parse(&buf) {
        Ok(records) => {
            for record in &records {
                print_record(&format!("slot {} [{}]", record.slot, record.folder), &record.message);
            }
            println!("{} records", records.len());
            return Ok(());
        }
        Err(DecodeError::InvalidRecordHeader { .. } | DecodeError::TooShort { .. }) => {}
        Err(err) => return Err(err.into()),
    }

    let record = PduDecoder::new().decode(&buf)?;
    print_record("pdu", &record);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_input_ignores_whitespace() {
        assert_eq!(parse_hex("0B0B 0101\n00ff\n").unwrap(), [0x0B, 0x0B, 0x01, 0x01, 0x00, 0xFF]);
        assert!(parse_hex("0B0").is_err());
        assert!(parse_hex("zz").is_err());
    }
}
