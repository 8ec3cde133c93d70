// ABOUTME: Service-centre timestamp decoded from the 7-byte semi-octet TP-SCTS layout
// ABOUTME: Renders as YYYY-MM-DD HH:MM:SS ±HH:MM with a quarter-hour UTC offset

use std::fmt;

/// UTC offset in quarter hours, with an explicit sign so "-00:00" survives
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UtcOffset {
    pub negative: bool,
    pub quarter_hours: u8,
}

impl UtcOffset {
    pub fn hours(&self) -> u8 {
        self.quarter_hours / 4
    }

    pub fn minutes(&self) -> u8 {
        (self.quarter_hours % 4) * 15
    }

    /// Signed offset in minutes
    pub fn total_minutes(&self) -> i32 {
        let minutes = i32::from(self.quarter_hours) * 15;
        if self.negative { -minutes } else { minutes }
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { '-' } else { '+' };
        write!(f, "{sign}{:02}:{:02}", self.hours(), self.minutes())
    }
}

/// A decoded TP-SCTS / TP-DT value
///
/// Components are taken as-is from the BCD digits; out-of-range values from corrupt
/// input are kept rather than rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SmsTimestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub offset: UtcOffset,
}

impl fmt::Display for SmsTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} {}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.offset
        )
    }
}
