// ABOUTME: TP-ST delivery status codes carried by SMS-STATUS-REPORT
// ABOUTME: Groups codes into completed, temporary-error and permanent-error ranges

use num_enum::TryFromPrimitive;

#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    // Short message transaction completed
    ReceivedBySme = 0x00,
    ForwardedUnconfirmed = 0x01,
    ReplacedBySc = 0x02,

    // Temporary error, SC still trying to transfer SM
    Congestion = 0x20,
    SmeBusy = 0x21,
    NoResponseFromSme = 0x22,
    ServiceRejected = 0x23,
    QualityOfServiceNotAvailable = 0x24,
    ErrorInSme = 0x25,

    // Permanent error, SC is not making any more transfer attempts
    RemoteProcedureError = 0x40,
    IncompatibleDestination = 0x41,
    ConnectionRejectedBySme = 0x42,
    NotObtainable = 0x43,
    QualityOfServiceNotAvailablePermanent = 0x44,
    NoInterworkingAvailable = 0x45,
    ValidityPeriodExpired = 0x46,
    DeletedByOriginatingSme = 0x47,
    DeletedByScAdministration = 0x48,
    DoesNotExist = 0x49,

    // Temporary error, SC is not making any more transfer attempts
    CongestionNoMoreAttempts = 0x60,
    SmeBusyNoMoreAttempts = 0x61,
    NoResponseFromSmeNoMoreAttempts = 0x62,
    ServiceRejectedNoMoreAttempts = 0x63,
    QualityOfServiceNotAvailableNoMoreAttempts = 0x64,
    ErrorInSmeNoMoreAttempts = 0x65,
}

impl DeliveryStatus {
    pub fn is_success(&self) -> bool {
        (*self as u8) < 0x20
    }

    /// The SC is still trying
    pub fn is_temporary_error(&self) -> bool {
        (0x20..0x40).contains(&(*self as u8))
    }

    /// The SC gave up
    pub fn is_permanent_error(&self) -> bool {
        (*self as u8) >= 0x40
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ranges() {
        assert!(DeliveryStatus::ReceivedBySme.is_success());
        assert!(DeliveryStatus::SmeBusy.is_temporary_error());
        assert!(DeliveryStatus::ValidityPeriodExpired.is_permanent_error());
        assert!(DeliveryStatus::CongestionNoMoreAttempts.is_permanent_error());
        assert!(!DeliveryStatus::CongestionNoMoreAttempts.is_success());
    }

    #[test]
    fn unknown_codes_do_not_convert() {
        assert_eq!(DeliveryStatus::try_from(0x46).unwrap(), DeliveryStatus::ValidityPeriodExpired);
        assert!(DeliveryStatus::try_from(0x1F).is_err());
        assert!(DeliveryStatus::try_from(0xFF).is_err());
    }
}
