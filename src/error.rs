//! Error types for the subnet calculator.

use thiserror::Error;

/// Every failure the calculator can report.
///
/// Each variant carries the raw input that caused it so callers can match on
/// the kind without parsing the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("invalid netmask: {input}{}", reason_suffix(.reason))]
    InvalidMask { input: String, reason: MaskReason },

    #[error("invalid prefix length: {input}{}", prefix_reason_suffix(.reason))]
    InvalidPrefix { input: String, reason: MaskReason },

    #[error("start address {start} must be less than or equal to end address {end}")]
    InvalidRange { start: String, end: String },

    #[error("IPv6 is not supported for this operation: {0}")]
    UnsupportedFamily(String),

    #[error("requested subnet sizes exceed available space ({required} > {available})")]
    CapacityExceeded { required: u64, available: u64 },
}

/// Why a mask or prefix was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskReason {
    /// Prefix length wider than the address.
    OutOfRange,
    /// Neither a prefix length nor (IPv4 only) a dotted-quad.
    Unparsable,
    /// Dotted-quad with a 1 bit after a 0 bit.
    NotContiguous,
}

fn reason_suffix(reason: &MaskReason) -> &'static str {
    match reason {
        MaskReason::OutOfRange => " (must be between 0 and 32)",
        MaskReason::Unparsable => "",
        MaskReason::NotContiguous => " (not contiguous)",
    }
}

fn prefix_reason_suffix(reason: &MaskReason) -> &'static str {
    match reason {
        MaskReason::OutOfRange => " (must be between 0 and 128)",
        MaskReason::Unparsable | MaskReason::NotContiguous => "",
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
