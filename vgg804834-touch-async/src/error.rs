//! Error types for the touchscreen driver.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

/// A failed bus transaction.
///
/// Carries the transport's own error kind so callers can tell a missing
/// acknowledge from arbitration loss or a bus fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError {
    /// 7-bit address the transaction was sent to.
    pub address: u8,
    /// Number of phases (write and/or read) that were requested.
    pub phases: u8,
    /// Status reported by the transport.
    pub kind: ErrorKind,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-phase transfer to {:#04x} failed: {}",
            self.phases, self.address, self.kind
        )
    }
}

/// Why the platform could not hand out the interrupt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimError {
    /// The provider of the line is not ready yet; attaching later may succeed.
    Deferred,
    /// The line exists but cannot be claimed. Carries the platform status code.
    Busy(i32),
}

impl fmt::Display for ClaimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deferred => f.write_str("interrupt line not ready, try again later"),
            Self::Busy(code) => write!(f, "interrupt line unavailable ({code})"),
        }
    }
}

/// Errors that keep a touchscreen instance from coming up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// No chip profile was resolved, or it declares zero contact points.
    MissingChipData,
    /// The interrupt line could not be claimed.
    ResourceUnavailable(ClaimError),
    /// The input subsystem rejected the event sink.
    InputRegistration,
}

impl AttachError {
    /// Returns `true` if attaching again later may succeed.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::ResourceUnavailable(ClaimError::Deferred))
    }
}

impl From<ClaimError> for AttachError {
    fn from(err: ClaimError) -> Self {
        AttachError::ResourceUnavailable(err)
    }
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingChipData => f.write_str("invalid or missing chip data"),
            Self::ResourceUnavailable(err) => write!(f, "{err}"),
            Self::InputRegistration => f.write_str("failed to register input device"),
        }
    }
}
