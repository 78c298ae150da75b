//! Protocol error types

use core::fmt;

use super::frame::FrameError;
use crate::platform::PlatformError;

/// Result type for protocol operations
pub type Result<T> = core::result::Result<T, ProtocolError>;

/// Protocol errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Received buffer held no valid frame
    Frame(FrameError),
    /// Reply payload longer than the packet allows
    PayloadTooLong { len: usize },
    /// Reply payload contains non-printable bytes
    PayloadNotAscii,
    /// Reply could not be written to the UART
    Transmit(PlatformError),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Frame(e) => write!(f, "Frame rejected: {}", e),
            ProtocolError::PayloadTooLong { len } => {
                write!(f, "Payload too long: {} bytes", len)
            }
            ProtocolError::PayloadNotAscii => write!(f, "Payload is not printable ASCII"),
            ProtocolError::Transmit(e) => write!(f, "Transmit failed: {}", e),
        }
    }
}

impl From<FrameError> for ProtocolError {
    fn from(e: FrameError) -> Self {
        ProtocolError::Frame(e)
    }
}

impl From<PlatformError> for ProtocolError {
    fn from(e: PlatformError) -> Self {
        ProtocolError::Transmit(e)
    }
}
