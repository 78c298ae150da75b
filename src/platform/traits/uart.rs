//! UART interface trait
//!
//! This module defines the UART interface the protocol engine transmits through.

use crate::platform::{error::UartError, PlatformError, Result};

/// UART peripheral index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0 = 0,
    Uart1,
    Uart2,
    Uart3,
}

/// UART carrying the RS-485 command/query link
pub const RS485_UART: UartId = UartId::Uart0;

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    /// Data bits (typically 8)
    pub data_bits: u8,
    /// Parity mode
    pub parity: UartParity,
    /// Stop bits
    pub stop_bits: UartStopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            data_bits: 8,
            parity: UartParity::None,
            stop_bits: UartStopBits::One,
        }
    }
}

/// UART parity modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartParity {
    /// No parity
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

/// UART stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartStopBits {
    /// One stop bit
    One,
    /// Two stop bits
    Two,
}

/// UART transmit interface
///
/// Platform implementations must provide this interface for reply frames.
///
/// # Safety Invariants
///
/// - UART peripheral must be initialized before use
/// - Only one owner per UART peripheral instance (the protocol gatekeeper)
/// - Reception happens in interrupt context and never goes through this trait
pub trait UartInterface {
    /// Write data to UART
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the write operation fails.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Flush transmit buffer
    ///
    /// Blocks until all pending transmit data has been sent.
    fn flush(&mut self) -> Result<()>;

    /// Write the whole buffer, then flush
    ///
    /// A write that makes no progress is reported as `UartError::WriteFailed`.
    fn write_all(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let written = self.write(data)?;
            if written == 0 {
                return Err(PlatformError::Uart(UartError::WriteFailed));
            }
            data = &data[written.min(data.len())..];
        }
        self.flush()
    }
}
