//! Mock UART implementation for testing

use crate::platform::{
    error::UartError,
    traits::{UartConfig, UartInterface},
    PlatformError, Result,
};
use core::cell::RefCell;
use std::vec::Vec;

/// Mock UART implementation
///
/// Captures transmitted bytes in memory so tests can inspect reply frames
/// without hardware.
///
/// # Example
///
/// ```ignore
/// use rffe_firmware::platform::mock::MockUart;
/// use rffe_firmware::platform::traits::UartInterface;
///
/// let mut uart = MockUart::new(Default::default());
///
/// uart.write_all(b"Hello").unwrap();
/// assert_eq!(uart.tx_buffer(), b"Hello");
/// ```
#[derive(Debug)]
pub struct MockUart {
    config: UartConfig,
    tx_buffer: RefCell<Vec<u8>>,
    /// Largest chunk accepted per `write` call (0 = unlimited)
    chunk_limit: usize,
    fail_writes: bool,
}

impl MockUart {
    /// Create a new mock UART
    pub fn new(config: UartConfig) -> Self {
        Self {
            config,
            tx_buffer: RefCell::new(Vec::new()),
            chunk_limit: 0,
            fail_writes: false,
        }
    }

    /// Get transmitted data (for test verification)
    pub fn tx_buffer(&self) -> Vec<u8> {
        self.tx_buffer.borrow().clone()
    }

    /// Clear transmit buffer
    pub fn clear_tx_buffer(&mut self) {
        self.tx_buffer.borrow_mut().clear();
    }

    /// Accept at most `limit` bytes per `write` call
    pub fn set_chunk_limit(&mut self, limit: usize) {
        self.chunk_limit = limit;
    }

    /// Make every subsequent write fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Get current baud rate
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

impl UartInterface for MockUart {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        if self.fail_writes {
            return Err(PlatformError::Uart(UartError::WriteFailed));
        }
        let len = match self.chunk_limit {
            0 => data.len(),
            limit => data.len().min(limit),
        };
        self.tx_buffer.borrow_mut().extend_from_slice(&data[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_uart_write_all_in_chunks() {
        let mut uart = MockUart::new(UartConfig::default());
        uart.set_chunk_limit(3);
        uart.write_all(b"\x0211003C\x03").unwrap();
        assert_eq!(uart.tx_buffer(), b"\x0211003C\x03");
    }

    #[test]
    fn test_mock_uart_write_failure() {
        let mut uart = MockUart::new(UartConfig::default());
        uart.set_fail_writes(true);
        assert_eq!(
            uart.write_all(b"abc"),
            Err(PlatformError::Uart(UartError::WriteFailed))
        );
        assert!(uart.tx_buffer().is_empty());
    }

    #[test]
    fn test_mock_uart_unlimited_chunk() {
        let mut uart = MockUart::new(UartConfig::default());
        uart.set_chunk_limit(0);
        assert_eq!(uart.write(b"xyz").unwrap(), 3);
        assert_eq!(uart.tx_buffer(), b"xyz");
    }

    #[test]
    fn test_mock_uart_default_config() {
        let uart = MockUart::new(UartConfig::default());
        assert_eq!(uart.baud_rate(), 115200);
    }

    #[test]
    fn test_mock_uart_clear_tx_buffer() {
        let mut uart = MockUart::new(UartConfig::default());
        uart.write_all(b"ok").unwrap();
        uart.clear_tx_buffer();
        assert!(uart.tx_buffer().is_empty());
    }
}
