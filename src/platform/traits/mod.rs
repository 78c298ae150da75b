//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod kernel;
pub mod uart;

// Re-export trait interfaces
pub use kernel::{Kernel, ThreadHandle, ThreadRequest, Tick};
pub use uart::{UartConfig, UartId, UartInterface, UartParity, UartStopBits, RS485_UART};
