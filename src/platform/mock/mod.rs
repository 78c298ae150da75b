//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware or an RTOS.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use rffe_firmware::platform::mock::{MockKernel, MockUart};
//! use rffe_firmware::platform::traits::{Kernel, UartInterface};
//!
//! let mut uart = MockUart::new(Default::default());
//! uart.write(b"test").unwrap();
//!
//! let kernel = MockKernel::new();
//! let mut reference = kernel.current_tick();
//! kernel.wait_until(&mut reference, 10);
//! assert_eq!(kernel.current_tick(), 10);
//! ```

#![cfg(any(test, feature = "mock"))]

mod kernel;
mod uart;

pub use kernel::{CreatedThread, MockKernel};
pub use uart::MockUart;
