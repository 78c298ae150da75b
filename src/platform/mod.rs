//! Platform abstraction layer
//!
//! This module provides the kernel and UART abstractions the firmware core is
//! written against. Register-level drivers and the RTOS port live outside this
//! crate and implement these traits.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{KernelError, PlatformError, Result, UartError};
pub use traits::{Kernel, UartInterface};
