#![cfg_attr(not(test), no_std)]

//! rffe_firmware - Controller firmware for a remotely managed RF front-end
//!
//! This library provides the platform abstraction, the periodic job supervisor
//! and the ASCII command/query protocol engine used over the RS-485 link.

// Platform abstraction layer (kernel, UART)
pub mod platform;

// Core systems (stack arena, job supervisor, boot hand-off)
pub mod core;

// Communication protocols (framed ASCII command/query link)
pub mod communication;

// Host mocks need `std` even outside of unit tests
#[cfg(all(not(test), feature = "mock"))]
extern crate std;
