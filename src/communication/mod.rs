//! Communication Protocols
//!
//! # Protocols
//!
//! - **RS-485 command/query**: ASCII framed link to the host controller
//!   - Commands are acknowledged, queries answered with a response frame
//!   - CRC32 over every frame
//!
//! # Transport
//!
//! - UART (115200 baud, 8N1), half-duplex RS-485

pub mod protocol;
