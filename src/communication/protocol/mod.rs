//! RS-485 command/query protocol
//!
//! ASCII framed request/reply protocol between the host controller and the RF
//! front-end.
//!
//! # Architecture
//!
//! - **Receiver**: Interrupt-side byte assembler feeding an SPSC queue
//! - **Frame**: Scanner that finds and validates `STX ... ETX` frames
//! - **Dispatcher**: Static command/query tables keyed by sub-address, type and code
//! - **Engine**: Validate, dispatch, reply
//! - **Writer**: Ack/nak and response frame construction
//! - **Gatekeeper**: Periodic job draining the receive queue
//!
//! # Usage
//!
//! ```ignore
//! use rffe_firmware::communication::protocol::{
//!     FrameAssembler, NullFrontEnd, ProtocolEngine, ProtocolGatekeeper, RxQueue,
//! };
//!
//! let (mut producer, consumer) = queue.split();
//! // UART RX interrupt
//! assembler.push_byte(byte, &mut producer);
//! // Gatekeeper job, once per period
//! gatekeeper.service();
//! ```

pub mod codec; // Hex and ASCII helpers
pub mod crc; // CRC32 wire field
pub mod dispatcher; // Command/query tables
pub mod engine; // Request/reply engine
pub mod error; // Protocol errors
pub mod frame; // Frame scanner
pub mod gatekeeper; // Receive queue gatekeeper
pub mod handlers; // Front-end commands and queries
pub mod packet; // Wire layout
pub mod receiver; // Interrupt-side assembly
pub mod writer; // Reply construction

pub use dispatcher::{DispatchEntry, Handler, COMMAND_TABLE, QUERY_TABLE};
pub use engine::{Outcome, ProtocolEngine, ProtocolStats};
pub use error::ProtocolError;
pub use frame::{find_and_validate, Frame, FrameError};
pub use gatekeeper::ProtocolGatekeeper;
pub use handlers::{Command, FrontEnd, NullFrontEnd, Query};
pub use packet::{Packet, PacketType};
pub use receiver::{FrameAssembler, PushOutcome, RxFrame, RxQueue};
