//! Job routines referenced by the descriptor table
//!
//! - `gatekeeper`: drains the serial trace queue
//! - `periodic`: the fixed-rate application jobs

pub mod gatekeeper;
pub mod periodic;
