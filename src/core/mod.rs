//! Core firmware functionality
//!
//! This module contains the stack arena, the periodic job supervisor and the
//! boot hand-off that ties them to the kernel.

pub mod arena;
pub mod boot;
pub mod logging;
pub mod scheduler;
