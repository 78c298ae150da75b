//! Periodic job supervisor
//!
//! Table-driven creation of a fixed job set on a preemptive kernel, with
//! per-job runtime records and wraparound-safe overrun detection.
//!
//! # Components
//!
//! - [`types`]: Descriptors, launch specs and runtime records
//! - [`config`]: The job tables for this firmware
//! - [`registry`]: Table lookups
//! - [`supervisor`]: Stack carving and thread creation
//! - [`task`]: The periodic loop every job runs
//! - [`trace`]: Serial trace queue
//! - [`monitor`]: Health reporting
//!
//! # Example
//!
//! ```rust,ignore
//! use rffe_firmware::core::scheduler::{config, JobRuntimeRecord, Supervisor};
//! use rffe_firmware::platform::mock::MockKernel;
//!
//! let mut records = [JobRuntimeRecord::EMPTY; config::MAX_JOBS];
//! let mut region = [0u8; config::CORE0_ARENA_SIZE];
//! let mut kernel = MockKernel::new();
//!
//! let mut supervisor = Supervisor::new(
//!     &config::JOB_DESCRIPTORS,
//!     &config::JOB_LAUNCH_SPECS,
//!     &mut records,
//!     &mut region,
//! )
//! .unwrap();
//! supervisor.initialize();
//! supervisor.create_jobs(config::PROCESSING_CORE, &mut kernel).unwrap();
//! ```

pub mod config;
pub mod monitor;
pub mod registry;
pub mod supervisor;
pub mod task;
pub mod tasks;
pub mod trace;
pub mod types;

pub use supervisor::{Supervisor, SupervisorError};
pub use task::{run_iteration, run_periodic};
pub use types::*;
