//! Core types for the job supervisor
//!
//! This module defines the fundamental types used by the supervisor:
//! - Job descriptors and launch specs (compile-time configuration)
//! - Job runtime records (per-thread bookkeeping)
//! - Creation errors and run status

use core::fmt;

use super::trace::TraceQueue;
use crate::core::arena::ArenaError;
use crate::platform::traits::{Kernel, ThreadHandle, Tick};
use crate::platform::PlatformError;

/// Thread entry routine
///
/// Receives the job's runtime record and the kernel. On target it never returns.
pub type JobMain = fn(&mut JobRuntimeRecord, &dyn Kernel);

/// Optional one-shot initializer, run right after a successful thread creation
pub type JobInit = fn();

/// Job identifiers
///
/// Launch specs refer to descriptors through these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum JobId {
    Gatekeeper = 0,
    Job2Ms,
    Job10Ms,
    Job25Ms,
    Job50Ms,
    Job100Ms,
    Job500Ms,
    Job1000Ms,
    Job2000Ms,
    Job5000Ms,
    UartGatekeeper,
    I2cGatekeeper,
    SpiGatekeeper,
}

/// Processor core identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreId(pub u8);

/// Static description of a job
#[derive(Clone, Copy)]
pub struct JobDescriptor {
    pub id: JobId,
    pub main: JobMain,
    pub init: Option<JobInit>,
    /// Stack size in bytes
    pub stack_size: usize,
    pub name: &'static str,
}

/// Resources handed to a job at creation
#[derive(Clone, Copy, Default)]
pub struct JobResources {
    /// Serial trace queue the job may post to (the gatekeeper drains it)
    pub trace: Option<&'static TraceQueue>,
}

impl fmt::Debug for JobResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobResources")
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

/// One scheduled instance of a job
#[derive(Debug, Clone, Copy)]
pub struct JobLaunchSpec {
    pub core: CoreId,
    pub id: JobId,
    pub enabled: bool,
    /// Period in milliseconds (one tick per millisecond)
    pub period_ms: u32,
    /// Kernel priority (higher runs first)
    pub priority: u8,
    pub resources: JobResources,
}

/// Run state of a job thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JobState {
    /// Record zeroed, thread not started
    None,
    /// `begin_run` captured the reference tick
    Initializing,
    /// At least one `end_run` completed
    Running,
}

/// Outcome of thread creation, set once by the supervisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CreationStatus {
    Pending,
    Created,
    Failed,
}

/// Why a job could not be created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CreateError {
    /// Stack did not fit in the core's arena
    Arena(ArenaError),
    /// Kernel refused the thread
    Kernel(PlatformError),
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateError::Arena(e) => write!(f, "{}", e),
            CreateError::Kernel(e) => write!(f, "{}", e),
        }
    }
}

/// Result of one `end_run`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunStatus {
    OnTime { elapsed: u32 },
    /// Elapsed ticks exceeded the period. Reported only.
    Overrun { elapsed: u32 },
}

impl RunStatus {
    pub fn is_overrun(&self) -> bool {
        matches!(self, RunStatus::Overrun { .. })
    }
}

/// Per-job runtime bookkeeping
///
/// Populated once by the supervisor at creation, then written only by the
/// job's own thread.
#[derive(Debug, Clone, Copy)]
pub struct JobRuntimeRecord {
    pub id: Option<JobId>,
    pub name: &'static str,
    pub core: CoreId,
    pub priority: u8,
    /// True once the supervisor assigned creation data to this record
    pub valid: bool,
    /// Period in ticks
    pub period: u32,
    pub handle: Option<ThreadHandle>,
    /// Reference tick for elapsed time and the absolute-deadline wait
    pub start_tick: Tick,
    pub error: Option<CreateError>,
    /// Completed iterations (wraps)
    pub call_count: u32,
    pub state: JobState,
    pub creation: CreationStatus,
    /// Accumulated elapsed ticks across all iterations
    pub busy_ticks: u64,
    pub overruns: u32,
    pub resources: JobResources,
}

impl JobRuntimeRecord {
    /// Zeroed record
    pub const EMPTY: Self = Self {
        id: None,
        name: "",
        core: CoreId(0),
        priority: 0,
        valid: false,
        period: 0,
        handle: None,
        start_tick: 0,
        error: None,
        call_count: 0,
        state: JobState::None,
        creation: CreationStatus::Pending,
        busy_ticks: 0,
        overruns: 0,
        resources: JobResources { trace: None },
    };

    /// Capture `now` as the reference tick
    pub fn begin_run(&mut self, now: Tick) {
        self.start_tick = now;
        self.state = JobState::Initializing;
    }

    /// Close one iteration
    ///
    /// Elapsed time is measured from the reference tick with wrapping
    /// subtraction, so a tick counter that rolled over is handled. A zero
    /// period makes every iteration with elapsed time an overrun.
    pub fn end_run(&mut self, now: Tick) -> RunStatus {
        self.state = JobState::Running;
        self.call_count = self.call_count.wrapping_add(1);

        let elapsed = now.wrapping_sub(self.start_tick);
        self.busy_ticks = self.busy_ticks.wrapping_add(u64::from(elapsed));

        if elapsed > self.period {
            self.overruns = self.overruns.wrapping_add(1);
            RunStatus::Overrun { elapsed }
        } else {
            RunStatus::OnTime { elapsed }
        }
    }
}

impl Default for JobRuntimeRecord {
    fn default() -> Self {
        Self::EMPTY
    }
}
