//! Kernel interface trait
//!
//! The preemptive kernel is an external collaborator. The supervisor only needs
//! thread creation, a tick counter, an absolute-deadline wait and the scheduler
//! hand-off, so that is all this trait exposes.

use crate::core::scheduler::types::JobMain;
use crate::platform::Result;

/// Kernel tick count
///
/// Wraps at `u32::MAX`. Elapsed time is always computed with `wrapping_sub`.
pub type Tick = u32;

/// Opaque handle returned by the kernel for a created thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThreadHandle(pub u16);

/// Everything the kernel needs to create one job thread
pub struct ThreadRequest<'a> {
    /// Thread entry routine
    pub entry: JobMain,
    /// Display name
    pub name: &'static str,
    /// Stack region carved from the core's stack arena
    pub stack: &'a mut [u8],
    /// Kernel priority (higher runs first)
    pub priority: u8,
    /// Index of the runtime record handed to `entry`
    pub record: usize,
}

/// Kernel interface trait
///
/// Object safe so that job routines can take `&dyn Kernel`.
pub trait Kernel {
    /// Create a thread
    ///
    /// The stack region in `request` belongs to the arena, which lives for the
    /// whole program on target. Ports record its base and length.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Kernel` if the thread cannot be created.
    fn create_thread(&mut self, request: ThreadRequest<'_>) -> Result<ThreadHandle>;

    /// Current tick count
    fn current_tick(&self) -> Tick;

    /// Block until `*reference + period`, then advance `*reference` by `period`
    ///
    /// Waiting against an absolute deadline keeps periodic jobs free of
    /// cumulative drift.
    fn wait_until(&self, reference: &mut Tick, period: u32);

    /// Start the scheduler
    ///
    /// On target this never returns on success.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Kernel(KernelError::SchedulerReturned)` if the
    /// scheduler could not take over the core.
    fn start_scheduler(&mut self) -> Result<()>;
}
