//! Mock kernel implementation for testing

use crate::core::scheduler::types::JobMain;
use crate::platform::{
    error::KernelError,
    traits::{Kernel, ThreadHandle, ThreadRequest, Tick},
    PlatformError, Result,
};
use core::cell::Cell;
use std::vec::Vec;

/// Record of one `create_thread` call
#[derive(Clone, Copy)]
pub struct CreatedThread {
    pub handle: ThreadHandle,
    pub entry: JobMain,
    pub name: &'static str,
    pub stack_len: usize,
    pub stack_addr: usize,
    pub priority: u8,
    pub record: usize,
}

impl core::fmt::Debug for CreatedThread {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CreatedThread")
            .field("handle", &self.handle)
            .field("name", &self.name)
            .field("stack_len", &self.stack_len)
            .field("priority", &self.priority)
            .field("record", &self.record)
            .finish()
    }
}

/// Mock kernel
///
/// Simulated tick counter plus a log of created threads. `wait_until` jumps the
/// tick counter forward to the deadline instead of sleeping.
#[derive(Debug, Default)]
pub struct MockKernel {
    tick: Cell<Tick>,
    waits: Cell<u32>,
    threads: Vec<CreatedThread>,
    reject: Vec<&'static str>,
    scheduler_started: bool,
    fail_scheduler: bool,
}

impl MockKernel {
    /// Create a new mock kernel with the tick counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the tick counter (wrapping)
    pub fn advance(&self, ticks: u32) {
        self.tick.set(self.tick.get().wrapping_add(ticks));
    }

    /// Set the tick counter
    pub fn set_tick(&self, tick: Tick) {
        self.tick.set(tick);
    }

    /// Refuse to create the thread named `name`
    pub fn reject_thread(&mut self, name: &'static str) {
        self.reject.push(name);
    }

    /// Make `start_scheduler` fail
    pub fn set_fail_scheduler(&mut self, fail: bool) {
        self.fail_scheduler = fail;
    }

    /// Threads created so far, in creation order
    pub fn threads(&self) -> &[CreatedThread] {
        &self.threads
    }

    /// Number of `wait_until` calls
    pub fn wait_count(&self) -> u32 {
        self.waits.get()
    }

    /// Whether `start_scheduler` succeeded
    pub fn scheduler_started(&self) -> bool {
        self.scheduler_started
    }
}

impl Kernel for MockKernel {
    fn create_thread(&mut self, request: ThreadRequest<'_>) -> Result<ThreadHandle> {
        if self.reject.contains(&request.name) {
            return Err(PlatformError::Kernel(KernelError::OutOfMemory));
        }
        if request.stack.is_empty() {
            return Err(PlatformError::Kernel(KernelError::InvalidStack));
        }

        let handle = ThreadHandle(self.threads.len() as u16);
        self.threads.push(CreatedThread {
            handle,
            entry: request.entry,
            name: request.name,
            stack_len: request.stack.len(),
            stack_addr: request.stack.as_ptr() as usize,
            priority: request.priority,
            record: request.record,
        });
        Ok(handle)
    }

    fn current_tick(&self) -> Tick {
        self.tick.get()
    }

    fn wait_until(&self, reference: &mut Tick, period: u32) {
        *reference = reference.wrapping_add(period);
        self.waits.set(self.waits.get() + 1);

        // Deadline still ahead: sleep until it. Already passed: return at once.
        let now = self.tick.get();
        if (reference.wrapping_sub(now) as i32) > 0 {
            self.tick.set(*reference);
        }
    }

    fn start_scheduler(&mut self) -> Result<()> {
        if self.fail_scheduler {
            return Err(PlatformError::Kernel(KernelError::SchedulerReturned));
        }
        self.scheduler_started = true;
        Ok(())
    }
}
