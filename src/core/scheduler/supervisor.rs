//! Job supervisor
//!
//! Turns the static descriptor and launch tables into kernel threads. Runs once
//! per core, before the scheduler starts:
//!
//! 1. `initialize()` zeroes every runtime record and the stack arena
//! 2. `create_jobs(core)` carves a stack per job, fills its record and asks the
//!    kernel for a thread; descriptor init routines run right after creation
//!
//! One job failing does not stop the others. The aggregate result reports how
//! many failed.

use core::fmt;

use super::config::ms_to_ticks;
use super::registry::{find_descriptor, launch_specs_for};
use super::types::{
    CoreId, CreateError, CreationStatus, JobDescriptor, JobLaunchSpec, JobRuntimeRecord,
};
use crate::core::arena::StackArena;
use crate::platform::traits::{Kernel, ThreadRequest};

/// Supervisor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SupervisorError {
    /// Fewer runtime records than launch specs
    RecordTableTooSmall { needed: usize, available: usize },
    /// At least one job could not be created
    PartialFailure { created: usize, failed: usize },
}

impl fmt::Display for SupervisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupervisorError::RecordTableTooSmall { needed, available } => write!(
                f,
                "Runtime record table too small: {} needed, {} available",
                needed, available
            ),
            SupervisorError::PartialFailure { created, failed } => write!(
                f,
                "Job creation incomplete: {} created, {} failed",
                created, failed
            ),
        }
    }
}

/// Job supervisor for one core
pub struct Supervisor<'a> {
    descriptors: &'a [JobDescriptor],
    specs: &'a [JobLaunchSpec],
    records: &'a mut [JobRuntimeRecord],
    arena: StackArena<'a>,
}

impl<'a> Supervisor<'a> {
    /// Bind the tables, the record storage and the core's stack region
    ///
    /// # Errors
    ///
    /// `RecordTableTooSmall` if `records` cannot hold one record per launch spec.
    pub fn new(
        descriptors: &'a [JobDescriptor],
        specs: &'a [JobLaunchSpec],
        records: &'a mut [JobRuntimeRecord],
        stack_region: &'a mut [u8],
    ) -> Result<Self, SupervisorError> {
        if records.len() < specs.len() {
            return Err(SupervisorError::RecordTableTooSmall {
                needed: specs.len(),
                available: records.len(),
            });
        }

        Ok(Self {
            descriptors,
            specs,
            records,
            arena: StackArena::new(stack_region),
        })
    }

    /// Zero every runtime record and the stack arena
    pub fn initialize(&mut self) {
        self.records.fill(JobRuntimeRecord::EMPTY);
        self.arena.reset();
    }

    /// Create every enabled job bound to `core`
    ///
    /// Launch specs without a descriptor are skipped silently. Returns the
    /// number of jobs created.
    ///
    /// # Errors
    ///
    /// `PartialFailure` if any stack allocation or thread creation failed. The
    /// remaining jobs are still created.
    pub fn create_jobs(
        &mut self,
        core: CoreId,
        kernel: &mut dyn Kernel,
    ) -> Result<usize, SupervisorError> {
        let mut created = 0;
        let mut failed = 0;

        for (index, spec) in launch_specs_for(self.specs, core) {
            let Some(desc) = find_descriptor(self.descriptors, spec.id) else {
                crate::log_debug!("No descriptor for {:?}, skipped", spec.id);
                continue;
            };

            let record = &mut self.records[index];
            record.id = Some(spec.id);
            record.name = desc.name;
            record.core = spec.core;

            let stack = match self.arena.allocate(desc.stack_size) {
                Ok(stack) => stack,
                Err(e) => {
                    crate::log_error!("{}: stack allocation failed: {:?}", desc.name, e);
                    record.error = Some(CreateError::Arena(e));
                    record.creation = CreationStatus::Failed;
                    failed += 1;
                    continue;
                }
            };

            record.priority = spec.priority;
            record.period = ms_to_ticks(spec.period_ms);
            record.resources = spec.resources;
            record.valid = true;

            let request = ThreadRequest {
                entry: desc.main,
                name: desc.name,
                stack,
                priority: spec.priority,
                record: index,
            };

            match kernel.create_thread(request) {
                Ok(handle) => {
                    record.handle = Some(handle);
                    record.creation = CreationStatus::Created;
                    created += 1;
                    crate::log_info!(
                        "Created {} (period {} ms, priority {})",
                        desc.name,
                        spec.period_ms,
                        spec.priority
                    );

                    if let Some(init) = desc.init {
                        init();
                    }
                }
                Err(e) => {
                    crate::log_error!("{}: thread creation failed: {:?}", desc.name, e);
                    record.error = Some(CreateError::Kernel(e));
                    record.creation = CreationStatus::Failed;
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            Err(SupervisorError::PartialFailure { created, failed })
        } else {
            Ok(created)
        }
    }

    /// All runtime records, indexed like the launch specs
    pub fn records(&self) -> &[JobRuntimeRecord] {
        self.records
    }

    /// Runtime record lent to the job thread created for launch spec `index`
    pub fn record_mut(&mut self, index: usize) -> Option<&mut JobRuntimeRecord> {
        self.records.get_mut(index)
    }

    /// Bytes of the stack arena consumed so far
    pub fn arena_used(&self) -> usize {
        self.arena.used()
    }
}
