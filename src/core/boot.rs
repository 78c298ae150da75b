//! Boot hand-off
//!
//! Sequence for one core: zero the job records and arena, create the job
//! threads, then hand the core to the kernel scheduler. The core state records
//! how far the sequence got.

use core::fmt;

use super::scheduler::{CoreId, Supervisor, SupervisorError};
use crate::platform::{traits::Kernel, PlatformError};

/// How far the boot sequence got on a core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoreState {
    /// Not booted yet
    None,
    /// Boot sequence entered
    MainStart,
    /// Records and stack arena initialized
    SchedOk,
    /// Jobs created, scheduler about to take over
    AppOk,
    /// Scheduler returned control
    SchedFail,
}

/// Per-core boot bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreInfo {
    pub core: CoreId,
    pub state: CoreState,
}

impl CoreInfo {
    pub const fn new(core: CoreId) -> Self {
        Self {
            core,
            state: CoreState::None,
        }
    }
}

/// Boot errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// No job could be created; the scheduler was not started
    NoJobs(SupervisorError),
    /// The scheduler returned or refused to start
    Scheduler(PlatformError),
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::NoJobs(e) => write!(f, "No jobs created: {}", e),
            BootError::Scheduler(e) => write!(f, "Scheduler failed: {}", e),
        }
    }
}

/// Run the boot sequence for `info.core`
///
/// Partial job creation failure does not stop the boot: the jobs that were
/// created still run. Only a core with no job at all keeps the scheduler off.
///
/// On target a successful `start_scheduler` never returns, so `Ok` is only
/// observed with a host kernel.
pub fn boot_core(
    info: &mut CoreInfo,
    supervisor: &mut Supervisor<'_>,
    kernel: &mut dyn Kernel,
) -> Result<(), BootError> {
    info.state = CoreState::MainStart;
    supervisor.initialize();
    info.state = CoreState::SchedOk;

    match supervisor.create_jobs(info.core, kernel) {
        Ok(created) => {
            crate::log_info!("Core {}: {} jobs created", info.core.0, created);
        }
        Err(e @ SupervisorError::PartialFailure { created, .. }) if created > 0 => {
            crate::log_warn!("Core {}: {:?}", info.core.0, e);
        }
        Err(e) => {
            crate::log_error!("Core {}: {:?}", info.core.0, e);
            return Err(BootError::NoJobs(e));
        }
    }

    info.state = CoreState::AppOk;
    if let Err(e) = kernel.start_scheduler() {
        info.state = CoreState::SchedFail;
        crate::log_error!("Core {}: scheduler failed: {:?}", info.core.0, e);
        return Err(BootError::Scheduler(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::config::{
        CORE0_ARENA_SIZE, JOB_DESCRIPTORS, JOB_LAUNCH_SPECS, MAX_JOBS, PROCESSING_CORE,
    };
    use crate::core::scheduler::JobRuntimeRecord;
    use crate::platform::error::KernelError;
    use crate::platform::mock::MockKernel;

    #[test]
    #[serial_test::serial]
    fn test_boot_reaches_app_ok_and_starts_scheduler() {
        let mut records = [JobRuntimeRecord::EMPTY; MAX_JOBS];
        let mut region = [0u8; CORE0_ARENA_SIZE];
        let mut kernel = MockKernel::new();
        let mut sup =
            Supervisor::new(&JOB_DESCRIPTORS, &JOB_LAUNCH_SPECS, &mut records, &mut region)
                .unwrap();
        let mut info = CoreInfo::new(PROCESSING_CORE);

        boot_core(&mut info, &mut sup, &mut kernel).unwrap();
        assert_eq!(info.state, CoreState::AppOk);
        assert!(kernel.scheduler_started());
    }

    #[test]
    #[serial_test::serial]
    fn test_scheduler_failure_sets_sched_fail() {
        let mut records = [JobRuntimeRecord::EMPTY; MAX_JOBS];
        let mut region = [0u8; CORE0_ARENA_SIZE];
        let mut kernel = MockKernel::new();
        kernel.set_fail_scheduler(true);
        let mut sup =
            Supervisor::new(&JOB_DESCRIPTORS, &JOB_LAUNCH_SPECS, &mut records, &mut region)
                .unwrap();
        let mut info = CoreInfo::new(PROCESSING_CORE);

        let err = boot_core(&mut info, &mut sup, &mut kernel).unwrap_err();
        assert_eq!(
            err,
            BootError::Scheduler(PlatformError::Kernel(KernelError::SchedulerReturned))
        );
        assert_eq!(info.state, CoreState::SchedFail);
    }

    #[test]
    #[serial_test::serial]
    fn test_partial_failure_still_boots() {
        let mut records = [JobRuntimeRecord::EMPTY; MAX_JOBS];
        // Room for three 128 byte stacks only
        let mut region = [0u8; 384];
        let mut kernel = MockKernel::new();
        let mut sup =
            Supervisor::new(&JOB_DESCRIPTORS, &JOB_LAUNCH_SPECS, &mut records, &mut region)
                .unwrap();
        let mut info = CoreInfo::new(PROCESSING_CORE);

        boot_core(&mut info, &mut sup, &mut kernel).unwrap();
        assert_eq!(kernel.threads().len(), 3);
        assert_eq!(info.state, CoreState::AppOk);
    }

    #[test]
    #[serial_test::serial]
    fn test_no_jobs_keeps_scheduler_off() {
        let mut records = [JobRuntimeRecord::EMPTY; MAX_JOBS];
        let mut region = [0u8; 64];
        let mut kernel = MockKernel::new();
        let mut sup =
            Supervisor::new(&JOB_DESCRIPTORS, &JOB_LAUNCH_SPECS, &mut records, &mut region)
                .unwrap();
        let mut info = CoreInfo::new(PROCESSING_CORE);

        let err = boot_core(&mut info, &mut sup, &mut kernel).unwrap_err();
        assert!(matches!(err, BootError::NoJobs(_)));
        assert_eq!(info.state, CoreState::SchedOk);
        assert!(!kernel.scheduler_started());
    }
}
