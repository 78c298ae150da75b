//! Compile-time job configuration
//!
//! The job set is fixed at boot. Descriptors say what a job is; launch specs say
//! where, how often and at which priority it runs. Launch spec `i` owns runtime
//! record `i`.

use super::tasks::{gatekeeper, periodic};
use super::trace::SERIAL_TRACE;
use super::types::{CoreId, JobDescriptor, JobId, JobLaunchSpec, JobResources};

/// Kernel tick rate
pub const TICK_RATE_HZ: u32 = 1000;

/// Convert a period in milliseconds to kernel ticks, never below one tick
pub const fn ms_to_ticks(ms: u32) -> u32 {
    let ticks = (ms as u64 * TICK_RATE_HZ as u64 / 1000) as u32;
    if ticks == 0 && ms > 0 {
        1
    } else {
        ticks
    }
}

/// Core that runs the job set
pub const PROCESSING_CORE: CoreId = CoreId(0);

/// Stack arena size for the processing core, in bytes
pub const CORE0_ARENA_SIZE: usize = 2048;

/// Default job stack size, in bytes
pub const JOB_STACK_SIZE: usize = 128;

/// Number of launch specs, and therefore runtime records
pub const MAX_JOBS: usize = 13;

/// Job descriptors
///
/// The UART, I2C and SPI gatekeepers have launch specs but no descriptor yet;
/// the supervisor skips them.
pub static JOB_DESCRIPTORS: [JobDescriptor; 10] = [
    JobDescriptor {
        id: JobId::Gatekeeper,
        main: gatekeeper::gatekeeper_main,
        init: Some(gatekeeper::gatekeeper_init),
        stack_size: JOB_STACK_SIZE,
        name: "C0 GK task",
    },
    JobDescriptor {
        id: JobId::Job2Ms,
        main: periodic::job_main,
        init: None,
        stack_size: JOB_STACK_SIZE,
        name: "C0 2ms Task",
    },
    JobDescriptor {
        id: JobId::Job10Ms,
        main: periodic::job_main,
        init: None,
        stack_size: JOB_STACK_SIZE,
        name: "C0 10ms Task",
    },
    JobDescriptor {
        id: JobId::Job25Ms,
        main: periodic::job_main,
        init: None,
        stack_size: JOB_STACK_SIZE,
        name: "C0 25ms Task",
    },
    JobDescriptor {
        id: JobId::Job50Ms,
        main: periodic::job_main,
        init: None,
        stack_size: JOB_STACK_SIZE,
        name: "C0 50ms Task",
    },
    JobDescriptor {
        id: JobId::Job100Ms,
        main: periodic::job_main,
        init: None,
        stack_size: JOB_STACK_SIZE,
        name: "C0 100ms Task",
    },
    JobDescriptor {
        id: JobId::Job500Ms,
        main: periodic::job_main,
        init: None,
        stack_size: JOB_STACK_SIZE,
        name: "C0 500ms Task",
    },
    JobDescriptor {
        id: JobId::Job1000Ms,
        main: periodic::job_main,
        init: None,
        stack_size: JOB_STACK_SIZE,
        name: "C0 1000ms Task",
    },
    JobDescriptor {
        id: JobId::Job2000Ms,
        main: periodic::job_main,
        init: None,
        stack_size: JOB_STACK_SIZE,
        name: "C0 2000ms Task",
    },
    JobDescriptor {
        id: JobId::Job5000Ms,
        main: periodic::job_main,
        init: None,
        stack_size: JOB_STACK_SIZE,
        name: "C0 5000ms Task",
    },
];

macro_rules! launch {
    ($id:expr, $period_ms:expr, $priority:expr) => {
        JobLaunchSpec {
            core: PROCESSING_CORE,
            id: $id,
            enabled: true,
            period_ms: $period_ms,
            priority: $priority,
            resources: JobResources {
                trace: Some(&SERIAL_TRACE),
            },
        }
    };
}

/// Launch specs (priority: higher runs first, 0 is idle)
pub static JOB_LAUNCH_SPECS: [JobLaunchSpec; MAX_JOBS] = [
    launch!(JobId::Gatekeeper, 100, 7),
    launch!(JobId::Job2Ms, 2, 9),
    launch!(JobId::Job10Ms, 10, 9),
    launch!(JobId::Job25Ms, 25, 8),
    launch!(JobId::Job50Ms, 50, 8),
    launch!(JobId::Job100Ms, 100, 7),
    launch!(JobId::Job500Ms, 500, 6),
    launch!(JobId::Job1000Ms, 1000, 6),
    launch!(JobId::Job2000Ms, 2000, 2),
    launch!(JobId::Job5000Ms, 5000, 1),
    launch!(JobId::UartGatekeeper, 100, 7),
    launch!(JobId::I2cGatekeeper, 100, 7),
    launch!(JobId::SpiGatekeeper, 100, 7),
];
