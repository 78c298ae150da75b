//! Fixed-rate application jobs
//!
//! All periodic jobs share one entry routine. Jobs at least as slow as the
//! trace gatekeeper post their name each iteration; faster ones would overflow
//! the trace queue.

use crate::core::scheduler::config::ms_to_ticks;
use crate::core::scheduler::task::run_periodic;
use crate::core::scheduler::trace::{self, TraceInfo};
use crate::core::scheduler::types::JobRuntimeRecord;
use crate::platform::traits::Kernel;

/// Period below which a job never posts trace messages, in ticks
pub const TRACE_MIN_PERIOD: u32 = ms_to_ticks(100);

/// Entry routine for every fixed-rate job
pub fn job_main(record: &mut JobRuntimeRecord, kernel: &dyn Kernel) {
    let info = TraceInfo::new(record.name);
    run_periodic(record, kernel, job_body(&info))
}

/// Loop body shared by every fixed-rate job
pub fn job_body(info: &TraceInfo) -> impl FnMut(&mut JobRuntimeRecord) + '_ {
    move |rec: &mut JobRuntimeRecord| {
        heartbeat(rec, info);
    }
}

/// One iteration of application work
///
/// Returns `true` if a trace message was queued.
pub fn heartbeat(record: &JobRuntimeRecord, info: &TraceInfo) -> bool {
    if record.period < TRACE_MIN_PERIOD {
        return false;
    }
    let Some(queue) = record.resources.trace else {
        return false;
    };

    match trace::post(queue, info.clone()) {
        Ok(()) => true,
        Err(e) => {
            crate::log_debug!("{}: trace dropped: {:?}", record.name, e);
            false
        }
    }
}
