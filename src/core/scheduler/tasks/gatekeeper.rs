//! Serial trace gatekeeper job
//!
//! Owns the serial trace output. Each period it takes at most one message from
//! the trace queue without blocking and forwards it to the log.

use crate::core::scheduler::task::run_periodic;
use crate::core::scheduler::trace::{self, TraceInfo, SERIAL_TRACE};
use crate::core::scheduler::types::JobRuntimeRecord;
use crate::platform::traits::Kernel;

/// Discard trace messages queued before the gatekeeper existed
///
/// Returns the number of messages dropped.
pub fn drain_stale(queue: &trace::TraceQueue) -> usize {
    let mut dropped = 0;
    while trace::poll(queue).is_some() {
        dropped += 1;
    }
    dropped
}

/// Initializer run once after the gatekeeper thread is created
pub fn gatekeeper_init() {
    let dropped = drain_stale(&SERIAL_TRACE);
    if dropped > 0 {
        crate::log_debug!("GK: dropped {} stale trace messages", dropped);
    }
}

/// Gatekeeper entry routine
pub fn gatekeeper_main(record: &mut JobRuntimeRecord, kernel: &dyn Kernel) {
    run_periodic(record, kernel, |rec| {
        service_trace(rec);
    })
}

/// Forward one pending trace message, if any
pub fn service_trace(record: &JobRuntimeRecord) -> Option<TraceInfo> {
    let queue = record.resources.trace?;
    let info = trace::poll(queue)?;
    crate::log_trace!("[{}] {}", record.name, info.name.as_str());
    Some(info)
}
