//! Periodic job loop and timing measurement
//!
//! Every job thread runs the same shape of loop: bounded work, close the
//! iteration on its runtime record, then block on an absolute deadline.

use super::types::{JobRuntimeRecord, RunStatus};
use crate::platform::traits::Kernel;

/// Run one iteration of a periodic job
///
/// Executes `body`, closes the iteration with the current tick, logs an
/// overrun if there was one, then waits until `start_tick + period` and
/// advances the reference tick by one period.
///
/// # Example
///
/// ```rust,ignore
/// record.begin_run(kernel.current_tick());
/// loop {
///     run_iteration(record, kernel, |rec| poll_adc(rec));
/// }
/// ```
pub fn run_iteration<F>(record: &mut JobRuntimeRecord, kernel: &dyn Kernel, body: F) -> RunStatus
where
    F: FnOnce(&mut JobRuntimeRecord),
{
    body(record);

    let status = record.end_run(kernel.current_tick());
    if let RunStatus::Overrun { elapsed } = status {
        report_overrun(record, elapsed);
    }

    kernel.wait_until(&mut record.start_tick, record.period);
    status
}

/// Run a periodic job forever
///
/// Captures the reference tick once, then repeats [`run_iteration`].
pub fn run_periodic<F>(record: &mut JobRuntimeRecord, kernel: &dyn Kernel, mut body: F) -> !
where
    F: FnMut(&mut JobRuntimeRecord),
{
    record.begin_run(kernel.current_tick());
    loop {
        run_iteration(record, kernel, &mut body);
    }
}

#[allow(unused_variables)]
fn report_overrun(record: &JobRuntimeRecord, elapsed: u32) {
    crate::log_warn!(
        "Task overrun: {} ({} ticks, period {})",
        record.name,
        elapsed,
        record.period
    );
}
