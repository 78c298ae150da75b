//! Job health reporting
//!
//! Summarizes the runtime records: creation failures, overruns and the average
//! busy time per call. Meant to be called from a slow periodic job or a debug
//! console.

use super::types::{CreationStatus, JobRuntimeRecord};

/// Aggregate view over all runtime records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorSummary {
    /// Jobs created successfully
    pub running: usize,
    /// Jobs whose creation failed
    pub failed: usize,
    /// Overruns across all jobs
    pub total_overruns: u32,
}

/// Average busy ticks per completed call
pub fn average_busy(record: &JobRuntimeRecord) -> u64 {
    match record.call_count {
        0 => 0,
        n => record.busy_ticks / u64::from(n),
    }
}

/// Build the summary without logging
pub fn summarize(records: &[JobRuntimeRecord]) -> MonitorSummary {
    records
        .iter()
        .fold(MonitorSummary::default(), |mut acc, rec| {
            match rec.creation {
                CreationStatus::Created => acc.running += 1,
                CreationStatus::Failed => acc.failed += 1,
                CreationStatus::Pending => {}
            }
            acc.total_overruns = acc.total_overruns.wrapping_add(rec.overruns);
            acc
        })
}

/// Log per-job statistics and warnings, then return the summary
pub fn collect_and_report(records: &[JobRuntimeRecord]) -> MonitorSummary {
    let summary = summarize(records);
    log_summary(&summary);
    check_warnings(records);
    report_job_stats(records);
    summary
}

#[allow(unused_variables)]
fn log_summary(summary: &MonitorSummary) {
    crate::log_info!(
        "Jobs: running={} failed={} overruns={}",
        summary.running,
        summary.failed,
        summary.total_overruns
    );
}

#[allow(unused_variables)]
fn check_warnings(records: &[JobRuntimeRecord]) {
    for rec in records {
        if let Some(err) = rec.error {
            crate::log_warn!("Job '{}': creation failed: {:?}", rec.name, err);
        }
        if rec.overruns > 0 {
            crate::log_warn!("Job '{}': {} overruns", rec.name, rec.overruns);
        }
    }
}

#[allow(unused_variables)]
fn report_job_stats(records: &[JobRuntimeRecord]) {
    for rec in records.iter().filter(|r| r.valid) {
        crate::log_info!(
            "  {}: calls={} busy={} avg={} state={:?}",
            rec.name,
            rec.call_count,
            rec.busy_ticks,
            average_busy(rec),
            rec.state
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::arena::ArenaError;
    use crate::core::scheduler::types::CreateError;

    #[test]
    fn test_summary_counts() {
        let mut records = [JobRuntimeRecord::EMPTY; 4];
        records[0].creation = CreationStatus::Created;
        records[0].valid = true;
        records[0].overruns = 2;
        records[1].creation = CreationStatus::Created;
        records[1].valid = true;
        records[1].overruns = 1;
        records[2].creation = CreationStatus::Failed;
        records[2].error = Some(CreateError::Arena(ArenaError::OutOfSpace {
            requested: 128,
            remaining: 0,
        }));

        let summary = collect_and_report(&records);
        assert_eq!(
            summary,
            MonitorSummary {
                running: 2,
                failed: 1,
                total_overruns: 3
            }
        );
    }

    #[test]
    fn test_average_busy() {
        let mut rec = JobRuntimeRecord::EMPTY;
        assert_eq!(average_busy(&rec), 0);
        rec.call_count = 4;
        rec.busy_ticks = 10;
        assert_eq!(average_busy(&rec), 2);
    }
}
