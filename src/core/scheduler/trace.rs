//! Serial trace queue
//!
//! Jobs post short trace messages (their name) without blocking; the gatekeeper
//! job drains the queue once per period.

use core::fmt;

use heapless::mpmc::MpMcQueue;
use heapless::String;

/// Longest job name carried in a trace message
pub const TASK_NAME_LENGTH_MAX: usize = 32;

/// Trace queue depth (must be a power of two)
pub const SERIAL_TRACE_QUEUE_LEN: usize = 8;

/// Serial trace message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TraceInfo {
    pub name: String<TASK_NAME_LENGTH_MAX>,
}

impl TraceInfo {
    /// Build a trace message, truncating `name` to [`TASK_NAME_LENGTH_MAX`] bytes
    pub fn new(name: &str) -> Self {
        let mut s = String::new();
        for c in name.chars() {
            if s.push(c).is_err() {
                break;
            }
        }
        Self { name: s }
    }
}

/// Queue shared between posting jobs and the gatekeeper
pub type TraceQueue = MpMcQueue<TraceInfo, SERIAL_TRACE_QUEUE_LEN>;

/// Firmware-wide serial trace queue
pub static SERIAL_TRACE: TraceQueue = TraceQueue::new();

/// Trace errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TraceError {
    /// Queue full, message dropped
    QueueFull,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::QueueFull => write!(f, "Serial trace queue full"),
        }
    }
}

/// Post a message without blocking
pub fn post(queue: &TraceQueue, info: TraceInfo) -> Result<(), TraceError> {
    queue.enqueue(info).map_err(|_| TraceError::QueueFull)
}

/// Take the oldest message, if any, without blocking
pub fn poll(queue: &TraceQueue) -> Option<TraceInfo> {
    queue.dequeue()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_info_truncates_long_names() {
        let info = TraceInfo::new("a very long job name that exceeds thirty two bytes");
        assert_eq!(info.name.len(), TASK_NAME_LENGTH_MAX);
        assert_eq!(info.name.as_str(), "a very long job name that exceed");
    }

    #[test]
    fn test_post_and_poll_in_order() {
        let queue = TraceQueue::new();
        post(&queue, TraceInfo::new("C0 2ms Task")).unwrap();
        post(&queue, TraceInfo::new("C0 10ms Task")).unwrap();

        assert_eq!(poll(&queue).unwrap().name.as_str(), "C0 2ms Task");
        assert_eq!(poll(&queue).unwrap().name.as_str(), "C0 10ms Task");
        assert!(poll(&queue).is_none());
    }

    #[test]
    fn test_full_queue_reports_without_blocking() {
        let queue = TraceQueue::new();
        for _ in 0..SERIAL_TRACE_QUEUE_LEN {
            post(&queue, TraceInfo::new("job")).unwrap();
        }
        assert_eq!(
            post(&queue, TraceInfo::new("job")),
            Err(TraceError::QueueFull)
        );
    }
}
