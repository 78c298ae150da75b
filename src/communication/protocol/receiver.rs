//! Interrupt-side frame assembly
//!
//! The UART receive interrupt feeds one byte at a time into a
//! [`FrameAssembler`]. Completed `STX ... ETX` spans are pushed into a bounded
//! SPSC queue for the protocol gatekeeper. The producer side never blocks:
//! a full queue drops the frame.
//!
//! # Assembly rules
//!
//! - STX always restarts collection and is stored
//! - ETX while collecting is stored, the buffer is NUL-terminated and queued
//! - Other bytes are stored only while collecting
//! - A frame that would not fit (ETX and NUL included) is discarded

use heapless::spsc::{Consumer, Producer, Queue};

use super::packet::{ETX, STX};
use crate::platform::traits::UartId;

/// Receive buffer size per UART, terminator included
pub const UART_PAYLOAD_SIZE: usize = 100;

/// Frames the receive queue holds
pub const RX_QUEUE_DEPTH: usize = 5;

/// Queue storage size; one slot stays empty in a heapless SPSC queue
const RX_QUEUE_SLOTS: usize = RX_QUEUE_DEPTH + 1;

/// Receive queue between the UART interrupt and the gatekeeper
pub type RxQueue = Queue<RxFrame, RX_QUEUE_SLOTS>;
pub type RxProducer<'a> = Producer<'a, RxFrame, RX_QUEUE_SLOTS>;
pub type RxConsumer<'a> = Consumer<'a, RxFrame, RX_QUEUE_SLOTS>;

/// One completed frame as captured by the interrupt
///
/// `payload` holds `STX ... ETX` followed by a NUL. `len` counts up to and
/// including ETX.
#[derive(Clone)]
pub struct RxFrame {
    pub uart: UartId,
    pub len: usize,
    pub payload: [u8; UART_PAYLOAD_SIZE],
}

impl RxFrame {
    pub const fn new(uart: UartId) -> Self {
        Self {
            uart,
            len: 0,
            payload: [0; UART_PAYLOAD_SIZE],
        }
    }

    /// Captured bytes, STX through ETX
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload[..self.len]
    }
}

impl core::fmt::Debug for RxFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RxFrame")
            .field("uart", &self.uart)
            .field("len", &self.len)
            .finish()
    }
}

/// Result of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PushOutcome {
    /// Byte outside a frame, discarded
    Ignored,
    /// STX seen, collection (re)started
    Started,
    /// Byte stored in the current frame
    Stored,
    /// Frame completed and queued
    Queued,
    /// Frame completed but the queue was full; frame dropped
    QueueFull,
    /// Frame exceeded the buffer; collection reset
    Overflow,
}

/// Per-UART byte collector
pub struct FrameAssembler {
    frame: RxFrame,
    collecting: bool,
    dropped: u32,
}

impl FrameAssembler {
    pub const fn new(uart: UartId) -> Self {
        Self {
            frame: RxFrame::new(uart),
            collecting: false,
            dropped: 0,
        }
    }

    pub fn is_collecting(&self) -> bool {
        self.collecting
    }

    /// Frames lost to overflow or a full queue
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn reset(&mut self) {
        self.collecting = false;
        self.frame.len = 0;
    }

    fn store(&mut self, byte: u8) {
        self.frame.payload[self.frame.len] = byte;
        self.frame.len += 1;
    }

    /// Feed one received byte
    ///
    /// Safe to call from interrupt context: bounded work, no blocking.
    pub fn push_byte(&mut self, byte: u8, producer: &mut RxProducer<'_>) -> PushOutcome {
        match byte {
            STX => {
                self.frame.len = 0;
                self.collecting = true;
                self.store(STX);
                PushOutcome::Started
            }
            ETX if self.collecting => {
                self.store(ETX);
                self.frame.payload[self.frame.len] = 0;
                let outcome = match producer.enqueue(self.frame.clone()) {
                    Ok(()) => PushOutcome::Queued,
                    Err(_) => {
                        self.dropped = self.dropped.wrapping_add(1);
                        PushOutcome::QueueFull
                    }
                };
                self.reset();
                outcome
            }
            _ if self.collecting => {
                // Keep room for ETX and the terminator
                if self.frame.len < UART_PAYLOAD_SIZE - 2 {
                    self.store(byte);
                    PushOutcome::Stored
                } else {
                    self.dropped = self.dropped.wrapping_add(1);
                    self.reset();
                    PushOutcome::Overflow
                }
            }
            _ => PushOutcome::Ignored,
        }
    }
}
