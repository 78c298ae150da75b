//! Protocol gatekeeper
//!
//! Serializes access to one serial channel: the receive interrupt only queues
//! frames, and this gatekeeper is the single place they are validated,
//! dispatched and answered.

use super::engine::{Outcome, ProtocolEngine, ProtocolStats};
use super::error::Result;
use super::handlers::FrontEnd;
use super::receiver::RxConsumer;
use crate::core::scheduler::run_periodic;
use crate::core::scheduler::JobRuntimeRecord;
use crate::platform::traits::{Kernel, UartInterface};

/// Gatekeeper for one channel's receive queue
pub struct ProtocolGatekeeper<'q, U: UartInterface, F: FrontEnd> {
    rx: RxConsumer<'q>,
    engine: ProtocolEngine<U, F>,
    serviced: u32,
}

impl<'q, U: UartInterface, F: FrontEnd> ProtocolGatekeeper<'q, U, F> {
    pub fn new(rx: RxConsumer<'q>, engine: ProtocolEngine<U, F>) -> Self {
        Self {
            rx,
            engine,
            serviced: 0,
        }
    }

    /// Process at most one queued frame without blocking
    ///
    /// Returns `None` when the queue was empty.
    pub fn service(&mut self) -> Option<Result<Outcome>> {
        let frame = self.rx.dequeue()?;
        self.serviced = self.serviced.wrapping_add(1);
        Some(self.engine.receive_and_process(frame.as_bytes()))
    }

    /// Frames taken from the queue so far
    pub fn serviced(&self) -> u32 {
        self.serviced
    }

    pub fn stats(&self) -> ProtocolStats {
        self.engine.stats()
    }

    pub fn engine(&self) -> &ProtocolEngine<U, F> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ProtocolEngine<U, F> {
        &mut self.engine
    }

    /// Run as a periodic job: one `service` per period, forever
    #[allow(unused_variables)]
    pub fn run(&mut self, record: &mut JobRuntimeRecord, kernel: &dyn Kernel) -> ! {
        run_periodic(record, kernel, |_| {
            if let Some(Err(e)) = self.service() {
                crate::log_debug!("GK: frame not answered: {:?}", e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communication::protocol::crc::crc32_hex;
    use crate::communication::protocol::dispatcher::Handler;
    use crate::communication::protocol::frame::{Frame, FrameError};
    use crate::communication::protocol::handlers::{NullFrontEnd, Query};
    use crate::communication::protocol::receiver::{FrameAssembler, RxQueue};
    use crate::communication::protocol::ProtocolError;
    use crate::platform::mock::MockUart;
    use crate::platform::traits::{UartConfig, RS485_UART};

    #[test]
    fn test_service_processes_one_frame_per_call() {
        let mut queue = RxQueue::new();
        let (mut tx, rx) = queue.split();
        let mut asm = FrameAssembler::new(RS485_UART);

        let covered = b"1100Q0100A0";
        let mut wire = std::vec![0x02];
        wire.extend_from_slice(covered);
        wire.extend_from_slice(&crc32_hex(covered));
        wire.push(0x03);
        for _ in 0..2 {
            for b in &wire {
                asm.push_byte(*b, &mut tx);
            }
        }

        let engine = ProtocolEngine::new(MockUart::new(UartConfig::default()), NullFrontEnd);
        let mut gk = ProtocolGatekeeper::new(rx, engine);

        let outcome = gk.service().unwrap().unwrap();
        assert_eq!(
            outcome,
            Outcome::Dispatched {
                entry: 4,
                handler: Handler::Query(Query::FaultRelayStatus)
            }
        );
        assert_eq!(gk.stats().replies_sent, 1);
        assert!(gk.service().is_some());
        assert!(gk.service().is_none());
        assert_eq!(gk.serviced(), 2);

        let tx_bytes = gk.engine().uart().tx_buffer();
        let reply = Frame::scan(&tx_bytes).unwrap();
        assert_eq!(reply.packet().unwrap().code(), Some(0xA1));
    }

    #[test]
    fn test_service_reports_bad_frames() {
        let mut queue = RxQueue::new();
        let (mut tx, rx) = queue.split();
        let mut asm = FrameAssembler::new(RS485_UART);
        for b in [0x02u8, 0x03] {
            asm.push_byte(b, &mut tx);
        }

        let engine = ProtocolEngine::new(MockUart::new(UartConfig::default()), NullFrontEnd);
        let mut gk = ProtocolGatekeeper::new(rx, engine);
        assert_eq!(
            gk.service(),
            Some(Err(ProtocolError::Frame(FrameError::ShortFrame)))
        );
        assert!(gk.engine().uart().tx_buffer().is_empty());
    }
}
