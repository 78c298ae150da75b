//! Protocol engine
//!
//! Takes one received buffer at a time through the full request path:
//!
//! 1. Scan for the first valid frame ([`find_and_validate`])
//! 2. Resolve the packet against the dispatch tables
//! 3. Run the front-end handler
//! 4. Build and transmit the reply (ack for commands, response for queries)
//!
//! Framing failures and decode misses never produce a reply. They are counted
//! in [`ProtocolStats`] and the buffer is dropped.

use super::dispatcher::{self, Handler};
use super::error::{ProtocolError, Result};
use super::frame::{find_and_validate, Frame, FrameError};
use super::handlers::FrontEnd;
use super::packet::{Packet, PacketType, PAYLOAD_SIZE};
use super::writer::{build_ack_nak, build_response, ReplyHeader};
use crate::platform::traits::UartInterface;

/// Protocol statistics for monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtocolStats {
    /// Frames that passed validation
    pub frames_accepted: u32,
    pub no_stx: u32,
    pub no_etx: u32,
    pub short_frames: u32,
    pub overlong_frames: u32,
    pub ascii_errors: u32,
    pub crc_errors: u32,
    /// Calls with a missing input or output buffer
    pub null_buffers: u32,
    /// Commands handed to the front-end
    pub commands: u32,
    /// Queries handed to the front-end
    pub queries: u32,
    /// Valid frames with no dispatch entry
    pub dropped: u32,
    /// Commands whose payload length differs from the table entry
    pub length_mismatches: u32,
    pub replies_sent: u32,
    /// Replies that could not be built
    pub reply_errors: u32,
    /// Replies the UART refused
    pub tx_errors: u32,
}

impl ProtocolStats {
    /// Total framing failures of every kind
    pub fn frame_errors(&self) -> u32 {
        [
            self.no_stx,
            self.no_etx,
            self.short_frames,
            self.overlong_frames,
            self.ascii_errors,
            self.crc_errors,
            self.null_buffers,
        ]
        .iter()
        .fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    fn record_frame_error(&mut self, err: FrameError) {
        let counter = match err {
            FrameError::NoStx => &mut self.no_stx,
            FrameError::NoEtx => &mut self.no_etx,
            FrameError::ShortFrame => &mut self.short_frames,
            FrameError::Overlong => &mut self.overlong_frames,
            FrameError::AsciiInvalid => &mut self.ascii_errors,
            FrameError::CrcMismatch => &mut self.crc_errors,
            FrameError::PacketNull | FrameError::DataNull => &mut self.null_buffers,
        };
        *counter = counter.wrapping_add(1);
    }
}

/// What happened to a valid frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Table entry `entry` matched and its handler ran
    Dispatched { entry: usize, handler: Handler },
    /// No table entry matched; nothing was sent
    Dropped,
}

/// Request/reply engine for one serial channel
///
/// Owns the channel's UART and working frame buffer. One engine per channel,
/// driven by that channel's gatekeeper.
pub struct ProtocolEngine<U: UartInterface, F: FrontEnd> {
    uart: U,
    front_end: F,
    frame: Frame,
    stats: ProtocolStats,
}

impl<U: UartInterface, F: FrontEnd> ProtocolEngine<U, F> {
    pub fn new(uart: U, front_end: F) -> Self {
        Self {
            uart,
            front_end,
            frame: Frame::new(),
            stats: ProtocolStats::default(),
        }
    }

    pub fn stats(&self) -> ProtocolStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ProtocolStats::default();
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    pub fn front_end_mut(&mut self) -> &mut F {
        &mut self.front_end
    }

    /// Last frame that passed validation
    pub fn last_frame(&self) -> &Frame {
        &self.frame
    }

    /// Validate `raw`, dispatch the first valid frame and send its reply
    ///
    /// # Errors
    ///
    /// `Frame` if the buffer holds no valid frame, `Transmit` if the reply
    /// could not be written, `PayloadTooLong`/`PayloadNotAscii` if the
    /// front-end returned an unusable query result.
    pub fn receive_and_process(&mut self, raw: &[u8]) -> Result<Outcome> {
        if let Err(e) = find_and_validate(Some(raw), Some(&mut self.frame)) {
            self.stats.record_frame_error(e);
            crate::log_debug!("RX frame rejected: {:?} (0x{:x})", e, e.code());
            return Err(ProtocolError::Frame(e));
        }
        self.stats.frames_accepted = self.stats.frames_accepted.wrapping_add(1);

        dispatch(
            &self.frame,
            &mut self.uart,
            &mut self.front_end,
            &mut self.stats,
        )
    }

    /// Dispatch an already validated frame
    pub fn decode(&mut self, frame: &Frame) -> Result<Outcome> {
        dispatch(frame, &mut self.uart, &mut self.front_end, &mut self.stats)
    }
}

fn dispatch<U: UartInterface, F: FrontEnd>(
    frame: &Frame,
    uart: &mut U,
    front_end: &mut F,
    stats: &mut ProtocolStats,
) -> Result<Outcome> {
    let Some(packet) = frame.packet() else {
        stats.dropped = stats.dropped.wrapping_add(1);
        return Ok(Outcome::Dropped);
    };
    let Some((entry, found)) = dispatcher::decode(&packet) else {
        stats.dropped = stats.dropped.wrapping_add(1);
        crate::log_debug!("No dispatch entry, frame dropped");
        return Ok(Outcome::Dropped);
    };

    let header = ReplyHeader::from_packet(&packet);
    match found.handler {
        Handler::Command(command) => {
            stats.commands = stats.commands.wrapping_add(1);
            check_length(&packet, found.expected_len, stats);
            front_end.apply(command, packet.payload());
            let reply = build_ack_nak(PacketType::Ack, &header);
            transmit(uart, stats, &reply)?;
        }
        Handler::Query(query) => {
            stats.queries = stats.queries.wrapping_add(1);
            let mut out = [0u8; PAYLOAD_SIZE];
            let len = front_end.read(query, &mut out).min(PAYLOAD_SIZE);
            let reply = build_response(&header, query.response_code(), &out[..len])
                .map_err(|e| {
                    stats.reply_errors = stats.reply_errors.wrapping_add(1);
                    e
                })?;
            transmit(uart, stats, &reply)?;
        }
    }

    Ok(Outcome::Dispatched {
        entry,
        handler: found.handler,
    })
}

fn check_length(packet: &Packet<'_>, expected: u8, stats: &mut ProtocolStats) {
    let actual = packet.payload().len();
    let declared = packet.declared_len();
    if actual != usize::from(expected) || declared != Some(expected) {
        stats.length_mismatches = stats.length_mismatches.wrapping_add(1);
        crate::log_warn!(
            "Payload length {} (declared {:?}), expected {}",
            actual,
            declared,
            expected
        );
    }
}

fn transmit<U: UartInterface>(uart: &mut U, stats: &mut ProtocolStats, bytes: &[u8]) -> Result<()> {
    match uart.write_all(bytes) {
        Ok(()) => {
            stats.replies_sent = stats.replies_sent.wrapping_add(1);
            Ok(())
        }
        Err(e) => {
            stats.tx_errors = stats.tx_errors.wrapping_add(1);
            crate::log_error!("Reply transmit failed: {:?}", e);
            Err(ProtocolError::Transmit(e))
        }
    }
}
