//! Reply frame construction
//!
//! Frames are built in field order into a fixed-capacity buffer. The CRC is
//! computed over everything between STX and the CRC field, then ETX closes the
//! frame.

use heapless::Vec;

use super::codec::{bin_to_hex8, is_ascii_valid};
use super::crc::crc32_hex;
use super::error::{ProtocolError, Result};
use super::packet::{
    Packet, PacketType, ACK_NAK_FRAME_LEN, ETX, MAX_FRAME_LEN, PAYLOAD_SIZE, STX,
};

/// Finished ack/nak frame
pub type AckNakFrame = Vec<u8, ACK_NAK_FRAME_LEN>;
/// Finished response frame
pub type ResponseFrame = Vec<u8, MAX_FRAME_LEN>;

/// Addressing echoed back from a request into its reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyHeader {
    pub dev_addr: [u8; 2],
    pub sub_addr: [u8; 2],
    pub packet_id: [u8; 2],
}

impl ReplyHeader {
    pub fn from_packet(packet: &Packet<'_>) -> Self {
        let mut header = Self {
            dev_addr: [0; 2],
            sub_addr: [0; 2],
            packet_id: [0; 2],
        };
        header.dev_addr.copy_from_slice(packet.dev_addr());
        header.sub_addr.copy_from_slice(packet.sub_addr());
        header.packet_id.copy_from_slice(packet.packet_id());
        header
    }
}

/// Append the CRC of `frame[1..]` and ETX
fn seal<const N: usize>(frame: &mut Vec<u8, N>) -> core::result::Result<(), ()> {
    let crc = crc32_hex(&frame[1..]);
    frame.extend_from_slice(&crc)?;
    frame.push(ETX).map_err(|_| ())
}

fn push_header<const N: usize>(
    frame: &mut Vec<u8, N>,
    header: &ReplyHeader,
    kind: PacketType,
) -> core::result::Result<(), ()> {
    frame.push(STX).map_err(|_| ())?;
    frame.extend_from_slice(&header.dev_addr)?;
    frame.extend_from_slice(&header.sub_addr)?;
    frame.push(kind.as_byte()).map_err(|_| ())?;
    frame.extend_from_slice(&header.packet_id)
}

/// Build an ack or nak frame
///
/// `kind` other than [`PacketType::Ack`] is sent as a nak.
pub fn build_ack_nak(kind: PacketType, header: &ReplyHeader) -> AckNakFrame {
    let kind = match kind {
        PacketType::Ack => PacketType::Ack,
        _ => PacketType::Nak,
    };
    let mut frame = AckNakFrame::new();
    // Capacity is exactly the ack/nak layout
    let sealed = push_header(&mut frame, header, kind).and_then(|()| seal(&mut frame));
    debug_assert!(sealed.is_ok());
    frame
}

/// Build a response frame carrying `payload`
///
/// # Errors
///
/// `PayloadTooLong` above [`PAYLOAD_SIZE`] bytes, `PayloadNotAscii` if a
/// non-empty payload holds non-printable bytes.
pub fn build_response(header: &ReplyHeader, code: u8, payload: &[u8]) -> Result<ResponseFrame> {
    if payload.len() > PAYLOAD_SIZE {
        return Err(ProtocolError::PayloadTooLong { len: payload.len() });
    }
    if !payload.is_empty() && !is_ascii_valid(payload) {
        return Err(ProtocolError::PayloadNotAscii);
    }

    let mut frame = ResponseFrame::new();
    push_header(&mut frame, header, PacketType::Response)
        .and_then(|()| frame.extend_from_slice(&bin_to_hex8(payload.len() as u8)))
        .and_then(|()| frame.extend_from_slice(&bin_to_hex8(code)))
        .and_then(|()| frame.extend_from_slice(payload))
        .and_then(|()| seal(&mut frame))
        .map_err(|()| ProtocolError::PayloadTooLong { len: payload.len() })?;
    Ok(frame)
}
