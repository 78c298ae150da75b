//! Frame scanner and validator
//!
//! Scans a received buffer for an `STX ... ETX` span, validates it and copies
//! the interior out. Invalid spans are skipped and scanning resynchronizes on
//! the next STX.
//!
//! # Rules
//!
//! - The buffer ends at its first NUL (or its end)
//! - A new STX always restarts collection, the latest one wins
//! - ETX only closes a frame while collecting
//! - A closed frame is checked for length, printable ASCII and CRC, in order
//! - The first frame passing every check ends the scan

use core::fmt;

use super::codec::{is_ascii_valid, string_len};
use super::crc::crc_field_matches;
use super::packet::{Packet, CRC_LEN, ETX, MAX_INTERIOR, MIN_INTERIOR, STX};

/// Frame status codes
///
/// Discriminants are the status bytes reported over diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FrameError {
    /// Interior longer than the frame buffer
    Overlong = 0xF8,
    /// Interior shorter than the smallest packet
    ShortFrame = 0xF9,
    /// Carried CRC does not match the interior
    CrcMismatch = 0xFA,
    /// Interior contains non-printable bytes
    AsciiInvalid = 0xFB,
    /// No STX in the buffer
    NoStx = 0xFC,
    /// STX found but never closed
    NoEtx = 0xFD,
    /// No output frame supplied
    PacketNull = 0xFE,
    /// No input buffer supplied
    DataNull = 0xFF,
}

impl FrameError {
    /// Numeric status code
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Overlong => write!(f, "Frame too long"),
            FrameError::ShortFrame => write!(f, "Frame too short"),
            FrameError::CrcMismatch => write!(f, "CRC mismatch"),
            FrameError::AsciiInvalid => write!(f, "Non-printable byte in frame"),
            FrameError::NoStx => write!(f, "No STX found"),
            FrameError::NoEtx => write!(f, "STX without matching ETX"),
            FrameError::PacketNull => write!(f, "No output frame buffer"),
            FrameError::DataNull => write!(f, "No input buffer"),
        }
    }
}

/// Validated frame interior, NUL-terminated
#[derive(Clone)]
pub struct Frame {
    buf: [u8; MAX_INTERIOR + 1],
    len: usize,
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_INTERIOR + 1],
            len: 0,
        }
    }

    /// Scan `raw` and return the first valid frame
    pub fn scan(raw: &[u8]) -> Result<Self, FrameError> {
        let mut frame = Self::new();
        find_and_validate(Some(raw), Some(&mut frame))?;
        Ok(frame)
    }

    /// Interior bytes, terminator excluded
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Interior bytes followed by the NUL terminator
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Field view over the interior
    pub fn packet(&self) -> Option<Packet<'_>> {
        Packet::new(self.as_bytes())
    }

    fn store(&mut self, interior: &[u8]) {
        self.buf[..interior.len()].copy_from_slice(interior);
        self.buf[interior.len()] = 0;
        self.len = interior.len();
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(self.as_bytes()) {
            Ok(s) => f.debug_tuple("Frame").field(&s).finish(),
            Err(_) => f.debug_tuple("Frame").field(&self.as_bytes()).finish(),
        }
    }
}

fn check_interior(interior: &[u8]) -> Result<(), FrameError> {
    if interior.len() < MIN_INTERIOR {
        return Err(FrameError::ShortFrame);
    }
    if interior.len() > MAX_INTERIOR {
        return Err(FrameError::Overlong);
    }
    if !is_ascii_valid(interior) {
        return Err(FrameError::AsciiInvalid);
    }
    let (covered, crc) = interior.split_at(interior.len() - CRC_LEN);
    if !crc_field_matches(covered, crc) {
        return Err(FrameError::CrcMismatch);
    }
    Ok(())
}

/// Find the first valid frame in `raw` and copy its interior into `out`
///
/// `None` for either buffer reports `DataNull` / `PacketNull` before anything
/// is scanned. `out` is only written on success.
///
/// # Errors
///
/// `NoStx` if the buffer holds no STX, `NoEtx` if the last STX was never
/// closed, otherwise the failure of the last closed frame.
pub fn find_and_validate(raw: Option<&[u8]>, out: Option<&mut Frame>) -> Result<(), FrameError> {
    let raw = raw.ok_or(FrameError::DataNull)?;
    let out = out.ok_or(FrameError::PacketNull)?;

    let raw = &raw[..string_len(raw)];
    let mut start: Option<usize> = None;
    let mut status = FrameError::NoStx;

    for (idx, byte) in raw.iter().enumerate() {
        match *byte {
            STX => {
                start = Some(idx);
                status = FrameError::NoEtx;
            }
            ETX => {
                let Some(begin) = start.take() else {
                    continue;
                };
                let interior = &raw[begin + 1..idx];
                match check_interior(interior) {
                    Ok(()) => {
                        out.store(interior);
                        return Ok(());
                    }
                    Err(e) => {
                        crate::log_trace!("Frame at {} dropped: {:?}", begin, e);
                        status = e;
                    }
                }
            }
            _ => {}
        }
    }

    Err(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communication::protocol::crc::crc32_hex;

    /// Wrap `covered` as `STX covered CRC ETX`
    fn framed(covered: &[u8]) -> std::vec::Vec<u8> {
        let mut v = std::vec![STX];
        v.extend_from_slice(covered);
        v.extend_from_slice(&crc32_hex(covered));
        v.push(ETX);
        v
    }

    #[test]
    fn test_concrete_command_frame() {
        let raw = framed(b"1100C230010");
        let frame = Frame::scan(&raw).unwrap();
        let pkt = frame.packet().unwrap();
        assert_eq!(pkt.dev_addr(), b"11");
        assert_eq!(pkt.sub_addr(), b"00");
        assert_eq!(pkt.type_byte(), b'C');
        assert_eq!(pkt.packet_id(), b"23");
        assert_eq!(pkt.field(crate::communication::protocol::packet::CODE), Some(&b"10"[..]));
        assert_eq!(frame.as_bytes_with_nul().last(), Some(&0));
    }

    #[test]
    fn test_single_byte_tamper_is_crc_mismatch() {
        let mut raw = framed(b"1100C230010");
        raw[3] = b'1';
        assert_eq!(Frame::scan(&raw).unwrap_err(), FrameError::CrcMismatch);
    }

    #[test]
    fn test_stx_then_etx_is_short_frame() {
        assert_eq!(Frame::scan(&[STX, ETX]).unwrap_err(), FrameError::ShortFrame);
    }

    #[test]
    fn test_malformed_then_valid_returns_second() {
        let mut raw = std::vec![STX];
        raw.extend_from_slice(b"garbage");
        raw.push(ETX);
        raw.extend(framed(b"2200Q0100A2"));

        let frame = Frame::scan(&raw).unwrap();
        assert_eq!(frame.packet().unwrap().dev_addr(), b"22");
    }

    #[test]
    fn test_latest_stx_wins() {
        let mut raw = std::vec![STX];
        raw.extend_from_slice(b"1100C2");
        raw.extend(framed(b"3300C450010"));
        let frame = Frame::scan(&raw).unwrap();
        assert_eq!(frame.packet().unwrap().dev_addr(), b"33");
    }

    #[test]
    fn test_no_stx() {
        assert_eq!(Frame::scan(b"1100C230010").unwrap_err(), FrameError::NoStx);
        assert_eq!(Frame::scan(b"").unwrap_err(), FrameError::NoStx);
        // ETX without STX is ignored
        assert_eq!(Frame::scan(&[ETX, b'1']).unwrap_err(), FrameError::NoStx);
    }

    #[test]
    fn test_no_etx() {
        let raw = framed(b"1100C230010");
        assert_eq!(
            Frame::scan(&raw[..raw.len() - 1]).unwrap_err(),
            FrameError::NoEtx
        );
    }

    #[test]
    fn test_failure_then_dangling_stx_reports_no_etx() {
        let mut raw = std::vec![STX, ETX];
        raw.push(STX);
        raw.extend_from_slice(b"11");
        assert_eq!(Frame::scan(&raw).unwrap_err(), FrameError::NoEtx);
    }

    #[test]
    fn test_last_failure_is_reported() {
        let mut raw = std::vec![STX, ETX];
        let mut bad_crc = framed(b"1100C230010");
        bad_crc[1] = b'9';
        raw.extend(bad_crc);
        assert_eq!(Frame::scan(&raw).unwrap_err(), FrameError::CrcMismatch);
    }

    #[test]
    fn test_non_printable_interior() {
        let mut covered = b"1100C230010".to_vec();
        covered[6] = 0x7F;
        assert_eq!(
            Frame::scan(&framed(&covered)).unwrap_err(),
            FrameError::AsciiInvalid
        );
    }

    #[test]
    fn test_scan_stops_at_nul() {
        let mut raw = std::vec![STX, 0];
        raw.extend(framed(b"1100C230010"));
        assert_eq!(Frame::scan(&raw).unwrap_err(), FrameError::NoEtx);
    }

    #[test]
    fn test_overlong_interior() {
        let mut covered = b"1100R2300A0".to_vec();
        covered.extend(core::iter::repeat(b'X').take(60));
        assert_eq!(
            Frame::scan(&framed(&covered)).unwrap_err(),
            FrameError::Overlong
        );
    }

    #[test]
    fn test_missing_buffers() {
        let mut frame = Frame::new();
        assert_eq!(
            find_and_validate(None, Some(&mut frame)),
            Err(FrameError::DataNull)
        );
        assert_eq!(
            find_and_validate(Some(&[STX]), None),
            Err(FrameError::PacketNull)
        );
        assert_eq!(find_and_validate(None, None), Err(FrameError::DataNull));
    }

    #[test]
    fn test_output_untouched_on_failure() {
        let mut frame = Frame::scan(&framed(b"1100A23")).unwrap();
        assert_eq!(
            find_and_validate(Some(&[STX, ETX]), Some(&mut frame)),
            Err(FrameError::ShortFrame)
        );
        assert_eq!(frame.as_bytes().len(), 15);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(FrameError::ShortFrame.code(), 0xF9);
        assert_eq!(FrameError::CrcMismatch.code(), 0xFA);
        assert_eq!(FrameError::AsciiInvalid.code(), 0xFB);
        assert_eq!(FrameError::NoStx.code(), 0xFC);
        assert_eq!(FrameError::NoEtx.code(), 0xFD);
        assert_eq!(FrameError::PacketNull.code(), 0xFE);
        assert_eq!(FrameError::DataNull.code(), 0xFF);
    }
}
