//! Hex and ASCII conversions for the wire format
//!
//! Stateless helpers. The wire carries every numeric field as uppercase hex
//! ASCII, most significant nibble first. An empty input slice is treated as an
//! absent buffer: validity checks fail, lengths are zero, copies do nothing.

use super::packet::ETX;

/// Nibble to uppercase hex digit
const HEX_LUT: [u8; 16] = *b"0123456789ABCDEF";

/// `true` if every byte is printable ASCII (0x20..=0x7E)
///
/// An empty buffer is not valid.
pub fn is_ascii_valid(buf: &[u8]) -> bool {
    !buf.is_empty() && buf.iter().all(|b| (0x20..=0x7E).contains(b))
}

/// `true` if every byte is an uppercase hex digit (`0-9`, `A-F`)
///
/// An empty buffer is not valid, unlike a vacuous all-digits check. Callers
/// pass fixed-width fields, so empty input means a truncated packet.
pub fn is_hex_ascii_valid(buf: &[u8]) -> bool {
    !buf.is_empty() && buf.iter().all(|b| hex_value(*b).is_some())
}

/// Value of one uppercase hex digit
fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

fn bin_to_hex<const N: usize>(value: u32) -> [u8; N] {
    let mut out = [0u8; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let shift = 4 * (N - 1 - i);
        *slot = HEX_LUT[((value >> shift) & 0xF) as usize];
    }
    out
}

/// `0x3C` -> `b"3C"`
pub fn bin_to_hex8(value: u8) -> [u8; 2] {
    bin_to_hex::<2>(u32::from(value))
}

/// `0x1A2B` -> `b"1A2B"`
pub fn bin_to_hex16(value: u16) -> [u8; 4] {
    bin_to_hex::<4>(u32::from(value))
}

/// `0xCBF43926` -> `b"CBF43926"`
pub fn bin_to_hex32(value: u32) -> [u8; 8] {
    bin_to_hex::<8>(value)
}

/// Parse the first `digits` hex characters of `hex`
fn parse_hex(hex: &[u8], digits: usize) -> Option<u32> {
    let field = hex.get(..digits)?;
    field
        .iter()
        .try_fold(0u32, |acc, b| Some((acc << 4) | u32::from(hex_value(*b)?)))
}

/// Parse two hex characters; `None` on a short or invalid field
pub fn try_hex_to_bin8(hex: &[u8]) -> Option<u8> {
    parse_hex(hex, 2).map(|v| v as u8)
}

/// Parse four hex characters; `None` on a short or invalid field
pub fn try_hex_to_bin16(hex: &[u8]) -> Option<u16> {
    parse_hex(hex, 4).map(|v| v as u16)
}

/// Parse eight hex characters; `None` on a short or invalid field
pub fn try_hex_to_bin32(hex: &[u8]) -> Option<u32> {
    parse_hex(hex, 8)
}

/// Parse two hex characters, `0xFF` on a short or invalid field
///
/// The sentinel is indistinguishable from a real `FF`; use
/// [`try_hex_to_bin8`] where that matters.
pub fn hex_to_bin8(hex: &[u8]) -> u8 {
    try_hex_to_bin8(hex).unwrap_or(u8::MAX)
}

/// Parse four hex characters, `0xFFFF` on a short or invalid field
pub fn hex_to_bin16(hex: &[u8]) -> u16 {
    try_hex_to_bin16(hex).unwrap_or(u16::MAX)
}

/// Parse eight hex characters, `0xFFFFFFFF` on a short or invalid field
pub fn hex_to_bin32(hex: &[u8]) -> u32 {
    try_hex_to_bin32(hex).unwrap_or(u32::MAX)
}

/// Length up to the first NUL, or the whole slice
pub fn string_len(buf: &[u8]) -> usize {
    buf.iter().position(|b| *b == 0).unwrap_or(buf.len())
}

/// Length up to the first ETX, or the whole slice
pub fn frame_len(buf: &[u8]) -> usize {
    buf.iter().position(|b| *b == ETX).unwrap_or(buf.len())
}

/// Copy the NUL-terminated string in `src` into `dst`
///
/// Copies at most `dst.len() - 1` bytes and always NUL-terminates `dst`.
/// Returns the number of bytes copied, terminator excluded.
pub fn copy_string(src: &[u8], dst: &mut [u8]) -> usize {
    let Some(room) = dst.len().checked_sub(1) else {
        return 0;
    };
    let len = string_len(src).min(room);
    dst[..len].copy_from_slice(&src[..len]);
    dst[len] = 0;
    len
}

/// `true` if the NUL-terminated string in `a` is matched byte for byte by `b`
///
/// Only `a`'s characters are compared, so `b` may continue past them. An empty
/// `a` never matches.
pub fn compare_string(a: &[u8], b: &[u8]) -> bool {
    let len = string_len(a);
    len > 0 && b.get(..len) == Some(&a[..len])
}

/// `true` if the first `len` words of both buffers are equal
///
/// `len == 0`, or a buffer shorter than `len`, never matches.
pub fn compare_buffer16(a: &[u16], b: &[u16], len: usize) -> bool {
    match (a.get(..len), b.get(..len)) {
        (Some(x), Some(y)) => len > 0 && x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_validity() {
        assert!(is_ascii_valid(b"1100C230010"));
        assert!(is_ascii_valid(b" ~"));
        assert!(!is_ascii_valid(b""));
        assert!(!is_ascii_valid(b"ab\x7F"));
        assert!(!is_ascii_valid(b"\x1Fab"));
        assert!(!is_ascii_valid(b"\x02"));
    }

    #[test]
    fn test_hex_validity_is_uppercase_only() {
        assert!(is_hex_ascii_valid(b"0123456789ABCDEF"));
        assert!(!is_hex_ascii_valid(b"abcdef"));
        assert!(!is_hex_ascii_valid(b"G0"));
        assert!(!is_hex_ascii_valid(b""));
    }

    #[test]
    fn test_bin_to_hex_is_msb_first() {
        assert_eq!(&bin_to_hex8(0x00), b"00");
        assert_eq!(&bin_to_hex8(0xA2), b"A2");
        assert_eq!(&bin_to_hex16(0x0F10), b"0F10");
        assert_eq!(&bin_to_hex32(0xCBF43926), b"CBF43926");
        assert_eq!(&bin_to_hex32(0x0000_0001), b"00000001");
    }

    #[test]
    fn test_hex_round_trip_every_u8() {
        for value in 0..=u8::MAX {
            let hex = bin_to_hex8(value);
            assert!(is_hex_ascii_valid(&hex));
            assert_eq!(try_hex_to_bin8(&hex), Some(value));
        }
    }

    #[test]
    fn test_hex_round_trip_every_u16() {
        for value in 0..=u16::MAX {
            let hex = bin_to_hex16(value);
            assert_eq!(try_hex_to_bin16(&hex), Some(value));
            assert_eq!(hex_to_bin16(&hex), value);
        }
    }

    #[test]
    fn test_hex_round_trip_32_sweep() {
        // Every nibble position takes every digit
        for shift in (0..32).step_by(4) {
            for digit in 0..16u32 {
                let value = (digit << shift) | (0x1357_9BDF & !(0xF << shift));
                assert_eq!(try_hex_to_bin32(&bin_to_hex32(value)), Some(value));
            }
        }
    }

    #[test]
    fn test_hex_round_trip_32() {
        for value in [0u32, 1, 0x7FFF_FFFF, 0x8000_0000, 0xDEAD_BEEF, u32::MAX - 1] {
            assert_eq!(hex_to_bin32(&bin_to_hex32(value)), value);
        }
    }

    #[test]
    fn test_hex_to_bin_sentinels() {
        assert_eq!(hex_to_bin8(b"G1"), 0xFF);
        assert_eq!(hex_to_bin8(b"1"), 0xFF);
        assert_eq!(hex_to_bin8(b"a0"), 0xFF);
        assert_eq!(hex_to_bin16(b"12X4"), 0xFFFF);
        assert_eq!(hex_to_bin32(b"1234567"), 0xFFFF_FFFF);
        assert_eq!(hex_to_bin8(b"35"), 0x35);
        assert_eq!(hex_to_bin16(b"ABCD"), 0xABCD);
    }

    #[test]
    fn test_try_variants_distinguish_ff() {
        assert_eq!(try_hex_to_bin8(b"FF"), Some(0xFF));
        assert_eq!(try_hex_to_bin8(b"F?"), None);
        assert_eq!(try_hex_to_bin16(b"FFFF"), Some(0xFFFF));
        assert_eq!(try_hex_to_bin32(b""), None);
    }

    #[test]
    fn test_hex_parse_ignores_trailing_bytes() {
        assert_eq!(hex_to_bin8(b"10ABC"), 0x10);
    }

    #[test]
    fn test_lengths() {
        assert_eq!(string_len(b"abc\0def"), 3);
        assert_eq!(string_len(b"abc"), 3);
        assert_eq!(string_len(b""), 0);
        assert_eq!(frame_len(b"1100A23\x03\0"), 7);
        assert_eq!(frame_len(b""), 0);
    }

    #[test]
    fn test_copy_string_truncates_and_terminates() {
        let mut dst = [0xAAu8; 4];
        assert_eq!(copy_string(b"abcdef\0", &mut dst), 3);
        assert_eq!(&dst, b"abc\0");

        let mut dst = [0xAAu8; 8];
        assert_eq!(copy_string(b"ab\0cd", &mut dst), 2);
        assert_eq!(&dst[..3], b"ab\0");

        assert_eq!(copy_string(b"abc", &mut []), 0);
    }

    #[test]
    fn test_compare_string() {
        assert!(compare_string(b"CBF43926\0", b"CBF43926"));
        assert!(compare_string(b"AB\0", b"ABC"));
        assert!(!compare_string(b"ABC", b"AB"));
        assert!(!compare_string(b"ABD", b"ABC"));
        assert!(!compare_string(b"\0", b"ABC"));
        assert!(!compare_string(b"", b""));
    }

    #[test]
    fn test_compare_buffer16() {
        let a = [1u16, 2, 3];
        let b = [1u16, 2, 4];
        assert!(compare_buffer16(&a, &b, 2));
        assert!(!compare_buffer16(&a, &b, 3));
        assert!(!compare_buffer16(&a, &b, 0));
        assert!(!compare_buffer16(&a, &b, 4));
    }
}
