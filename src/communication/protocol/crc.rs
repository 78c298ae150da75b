//! CRC32 for frame integrity
//!
//! Frames carry the CRC32 of everything between STX and the CRC field as eight
//! uppercase hex characters, most significant nibble first.

use crc::{Crc, CRC_32_ISO_HDLC};

use super::codec::bin_to_hex32;

/// CRC32 algorithm (ISO HDLC / Ethernet / ZIP)
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Calculate CRC32 checksum of data
pub fn crc32(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// CRC32 of `data` rendered as the 8-character wire field
pub fn crc32_hex(data: &[u8]) -> [u8; 8] {
    bin_to_hex32(crc32(data))
}

/// `true` if `field` holds exactly the wire CRC of `data`
pub fn crc_field_matches(data: &[u8], field: &[u8]) -> bool {
    field == crc32_hex(data).as_slice()
}
