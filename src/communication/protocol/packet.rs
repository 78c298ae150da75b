//! Wire layout of command, query, response and ack/nak packets
//!
//! ```text
//! STX | Dev[2] | Sub[2] | Type[1] | Id[2] | Len[2] | Code[2] | Payload[<=50] | CRC[8] | ETX
//! STX | Dev[2] | Sub[2] | 'A'/'N' | Id[2] | CRC[8] | ETX
//! ```
//!
//! Everything between STX and ETX is the frame interior. Fields are read through
//! [`Field`] offsets into the interior.

use super::codec::{hex_to_bin8, try_hex_to_bin8};

/// Start of frame
pub const STX: u8 = 0x02;
/// End of frame
pub const ETX: u8 = 0x03;

/// Maximum payload length in bytes
pub const PAYLOAD_SIZE: usize = 50;
/// Length of the CRC field
pub const CRC_LEN: usize = 8;
/// Offset of the payload inside a command/query/response interior
pub const PAYLOAD_OFFSET: usize = 11;
/// Smallest valid interior (an ack/nak)
pub const MIN_INTERIOR: usize = 15;
/// Smallest command/query interior (empty payload)
pub const MIN_CMD_QRY_INTERIOR: usize = PAYLOAD_OFFSET + CRC_LEN;
/// Largest interior the engine accepts
pub const MAX_INTERIOR: usize = PAYLOAD_OFFSET + PAYLOAD_SIZE + CRC_LEN;
/// Ack/nak frame length including STX and ETX
pub const ACK_NAK_FRAME_LEN: usize = MIN_INTERIOR + 2;
/// Largest frame the engine transmits, STX and ETX included
pub const MAX_FRAME_LEN: usize = MAX_INTERIOR + 2;

/// Sub-address of the RF front-end
pub const SUBADDR_RF: u8 = 0x00;

/// Byte range of one field inside the frame interior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub len: usize,
}

impl Field {
    const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// End offset (exclusive)
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Device address
pub const DEV_ADDR: Field = Field::new(0, 2);
/// Sub-system address
pub const SUB_ADDR: Field = Field::new(2, 2);
/// Packet type character
pub const TYPE: Field = Field::new(4, 1);
/// Packet id, echoed in the reply
pub const PACKET_ID: Field = Field::new(5, 2);
/// Payload length, hex
pub const LENGTH: Field = Field::new(7, 2);
/// Command/query code, hex
pub const CODE: Field = Field::new(9, 2);

/// Packet type character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PacketType {
    Command = b'C',
    Query = b'Q',
    Response = b'R',
    Ack = b'A',
    Nak = b'N',
}

impl PacketType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'C' => Some(Self::Command),
            b'Q' => Some(Self::Query),
            b'R' => Some(Self::Response),
            b'A' => Some(Self::Ack),
            b'N' => Some(Self::Nak),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Read-only view over a validated frame interior
#[derive(Debug, Clone, Copy)]
pub struct Packet<'a> {
    interior: &'a [u8],
}

impl<'a> Packet<'a> {
    /// Wrap an interior; `None` if shorter than [`MIN_INTERIOR`]
    pub fn new(interior: &'a [u8]) -> Option<Self> {
        (interior.len() >= MIN_INTERIOR).then_some(Self { interior })
    }

    /// Raw field bytes, `None` if the interior is too short for it
    pub fn field(&self, field: Field) -> Option<&'a [u8]> {
        self.interior.get(field.offset..field.end())
    }

    pub fn dev_addr(&self) -> &'a [u8] {
        &self.interior[DEV_ADDR.offset..DEV_ADDR.end()]
    }

    pub fn sub_addr(&self) -> &'a [u8] {
        &self.interior[SUB_ADDR.offset..SUB_ADDR.end()]
    }

    /// Sub-address value; `0xFF` if the field is not hex
    pub fn sub_addr_value(&self) -> u8 {
        hex_to_bin8(self.sub_addr())
    }

    pub fn type_byte(&self) -> u8 {
        self.interior[TYPE.offset]
    }

    pub fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_byte(self.type_byte())
    }

    pub fn packet_id(&self) -> &'a [u8] {
        &self.interior[PACKET_ID.offset..PACKET_ID.end()]
    }

    /// `true` if the interior carries length, code and CRC fields
    pub fn has_cmd_qry_header(&self) -> bool {
        self.interior.len() >= MIN_CMD_QRY_INTERIOR
    }

    /// Declared payload length
    pub fn declared_len(&self) -> Option<u8> {
        if !self.has_cmd_qry_header() {
            return None;
        }
        self.field(LENGTH).and_then(try_hex_to_bin8)
    }

    /// Command/query code; `0xFF` if the field is not hex
    pub fn code(&self) -> Option<u8> {
        if !self.has_cmd_qry_header() {
            return None;
        }
        self.field(CODE).map(hex_to_bin8)
    }

    /// Bytes between the code and the CRC field
    pub fn payload(&self) -> &'a [u8] {
        if !self.has_cmd_qry_header() {
            return &[];
        }
        &self.interior[PAYLOAD_OFFSET..self.crc_offset()]
    }

    /// Carried CRC field
    pub fn crc(&self) -> &'a [u8] {
        &self.interior[self.crc_offset()..]
    }

    /// Bytes covered by the CRC
    pub fn covered(&self) -> &'a [u8] {
        &self.interior[..self.crc_offset()]
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.interior
    }

    fn crc_offset(&self) -> usize {
        self.interior.len() - CRC_LEN
    }
}
