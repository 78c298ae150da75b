//! Front-end commands and queries
//!
//! The codes carried on the wire and the collaborator that acts on them. The
//! engine owns no RF knowledge; everything device-specific goes through
//! [`FrontEnd`].

use super::packet::PAYLOAD_SIZE;

/// Commands accepted on sub-address 0x00
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    CenterFrequency = 0x10,
    ChannelBandwidth = 0x20,
    GainSelect = 0x30,
    AicBypass = 0x31,
    Tone22kHz = 0x34,
    PolarizationVoltage = 0x35,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::CenterFrequency,
        Command::ChannelBandwidth,
        Command::GainSelect,
        Command::AicBypass,
        Command::Tone22kHz,
        Command::PolarizationVoltage,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Queries accepted on sub-address 0x00
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Query {
    AdcOutputLevel = 0x80,
    LnbInputLevel = 0x85,
    PowerLevel = 0x90,
    AnalogAttenuation = 0x95,
    FaultRelayStatus = 0xA0,
    AlarmStatus = 0xA2,
}

impl Query {
    pub const ALL: [Query; 6] = [
        Query::AdcOutputLevel,
        Query::LnbInputLevel,
        Query::PowerLevel,
        Query::AnalogAttenuation,
        Query::FaultRelayStatus,
        Query::AlarmStatus,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Code carried by the matching response frame (query code + 1)
    pub fn response_code(self) -> u8 {
        self.code().wrapping_add(1)
    }
}

/// RF front-end collaborator
///
/// `apply` acts on a command payload (ASCII, as received). `read` fills `out`
/// with printable ASCII and returns the number of bytes written; anything past
/// [`PAYLOAD_SIZE`] is ignored.
pub trait FrontEnd {
    fn apply(&mut self, command: Command, payload: &[u8]);

    fn read(&mut self, query: Query, out: &mut [u8; PAYLOAD_SIZE]) -> usize;
}

/// Front-end that accepts every command and answers queries with no data
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFrontEnd;

impl FrontEnd for NullFrontEnd {
    fn apply(&mut self, _command: Command, _payload: &[u8]) {}

    fn read(&mut self, _query: Query, _out: &mut [u8; PAYLOAD_SIZE]) -> usize {
        0
    }
}
