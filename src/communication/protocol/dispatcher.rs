//! Command and query dispatch tables
//!
//! Each entry binds a `(sub-address, type, code)` triple to a handler. Lookup
//! is a linear search over a small static table; the first match wins. A packet
//! with no matching entry decodes to `None` and is dropped without a reply.

use super::handlers::{Command, Query};
use super::packet::{Packet, PacketType, SUBADDR_RF};

/// Handler bound to a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Handler {
    Command(Command),
    Query(Query),
}

/// One row of a dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEntry {
    pub sub_addr: u8,
    pub kind: PacketType,
    pub code: u8,
    /// Payload length the handler expects
    pub expected_len: u8,
    pub handler: Handler,
}

impl DispatchEntry {
    const fn command(command: Command, expected_len: u8) -> Self {
        Self {
            sub_addr: SUBADDR_RF,
            kind: PacketType::Command,
            code: command as u8,
            expected_len,
            handler: Handler::Command(command),
        }
    }

    const fn query(query: Query) -> Self {
        Self {
            sub_addr: SUBADDR_RF,
            kind: PacketType::Query,
            code: query as u8,
            expected_len: 0,
            handler: Handler::Query(query),
        }
    }

    fn matches(&self, sub_addr: u8, kind: PacketType, code: u8) -> bool {
        self.sub_addr == sub_addr && self.kind == kind && self.code == code
    }
}

pub static COMMAND_TABLE: [DispatchEntry; 6] = [
    DispatchEntry::command(Command::CenterFrequency, 8),
    DispatchEntry::command(Command::ChannelBandwidth, 8),
    DispatchEntry::command(Command::GainSelect, 2),
    DispatchEntry::command(Command::AicBypass, 2),
    DispatchEntry::command(Command::Tone22kHz, 2),
    DispatchEntry::command(Command::PolarizationVoltage, 2),
];

pub static QUERY_TABLE: [DispatchEntry; 6] = [
    DispatchEntry::query(Query::AdcOutputLevel),
    DispatchEntry::query(Query::LnbInputLevel),
    DispatchEntry::query(Query::PowerLevel),
    DispatchEntry::query(Query::AnalogAttenuation),
    DispatchEntry::query(Query::FaultRelayStatus),
    DispatchEntry::query(Query::AlarmStatus),
];

/// Linear search for a matching triple, returns the entry index
pub fn lookup(
    table: &[DispatchEntry],
    sub_addr: u8,
    kind: PacketType,
    code: u8,
) -> Option<(usize, &DispatchEntry)> {
    table
        .iter()
        .enumerate()
        .find(|(_, entry)| entry.matches(sub_addr, kind, code))
}

/// Table consulted for a packet type; only commands and queries dispatch
pub fn table_for(kind: PacketType) -> Option<&'static [DispatchEntry]> {
    match kind {
        PacketType::Command => Some(&COMMAND_TABLE),
        PacketType::Query => Some(&QUERY_TABLE),
        _ => None,
    }
}

/// Resolve a validated packet to its dispatch entry
pub fn decode(packet: &Packet<'_>) -> Option<(usize, &'static DispatchEntry)> {
    let kind = packet.packet_type()?;
    let table = table_for(kind)?;
    let code = packet.code()?;
    lookup(table, packet.sub_addr_value(), kind, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_match_front_end_codes() {
        for (entry, cmd) in COMMAND_TABLE.iter().zip(Command::ALL) {
            assert_eq!(entry.code, cmd.code());
            assert_eq!(entry.handler, Handler::Command(cmd));
            assert_eq!(entry.kind, PacketType::Command);
        }
        for (entry, qry) in QUERY_TABLE.iter().zip(Query::ALL) {
            assert_eq!(entry.code, qry.code());
            assert_eq!(entry.expected_len, 0);
        }
        let lens: std::vec::Vec<u8> = COMMAND_TABLE.iter().map(|e| e.expected_len).collect();
        assert_eq!(lens, [8, 8, 2, 2, 2, 2]);
    }

    #[test]
    fn test_lookup_returns_matching_index() {
        for (i, entry) in COMMAND_TABLE.iter().enumerate() {
            let (idx, found) =
                lookup(&COMMAND_TABLE, entry.sub_addr, entry.kind, entry.code).unwrap();
            assert_eq!(idx, i);
            assert_eq!(found, entry);
        }
    }

    #[test]
    fn test_lookup_miss() {
        assert!(lookup(&COMMAND_TABLE, 0x01, PacketType::Command, 0x10).is_none());
        assert!(lookup(&COMMAND_TABLE, 0x00, PacketType::Query, 0x10).is_none());
        assert!(lookup(&QUERY_TABLE, 0x00, PacketType::Query, 0x81).is_none());
    }

    #[test]
    fn test_decode_packet() {
        let pkt = Packet::new(b"1100Q0100A2DEADBEEF").unwrap();
        let (idx, entry) = decode(&pkt).unwrap();
        assert_eq!(idx, 5);
        assert_eq!(entry.handler, Handler::Query(Query::AlarmStatus));
    }

    #[test]
    fn test_decode_ignores_non_dispatch_types() {
        let pkt = Packet::new(b"1100R0100A2DEADBEEF").unwrap();
        assert!(decode(&pkt).is_none());
        let pkt = Packet::new(b"1100A01DEADBEEF").unwrap();
        assert!(decode(&pkt).is_none());
    }

    #[test]
    fn test_decode_bad_sub_addr_misses() {
        let pkt = Packet::new(b"11XXC010010DEADBEEF").unwrap();
        assert!(decode(&pkt).is_none());
    }
}
