//! Beacon Shared Payload Types
//!
//! This crate provides the payload types and fixed-size wire codec shared
//! between the transmitting beacon node and its receiving peer.

pub mod codec;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wire size of the fixed timestamp field: 19 visible characters plus a
/// NUL terminator.
pub const TIMESTAMP_WIRE_LEN: usize = 20;

/// Maximum number of visible characters in a timestamp string.
pub const TIMESTAMP_MAX_CHARS: usize = TIMESTAMP_WIRE_LEN - 1;

/// A 6-byte link-layer address identifying a peer on the connectionless link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkAddr(pub [u8; 6]);

impl fmt::Display for LinkAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Errors from parsing a link address out of configuration text
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddrParseError {
    #[error("Expected 6 colon-separated octets, got {0}")]
    WrongOctetCount(usize),

    #[error("Invalid octet {0:?}")]
    InvalidOctet(String),
}

impl FromStr for LinkAddr {
    type Err = AddrParseError;

    /// Parse colon-separated hex, e.g. `FC:E8:C0:7C:E3:E0`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut count = 0;

        for part in s.split(':') {
            if count == 6 {
                return Err(AddrParseError::WrongOctetCount(count + 1));
            }
            octets[count] = u8::from_str_radix(part, 16)
                .map_err(|_| AddrParseError::InvalidOctet(part.to_string()))?;
            count += 1;
        }

        if count != 6 {
            return Err(AddrParseError::WrongOctetCount(count));
        }

        Ok(LinkAddr(octets))
    }
}

/// One measurement produced for a single source during a sweep
///
/// A reading is immutable once produced and lives only for the duration of
/// one transmission; it is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Source identifier, 1..=N
    pub source_id: u8,
    /// Degrees Celsius
    pub temperature: f32,
    /// Relative humidity percent
    pub humidity: f32,
    /// Wall-clock capture time, at most [`TIMESTAMP_MAX_CHARS`] characters;
    /// empty when the schema omits it
    pub captured_at: String,
}

impl Reading {
    /// Build the deterministic synthetic reading for a source: temperature
    /// `20.0 + 0.5 * id`, humidity `60.0 + 1.0 * id`.
    pub fn synthesize(source_id: u8) -> Self {
        Self {
            source_id,
            temperature: 20.0 + 0.5 * source_id as f32,
            humidity: 60.0 + source_id as f32,
            captured_at: String::new(),
        }
    }

    /// Attach a capture timestamp
    pub fn with_captured_at(mut self, captured_at: impl Into<String>) -> Self {
        self.captured_at = captured_at.into();
        self
    }
}

/// Payload schema version selector
///
/// Both schemas share the same leading fields; `Timestamped` appends the
/// fixed 20-byte capture-time string. Sender and receiver must agree on the
/// schema since the wire carries no length prefix or version tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadSchema {
    /// 12 bytes: source id (i32 LE), temperature (f32 LE), humidity (f32 LE)
    Compact,
    /// 32 bytes: `Compact` plus the fixed 20-byte timestamp field
    #[default]
    Timestamped,
}

impl PayloadSchema {
    /// Exact wire size of a payload in this schema
    pub const fn wire_size(self) -> usize {
        match self {
            PayloadSchema::Compact => 12,
            PayloadSchema::Timestamped => 12 + TIMESTAMP_WIRE_LEN,
        }
    }
}

impl FromStr for PayloadSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(PayloadSchema::Compact),
            "timestamped" => Ok(PayloadSchema::Timestamped),
            other => Err(format!(
                "Unknown payload schema {other:?} (expected 'compact' or 'timestamped')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_addr_display() {
        let addr = LinkAddr([0xFC, 0xE8, 0xC0, 0x7C, 0xE3, 0xE0]);
        assert_eq!(addr.to_string(), "FC:E8:C0:7C:E3:E0");
    }

    #[test]
    fn test_link_addr_parse_roundtrip() {
        let addr: LinkAddr = "FC:E8:C0:7C:E3:E0".parse().expect("parse failed");
        assert_eq!(addr, LinkAddr([0xFC, 0xE8, 0xC0, 0x7C, 0xE3, 0xE0]));
        assert_eq!(addr.to_string().parse::<LinkAddr>(), Ok(addr));
    }

    #[test]
    fn test_link_addr_parse_rejects_bad_input() {
        assert!(matches!(
            "FC:E8:C0".parse::<LinkAddr>(),
            Err(AddrParseError::WrongOctetCount(3))
        ));
        assert!(matches!(
            "FC:E8:C0:7C:E3:E0:11".parse::<LinkAddr>(),
            Err(AddrParseError::WrongOctetCount(7))
        ));
        assert!(matches!(
            "FC:E8:C0:7C:E3:ZZ".parse::<LinkAddr>(),
            Err(AddrParseError::InvalidOctet(_))
        ));
    }

    #[test]
    fn test_synthesize_formula() {
        // Deterministic generator policy over the full configured range
        for id in 1..=9u8 {
            let reading = Reading::synthesize(id);
            assert_eq!(reading.source_id, id);
            assert_eq!(reading.temperature, 20.0 + 0.5 * id as f32);
            assert_eq!(reading.humidity, 60.0 + id as f32);
            assert!(reading.captured_at.is_empty());
        }
    }

    #[test]
    fn test_synthesize_known_value() {
        let reading = Reading::synthesize(3);
        assert_eq!(reading.temperature, 21.5);
        assert_eq!(reading.humidity, 63.0);
    }

    #[test]
    fn test_schema_sizes() {
        assert_eq!(PayloadSchema::Compact.wire_size(), 12);
        assert_eq!(PayloadSchema::Timestamped.wire_size(), 32);
    }

    #[test]
    fn test_schema_parse() {
        assert_eq!("compact".parse(), Ok(PayloadSchema::Compact));
        assert_eq!("Timestamped".parse(), Ok(PayloadSchema::Timestamped));
        assert!("json".parse::<PayloadSchema>().is_err());
    }
}
