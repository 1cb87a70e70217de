use std::fmt;
use std::io;

/// Error that is possible during frame/sentence parsing
#[derive(Debug, PartialEq)]
pub enum ParserError {
    InvalidChecksum {
        expect: u16,
        got: u16,
    },
    InvalidSentenceChecksum {
        expect: u8,
        got: u8,
    },
    InvalidField {
        packet: &'static str,
        field: &'static str,
    },
    InvalidPacketLen {
        packet: &'static str,
        expect: usize,
        got: usize,
    },
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::InvalidChecksum { expect, got } => write!(
                f,
                "Not valid packet's checksum, expect {:x}, got {:x}",
                expect, got
            ),
            ParserError::InvalidSentenceChecksum { expect, got } => write!(
                f,
                "Not valid sentence checksum, expect {:02x}, got {:02x}",
                expect, got
            ),
            ParserError::InvalidField { packet, field } => {
                write!(f, "Invalid field {} of packet {}", field, packet)
            },
            ParserError::InvalidPacketLen {
                packet,
                expect,
                got,
            } => write!(
                f,
                "Invalid packet({}) length, expect {}, got {}",
                packet, expect, got
            ),
        }
    }
}

impl std::error::Error for ParserError {}

#[derive(Debug, Clone, Copy)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
    InvalidNanoseconds,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
            DateTimeError::InvalidNanoseconds => f.write_str("invalid nanoseconds"),
        }
    }
}

impl std::error::Error for DateTimeError {}

/// Failures a sensor driver surfaces to its caller. Per-frame decode
/// problems are counted and recovered internally; only transport I/O and
/// device bring-up failures reach this type.
#[derive(Debug)]
pub enum SensorError {
    Io(io::Error),
    BringupFailed { step: &'static str },
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Io(e) => write!(f, "transport error: {}", e),
            SensorError::BringupFailed { step } => {
                write!(f, "device bring-up failed at step {}", step)
            },
        }
    }
}

impl std::error::Error for SensorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SensorError::Io(e) => Some(e),
            SensorError::BringupFailed { .. } => None,
        }
    }
}

impl From<io::Error> for SensorError {
    fn from(error: io::Error) -> Self {
        SensorError::Io(error)
    }
}
