//! NMEA sentence decoders and their dispatch by the 3-character type
//! code. Decoders work over the borrowed field view produced by
//! [`crate::parser::nmea::NmeaSentence`] and fold engineering-unit values
//! into [`ReceiverState`]; unknown types are counted and dropped.

mod gga;
mod gsv;
mod rmc;

use crate::error::ParserError;
use crate::parser::nmea::NmeaSentence;
use crate::state::ReceiverState;

const PACKET: &str = "NmeaSentence";

/// Dispatches one checksum-valid sentence into the state. Returns whether
/// it carried navigation data; malformed fields are counted and the
/// sentence dropped.
pub fn apply_sentence(state: &mut ReceiverState, sentence: &NmeaSentence<'_>) -> bool {
    let outcome = match sentence.msg_type {
        "GGA" => gga::apply(state, sentence),
        "RMC" => rmc::apply(state, sentence),
        "GSV" => gsv::apply(state, sentence),
        _ => {
            state.counters.unknown_msgs += 1;
            return false;
        },
    };
    match outcome {
        Ok(new_data) => new_data,
        Err(err) => {
            log::debug!("dropping {} sentence: {}", sentence.msg_type, err);
            state.counters.malformed_payloads += 1;
            false
        },
    }
}

/// `ddmm.mmmm` (or `dddmm.mmmm`) plus hemisphere into signed degrees.
/// Empty coordinate fields (no fix yet) yield `None`.
fn parse_coordinate(value: &str, hemisphere: &str) -> Result<Option<f64>, ParserError> {
    if value.is_empty() || hemisphere.is_empty() {
        return Ok(None);
    }
    let dot = value.find('.').unwrap_or(value.len());
    if dot < 3 {
        return Err(ParserError::InvalidField {
            packet: PACKET,
            field: "coordinate",
        });
    }
    let degrees: f64 = value[..dot - 2].parse().map_err(|_| ParserError::InvalidField {
        packet: PACKET,
        field: "coordinate",
    })?;
    let minutes: f64 = value[dot - 2..].parse().map_err(|_| ParserError::InvalidField {
        packet: PACKET,
        field: "coordinate",
    })?;
    let magnitude = degrees + minutes / 60.0;
    match hemisphere {
        "N" | "E" => Ok(Some(magnitude)),
        "S" | "W" => Ok(Some(-magnitude)),
        _ => Err(ParserError::InvalidField {
            packet: PACKET,
            field: "hemisphere",
        }),
    }
}

/// `hhmmss` or `hhmmss.sss` into hour/minute/second. Empty yields `None`.
fn parse_utc_time(value: &str) -> Result<Option<(u8, u8, u8)>, ParserError> {
    if value.is_empty() {
        return Ok(None);
    }
    let whole = value.split('.').next().unwrap_or(value);
    if whole.len() != 6 || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParserError::InvalidField {
            packet: PACKET,
            field: "utc_time",
        });
    }
    let hour: u8 = whole[0..2].parse().unwrap_or(0);
    let min: u8 = whole[2..4].parse().unwrap_or(0);
    let sec: u8 = whole[4..6].parse().unwrap_or(0);
    if hour > 23 || min > 59 || sec > 60 {
        return Err(ParserError::InvalidField {
            packet: PACKET,
            field: "utc_time",
        });
    }
    Ok(Some((hour, min, sec)))
}

fn parse_number<T: core::str::FromStr>(
    value: &str,
    field: &'static str,
) -> Result<Option<T>, ParserError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ParserError::InvalidField { packet: PACKET, field })
}

fn field_or_empty<'a>(sentence: &NmeaSentence<'a>, index: usize) -> &'a str {
    sentence.field(index).unwrap_or("")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coordinate_conversion() {
        let lat = parse_coordinate("4807.038", "N").unwrap().unwrap();
        assert!((lat - 48.1173).abs() < 1e-4);
        let lon = parse_coordinate("01131.000", "W").unwrap().unwrap();
        assert!((lon + 11.516_666).abs() < 1e-4);
    }

    #[test]
    fn coordinate_empty_is_none() {
        assert_eq!(parse_coordinate("", "").unwrap(), None);
        assert_eq!(parse_coordinate("4807.038", "").unwrap(), None);
    }

    #[test]
    fn coordinate_bad_hemisphere_is_an_error() {
        assert!(parse_coordinate("4807.038", "Q").is_err());
    }

    #[test]
    fn utc_time_parses_with_and_without_fraction() {
        assert_eq!(parse_utc_time("123519").unwrap(), Some((12, 35, 19)));
        assert_eq!(parse_utc_time("235960.50").unwrap(), Some((23, 59, 60)));
        assert_eq!(parse_utc_time("").unwrap(), None);
        assert!(parse_utc_time("250000").is_err());
        assert!(parse_utc_time("12351").is_err());
    }

    #[test]
    fn unknown_type_is_counted() {
        let raw = b"$GPZDA,201530.00,04,07,2002,00,00*60\r\n";
        let sentence = NmeaSentence::parse(raw).unwrap();
        let mut state = ReceiverState::new();
        assert!(!apply_sentence(&mut state, &sentence));
        assert_eq!(state.counters.unknown_msgs, 1);
    }
}
