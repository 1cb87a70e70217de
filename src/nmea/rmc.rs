//! RMC: recommended minimum navigation data. Field order after the
//! address: UTC time, status (`A` valid / `V` void), latitude, N/S,
//! longitude, E/W, speed over ground in knots, course over ground, date
//! `ddmmyy`, magnetic variation, variation E/W.

use super::{field_or_empty, parse_coordinate, parse_number, parse_utc_time, PACKET};
use crate::error::ParserError;
use crate::parser::nmea::NmeaSentence;
use crate::state::ReceiverState;

const KNOTS_TO_M_S: f64 = 1852.0 / 3600.0;

pub(super) fn apply(
    state: &mut ReceiverState,
    sentence: &NmeaSentence<'_>,
) -> Result<bool, ParserError> {
    let utc = parse_utc_time(field_or_empty(sentence, 0))?;
    let valid = match field_or_empty(sentence, 1) {
        "A" => true,
        "V" | "" => false,
        _ => {
            return Err(ParserError::InvalidField {
                packet: PACKET,
                field: "status",
            })
        },
    };
    let lat = parse_coordinate(field_or_empty(sentence, 2), field_or_empty(sentence, 3))?;
    let lon = parse_coordinate(field_or_empty(sentence, 4), field_or_empty(sentence, 5))?;
    let speed_knots: Option<f64> = parse_number(field_or_empty(sentence, 6), "speed")?;
    let course: Option<f64> = parse_number(field_or_empty(sentence, 7), "course")?;
    let date = parse_date(field_or_empty(sentence, 8))?;

    if let Some((hour, min, sec)) = utc {
        state.time.hour = hour;
        state.time.min = min;
        state.time.sec = sec;
    }
    if let Some((day, month, year)) = date {
        state.time.day = day;
        state.time.month = month;
        state.time.year = year;
    }
    state.counters.rmc += 1;

    // A void fix keeps the last known position and velocity.
    if !valid {
        return Ok(false);
    }
    if let Some(lat) = lat {
        state.position.latitude_deg = lat;
    }
    if let Some(lon) = lon {
        state.position.longitude_deg = lon;
    }
    if let Some(knots) = speed_knots {
        state.velocity.ground_speed_m_s = knots * KNOTS_TO_M_S;
    }
    if let Some(course) = course {
        state.velocity.heading_deg = course;
    }
    Ok(true)
}

/// `ddmmyy`, two-digit year pivoted into 2000..2099.
fn parse_date(value: &str) -> Result<Option<(u8, u8, u16)>, ParserError> {
    if value.is_empty() {
        return Ok(None);
    }
    if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParserError::InvalidField {
            packet: PACKET,
            field: "date",
        });
    }
    let day: u8 = value[0..2].parse().unwrap_or(0);
    let month: u8 = value[2..4].parse().unwrap_or(0);
    let year: u16 = value[4..6].parse().unwrap_or(0);
    if day == 0 || day > 31 || month == 0 || month > 12 {
        return Err(ParserError::InvalidField {
            packet: PACKET,
            field: "date",
        });
    }
    Ok(Some((day, month, 2000 + year)))
}

#[cfg(test)]
mod test {
    use crate::nmea::apply_sentence;
    use crate::parser::nmea::NmeaSentence;
    use crate::state::ReceiverState;

    const RMC: &[u8] =
        b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";

    #[test]
    fn decodes_speed_and_course() {
        let sentence = NmeaSentence::parse(RMC).unwrap();
        let mut state = ReceiverState::new();
        assert!(apply_sentence(&mut state, &sentence));

        assert!((state.velocity.ground_speed_m_s - 22.4 * 1852.0 / 3600.0).abs() < 1e-9);
        assert!((state.velocity.heading_deg - 84.4).abs() < 1e-9);
        assert!((state.position.latitude_deg - 48.1173).abs() < 1e-4);
        assert_eq!(
            (state.time.day, state.time.month, state.time.year),
            (23, 3, 2094)
        );
        assert_eq!(state.counters.rmc, 1);
    }

    #[test]
    fn void_fix_updates_clock_only() {
        let raw = b"$GPRMC,123519,V,,,,,,,230394,,*33\r\n";
        let sentence = NmeaSentence::parse(raw).unwrap();
        let mut state = ReceiverState::new();
        state.velocity.ground_speed_m_s = 5.0;
        assert!(!apply_sentence(&mut state, &sentence));
        assert_eq!(state.velocity.ground_speed_m_s, 5.0);
        assert_eq!(state.time.hour, 12);
        assert_eq!(state.counters.rmc, 1);
    }
}
