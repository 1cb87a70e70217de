//! GGA: global positioning fix data. Field order after the address:
//! UTC time, latitude, N/S, longitude, E/W, fix quality, satellites used,
//! HDOP, altitude MSL, `M`, geoid separation, `M`, DGPS age, DGPS station.

use super::{field_or_empty, parse_coordinate, parse_number, parse_utc_time};
use crate::error::ParserError;
use crate::parser::nmea::NmeaSentence;
use crate::state::ReceiverState;

pub(super) fn apply(
    state: &mut ReceiverState,
    sentence: &NmeaSentence<'_>,
) -> Result<bool, ParserError> {
    let utc = parse_utc_time(field_or_empty(sentence, 0))?;
    let lat = parse_coordinate(field_or_empty(sentence, 1), field_or_empty(sentence, 2))?;
    let lon = parse_coordinate(field_or_empty(sentence, 3), field_or_empty(sentence, 4))?;
    let quality: Option<u8> = parse_number(field_or_empty(sentence, 5), "fix_quality")?;
    let sats_used: Option<u8> = parse_number(field_or_empty(sentence, 6), "sats_used")?;
    let hdop: Option<f64> = parse_number(field_or_empty(sentence, 7), "hdop")?;
    let alt_msl: Option<f64> = parse_number(field_or_empty(sentence, 8), "altitude_msl")?;
    let geoid_sep: Option<f64> = parse_number(field_or_empty(sentence, 10), "geoid_separation")?;

    if let Some((hour, min, sec)) = utc {
        state.time.hour = hour;
        state.time.min = min;
        state.time.sec = sec;
    }
    if let Some(lat) = lat {
        state.position.latitude_deg = lat;
    }
    if let Some(lon) = lon {
        state.position.longitude_deg = lon;
    }
    if let Some(quality) = quality {
        state.fix_quality = quality;
    }
    if let Some(sats) = sats_used {
        state.sats_used = sats;
    }
    if let Some(hdop) = hdop {
        state.dop.horizontal = hdop;
    }
    if let Some(alt) = alt_msl {
        state.position.height_msl_m = alt;
        // Ellipsoidal height when the geoid separation is also present.
        if let Some(sep) = geoid_sep {
            state.geoid_separation_m = sep;
            state.position.height_m = alt + sep;
        }
    }
    state.counters.gga += 1;
    Ok(true)
}

#[cfg(test)]
mod test {
    use crate::nmea::apply_sentence;
    use crate::parser::nmea::NmeaSentence;
    use crate::state::ReceiverState;

    const GGA: &[u8] =
        b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

    #[test]
    fn decodes_reference_sentence() {
        let sentence = NmeaSentence::parse(GGA).unwrap();
        let mut state = ReceiverState::new();
        assert!(apply_sentence(&mut state, &sentence));

        assert_eq!(state.fix_quality, 1);
        assert_eq!(state.sats_used, 8);
        assert!((state.position.latitude_deg - 48.1173).abs() < 1e-4);
        assert!((state.position.longitude_deg - 11.516_666).abs() < 1e-4);
        assert!((state.position.height_msl_m - 545.4).abs() < 1e-9);
        assert!((state.position.height_m - 592.3).abs() < 1e-9);
        assert!((state.dop.horizontal - 0.9).abs() < 1e-9);
        assert_eq!(
            (state.time.hour, state.time.min, state.time.sec),
            (12, 35, 19)
        );
        assert_eq!(state.counters.gga, 1);
    }

    #[test]
    fn empty_fields_leave_state_untouched() {
        // No fix: time and quality only.
        let raw = b"$GPGGA,000000,,,,,0,00,,,M,,M,,*66\r\n";
        let sentence = NmeaSentence::parse(raw).unwrap();
        let mut state = ReceiverState::new();
        state.position.latitude_deg = 48.0;
        apply_sentence(&mut state, &sentence);
        assert_eq!(state.position.latitude_deg, 48.0);
        assert_eq!(state.fix_quality, 0);
    }

    #[test]
    fn garbage_numeric_field_drops_the_sentence() {
        let raw = b"$GPGGA,123519,4807.038,N,01131.000,E,1,ZZ,0.9,545.4,M,46.9,M,,*4F\r\n";
        let sentence = NmeaSentence::parse(raw).unwrap();
        let mut state = ReceiverState::new();
        assert!(!apply_sentence(&mut state, &sentence));
        assert_eq!(state.counters.gga, 0);
        assert_eq!(state.counters.malformed_payloads, 1);
        assert_eq!(state.sats_used, 0);
    }
}
