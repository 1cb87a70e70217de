//! GSV: satellites in view. Sentences arrive in groups (`total`,
//! `index`); each carries up to four satellite blocks of PRN, elevation,
//! azimuth and SNR. The first sentence of a group resets that talker's
//! constellation records, later sentences merge into them.

use super::{field_or_empty, parse_number, PACKET};
use crate::error::ParserError;
use crate::parser::nmea::NmeaSentence;
use crate::state::{Constellation, ReceiverState, SatelliteRecord};

pub(super) fn apply(
    state: &mut ReceiverState,
    sentence: &NmeaSentence<'_>,
) -> Result<bool, ParserError> {
    let msg_index: u8 = parse_number(field_or_empty(sentence, 1), "msg_index")?
        .ok_or(ParserError::InvalidField {
            packet: PACKET,
            field: "msg_index",
        })?;

    let constellation = Constellation::from_talker(sentence.talker);
    if msg_index == 1 {
        state.clear_constellation(constellation);
    }

    for block in 0..4 {
        let base = 3 + block * 4;
        let sv_id: u8 = match parse_number(field_or_empty(sentence, base), "sv_id")? {
            Some(id) => id,
            None => break,
        };
        let elevation: i16 = parse_number(field_or_empty(sentence, base + 1), "elevation")?
            .unwrap_or(0);
        let azimuth: i16 = parse_number(field_or_empty(sentence, base + 2), "azimuth")?
            .unwrap_or(0);
        // SNR is empty for satellites in view but not tracked.
        let cno: u8 = parse_number(field_or_empty(sentence, base + 3), "snr")?.unwrap_or(0);

        // GSV carries no usage flag; keep whatever the solution reported.
        let used = state
            .satellites
            .iter()
            .find(|sv| sv.constellation == constellation && sv.sv_id == sv_id)
            .map(|sv| sv.used)
            .unwrap_or(false);
        state.merge_satellite(SatelliteRecord {
            constellation,
            sv_id,
            elevation_deg: elevation,
            azimuth_deg: azimuth,
            cno_dbhz: cno,
            used,
        });
    }
    state.counters.gsv += 1;
    Ok(true)
}
