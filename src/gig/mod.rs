//! GIG message set (Atacnav). Two known identifiers, fixed little-endian
//! payloads, no checksum on the wire: frame acceptance rests on the sync
//! marker and a plausible byte count, and an unknown id resynchronizes
//! one byte at a time like any other sync loss.

use bitflags::bitflags;

use crate::error::ParserError;
use crate::parser::bytes::{read_i32_le, read_u16_le, read_u32_le};
use crate::state::{ReceiverState, StatusRecord};
use crate::ubx::GpsFix;

pub const GIG_NAV_SOLUTION_ID: i16 = 100;
pub const GIG_SENSOR_STATUS_ID: i16 = 101;

/// Solution status word carried by the navigation message. Multi-bit
/// fields use shift/mask accessors over the raw u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GigStatusWord(u32);

impl GigStatusWord {
    /// Navigation solution is valid.
    pub fn nav_valid(self) -> bool {
        self.0 & 0x01 != 0
    }

    /// GPS measurements are aiding the solution.
    pub fn gps_aided(self) -> bool {
        self.0 & 0x02 != 0
    }

    /// Alignment/navigation mode, bits 4..8: 0 initializing, 1 aligning,
    /// 2 navigating, 3 degraded.
    pub fn mode(self) -> u8 {
        ((self.0 >> 4) & 0x0f) as u8
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

bitflags! {
    /// Hardware fault summary carried by the sensor status message.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GigFaultFlags: u32 {
        const GPS_FAULT = 0x0001;
        const IMU_FAULT = 0x0002;
        const BARO_FAULT = 0x0004;
        const OVER_TEMPERATURE = 0x0008;
    }
}

/// Blended navigation solution (message id 100, 44-byte payload).
#[derive(Debug)]
pub struct GigNavSolutionRef<'a>(&'a [u8]);

impl GigNavSolutionRef<'_> {
    pub const PAYLOAD_LEN: usize = 44;
    const NAME: &'static str = "GigNavSolution";

    /// Time of week, s.
    pub fn time_of_week_s(&self) -> f64 {
        f64::from(read_u32_le(self.0, 0)) * 1e-3
    }

    /// Time of week, ms, as carried on the wire.
    pub fn time_of_week_ms(&self) -> u32 {
        read_u32_le(self.0, 0)
    }

    /// Latitude, degrees.
    pub fn latitude_degrees(&self) -> f64 {
        f64::from(read_i32_le(self.0, 4)) * 1e-7
    }

    /// Longitude, degrees.
    pub fn longitude_degrees(&self) -> f64 {
        f64::from(read_i32_le(self.0, 8)) * 1e-7
    }

    /// Height above the ellipsoid, m.
    pub fn height_meters(&self) -> f64 {
        f64::from(read_i32_le(self.0, 12)) * 1e-2
    }

    /// North velocity, m/s.
    pub fn vel_north_m_s(&self) -> f64 {
        f64::from(read_i32_le(self.0, 16)) * 1e-3
    }

    /// East velocity, m/s.
    pub fn vel_east_m_s(&self) -> f64 {
        f64::from(read_i32_le(self.0, 20)) * 1e-3
    }

    /// Down velocity, m/s.
    pub fn vel_down_m_s(&self) -> f64 {
        f64::from(read_i32_le(self.0, 24)) * 1e-3
    }

    pub fn status(&self) -> GigStatusWord {
        GigStatusWord(read_u32_le(self.0, 28))
    }
}

/// Sensor health and tracking summary (message id 101, 16-byte payload).
#[derive(Debug)]
pub struct GigSensorStatusRef<'a>(&'a [u8]);

impl GigSensorStatusRef<'_> {
    pub const PAYLOAD_LEN: usize = 16;
    const NAME: &'static str = "GigSensorStatus";

    pub fn mode(&self) -> u16 {
        read_u16_le(self.0, 0)
    }

    pub fn sats_tracked(&self) -> u16 {
        read_u16_le(self.0, 2)
    }

    pub fn week_number(&self) -> u16 {
        read_u16_le(self.0, 4)
    }

    pub fn fault_flags(&self) -> GigFaultFlags {
        GigFaultFlags::from_bits_truncate(read_u32_le(self.0, 8))
    }
}

#[derive(Debug)]
pub enum GigPacketRef<'a> {
    NavSolution(GigNavSolutionRef<'a>),
    SensorStatus(GigSensorStatusRef<'a>),
}

/// Maps a frame's message id to a payload view. `Ok(None)` is an unknown
/// id (the stream resynchronizes byte-by-byte); a known id with the wrong
/// payload length is an error.
pub fn match_packet(msg_id: i16, payload: &[u8]) -> Result<Option<GigPacketRef<'_>>, ParserError> {
    match msg_id {
        GIG_NAV_SOLUTION_ID => {
            if payload.len() != GigNavSolutionRef::PAYLOAD_LEN {
                return Err(ParserError::InvalidPacketLen {
                    packet: GigNavSolutionRef::NAME,
                    expect: GigNavSolutionRef::PAYLOAD_LEN,
                    got: payload.len(),
                });
            }
            Ok(Some(GigPacketRef::NavSolution(GigNavSolutionRef(payload))))
        },
        GIG_SENSOR_STATUS_ID => {
            if payload.len() != GigSensorStatusRef::PAYLOAD_LEN {
                return Err(ParserError::InvalidPacketLen {
                    packet: GigSensorStatusRef::NAME,
                    expect: GigSensorStatusRef::PAYLOAD_LEN,
                    got: payload.len(),
                });
            }
            Ok(Some(GigPacketRef::SensorStatus(GigSensorStatusRef(
                payload,
            ))))
        },
        _ => Ok(None),
    }
}

/// Folds one dispatched GIG packet into the state. Returns whether it
/// carried navigation data.
pub fn apply_packet(state: &mut ReceiverState, packet: &GigPacketRef<'_>) -> bool {
    match packet {
        GigPacketRef::NavSolution(p) => {
            state.position.latitude_deg = p.latitude_degrees();
            state.position.longitude_deg = p.longitude_degrees();
            state.position.height_m = p.height_meters();
            let (north, east, down) =
                (p.vel_north_m_s(), p.vel_east_m_s(), p.vel_down_m_s());
            state.velocity.north_m_s = north;
            state.velocity.east_m_s = east;
            state.velocity.down_m_s = down;
            state.velocity.ground_speed_m_s = north.hypot(east);
            state.velocity.speed_3d_m_s = (north * north + east * east + down * down).sqrt();
            state.velocity.heading_deg = {
                let heading = east.atan2(north).to_degrees();
                if heading < 0.0 {
                    heading + 360.0
                } else {
                    heading
                }
            };
            let status = p.status();
            state.status = StatusRecord {
                fix_type: if status.nav_valid() {
                    GpsFix::Fix3D
                } else {
                    GpsFix::NoFix
                },
                fix_ok: status.nav_valid(),
                ..state.status
            };
            state.time_of_validity_ms = p.time_of_week_ms();
            state.counters.gig_nav_solution += 1;
            true
        },
        GigPacketRef::SensorStatus(p) => {
            let faults = p.fault_flags();
            if !faults.is_empty() {
                log::warn!("sensor fault flags set: {faults:?}");
            }
            state.sats_used = p.sats_tracked().min(255) as u8;
            state.counters.gig_sensor_status += 1;
            true
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::GIG_SYNC;

    fn nav_solution_frame() -> Vec<u8> {
        let mut payload = [0u8; 44];
        payload[0..4].copy_from_slice(&43_200_000u32.to_le_bytes()); // 43200 s
        payload[4..8].copy_from_slice(&351_234_560i32.to_le_bytes()); // 35.123456 deg
        payload[8..12].copy_from_slice(&(-1_170_000_000i32).to_le_bytes()); // -117 deg
        payload[12..16].copy_from_slice(&123_450i32.to_le_bytes()); // 1234.5 m
        payload[16..20].copy_from_slice(&30_000i32.to_le_bytes()); // 30 m/s N
        payload[20..24].copy_from_slice(&40_000i32.to_le_bytes()); // 40 m/s E
        payload[24..28].copy_from_slice(&(-1_000i32).to_le_bytes());
        payload[28..32].copy_from_slice(&0x23u32.to_le_bytes()); // valid, aided, mode 2

        let mut frame = GIG_SYNC.to_vec();
        frame.extend_from_slice(&GIG_NAV_SOLUTION_ID.to_le_bytes());
        frame.extend_from_slice(&52i16.to_le_bytes());
        frame.extend_from_slice(&payload);
        frame
    }

    #[test]
    fn nav_solution_scaled_fields() {
        let frame = nav_solution_frame();
        let packet = match_packet(100, &frame[8..]).unwrap().unwrap();
        let p = match &packet {
            GigPacketRef::NavSolution(p) => p,
            other => panic!("unexpected: {other:?}"),
        };
        assert!((p.time_of_week_s() - 43_200.0).abs() < 1e-9);
        assert!((p.latitude_degrees() - 35.123_456).abs() < 1e-9);
        assert!((p.longitude_degrees() + 117.0).abs() < 1e-9);
        assert!((p.height_meters() - 1_234.5).abs() < 1e-9);
        assert!(p.status().nav_valid());
        assert!(p.status().gps_aided());
        assert_eq!(p.status().mode(), 2);
    }

    #[test]
    fn nav_solution_updates_state() {
        let frame = nav_solution_frame();
        let packet = match_packet(100, &frame[8..]).unwrap().unwrap();
        let mut state = ReceiverState::new();
        assert!(apply_packet(&mut state, &packet));
        assert!((state.velocity.ground_speed_m_s - 50.0).abs() < 1e-9);
        assert!(state.status.fix_ok);
        assert_eq!(state.time_of_validity_ms, 43_200_000);
        assert_eq!(state.counters.gig_nav_solution, 1);
        let heading = state.velocity.heading_deg;
        assert!((heading - 53.130_102).abs() < 1e-3);
    }

    #[test]
    fn sensor_status_faults() {
        let mut payload = [0u8; 16];
        payload[0..2].copy_from_slice(&2u16.to_le_bytes());
        payload[2..4].copy_from_slice(&9u16.to_le_bytes());
        payload[4..6].copy_from_slice(&2300u16.to_le_bytes());
        payload[8..12].copy_from_slice(&0x05u32.to_le_bytes());
        let packet = match_packet(101, &payload).unwrap().unwrap();
        let p = match &packet {
            GigPacketRef::SensorStatus(p) => p,
            other => panic!("unexpected: {other:?}"),
        };
        assert_eq!(p.sats_tracked(), 9);
        assert_eq!(p.week_number(), 2300);
        assert!(p
            .fault_flags()
            .contains(GigFaultFlags::GPS_FAULT | GigFaultFlags::BARO_FAULT));
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(match_packet(999, &[0u8; 4]).unwrap().is_none());
    }

    #[test]
    fn wrong_length_is_an_error() {
        assert!(match_packet(100, &[0u8; 10]).is_err());
    }
}
