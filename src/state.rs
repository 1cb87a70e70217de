//! Receiver state: the latest decoded records from every protocol, the
//! reception/error counters, and the plain-old-data projection handed to
//! the guidance loop.

use crate::ubx::{GpsFix, NavStatusFlags, PacketRef};

/// Satellite system a tracked SV belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constellation {
    Gps,
    Sbas,
    Galileo,
    BeiDou,
    Qzss,
    Glonass,
    Unknown(u8),
}

impl Constellation {
    /// From the UBX gnssId field.
    pub fn from_gnss_id(id: u8) -> Self {
        match id {
            0 => Constellation::Gps,
            1 => Constellation::Sbas,
            2 => Constellation::Galileo,
            3 => Constellation::BeiDou,
            5 => Constellation::Qzss,
            6 => Constellation::Glonass,
            other => Constellation::Unknown(other),
        }
    }

    /// From an NMEA talker id.
    pub fn from_talker(talker: &str) -> Self {
        match talker {
            "GP" | "GN" => Constellation::Gps,
            "GA" => Constellation::Galileo,
            "GB" | "BD" => Constellation::BeiDou,
            "GQ" | "QZ" => Constellation::Qzss,
            "GL" => Constellation::Glonass,
            _ => Constellation::Unknown(0xff),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionRecord {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Height above the ellipsoid, m.
    pub height_m: f64,
    /// Height above mean sea level, m.
    pub height_msl_m: f64,
    pub horizontal_accuracy_m: f64,
    pub vertical_accuracy_m: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocityRecord {
    pub north_m_s: f64,
    pub east_m_s: f64,
    pub down_m_s: f64,
    pub ground_speed_m_s: f64,
    pub speed_3d_m_s: f64,
    pub heading_deg: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeRecord {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
    pub nanos: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct StatusRecord {
    pub fix_type: GpsFix,
    pub fix_ok: bool,
    pub time_to_first_fix_ms: u32,
    pub uptime_ms: u32,
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self {
            fix_type: GpsFix::NoFix,
            fix_ok: false,
            time_to_first_fix_ms: 0,
            uptime_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DopRecord {
    pub geometric: f64,
    pub position: f64,
    pub time: f64,
    pub vertical: f64,
    pub horizontal: f64,
    pub northing: f64,
    pub easting: f64,
}

/// NED covariance upper triangles, order NN, NE, ND, EE, ED, DD.
#[derive(Debug, Clone, Copy, Default)]
pub struct CovarianceRecord {
    pub position_valid: bool,
    pub velocity_valid: bool,
    pub position_m2: [f32; 6],
    pub velocity_m2_s2: [f32; 6],
}

#[derive(Debug, Clone, Default)]
pub struct VersionRecord {
    pub software: String,
    pub hardware: String,
}

/// One tracked satellite, merged from NAV-SAT or GSV.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatelliteRecord {
    pub constellation: Constellation,
    pub sv_id: u8,
    pub elevation_deg: i16,
    pub azimuth_deg: i16,
    pub cno_dbhz: u8,
    pub used: bool,
}

/// Per-message reception counts plus the stream error counters. All
/// per-frame failures land here instead of surfacing to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgCounters {
    pub nav_pos_llh: u32,
    pub nav_vel_ned: u32,
    pub nav_time_utc: u32,
    pub nav_status: u32,
    pub nav_dop: u32,
    pub nav_cov: u32,
    pub nav_sat: u32,
    pub mon_ver: u32,
    pub ack: u32,
    pub nak: u32,
    pub gga: u32,
    pub rmc: u32,
    pub gsv: u32,
    pub gig_nav_solution: u32,
    pub gig_sensor_status: u32,

    pub checksum_failures: u32,
    pub sync_discard_bytes: u32,
    pub bad_lengths: u32,
    pub unknown_msgs: u32,
    pub malformed_payloads: u32,
    pub overflow_resets: u32,
}

impl MsgCounters {
    /// Total successfully decoded messages across all protocols.
    pub fn received_total(&self) -> u32 {
        self.nav_pos_llh
            .wrapping_add(self.nav_vel_ned)
            .wrapping_add(self.nav_time_utc)
            .wrapping_add(self.nav_status)
            .wrapping_add(self.nav_dop)
            .wrapping_add(self.nav_cov)
            .wrapping_add(self.nav_sat)
            .wrapping_add(self.mon_ver)
            .wrapping_add(self.ack)
            .wrapping_add(self.nak)
            .wrapping_add(self.gga)
            .wrapping_add(self.rmc)
            .wrapping_add(self.gsv)
            .wrapping_add(self.gig_nav_solution)
            .wrapping_add(self.gig_sensor_status)
    }

    /// Total stream-level errors recovered locally.
    pub fn error_total(&self) -> u32 {
        self.checksum_failures
            .wrapping_add(self.sync_discard_bytes)
            .wrapping_add(self.bad_lengths)
            .wrapping_add(self.unknown_msgs)
            .wrapping_add(self.malformed_payloads)
    }
}

/// Latest decoded values from one receiver, owned exclusively by its
/// driver instance. No interior locking; concurrent callers need
/// external mutual exclusion.
#[derive(Debug, Default)]
pub struct ReceiverState {
    pub position: PositionRecord,
    pub velocity: VelocityRecord,
    pub time: TimeRecord,
    pub status: StatusRecord,
    pub dop: DopRecord,
    pub covariance: CovarianceRecord,
    pub satellites: Vec<SatelliteRecord>,
    pub version: VersionRecord,
    /// NMEA GGA fix quality indicator (0 invalid, 1 GPS, 2 DGPS, ...).
    pub fix_quality: u8,
    pub sats_used: u8,
    pub geoid_separation_m: f64,
    /// GPS time of week of the most recent position or velocity
    /// message, ms. Shared time of validity for the common projection.
    pub time_of_validity_ms: u32,
    pub counters: MsgCounters,
}

impl ReceiverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one dispatched UBX packet into the state. Returns whether
    /// the packet carried navigation data (drives sample recomputation).
    pub fn apply_ubx(&mut self, packet: &PacketRef<'_>) -> bool {
        match packet {
            PacketRef::NavPosLlh(p) => {
                self.position = PositionRecord {
                    latitude_deg: p.latitude_degrees(),
                    longitude_deg: p.longitude_degrees(),
                    height_m: p.height_meters(),
                    height_msl_m: p.height_msl_meters(),
                    horizontal_accuracy_m: p.horizontal_accuracy_meters(),
                    vertical_accuracy_m: p.vertical_accuracy_meters(),
                };
                self.time_of_validity_ms = p.itow();
                self.counters.nav_pos_llh += 1;
                true
            },
            PacketRef::NavVelNed(p) => {
                self.velocity = VelocityRecord {
                    north_m_s: p.vel_north_m_s(),
                    east_m_s: p.vel_east_m_s(),
                    down_m_s: p.vel_down_m_s(),
                    ground_speed_m_s: p.ground_speed_m_s(),
                    speed_3d_m_s: p.speed_3d_m_s(),
                    heading_deg: p.heading_degrees(),
                };
                self.time_of_validity_ms = p.itow();
                self.counters.nav_vel_ned += 1;
                true
            },
            PacketRef::NavTimeUtc(p) => {
                self.time = TimeRecord {
                    year: p.year(),
                    month: p.month(),
                    day: p.day(),
                    hour: p.hour(),
                    min: p.min(),
                    sec: p.sec(),
                    nanos: p.nanos(),
                };
                self.counters.nav_time_utc += 1;
                true
            },
            PacketRef::NavStatus(p) => {
                self.status = StatusRecord {
                    fix_type: p.fix_type(),
                    fix_ok: p.flags().contains(NavStatusFlags::GPS_FIX_OK),
                    time_to_first_fix_ms: p.time_to_first_fix_ms(),
                    uptime_ms: p.uptime_ms(),
                };
                self.counters.nav_status += 1;
                true
            },
            PacketRef::NavDop(p) => {
                self.dop = DopRecord {
                    geometric: p.geometric_dop(),
                    position: p.position_dop(),
                    time: p.time_dop(),
                    vertical: p.vertical_dop(),
                    horizontal: p.horizontal_dop(),
                    northing: p.northing_dop(),
                    easting: p.easting_dop(),
                };
                self.counters.nav_dop += 1;
                true
            },
            PacketRef::NavCov(p) => {
                self.covariance = CovarianceRecord {
                    position_valid: p.pos_cov_valid(),
                    velocity_valid: p.vel_cov_valid(),
                    position_m2: p.pos_covariance(),
                    velocity_m2_s2: p.vel_covariance(),
                };
                self.counters.nav_cov += 1;
                true
            },
            PacketRef::NavSat(p) => {
                // The table is authoritative; replace wholesale.
                self.satellites.clear();
                for sv in p.svs() {
                    self.satellites.push(SatelliteRecord {
                        constellation: Constellation::from_gnss_id(sv.gnss_id()),
                        sv_id: sv.sv_id(),
                        elevation_deg: i16::from(sv.elevation_degrees()),
                        azimuth_deg: sv.azimuth_degrees(),
                        cno_dbhz: sv.cno_dbhz(),
                        used: sv.flags().sv_used(),
                    });
                }
                self.counters.nav_sat += 1;
                true
            },
            PacketRef::MonVer(p) => {
                self.version = VersionRecord {
                    software: p.software_version().to_owned(),
                    hardware: p.hardware_version().to_owned(),
                };
                self.counters.mon_ver += 1;
                true
            },
            PacketRef::AckAck(_) => {
                self.counters.ack += 1;
                false
            },
            PacketRef::AckNak(_) => {
                self.counters.nak += 1;
                false
            },
            PacketRef::Unknown { .. } => {
                self.counters.unknown_msgs += 1;
                false
            },
        }
    }

    /// Drops every record of one constellation; GSV group starts call
    /// this before merging the fresh table.
    pub fn clear_constellation(&mut self, constellation: Constellation) {
        self.satellites.retain(|sv| sv.constellation != constellation);
    }

    /// Updates the record with a matching (constellation, id) in place,
    /// or appends a new one.
    pub fn merge_satellite(&mut self, record: SatelliteRecord) {
        match self
            .satellites
            .iter_mut()
            .find(|sv| sv.constellation == record.constellation && sv.sv_id == record.sv_id)
        {
            Some(existing) => *existing = record,
            None => self.satellites.push(record),
        }
    }

    /// Pure projection of the current state into the common sample. The
    /// driver calls this once per poll, and only when at least one
    /// message decoded.
    pub fn sample(&self) -> NavigationSample {
        NavigationSample {
            latitude_deg: self.position.latitude_deg,
            longitude_deg: self.position.longitude_deg,
            height_m: self.position.height_m,
            height_msl_m: self.position.height_msl_m,
            vel_north_m_s: self.velocity.north_m_s,
            vel_east_m_s: self.velocity.east_m_s,
            vel_down_m_s: self.velocity.down_m_s,
            ground_speed_m_s: self.velocity.ground_speed_m_s,
            heading_deg: self.velocity.heading_deg,
            utc_hour: self.time.hour,
            utc_min: self.time.min,
            utc_sec: self.time.sec,
            fix_type: self.status.fix_type,
            fix_ok: self.status.fix_ok,
            fix_quality: self.fix_quality,
            sats_used: self.sats_used,
            hdop: self.dop.horizontal,
            time_of_validity_ms: self.time_of_validity_ms,
            messages_received: self.counters.received_total(),
            stream_errors: self.counters.error_total(),
        }
    }
}

/// Snapshot handed to the guidance loop: a value copy, never a live
/// reference into driver state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationSample {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub height_m: f64,
    pub height_msl_m: f64,
    pub vel_north_m_s: f64,
    pub vel_east_m_s: f64,
    pub vel_down_m_s: f64,
    pub ground_speed_m_s: f64,
    pub heading_deg: f64,
    pub utc_hour: u8,
    pub utc_min: u8,
    pub utc_sec: u8,
    pub fix_type: GpsFix,
    pub fix_ok: bool,
    pub fix_quality: u8,
    pub sats_used: u8,
    pub hdop: f64,
    pub time_of_validity_ms: u32,
    pub messages_received: u32,
    pub stream_errors: u32,
}

impl Default for NavigationSample {
    fn default() -> Self {
        ReceiverState::default().sample()
    }
}
