//! Outbound configuration command builders. Each builder assembles one
//! complete frame (sync pair, header, payload, checksum) ready for the
//! transport; the checksum is stamped by the same calculator that
//! validates inbound frames.

use super::UbxPacketMeta;
use crate::constants::{UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2};
use crate::parser::checksum::ubx_checksum;

/// Writes sync, header and checksum around an already-placed payload.
/// `frame` holds the full frame; bytes 6..len-2 carry the payload.
fn stamp_frame(class: u8, msg_id: u8, frame: &mut [u8]) {
    let payload_len = frame.len() - 8;
    frame[0] = UBX_SYNC_CHAR_1;
    frame[1] = UBX_SYNC_CHAR_2;
    frame[2] = class;
    frame[3] = msg_id;
    frame[4..6].copy_from_slice(&(payload_len as u16).to_le_bytes());
    let (ck_a, ck_b) = ubx_checksum(&frame[2..frame.len() - 2]);
    frame[frame.len() - 2] = ck_a;
    frame[frame.len() - 1] = ck_b;
}

/// Reset type requested by CFG-RST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResetMode {
    HardwareResetImmediately = 0x00,
    ControlledSoftwareReset = 0x01,
    ControlledSoftwareResetGpsOnly = 0x02,
    HardwareResetAfterShutdown = 0x04,
    ControlledGpsStop = 0x08,
    ControlledGpsStart = 0x09,
}

/// Reset command (CFG-RST): BBR sections to clear plus the reset type.
/// `nav_bbr_mask` 0x0000 is a hot start, 0xffff a cold start.
#[derive(Debug)]
pub struct CfgRstBuilder {
    pub nav_bbr_mask: u16,
    pub reset_mode: ResetMode,
}

impl UbxPacketMeta for CfgRstBuilder {
    const CLASS: u8 = 0x06;
    const ID: u8 = 0x04;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(4);
    const NAME: &'static str = "CfgRst";
}

impl CfgRstBuilder {
    pub fn into_packet_bytes(self) -> [u8; 12] {
        let mut frame = [0u8; 12];
        frame[6..8].copy_from_slice(&self.nav_bbr_mask.to_le_bytes());
        frame[8] = self.reset_mode as u8;
        stamp_frame(Self::CLASS, Self::ID, &mut frame);
        frame
    }
}

/// Standard NMEA output sentences addressable through CFG-MSG class 0xF0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NmeaStdSentence {
    Gga = 0x00,
    Gll = 0x01,
    Gsa = 0x02,
    Gsv = 0x03,
    Rmc = 0x04,
    Vtg = 0x05,
    Zda = 0x08,
}

impl NmeaStdSentence {
    pub const CLASS: u8 = 0xf0;
}

/// Per-message output rate (CFG-MSG): rate 0 disables the message on the
/// current port, rate N emits it every Nth navigation epoch.
#[derive(Debug)]
pub struct CfgMsgBuilder {
    pub msg_class: u8,
    pub msg_id: u8,
    pub rate: u8,
}

impl UbxPacketMeta for CfgMsgBuilder {
    const CLASS: u8 = 0x06;
    const ID: u8 = 0x01;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(3);
    const NAME: &'static str = "CfgMsg";
}

impl CfgMsgBuilder {
    /// Rate for one of this crate's UBX messages.
    pub fn for_message<T: UbxPacketMeta>(rate: u8) -> Self {
        Self {
            msg_class: T::CLASS,
            msg_id: T::ID,
            rate,
        }
    }

    /// Disables a standard NMEA sentence on the wire.
    pub fn disable_nmea(sentence: NmeaStdSentence) -> Self {
        Self {
            msg_class: NmeaStdSentence::CLASS,
            msg_id: sentence as u8,
            rate: 0,
        }
    }

    pub fn into_packet_bytes(self) -> [u8; 11] {
        let mut frame = [0u8; 11];
        frame[6] = self.msg_class;
        frame[7] = self.msg_id;
        frame[8] = self.rate;
        stamp_frame(Self::CLASS, Self::ID, &mut frame);
        frame
    }
}

/// Navigation/measurement cadence (CFG-RATE).
#[derive(Debug)]
pub struct CfgRateBuilder {
    /// Elapsed time between measurements, ms.
    pub measure_rate_ms: u16,
    /// Measurements per navigation solution.
    pub nav_rate: u16,
    /// Time system alignment: 0 UTC, 1 GPS.
    pub time_ref: u16,
}

impl UbxPacketMeta for CfgRateBuilder {
    const CLASS: u8 = 0x06;
    const ID: u8 = 0x08;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(6);
    const NAME: &'static str = "CfgRate";
}

impl CfgRateBuilder {
    pub fn into_packet_bytes(self) -> [u8; 14] {
        let mut frame = [0u8; 14];
        frame[6..8].copy_from_slice(&self.measure_rate_ms.to_le_bytes());
        frame[8..10].copy_from_slice(&self.nav_rate.to_le_bytes());
        frame[10..12].copy_from_slice(&self.time_ref.to_le_bytes());
        stamp_frame(Self::CLASS, Self::ID, &mut frame);
        frame
    }
}

/// Platform dynamics hint for the navigation engine (CFG-NAV5 dynModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DynamicsModel {
    Portable = 0,
    Stationary = 2,
    Pedestrian = 3,
    Automotive = 4,
    Sea = 5,
    AirborneWithLess1gAcceleration = 6,
    AirborneWithLess2gAcceleration = 7,
    AirborneWith4gAcceleration = 8,
}

/// Navigation engine settings (CFG-NAV5). Only the fields selected by
/// `mask` are applied by the receiver; the rest of the payload is sent
/// zeroed and ignored.
#[derive(Debug)]
pub struct CfgNav5Builder {
    /// Parameter application mask; bit 0 selects the dynamics model,
    /// bit 2 the fix mode.
    pub mask: u16,
    pub dyn_model: DynamicsModel,
    /// 1 2D only, 2 3D only, 3 auto.
    pub fix_mode: u8,
}

impl UbxPacketMeta for CfgNav5Builder {
    const CLASS: u8 = 0x06;
    const ID: u8 = 0x24;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(36);
    const NAME: &'static str = "CfgNav5";
}

impl CfgNav5Builder {
    pub const MASK_DYN_MODEL: u16 = 0x0001;
    pub const MASK_FIX_MODE: u16 = 0x0004;

    pub fn into_packet_bytes(self) -> [u8; 44] {
        let mut frame = [0u8; 44];
        frame[6..8].copy_from_slice(&self.mask.to_le_bytes());
        frame[8] = self.dyn_model as u8;
        frame[9] = self.fix_mode;
        stamp_frame(Self::CLASS, Self::ID, &mut frame);
        frame
    }
}

/// Zero-length poll for MON-VER; the receiver answers with its version
/// strings.
#[derive(Debug)]
pub struct MonVerPollBuilder;

impl MonVerPollBuilder {
    pub fn into_packet_bytes(self) -> [u8; 8] {
        let mut frame = [0u8; 8];
        stamp_frame(0x0a, 0x04, &mut frame);
        frame
    }
}
