use super::{read_i16_le, read_u32_le, UbxPacketMeta};
use crate::error::ParserError;

/// Per-satellite flag word from NAV-SAT. Multi-bit fields are exposed as
/// shift/mask accessors over the raw u32; the bit layout is data, not a
/// memory overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSatSvFlags(u32);

impl NavSatSvFlags {
    /// Signal quality indicator, 0 (no signal) through 7 (locked).
    pub fn quality_indicator(self) -> u8 {
        (self.0 & 0x07) as u8
    }

    /// Signal is used in the navigation solution.
    pub fn sv_used(self) -> bool {
        self.0 & 0x08 != 0
    }

    /// Health: 0 unknown, 1 healthy, 2 unhealthy.
    pub fn health(self) -> u8 {
        ((self.0 >> 4) & 0x03) as u8
    }

    /// Differential correction data available for this SV.
    pub fn diff_correction_available(self) -> bool {
        self.0 & 0x40 != 0
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// One 12-byte satellite block within NAV-SAT.
#[derive(Debug)]
pub struct NavSatSvInfoRef<'a>(&'a [u8]);

impl NavSatSvInfoRef<'_> {
    /// GNSS identifier: 0 GPS, 1 SBAS, 2 Galileo, 3 BeiDou, 5 QZSS,
    /// 6 GLONASS.
    pub fn gnss_id(&self) -> u8 {
        self.0[0]
    }

    pub fn sv_id(&self) -> u8 {
        self.0[1]
    }

    /// Carrier-to-noise density, dB-Hz.
    pub fn cno_dbhz(&self) -> u8 {
        self.0[2]
    }

    /// Elevation, degrees. +/-90; out-of-range means unknown.
    pub fn elevation_degrees(&self) -> i8 {
        self.0[3] as i8
    }

    /// Azimuth, degrees, 0..=360.
    pub fn azimuth_degrees(&self) -> i16 {
        read_i16_le(self.0, 4)
    }

    pub fn flags(&self) -> NavSatSvFlags {
        NavSatSvFlags(read_u32_le(self.0, 8))
    }
}

/// Satellite information table (NAV-SAT): a fixed header followed by one
/// 12-byte block per tracked SV.
#[derive(Debug)]
pub struct NavSatRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for NavSatRef<'_> {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x35;
    const FIXED_PAYLOAD_LEN: Option<usize> = None;
    const NAME: &'static str = "NavSat";
}

impl<'a> NavSatRef<'a> {
    const HEADER_LEN: usize = 8;
    const BLOCK_LEN: usize = 12;

    /// Checks the payload is a header plus exactly `num_svs` blocks.
    pub fn validate(payload: &[u8]) -> Result<(), ParserError> {
        if payload.len() < Self::HEADER_LEN {
            return Err(ParserError::InvalidPacketLen {
                packet: Self::NAME,
                expect: Self::HEADER_LEN,
                got: payload.len(),
            });
        }
        let expect = Self::HEADER_LEN + usize::from(payload[5]) * Self::BLOCK_LEN;
        if payload.len() != expect {
            return Err(ParserError::InvalidPacketLen {
                packet: Self::NAME,
                expect,
                got: payload.len(),
            });
        }
        Ok(())
    }

    /// GPS time of week of the navigation epoch, ms.
    pub fn itow(&self) -> u32 {
        read_u32_le(self.0, 0)
    }

    pub fn version(&self) -> u8 {
        self.0[4]
    }

    pub fn num_svs(&self) -> u8 {
        self.0[5]
    }

    /// Iterates over the per-satellite blocks in wire order.
    pub fn svs(&self) -> impl Iterator<Item = NavSatSvInfoRef<'a>> {
        self.0[Self::HEADER_LEN..]
            .chunks_exact(Self::BLOCK_LEN)
            .map(NavSatSvInfoRef)
    }
}
