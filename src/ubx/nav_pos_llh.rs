use super::{read_i32_le, read_u32_le, UbxPacketMeta};

/// Geodetic position solution (NAV-POSLLH).
#[derive(Debug)]
pub struct NavPosLlhRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for NavPosLlhRef<'_> {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x02;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(28);
    const NAME: &'static str = "NavPosLlh";
}

impl NavPosLlhRef<'_> {
    /// GPS time of week of the navigation epoch, ms.
    pub fn itow(&self) -> u32 {
        read_u32_le(self.0, 0)
    }

    /// Longitude, degrees.
    pub fn longitude_degrees(&self) -> f64 {
        f64::from(read_i32_le(self.0, 4)) * 1e-7
    }

    /// Latitude, degrees.
    pub fn latitude_degrees(&self) -> f64 {
        f64::from(read_i32_le(self.0, 8)) * 1e-7
    }

    /// Height above the ellipsoid, m.
    pub fn height_meters(&self) -> f64 {
        f64::from(read_i32_le(self.0, 12)) * 1e-3
    }

    /// Height above mean sea level, m.
    pub fn height_msl_meters(&self) -> f64 {
        f64::from(read_i32_le(self.0, 16)) * 1e-3
    }

    /// Horizontal accuracy estimate, m.
    pub fn horizontal_accuracy_meters(&self) -> f64 {
        f64::from(read_u32_le(self.0, 20)) * 1e-3
    }

    /// Vertical accuracy estimate, m.
    pub fn vertical_accuracy_meters(&self) -> f64 {
        f64::from(read_u32_le(self.0, 24)) * 1e-3
    }
}
