use super::{read_u16_le, read_u32_le, UbxPacketMeta};

/// Dilution-of-precision report (NAV-DOP). All factors are dimensionless,
/// wire scale 0.01.
#[derive(Debug)]
pub struct NavDopRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for NavDopRef<'_> {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x04;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(18);
    const NAME: &'static str = "NavDop";
}

impl NavDopRef<'_> {
    /// GPS time of week of the navigation epoch, ms.
    pub fn itow(&self) -> u32 {
        read_u32_le(self.0, 0)
    }

    fn dop_at(&self, offset: usize) -> f64 {
        f64::from(read_u16_le(self.0, offset)) * 1e-2
    }

    pub fn geometric_dop(&self) -> f64 {
        self.dop_at(4)
    }

    pub fn position_dop(&self) -> f64 {
        self.dop_at(6)
    }

    pub fn time_dop(&self) -> f64 {
        self.dop_at(8)
    }

    pub fn vertical_dop(&self) -> f64 {
        self.dop_at(10)
    }

    pub fn horizontal_dop(&self) -> f64 {
        self.dop_at(12)
    }

    pub fn northing_dop(&self) -> f64 {
        self.dop_at(14)
    }

    pub fn easting_dop(&self) -> f64 {
        self.dop_at(16)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_scaled_factors() {
        let mut payload = [0u8; 18];
        payload[0..4].copy_from_slice(&1_000u32.to_le_bytes());
        payload[4..6].copy_from_slice(&182u16.to_le_bytes()); // gdop 1.82
        payload[12..14].copy_from_slice(&90u16.to_le_bytes()); // hdop 0.90

        let packet = NavDopRef(&payload);
        assert_eq!(packet.itow(), 1_000);
        assert!((packet.geometric_dop() - 1.82).abs() < 1e-9);
        assert!((packet.horizontal_dop() - 0.90).abs() < 1e-9);
        assert_eq!(packet.easting_dop(), 0.0);
    }
}
