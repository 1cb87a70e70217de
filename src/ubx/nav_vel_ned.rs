use super::{read_i32_le, read_u32_le, UbxPacketMeta};

/// Velocity solution in north/east/down (NAV-VELNED).
#[derive(Debug)]
pub struct NavVelNedRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for NavVelNedRef<'_> {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x12;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(36);
    const NAME: &'static str = "NavVelNed";
}

impl NavVelNedRef<'_> {
    /// GPS time of week of the navigation epoch, ms.
    pub fn itow(&self) -> u32 {
        read_u32_le(self.0, 0)
    }

    /// North velocity component, m/s.
    pub fn vel_north_m_s(&self) -> f64 {
        f64::from(read_i32_le(self.0, 4)) * 1e-2
    }

    /// East velocity component, m/s.
    pub fn vel_east_m_s(&self) -> f64 {
        f64::from(read_i32_le(self.0, 8)) * 1e-2
    }

    /// Down velocity component, m/s.
    pub fn vel_down_m_s(&self) -> f64 {
        f64::from(read_i32_le(self.0, 12)) * 1e-2
    }

    /// 3D speed, m/s.
    pub fn speed_3d_m_s(&self) -> f64 {
        f64::from(read_u32_le(self.0, 16)) * 1e-2
    }

    /// Ground speed (2D), m/s.
    pub fn ground_speed_m_s(&self) -> f64 {
        f64::from(read_u32_le(self.0, 20)) * 1e-2
    }

    /// Heading of motion (2D), degrees.
    pub fn heading_degrees(&self) -> f64 {
        f64::from(read_i32_le(self.0, 24)) * 1e-5
    }

    /// Speed accuracy estimate, m/s.
    pub fn speed_accuracy_m_s(&self) -> f64 {
        f64::from(read_u32_le(self.0, 28)) * 1e-2
    }

    /// Course/heading accuracy estimate, degrees.
    pub fn course_accuracy_degrees(&self) -> f64 {
        f64::from(read_u32_le(self.0, 32)) * 1e-5
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_scaled_fields() {
        let mut payload = [0u8; 36];
        payload[0..4].copy_from_slice(&250u32.to_le_bytes());
        payload[4..8].copy_from_slice(&1234i32.to_le_bytes()); // 12.34 m/s N
        payload[8..12].copy_from_slice(&(-567i32).to_le_bytes()); // -5.67 m/s E
        payload[12..16].copy_from_slice(&89i32.to_le_bytes());
        payload[16..20].copy_from_slice(&1360u32.to_le_bytes());
        payload[20..24].copy_from_slice(&1358u32.to_le_bytes());
        payload[24..28].copy_from_slice(&27_534_900i32.to_le_bytes()); // 275.349 deg
        payload[28..32].copy_from_slice(&15u32.to_le_bytes());
        payload[32..36].copy_from_slice(&500_000u32.to_le_bytes());

        let packet = NavVelNedRef(&payload);
        assert_eq!(packet.itow(), 250);
        assert!((packet.vel_north_m_s() - 12.34).abs() < 1e-9);
        assert!((packet.vel_east_m_s() + 5.67).abs() < 1e-9);
        assert!((packet.vel_down_m_s() - 0.89).abs() < 1e-9);
        assert!((packet.speed_3d_m_s() - 13.60).abs() < 1e-9);
        assert!((packet.ground_speed_m_s() - 13.58).abs() < 1e-9);
        assert!((packet.heading_degrees() - 275.349).abs() < 1e-9);
        assert!((packet.speed_accuracy_m_s() - 0.15).abs() < 1e-9);
        assert!((packet.course_accuracy_degrees() - 5.0).abs() < 1e-9);
    }
}
