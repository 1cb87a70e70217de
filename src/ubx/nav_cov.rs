use super::{read_f32_le, read_u32_le, UbxPacketMeta};

/// Position and velocity covariance matrices in NED (NAV-COV). The wire
/// carries the upper triangle of each symmetric 3x3 matrix as f32.
#[derive(Debug)]
pub struct NavCovRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for NavCovRef<'_> {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x36;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(64);
    const NAME: &'static str = "NavCov";
}

impl NavCovRef<'_> {
    /// GPS time of week of the navigation epoch, ms.
    pub fn itow(&self) -> u32 {
        read_u32_le(self.0, 0)
    }

    pub fn version(&self) -> u8 {
        self.0[4]
    }

    pub fn pos_cov_valid(&self) -> bool {
        self.0[5] != 0
    }

    pub fn vel_cov_valid(&self) -> bool {
        self.0[6] != 0
    }

    /// Position covariance upper triangle, m^2, in order
    /// NN, NE, ND, EE, ED, DD.
    pub fn pos_covariance(&self) -> [f32; 6] {
        let mut cov = [0.0; 6];
        for (i, slot) in cov.iter_mut().enumerate() {
            *slot = read_f32_le(self.0, 16 + i * 4);
        }
        cov
    }

    /// Velocity covariance upper triangle, m^2/s^2, in order
    /// NN, NE, ND, EE, ED, DD.
    pub fn vel_covariance(&self) -> [f32; 6] {
        let mut cov = [0.0; 6];
        for (i, slot) in cov.iter_mut().enumerate() {
            *slot = read_f32_le(self.0, 40 + i * 4);
        }
        cov
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_triangles() {
        let mut payload = [0u8; 64];
        payload[0..4].copy_from_slice(&777u32.to_le_bytes());
        payload[5] = 1;
        payload[16..20].copy_from_slice(&2.25f32.to_le_bytes()); // pos NN
        payload[36..40].copy_from_slice(&9.0f32.to_le_bytes()); // pos DD
        payload[40..44].copy_from_slice(&0.04f32.to_le_bytes()); // vel NN

        let packet = NavCovRef(&payload);
        assert_eq!(packet.itow(), 777);
        assert!(packet.pos_cov_valid());
        assert!(!packet.vel_cov_valid());
        let pos = packet.pos_covariance();
        assert_eq!(pos[0], 2.25);
        assert_eq!(pos[5], 9.0);
        assert_eq!(packet.vel_covariance()[0], 0.04);
    }
}
