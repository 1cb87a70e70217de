use bitflags::bitflags;

use super::{read_u32_le, UbxPacketMeta};

/// GPS fix type reported by NAV-STATUS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GpsFix {
    NoFix,
    DeadReckoningOnly,
    Fix2D,
    Fix3D,
    GpsPlusDeadReckoning,
    TimeOnlyFix,
    Reserved(u8),
}

impl From<u8> for GpsFix {
    fn from(value: u8) -> Self {
        match value {
            0 => GpsFix::NoFix,
            1 => GpsFix::DeadReckoningOnly,
            2 => GpsFix::Fix2D,
            3 => GpsFix::Fix3D,
            4 => GpsFix::GpsPlusDeadReckoning,
            5 => GpsFix::TimeOnlyFix,
            other => GpsFix::Reserved(other),
        }
    }
}

impl GpsFix {
    /// Whether the fix provides a usable position.
    pub fn is_positional(self) -> bool {
        matches!(
            self,
            GpsFix::Fix2D | GpsFix::Fix3D | GpsFix::GpsPlusDeadReckoning
        )
    }
}

bitflags! {
    /// Navigation status flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavStatusFlags: u8 {
        /// Fix is within DOP and accuracy masks.
        const GPS_FIX_OK = 0x01;
        /// Differential corrections applied.
        const DIFF_SOLN = 0x02;
        /// Week number valid.
        const WKN_SET = 0x04;
        /// Time of week valid.
        const TOW_SET = 0x08;
    }
}

/// Receiver navigation status (NAV-STATUS).
#[derive(Debug)]
pub struct NavStatusRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for NavStatusRef<'_> {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x03;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(16);
    const NAME: &'static str = "NavStatus";
}

impl NavStatusRef<'_> {
    /// GPS time of week of the navigation epoch, ms.
    pub fn itow(&self) -> u32 {
        read_u32_le(self.0, 0)
    }

    pub fn fix_type(&self) -> GpsFix {
        GpsFix::from(self.0[4])
    }

    pub fn flags(&self) -> NavStatusFlags {
        NavStatusFlags::from_bits_truncate(self.0[5])
    }

    /// Time to first fix, ms.
    pub fn time_to_first_fix_ms(&self) -> u32 {
        read_u32_le(self.0, 8)
    }

    /// Milliseconds since startup/reset.
    pub fn uptime_ms(&self) -> u32 {
        read_u32_le(self.0, 12)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_fix_and_flags() {
        let mut payload = [0u8; 16];
        payload[0..4].copy_from_slice(&500u32.to_le_bytes());
        payload[4] = 3; // 3D fix
        payload[5] = 0x0d; // fix ok, wkn, tow
        payload[8..12].copy_from_slice(&2_450u32.to_le_bytes());
        payload[12..16].copy_from_slice(&60_000u32.to_le_bytes());

        let packet = NavStatusRef(&payload);
        assert_eq!(packet.fix_type(), GpsFix::Fix3D);
        assert!(packet.fix_type().is_positional());
        assert!(packet.flags().contains(NavStatusFlags::GPS_FIX_OK));
        assert!(!packet.flags().contains(NavStatusFlags::DIFF_SOLN));
        assert_eq!(packet.time_to_first_fix_ms(), 2_450);
        assert_eq!(packet.uptime_ms(), 60_000);
    }

    #[test]
    fn reserved_fix_values_are_not_positional() {
        assert_eq!(GpsFix::from(7), GpsFix::Reserved(7));
        assert!(!GpsFix::from(7).is_positional());
        assert!(!GpsFix::from(0).is_positional());
        assert!(!GpsFix::from(5).is_positional());
    }
}
