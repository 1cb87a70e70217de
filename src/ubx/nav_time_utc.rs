use bitflags::bitflags;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::{read_i32_le, read_u16_le, read_u32_le, UbxPacketMeta};
use crate::error::DateTimeError;

bitflags! {
    /// Validity of the UTC solution carried by NAV-TIMEUTC.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavTimeUtcFlags: u8 {
        /// Time of week is valid.
        const VALID_TOW = 0x01;
        /// Week number is valid.
        const VALID_WKN = 0x02;
        /// UTC date/time is valid.
        const VALID_UTC = 0x04;
    }
}

/// UTC time solution (NAV-TIMEUTC).
#[derive(Debug)]
pub struct NavTimeUtcRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for NavTimeUtcRef<'_> {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x21;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(20);
    const NAME: &'static str = "NavTimeUtc";
}

impl NavTimeUtcRef<'_> {
    /// GPS time of week of the navigation epoch, ms.
    pub fn itow(&self) -> u32 {
        read_u32_le(self.0, 0)
    }

    /// Time accuracy estimate, ns.
    pub fn time_accuracy_ns(&self) -> u32 {
        read_u32_le(self.0, 4)
    }

    /// Sub-second correction of the second boundary, ns. May be negative.
    pub fn nanos(&self) -> i32 {
        read_i32_le(self.0, 8)
    }

    pub fn year(&self) -> u16 {
        read_u16_le(self.0, 12)
    }

    pub fn month(&self) -> u8 {
        self.0[14]
    }

    pub fn day(&self) -> u8 {
        self.0[15]
    }

    pub fn hour(&self) -> u8 {
        self.0[16]
    }

    pub fn min(&self) -> u8 {
        self.0[17]
    }

    pub fn sec(&self) -> u8 {
        self.0[18]
    }

    pub fn valid(&self) -> NavTimeUtcFlags {
        NavTimeUtcFlags::from_bits_truncate(self.0[19])
    }
}

impl TryFrom<&NavTimeUtcRef<'_>> for DateTime<Utc> {
    type Error = DateTimeError;

    fn try_from(packet: &NavTimeUtcRef<'_>) -> Result<Self, Self::Error> {
        let date = NaiveDate::from_ymd_opt(
            i32::from(packet.year()),
            u32::from(packet.month()),
            u32::from(packet.day()),
        )
        .ok_or(DateTimeError::InvalidDate)?;
        let time = date
            .and_hms_opt(
                u32::from(packet.hour()),
                u32::from(packet.min()),
                u32::from(packet.sec()),
            )
            .ok_or(DateTimeError::InvalidTime)?;
        let corrected = time
            .checked_add_signed(Duration::nanoseconds(i64::from(packet.nanos())))
            .ok_or(DateTimeError::InvalidNanoseconds)?;
        Ok(DateTime::from_naive_utc_and_offset(corrected, Utc))
    }
}
