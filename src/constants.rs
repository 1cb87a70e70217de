pub const UBX_SYNC_CHAR_1: u8 = 0xb5;
pub const UBX_SYNC_CHAR_2: u8 = 0x62;
pub(crate) const UBX_SYNC_LEN: usize = 2;
pub(crate) const UBX_CLASS_LEN: usize = 1;
pub(crate) const UBX_ID_LEN: usize = 1;
pub(crate) const UBX_PAYLOAD_SIZE_LEN: usize = 2;
pub(crate) const UBX_HEADER_LEN: usize =
    UBX_SYNC_LEN + UBX_CLASS_LEN + UBX_ID_LEN + UBX_PAYLOAD_SIZE_LEN;
pub(crate) const UBX_CHECKSUM_LEN: usize = 2;

pub(crate) const UBX_CLASS_OFFSET: usize = 2; // After SYNC_CHAR_1, SYNC_CHAR_2
pub(crate) const UBX_MSG_ID_OFFSET: usize = 3; // After CLASS
pub(crate) const UBX_LENGTH_OFFSET: usize = 4; // After MSG_ID

/// Largest UBX payload the decoders accept (MON-VER with extensions).
pub const UBX_MAX_PAYLOAD_LEN: u16 = 1240;

pub const NMEA_SYNC_CHAR: u8 = 0x24; // '$'
pub const NMEA_CHECKSUM_CHAR: u8 = 0x2a; // '*'
pub const NMEA_END_CHAR_1: u8 = 0x0d; // '\r' (<CR>)
pub const NMEA_END_CHAR_2: u8 = 0x0a; // '\n' (<LF>)
pub(crate) const NMEA_MIN_SENTENCE_LEN: usize = 9; // $ + talker (2) + type (3) + * + checksum (2)
pub(crate) const NMEA_MAX_SENTENCE_LEN: usize = 82;

pub const GIG_SYNC: [u8; 4] = [0x47, 0x49, 0x47, 0x01];
pub(crate) const GIG_SYNC_LEN: usize = 4;
pub(crate) const GIG_HEADER_LEN: usize = GIG_SYNC_LEN + 2 + 2; // sync, message id, byte count
pub(crate) const GIG_MAX_FRAME_LEN: usize = 512;

/// Default receive-buffer capacity used by the sensor drivers.
pub const DEFAULT_RECV_CAPACITY: usize = 2048;
