//! Little-endian field readers shared by the payload decoders. Callers
//! length-check the slice once at dispatch; these index directly.

pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

pub(crate) fn read_i16_le(data: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([data[offset], data[offset + 1]])
}

pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

pub(crate) fn read_i32_le(data: &[u8], offset: usize) -> i32 {
    read_u32_le(data, offset) as i32
}

pub(crate) fn read_f32_le(data: &[u8], offset: usize) -> f32 {
    f32::from_bits(read_u32_le(data, offset))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_at_offset() {
        let data = [0xff, 0x34, 0x12, 0xfe, 0xff, 0xff, 0xff];
        assert_eq!(read_u16_le(&data, 1), 0x1234);
        assert_eq!(read_i16_le(&data, 3), -2);
        assert_eq!(read_i32_le(&data, 3), -2);
    }
}
