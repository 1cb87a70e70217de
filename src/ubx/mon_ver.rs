use super::UbxPacketMeta;
use crate::error::ParserError;

/// Receiver and software version strings (MON-VER): a 30-byte software
/// version C-string, a 10-byte hardware version C-string, then any number
/// of 30-byte extension C-strings.
#[derive(Debug)]
pub struct MonVerRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for MonVerRef<'_> {
    const CLASS: u8 = 0x0a;
    const ID: u8 = 0x04;
    const FIXED_PAYLOAD_LEN: Option<usize> = None;
    const NAME: &'static str = "MonVer";
}

fn is_cstr_valid(bytes: &[u8]) -> bool {
    let terminator = match bytes.iter().position(|&b| b == 0) {
        Some(pos) => pos,
        None => return false,
    };
    core::str::from_utf8(&bytes[..terminator]).is_ok()
}

fn read_cstr(bytes: &[u8]) -> &str {
    let terminator = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    // Validated at dispatch.
    core::str::from_utf8(&bytes[..terminator]).unwrap_or("")
}

impl<'a> MonVerRef<'a> {
    const SW_LEN: usize = 30;
    const HW_LEN: usize = 10;
    const FIXED_LEN: usize = Self::SW_LEN + Self::HW_LEN;
    const EXT_LEN: usize = 30;

    pub fn validate(payload: &[u8]) -> Result<(), ParserError> {
        if payload.len() < Self::FIXED_LEN
            || (payload.len() - Self::FIXED_LEN) % Self::EXT_LEN != 0
        {
            return Err(ParserError::InvalidPacketLen {
                packet: Self::NAME,
                expect: Self::FIXED_LEN,
                got: payload.len(),
            });
        }
        if !is_cstr_valid(&payload[..Self::SW_LEN]) {
            return Err(ParserError::InvalidField {
                packet: Self::NAME,
                field: "software_version",
            });
        }
        if !is_cstr_valid(&payload[Self::SW_LEN..Self::FIXED_LEN]) {
            return Err(ParserError::InvalidField {
                packet: Self::NAME,
                field: "hardware_version",
            });
        }
        for ext in payload[Self::FIXED_LEN..].chunks_exact(Self::EXT_LEN) {
            if !is_cstr_valid(ext) {
                return Err(ParserError::InvalidField {
                    packet: Self::NAME,
                    field: "extension",
                });
            }
        }
        Ok(())
    }

    pub fn software_version(&self) -> &'a str {
        read_cstr(&self.0[..Self::SW_LEN])
    }

    pub fn hardware_version(&self) -> &'a str {
        read_cstr(&self.0[Self::SW_LEN..Self::FIXED_LEN])
    }

    /// The optional extension strings in wire order.
    pub fn extensions(&self) -> impl Iterator<Item = &'a str> {
        self.0[Self::FIXED_LEN..]
            .chunks_exact(Self::EXT_LEN)
            .map(read_cstr)
    }
}
