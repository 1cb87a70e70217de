//! UBX message set: zero-copy payload views over validated frames and
//! builders for the outbound configuration commands.
//!
//! Each inbound message is a `XyzRef<'a>` wrapping the payload slice, with
//! accessor methods that read fixed-offset little-endian fields and apply
//! the documented scale factors. Dispatch ([`match_packet`]) checks the
//! payload length against the decoder's expectation before constructing
//! the view, so accessors index without re-checking bounds.

pub mod ack;
pub mod cfg;
pub mod mon_ver;
pub mod nav_cov;
pub mod nav_dop;
pub mod nav_pos_llh;
pub mod nav_sat;
pub mod nav_status;
pub mod nav_time_utc;
pub mod nav_vel_ned;

pub use ack::{AckAckRef, AckNakRef};
pub use cfg::{
    CfgMsgBuilder, CfgNav5Builder, CfgRateBuilder, CfgRstBuilder, DynamicsModel,
    MonVerPollBuilder, NmeaStdSentence, ResetMode,
};
pub use mon_ver::MonVerRef;
pub use nav_cov::NavCovRef;
pub use nav_dop::NavDopRef;
pub use nav_pos_llh::NavPosLlhRef;
pub use nav_sat::{NavSatRef, NavSatSvFlags, NavSatSvInfoRef};
pub use nav_status::{GpsFix, NavStatusFlags, NavStatusRef};
pub use nav_time_utc::{NavTimeUtcFlags, NavTimeUtcRef};
pub use nav_vel_ned::NavVelNedRef;

use crate::error::ParserError;
pub(crate) use crate::parser::bytes::{
    read_f32_le, read_i16_le, read_i32_le, read_u16_le, read_u32_le,
};

/// Class/id identity and payload shape of one UBX message type.
pub trait UbxPacketMeta {
    const CLASS: u8;
    const ID: u8;
    /// Exact payload length, or `None` for variable-length messages that
    /// validate their own shape.
    const FIXED_PAYLOAD_LEN: Option<usize>;
    const NAME: &'static str;
}

fn expect_len<T: UbxPacketMeta>(payload: &[u8]) -> Result<(), ParserError> {
    match T::FIXED_PAYLOAD_LEN {
        Some(expect) if payload.len() != expect => Err(ParserError::InvalidPacketLen {
            packet: T::NAME,
            expect,
            got: payload.len(),
        }),
        _ => Ok(()),
    }
}

/// All UBX packets this crate decodes, dispatched on (class, id).
#[derive(Debug)]
pub enum PacketRef<'a> {
    NavPosLlh(NavPosLlhRef<'a>),
    NavVelNed(NavVelNedRef<'a>),
    NavTimeUtc(NavTimeUtcRef<'a>),
    NavStatus(NavStatusRef<'a>),
    NavDop(NavDopRef<'a>),
    NavCov(NavCovRef<'a>),
    NavSat(NavSatRef<'a>),
    MonVer(MonVerRef<'a>),
    AckAck(AckAckRef<'a>),
    AckNak(AckNakRef<'a>),
    /// Valid frame with no decoder. Counted by the caller, never an error.
    Unknown { class: u8, msg_id: u8 },
}

/// Maps a validated frame's identity to a payload view, rejecting
/// payloads whose length does not match the decoder's expectation.
/// An unknown (class, id) is not an error; a known one with the wrong
/// length is.
pub fn match_packet(class: u8, msg_id: u8, payload: &[u8]) -> Result<PacketRef<'_>, ParserError> {
    macro_rules! dispatch {
        ($t:ident, $r:ident) => {
            if class == $r::CLASS && msg_id == $r::ID {
                expect_len::<$r>(payload)?;
                return Ok(PacketRef::$t($r(payload)));
            }
        };
    }
    dispatch!(NavPosLlh, NavPosLlhRef);
    dispatch!(NavVelNed, NavVelNedRef);
    dispatch!(NavTimeUtc, NavTimeUtcRef);
    dispatch!(NavStatus, NavStatusRef);
    dispatch!(NavDop, NavDopRef);
    dispatch!(NavCov, NavCovRef);
    dispatch!(AckAck, AckAckRef);
    dispatch!(AckNak, AckNakRef);
    if class == NavSatRef::CLASS && msg_id == NavSatRef::ID {
        NavSatRef::validate(payload)?;
        return Ok(PacketRef::NavSat(NavSatRef(payload)));
    }
    if class == MonVerRef::CLASS && msg_id == MonVerRef::ID {
        MonVerRef::validate(payload)?;
        return Ok(PacketRef::MonVer(MonVerRef(payload)));
    }
    Ok(PacketRef::Unknown { class, msg_id })
}
