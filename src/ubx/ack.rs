use super::UbxPacketMeta;

/// Message acknowledged (ACK-ACK). Payload names the acknowledged
/// command's class and id.
#[derive(Debug)]
pub struct AckAckRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for AckAckRef<'_> {
    const CLASS: u8 = 0x05;
    const ID: u8 = 0x01;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(2);
    const NAME: &'static str = "AckAck";
}

impl AckAckRef<'_> {
    pub fn class(&self) -> u8 {
        self.0[0]
    }

    pub fn msg_id(&self) -> u8 {
        self.0[1]
    }

    /// Whether this acknowledges the given message type.
    pub fn is_ack_for<T: UbxPacketMeta>(&self) -> bool {
        self.class() == T::CLASS && self.msg_id() == T::ID
    }
}

/// Message not acknowledged (ACK-NAK).
#[derive(Debug)]
pub struct AckNakRef<'a>(pub(crate) &'a [u8]);

impl UbxPacketMeta for AckNakRef<'_> {
    const CLASS: u8 = 0x05;
    const ID: u8 = 0x00;
    const FIXED_PAYLOAD_LEN: Option<usize> = Some(2);
    const NAME: &'static str = "AckNak";
}

impl AckNakRef<'_> {
    pub fn class(&self) -> u8 {
        self.0[0]
    }

    pub fn msg_id(&self) -> u8 {
        self.0[1]
    }
}
