//! Atacnav receiver driver. The device streams GIG frames
//! unconditionally, so there is no configuration sequence; bring-up is a
//! single transition to ready.

use super::NavSensor;
use crate::constants::{DEFAULT_RECV_CAPACITY, GIG_HEADER_LEN};
use crate::error::SensorError;
use crate::gig;
use crate::parser::{demux_gig, GigDemuxed, RecvBuffer};
use crate::state::{NavigationSample, ReceiverState};
use crate::transport::{is_no_data, ByteTransport};

const READ_CHUNK: usize = 512;

pub struct AtacnavSensor<T> {
    transport: T,
    buf: RecvBuffer,
    state: ReceiverState,
    sample: NavigationSample,
    initialized: bool,
}

impl<T: ByteTransport> AtacnavSensor<T> {
    pub fn new(transport: T) -> Self {
        Self::with_capacity(transport, DEFAULT_RECV_CAPACITY)
    }

    /// Same driver with a caller-chosen receive-buffer capacity. A
    /// buffer still full after a drain is hard-reset.
    pub fn with_capacity(transport: T, capacity: usize) -> Self {
        Self {
            transport,
            buf: RecvBuffer::new(capacity),
            state: ReceiverState::new(),
            sample: NavigationSample::default(),
            initialized: false,
        }
    }

    /// No commands to send; the device needs none.
    pub fn initialize(&mut self) -> Result<(), SensorError> {
        self.initialized = true;
        Ok(())
    }

    pub fn receiver_state(&self) -> &ReceiverState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn drain(&mut self) -> bool {
        let mut decoded_any = false;
        loop {
            if self.buf.is_empty() {
                break;
            }
            let (advance, decoded) = {
                let bytes = self.buf.as_slice();
                match demux_gig(bytes) {
                    GigDemuxed::NeedMore => break,
                    GigDemuxed::Garbage(count) => {
                        self.state.counters.sync_discard_bytes += count as u32;
                        (count, false)
                    },
                    GigDemuxed::BadLength => {
                        self.state.counters.bad_lengths += 1;
                        (1, false)
                    },
                    GigDemuxed::Frame { msg_id, frame } => {
                        let payload = &frame[GIG_HEADER_LEN..];
                        match gig::match_packet(msg_id, payload) {
                            Ok(Some(packet)) => {
                                let decoded = gig::apply_packet(&mut self.state, &packet);
                                (frame.len(), decoded)
                            },
                            Ok(None) => {
                                // Unknown id: the sync match may itself
                                // be noise, resynchronize byte-by-byte.
                                self.state.counters.unknown_msgs += 1;
                                (1, false)
                            },
                            Err(err) => {
                                log::debug!("dropping frame id {msg_id}: {err}");
                                self.state.counters.bad_lengths += 1;
                                (1, false)
                            },
                        }
                    },
                }
            };
            self.buf.consume(advance);
            decoded_any |= decoded;
        }
        decoded_any
    }
}

impl<T: ByteTransport> NavSensor for AtacnavSensor<T> {
    fn process_data(&mut self) -> Result<bool, SensorError> {
        let mut chunk = [0u8; READ_CHUNK];
        match self.transport.read(&mut chunk) {
            Ok(0) => {},
            Ok(count) => {
                let copied = self.buf.append(&chunk[..count]);
                if copied < count {
                    self.state.counters.sync_discard_bytes += (count - copied) as u32;
                }
            },
            Err(err) if is_no_data(&err) => {},
            Err(err) => return Err(err.into()),
        }

        let decoded = self.drain();

        if self.buf.is_full() {
            log::warn!(
                "receive buffer overflow, dropping {} bytes and flushing transport",
                self.buf.len()
            );
            self.state.counters.sync_discard_bytes += self.buf.len() as u32;
            self.state.counters.overflow_resets += 1;
            self.buf.clear();
            self.transport.flush()?;
        }

        if decoded {
            self.sample = self.state.sample();
        }
        Ok(decoded)
    }

    fn common_data(&self) -> NavigationSample {
        self.sample
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}
