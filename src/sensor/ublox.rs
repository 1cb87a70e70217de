//! u-blox receiver driver: UBX + NMEA decoding plus the configuration
//! bring-up sequence.

use std::time::Duration;

use super::NavSensor;
use crate::constants::DEFAULT_RECV_CAPACITY;
use crate::error::{ParserError, SensorError};
use crate::nmea::apply_sentence;
use crate::parser::nmea::NmeaSentence;
use crate::parser::{demux_ublox, Demuxed, RecvBuffer};
use crate::state::{NavigationSample, ReceiverState};
use crate::transport::{is_no_data, ByteTransport};
use crate::ubx::{
    match_packet, CfgMsgBuilder, CfgNav5Builder, CfgRateBuilder, CfgRstBuilder, DynamicsModel,
    MonVerPollBuilder, NavCovRef, NavDopRef, NavPosLlhRef, NavSatRef, NavStatusRef,
    NavTimeUtcRef, NavVelNedRef, NmeaStdSentence, ResetMode,
};

const READ_CHUNK: usize = 512;
const DEFAULT_SETTLE: Duration = Duration::from_millis(100);

/// Measurement cadence by software version prefix. Versions absent from
/// the table, or an unseen version, get the most conservative rate.
const OUTPUT_RATES: &[(&str, u16)] = &[
    ("EXT CORE 3", 200),
    ("ROM CORE 3", 200),
    ("ROM CORE 2", 500),
    ("ROM CORE 1", 1000),
];
const DEFAULT_MEASURE_RATE_MS: u16 = 1000;

/// Bring-up progress. Each state past `Idle` corresponds to one batch of
/// configuration commands; `Failed` is terminal until the driver is
/// reconstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringupState {
    Idle,
    Resetting,
    DisablingUnwantedOutput,
    EnablingDesiredOutput,
    SettingRates,
    SettingDynamics,
    Ready,
    Failed(&'static str),
}

impl BringupState {
    fn step_name(self) -> &'static str {
        match self {
            BringupState::Idle => "Idle",
            BringupState::Resetting => "Resetting",
            BringupState::DisablingUnwantedOutput => "DisablingUnwantedOutput",
            BringupState::EnablingDesiredOutput => "EnablingDesiredOutput",
            BringupState::SettingRates => "SettingRates",
            BringupState::SettingDynamics => "SettingDynamics",
            BringupState::Ready => "Ready",
            BringupState::Failed(step) => step,
        }
    }
}

pub struct UbloxSensor<T> {
    transport: T,
    buf: RecvBuffer,
    state: ReceiverState,
    sample: NavigationSample,
    bringup: BringupState,
    settle: Duration,
}

impl<T: ByteTransport> UbloxSensor<T> {
    pub fn new(transport: T) -> Self {
        Self::with_capacity(transport, DEFAULT_RECV_CAPACITY)
    }

    /// Same driver with a caller-chosen receive-buffer capacity. The
    /// capacity bounds how much unconsumed input survives between polls;
    /// a buffer still full after a drain is hard-reset.
    pub fn with_capacity(transport: T, capacity: usize) -> Self {
        Self {
            transport,
            buf: RecvBuffer::new(capacity),
            state: ReceiverState::new(),
            sample: NavigationSample::default(),
            bringup: BringupState::Idle,
            settle: DEFAULT_SETTLE,
        }
    }

    /// Overrides the post-command settle delay. Tests use zero.
    pub fn settle_duration(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn bringup_state(&self) -> BringupState {
        self.bringup
    }

    pub fn receiver_state(&self) -> &ReceiverState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs the configuration sequence: reset, silence the standard NMEA
    /// chatter, enable the navigation messages, set the measurement
    /// cadence and the platform dynamics. A write failure halts the
    /// sequence at its step; there is no automatic retry.
    pub fn initialize(&mut self) -> Result<(), SensorError> {
        self.bringup = BringupState::Resetting;
        self.send_command(
            &CfgRstBuilder {
                nav_bbr_mask: 0x0000,
                reset_mode: ResetMode::ControlledSoftwareReset,
            }
            .into_packet_bytes(),
        )?;
        self.settle_and_drain();

        self.bringup = BringupState::DisablingUnwantedOutput;
        for sentence in [
            NmeaStdSentence::Gll,
            NmeaStdSentence::Vtg,
            NmeaStdSentence::Zda,
        ] {
            self.send_command(&CfgMsgBuilder::disable_nmea(sentence).into_packet_bytes())?;
        }
        self.settle_and_drain();

        self.bringup = BringupState::EnablingDesiredOutput;
        self.send_command(&CfgMsgBuilder::for_message::<NavPosLlhRef>(1).into_packet_bytes())?;
        self.send_command(&CfgMsgBuilder::for_message::<NavVelNedRef>(1).into_packet_bytes())?;
        self.send_command(&CfgMsgBuilder::for_message::<NavTimeUtcRef>(1).into_packet_bytes())?;
        self.send_command(&CfgMsgBuilder::for_message::<NavStatusRef>(1).into_packet_bytes())?;
        self.send_command(&CfgMsgBuilder::for_message::<NavDopRef>(1).into_packet_bytes())?;
        self.send_command(&CfgMsgBuilder::for_message::<NavCovRef>(1).into_packet_bytes())?;
        self.send_command(&CfgMsgBuilder::for_message::<NavSatRef>(1).into_packet_bytes())?;
        self.send_command(&MonVerPollBuilder.into_packet_bytes())?;
        self.settle_and_drain();

        self.bringup = BringupState::SettingRates;
        self.send_command(
            &CfgRateBuilder {
                measure_rate_ms: self.measure_rate_ms(),
                nav_rate: 1,
                time_ref: 0,
            }
            .into_packet_bytes(),
        )?;
        self.settle_and_drain();

        self.bringup = BringupState::SettingDynamics;
        self.send_command(
            &CfgNav5Builder {
                mask: CfgNav5Builder::MASK_DYN_MODEL | CfgNav5Builder::MASK_FIX_MODE,
                dyn_model: DynamicsModel::AirborneWith4gAcceleration,
                fix_mode: 3,
            }
            .into_packet_bytes(),
        )?;
        self.settle_and_drain();

        self.bringup = BringupState::Ready;
        log::debug!("receiver bring-up complete");
        Ok(())
    }

    /// Cadence keyed by the MON-VER software version, most conservative
    /// when none has been decoded yet.
    fn measure_rate_ms(&self) -> u16 {
        let software = &self.state.version.software;
        OUTPUT_RATES
            .iter()
            .find(|(prefix, _)| software.starts_with(prefix))
            .map(|&(_, rate)| rate)
            .unwrap_or(DEFAULT_MEASURE_RATE_MS)
    }

    fn send_command(&mut self, frame: &[u8]) -> Result<(), SensorError> {
        let step = self.bringup.step_name();
        let outcome = self
            .transport
            .write_all(frame)
            .and_then(|()| self.transport.flush());
        if let Err(err) = outcome {
            self.bringup = BringupState::Failed(step);
            log::error!("bring-up write failed at {step}: {err}");
            return Err(SensorError::BringupFailed { step });
        }
        Ok(())
    }

    /// Waits out the settle delay, then opportunistically decodes
    /// whatever the receiver sent back (acks, the MON-VER answer).
    fn settle_and_drain(&mut self) {
        if !self.settle.is_zero() {
            std::thread::sleep(self.settle);
        }
        if let Err(err) = self.poll_transport() {
            log::debug!("transport read during bring-up: {err}");
        }
    }

    /// One non-blocking read plus a full drain of the buffer.
    fn poll_transport(&mut self) -> Result<bool, SensorError> {
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
            // Full buffer with no consumable frame: hard reset, never
            // silent truncation.
            log::warn!(
                "receive buffer overflow, dropping {} bytes and flushing transport",
                self.buf.len()
            );
            self.state.counters.sync_discard_bytes += self.buf.len() as u32;
            self.state.counters.overflow_resets += 1;
            self.buf.clear();
            self.transport.flush()?;
        }
        Ok(decoded)
    }

    /// Consumes every complete frame or sentence at the head of the
    /// buffer. Each iteration consumes at least one byte.
    fn drain(&mut self) -> bool {
        let mut decoded_any = false;
        loop {
            if self.buf.is_empty() {
                break;
            }
            let (advance, decoded) = {
                let bytes = self.buf.as_slice();
                match demux_ublox(bytes) {
                    Demuxed::NeedMore => break,
                    Demuxed::Garbage(count) => {
                        self.state.counters.sync_discard_bytes += count as u32;
                        (count, false)
                    },
                    Demuxed::BadLength => {
                        self.state.counters.bad_lengths += 1;
                        (1, false)
                    },
                    Demuxed::ChecksumMismatch { len } => {
                        self.state.counters.checksum_failures += 1;
                        (len, false)
                    },
                    Demuxed::SentenceChecksumMismatch { len, expect, got } => {
                        log::debug!(
                            "dropping sentence: {}",
                            ParserError::InvalidSentenceChecksum { expect, got }
                        );
                        self.state.counters.checksum_failures += 1;
                        (len, false)
                    },
                    Demuxed::Ubx {
                        class,
                        msg_id,
                        frame,
                    } => {
                        let len = frame.len();
                        let payload = &frame[6..len - 2];
                        let decoded = match match_packet(class, msg_id, payload) {
                            Ok(packet) => self.state.apply_ubx(&packet),
                            Err(err) => {
                                log::debug!("dropping frame {class:#04x}/{msg_id:#04x}: {err}");
                                self.state.counters.malformed_payloads += 1;
                                false
                            },
                        };
                        (len, decoded)
                    },
                    Demuxed::Nmea { sentence } => {
                        let len = sentence.len();
                        let decoded = match NmeaSentence::parse(sentence) {
                            Ok(parsed) => apply_sentence(&mut self.state, &parsed),
                            Err(err) => {
                                log::debug!("dropping sentence: {err}");
                                self.state.counters.malformed_payloads += 1;
                                false
                            },
                        };
                        (len, decoded)
                    },
                }
            };
            self.buf.consume(advance);
            decoded_any |= decoded;
        }
        decoded_any
    }
}

impl<T: ByteTransport> NavSensor for UbloxSensor<T> {
    fn process_data(&mut self) -> Result<bool, SensorError> {
        let decoded = self.poll_transport()?;
        if decoded {
            self.sample = self.state.sample();
        }
        Ok(decoded)
    }

    fn common_data(&self) -> NavigationSample {
        self.sample
    }

    fn is_initialized(&self) -> bool {
        self.bringup == BringupState::Ready
    }
}
