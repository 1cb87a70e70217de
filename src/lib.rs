//! Streaming decoders for GNSS receiver protocols.
//!
//! This crate decodes the byte streams produced by navigation receivers
//! into a shared navigation data model: u-blox receivers emitting UBX
//! binary frames interleaved with NMEA text sentences on one stream, and
//! Atacnav units emitting GIG binary frames. Input is treated as
//! untrusted — frames arrive unaligned, split across reads, and
//! occasionally corrupt — and every parsing path guarantees forward
//! progress.
//!
//! The layers, bottom up:
//!
//! - [`parser`] — bounded receive buffer, checksum calculators, and the
//!   frame synchronizer/demultiplexer that locates UBX frames, NMEA
//!   sentences and GIG frames in a byte stream.
//! - [`ubx`], [`nmea`], [`gig`] — per-protocol payload decoders (zero
//!   copy views with scale-factor accessors) and the outbound UBX
//!   configuration builders.
//! - [`state`] — [`ReceiverState`] with reception/error counters and the
//!   [`NavigationSample`] projection handed to the guidance loop.
//! - [`sensor`] — the [`NavSensor`] drivers polled by a control loop,
//!   including the u-blox bring-up sequencer.
//!
//! Decoding a stream by hand:
//!
//! ```
//! use navrx::parser::{demux_ublox, Demuxed};
//! use navrx::ubx::{match_packet, PacketRef};
//!
//! // UBX ACK-ACK acknowledging CFG-RST.
//! let stream = [0xb5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x04, 0x12, 0x3b];
//! match demux_ublox(&stream) {
//!     Demuxed::Ubx { class, msg_id, frame } => {
//!         let payload = &frame[6..frame.len() - 2];
//!         match match_packet(class, msg_id, payload).unwrap() {
//!             PacketRef::AckAck(ack) => assert_eq!(ack.class(), 0x06),
//!             _ => unreachable!(),
//!         }
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! A control loop normally goes through a driver instead: construct a
//! [`sensor::UbloxSensor`] or [`sensor::AtacnavSensor`] over a
//! [`transport::ByteTransport`], call `initialize()`, then poll
//! `process_data()` and read `common_data()`.

pub mod constants;
pub mod error;
pub mod gig;
pub mod nmea;
pub mod parser;
pub mod sensor;
pub mod state;
pub mod transport;
pub mod ubx;

pub use error::{DateTimeError, ParserError, SensorError};
pub use sensor::{AtacnavSensor, NavSensor, UbloxSensor};
pub use state::{NavigationSample, ReceiverState};
pub use transport::ByteTransport;
