//! Sensor drivers: one per receiver family, all behind the same
//! polling interface.
//!
//! A driver owns its transport, receive buffer and decoded state
//! exclusively. [`NavSensor::process_data`] is the cooperative entry
//! point a control loop calls at its own cadence; it performs at most one
//! non-blocking read, drains every complete frame currently buffered,
//! and never blocks.

pub mod atacnav;
pub mod ublox;

pub use atacnav::AtacnavSensor;
pub use ublox::{BringupState, UbloxSensor};

use crate::error::SensorError;
use crate::state::NavigationSample;

/// Polymorphic driver interface consumed by the guidance loop. Drivers
/// are selected at construction time; dispatch is either static or via
/// `dyn NavSensor`.
pub trait NavSensor {
    /// Reads once, drains all complete frames in stream order, and
    /// reports whether any navigation data decoded. Per-frame problems
    /// are counted internally; only transport failures surface here.
    fn process_data(&mut self) -> Result<bool, SensorError>;

    /// Value copy of the latest navigation sample, never a live
    /// reference into driver state.
    fn common_data(&self) -> NavigationSample;

    /// Whether device bring-up completed successfully.
    fn is_initialized(&self) -> bool;
}
