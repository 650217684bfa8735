//! Gamepad HID plumbing for the ihparah harness.
//!
//! This crate deliberately stays thin: it recognises a fixed set of
//! gamepads, writes raw output reports to them, and runs a background
//! observer that keeps track of which gamepads are attached. It does not
//! model gamepad input or any force-feedback protocol; report bytes are
//! passed through verbatim.
//!
//! The platform HID stack is reached through [`hidapi`] when the `hidapi`
//! feature is enabled (the default). Everything else is expressed against
//! the [`HidBackend`] and [`HidWriter`] traits, with scripted
//! implementations in [`mock`] for tests.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod device_info;
pub mod ids;
pub mod mock;
pub mod observer;
pub mod writer;

pub use backend::HidBackend;
#[cfg(feature = "hidapi")]
pub use backend::HidApiBackend;
pub use device_info::GamepadInfo;
pub use ids::{GamepadBusType, GamepadId, SCUF_VENDOR_ID, SONY_VENDOR_ID};
pub use observer::{BroadcastSummary, GamepadObserver, PollChanges};
pub use writer::HidWriter;
#[cfg(feature = "hidapi")]
pub use writer::HidApiWriter;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open device: {0}")]
    OpenError(String),

    #[error("Failed to write to device: {0}")]
    WriteError(String),

    #[error("Output report is empty; the first byte must carry the report ID")]
    EmptyReport,

    #[error("Device disconnected")]
    Disconnected,

    #[error("HID backend error: {0}")]
    Backend(String),

    #[error("Poll interval must be greater than zero")]
    InvalidPollInterval,

    #[error("Gamepad observer thread panicked")]
    ObserverPanicked,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type HidResult<T> = Result<T, HidError>;
