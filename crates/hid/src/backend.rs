//! Device discovery.

use crate::device_info::GamepadInfo;
use crate::writer::HidWriter;
use crate::HidResult;

/// Source of attached gamepads and writers for them.
pub trait HidBackend: Send {
    /// Lists currently attached devices that map to a known
    /// [`crate::GamepadId`].
    ///
    /// # Errors
    ///
    /// Backend-specific failures while querying the platform HID stack.
    fn enumerate(&mut self) -> HidResult<Vec<GamepadInfo>>;

    /// Opens `device` for output reports.
    ///
    /// # Errors
    ///
    /// [`crate::HidError::DeviceNotFound`] if the device is gone, or
    /// [`crate::HidError::OpenError`] if it cannot be opened.
    fn open_writer(&mut self, device: &GamepadInfo) -> HidResult<Box<dyn HidWriter>>;
}

#[cfg(feature = "hidapi")]
pub use self::hidapi_backend::HidApiBackend;

#[cfg(feature = "hidapi")]
mod hidapi_backend {
    use super::HidBackend;
    use crate::device_info::GamepadInfo;
    use crate::writer::{HidApiWriter, HidWriter};
    use crate::{HidError, HidResult};
    use std::ffi::CString;
    use tracing::debug;

    /// [`HidBackend`] over the platform HID stack.
    pub struct HidApiBackend {
        api: hidapi::HidApi,
    }

    impl HidApiBackend {
        /// # Errors
        ///
        /// [`HidError::Backend`] if the HID library cannot be initialised.
        pub fn new() -> HidResult<Self> {
            let api = hidapi::HidApi::new()
                .map_err(|e| HidError::Backend(format!("failed to initialise HID API: {e}")))?;
            Ok(Self { api })
        }
    }

    impl HidBackend for HidApiBackend {
        fn enumerate(&mut self) -> HidResult<Vec<GamepadInfo>> {
            self.api
                .refresh_devices()
                .map_err(|e| HidError::Backend(format!("device refresh failed: {e}")))?;

            let mut devices: Vec<GamepadInfo> = self
                .api
                .device_list()
                .map(GamepadInfo::from)
                .filter(|info| info.gamepad_id().is_known())
                .collect();
            // One physical pad can expose several HID interfaces under the
            // same path on some platforms.
            devices.sort_by(|a, b| a.path.cmp(&b.path));
            devices.dedup_by(|a, b| a.path == b.path);

            debug!("Enumerated {} gamepads", devices.len());
            Ok(devices)
        }

        fn open_writer(&mut self, device: &GamepadInfo) -> HidResult<Box<dyn HidWriter>> {
            let path = CString::new(device.path.as_str())
                .map_err(|e| HidError::DeviceNotFound(format!("{}: {e}", device.path)))?;
            let handle = self
                .api
                .open_path(&path)
                .map_err(|e| HidError::OpenError(format!("{}: {e}", device.path)))?;
            let writer = HidApiWriter::new(handle, device.path.clone());
            debug!("Opened output-report writer for {}", writer.path());
            Ok(Box::new(writer))
        }
    }
}
