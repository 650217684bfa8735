//! Output-report writers.

use crate::{HidError, HidResult};

/// Writes output reports to a single HID device.
///
/// `report` carries the report ID in its first byte (0 for devices that do
/// not use numbered reports) followed by the payload. Implementations
/// return the number of bytes the transport accepted.
pub trait HidWriter: Send {
    /// # Errors
    ///
    /// [`HidError::EmptyReport`] when `report` has no report-ID byte, or a
    /// transport error from the underlying device.
    fn write_output_report(&mut self, report: &[u8]) -> HidResult<usize>;
}

/// Rejects reports that lack the leading report-ID byte.
pub(crate) fn check_report(report: &[u8]) -> HidResult<u8> {
    report.first().copied().ok_or(HidError::EmptyReport)
}

#[cfg(feature = "hidapi")]
pub use self::hidapi_writer::HidApiWriter;

#[cfg(feature = "hidapi")]
mod hidapi_writer {
    use super::{HidWriter, check_report};
    use crate::{HidError, HidResult};
    use tracing::debug;

    /// [`HidWriter`] over an open `hidapi` device handle.
    pub struct HidApiWriter {
        device: hidapi::HidDevice,
        path: String,
    }

    impl HidApiWriter {
        pub fn new(device: hidapi::HidDevice, path: impl Into<String>) -> Self {
            Self {
                device,
                path: path.into(),
            }
        }

        pub fn path(&self) -> &str {
            &self.path
        }
    }

    impl HidWriter for HidApiWriter {
        fn write_output_report(&mut self, report: &[u8]) -> HidResult<usize> {
            let report_id = check_report(report)?;
            let written = self
                .device
                .write(report)
                .map_err(|e| HidError::WriteError(format!("{}: {e}", self.path)))?;
            debug!(
                "Wrote output report id=0x{report_id:02X} ({written} bytes) to {}",
                self.path
            );
            Ok(written)
        }
    }
}
