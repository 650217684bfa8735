//! Scripted backend and writer for tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::HidBackend;
use crate::device_info::GamepadInfo;
use crate::writer::{HidWriter, check_report};
use crate::{HidError, HidResult};

/// Records every report it is given.
///
/// Clones share the same history and connection flag, so a test can keep
/// one handle while the code under test owns another.
#[derive(Clone, Default)]
pub struct MockHidWriter {
    write_history: Arc<Mutex<Vec<Vec<u8>>>>,
    disconnected: Arc<Mutex<bool>>,
}

impl MockHidWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_write_history(&self) -> Vec<Vec<u8>> {
        self.write_history.lock().clone()
    }

    pub fn disconnect(&self) {
        *self.disconnected.lock() = true;
    }

    pub fn reconnect(&self) {
        *self.disconnected.lock() = false;
    }

    pub fn is_connected(&self) -> bool {
        !*self.disconnected.lock()
    }
}

impl HidWriter for MockHidWriter {
    fn write_output_report(&mut self, report: &[u8]) -> HidResult<usize> {
        check_report(report)?;
        if !self.is_connected() {
            return Err(HidError::Disconnected);
        }
        self.write_history.lock().push(report.to_vec());
        Ok(report.len())
    }
}

#[derive(Default)]
struct MockState {
    devices: Vec<GamepadInfo>,
    writers: HashMap<String, MockHidWriter>,
    fail_enumeration: bool,
    enumerations: u64,
}

/// A backend whose attached devices are set by the test.
///
/// Clones share state, so a test can hot-plug devices while an observer
/// owns another clone.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `device` and returns the writer handle that will receive
    /// its output reports.
    pub fn add_device(&self, device: GamepadInfo) -> MockHidWriter {
        let writer = MockHidWriter::new();
        let mut state = self.state.lock();
        state.writers.insert(device.path.clone(), writer.clone());
        state.devices.push(device);
        writer
    }

    pub fn remove_device(&self, path: &str) {
        let mut state = self.state.lock();
        state.devices.retain(|d| d.path != path);
        state.writers.remove(path);
    }

    pub fn set_fail_enumeration(&self, fail: bool) {
        self.state.lock().fail_enumeration = fail;
    }

    pub fn enumeration_count(&self) -> u64 {
        self.state.lock().enumerations
    }

    pub fn device_count(&self) -> usize {
        self.state.lock().devices.len()
    }
}

impl HidBackend for MockBackend {
    fn enumerate(&mut self) -> HidResult<Vec<GamepadInfo>> {
        let mut state = self.state.lock();
        state.enumerations = state.enumerations.saturating_add(1);
        if state.fail_enumeration {
            return Err(HidError::Backend("scripted enumeration failure".to_string()));
        }
        Ok(state
            .devices
            .iter()
            .filter(|d| d.gamepad_id().is_known())
            .cloned()
            .collect())
    }

    fn open_writer(&mut self, device: &GamepadInfo) -> HidResult<Box<dyn HidWriter>> {
        self.state
            .lock()
            .writers
            .get(&device.path)
            .cloned()
            .map(|w| Box::new(w) as Box<dyn HidWriter>)
            .ok_or_else(|| HidError::DeviceNotFound(device.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_writer_records() -> HidResult<()> {
        let mut writer = MockHidWriter::new();
        assert_eq!(writer.write_output_report(&[0x01, 0x02, 0x03])?, 3);
        assert_eq!(writer.get_write_history(), vec![vec![0x01, 0x02, 0x03]]);
        Ok(())
    }

    #[test]
    fn test_mock_writer_disconnect() -> HidResult<()> {
        let mut writer = MockHidWriter::new();
        writer.disconnect();
        assert!(!writer.is_connected());
        assert!(matches!(
            writer.write_output_report(&[0x01]),
            Err(HidError::Disconnected)
        ));
        writer.reconnect();
        assert_eq!(writer.write_output_report(&[0x01])?, 1);
        Ok(())
    }

    #[test]
    fn test_mock_backend_filters_unknown() -> HidResult<()> {
        let mut backend = MockBackend::new();
        backend.add_device(GamepadInfo::new(0x054C, 0x05C4, "/dev/hidraw0"));
        backend.add_device(GamepadInfo::new(0x1234, 0x5678, "/dev/hidraw1"));
        assert_eq!(backend.device_count(), 2);

        let found = backend.enumerate()?;
        assert_eq!(found.len(), 1);
        assert_eq!(backend.enumeration_count(), 1);
        Ok(())
    }

    #[test]
    fn test_mock_backend_open_missing() {
        let mut backend = MockBackend::new();
        let info = GamepadInfo::new(0x054C, 0x05C4, "/dev/hidraw9");
        assert!(matches!(
            backend.open_writer(&info),
            Err(HidError::DeviceNotFound(_))
        ));
    }
}
