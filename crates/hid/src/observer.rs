//! Background gamepad observer.
//!
//! [`GamepadObserver::spawn`] starts a poller thread that re-enumerates the
//! backend every poll interval and keeps a table of attached gamepads keyed
//! by device path. [`GamepadObserver::broadcast_output_report`] writes one
//! raw output report to every attached gamepad, and
//! [`GamepadObserver::shutdown`] stops and joins the poller.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::backend::HidBackend;
use crate::device_info::GamepadInfo;
use crate::writer::check_report;
use crate::{HidError, HidResult};

/// Upper bound on how long the poller sleeps between stop-flag checks.
const STOP_CHECK_SLICE: Duration = Duration::from_millis(10);

const THREAD_NAME: &str = "gamepad-observer";

/// Devices that appeared and disappeared during one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollChanges {
    pub added: Vec<GamepadInfo>,
    pub removed: Vec<GamepadInfo>,
}

impl PollChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Outcome of writing one report to every attached gamepad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastSummary {
    pub attempted: usize,
    pub written: usize,
    pub failed: usize,
}

struct Shared<B> {
    backend: Mutex<B>,
    connected: RwLock<HashMap<String, GamepadInfo>>,
    stop: AtomicBool,
    polls: AtomicU64,
}

impl<B: HidBackend> Shared<B> {
    fn poll(&self) -> HidResult<PollChanges> {
        // The backend guard stays held until the diff is applied, so two
        // concurrent polls cannot apply their enumerations out of order.
        let mut backend = self.backend.lock();
        let found = backend.enumerate()?;
        self.polls.fetch_add(1, Ordering::Relaxed);

        let mut changes = PollChanges::default();
        let mut connected = self.connected.write();

        let current: HashMap<String, GamepadInfo> =
            found.into_iter().map(|d| (d.path.clone(), d)).collect();

        let gone: Vec<String> = connected
            .keys()
            .filter(|path| !current.contains_key(*path))
            .cloned()
            .collect();
        for path in gone {
            if let Some(info) = connected.remove(&path) {
                info!(
                    "Gamepad disconnected: {} ({:?}) at {}",
                    info.display_name(),
                    info.gamepad_id(),
                    info.path
                );
                changes.removed.push(info);
            }
        }

        for (path, info) in current {
            if !connected.contains_key(&path) {
                info!(
                    "Gamepad connected: {} ({:?}, {:?}) at {}",
                    info.display_name(),
                    info.gamepad_id(),
                    info.bus_type,
                    info.path
                );
                changes.added.push(info.clone());
            }
            connected.insert(path, info);
        }

        changes.added.sort_by(|a, b| a.path.cmp(&b.path));
        changes.removed.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(changes)
    }

    fn run(&self, poll_interval: Duration) {
        debug!("Gamepad observer started (poll interval {poll_interval:?})");
        while !self.stop.load(Ordering::Acquire) {
            let started = Instant::now();
            if let Err(e) = self.poll() {
                warn!("Gamepad enumeration failed, retrying next poll: {e}");
            }
            let deadline = started.checked_add(poll_interval).unwrap_or(started);
            self.sleep_until(deadline);
        }
        debug!("Gamepad observer stopped");
    }

    fn sleep_until(&self, deadline: Instant) {
        loop {
            if self.stop.load(Ordering::Acquire) {
                return;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return;
            }
            thread::sleep(remaining.min(STOP_CHECK_SLICE));
        }
    }
}

/// Owns the poller thread and the table of attached gamepads.
///
/// Dropping the observer stops and joins the poller; call
/// [`GamepadObserver::shutdown`] to learn whether it exited cleanly.
pub struct GamepadObserver<B: HidBackend + 'static> {
    shared: Arc<Shared<B>>,
    handle: Option<JoinHandle<()>>,
}

impl<B: HidBackend + 'static> GamepadObserver<B> {
    /// Starts polling `backend` every `poll_interval` on a background thread.
    ///
    /// # Errors
    ///
    /// [`HidError::InvalidPollInterval`] for a zero interval, or
    /// [`HidError::IoError`] if the thread cannot be spawned.
    pub fn spawn(backend: B, poll_interval: Duration) -> HidResult<Self> {
        if poll_interval.is_zero() {
            return Err(HidError::InvalidPollInterval);
        }

        let shared = Arc::new(Shared {
            backend: Mutex::new(backend),
            connected: RwLock::new(HashMap::new()),
            stop: AtomicBool::new(false),
            polls: AtomicU64::new(0),
        });

        let worker = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || worker.run(poll_interval))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Polls the backend immediately on the calling thread.
    ///
    /// # Errors
    ///
    /// The backend's enumeration error; the device table is left untouched.
    pub fn refresh(&self) -> HidResult<PollChanges> {
        self.shared.poll()
    }

    /// Attached gamepads, ordered by path.
    pub fn connected(&self) -> Vec<GamepadInfo> {
        let mut devices: Vec<GamepadInfo> =
            self.shared.connected.read().values().cloned().collect();
        devices.sort_by(|a, b| a.path.cmp(&b.path));
        devices
    }

    /// Number of successful enumerations so far, from either thread.
    pub fn poll_count(&self) -> u64 {
        self.shared.polls.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Writes `report` to every attached gamepad.
    ///
    /// A device that cannot be opened or written is logged and counted in
    /// [`BroadcastSummary::failed`]; it does not stop the broadcast.
    ///
    /// # Errors
    ///
    /// [`HidError::EmptyReport`] if `report` has no report-ID byte.
    pub fn broadcast_output_report(&self, report: &[u8]) -> HidResult<BroadcastSummary> {
        let report_id = check_report(report)?;
        let targets = self.connected();
        let mut summary = BroadcastSummary {
            attempted: targets.len(),
            ..BroadcastSummary::default()
        };

        for device in &targets {
            // Only opening needs the backend; the write itself must not
            // stall the poller.
            let opened = self.shared.backend.lock().open_writer(device);
            let result = opened.and_then(|mut writer| writer.write_output_report(report));
            match result {
                Ok(written) => {
                    debug!(
                        "Sent report 0x{report_id:02X} ({written} bytes) to {}",
                        device.display_name()
                    );
                    summary.written = summary.written.saturating_add(1);
                }
                Err(e) => {
                    warn!(
                        "Failed to send report 0x{report_id:02X} to {}: {e}",
                        device.display_name()
                    );
                    summary.failed = summary.failed.saturating_add(1);
                }
            }
        }

        info!(
            "Output report 0x{report_id:02X} broadcast: {}/{} gamepads",
            summary.written, summary.attempted
        );
        Ok(summary)
    }

    /// Stops the poller and waits for it to exit.
    ///
    /// # Errors
    ///
    /// [`HidError::ObserverPanicked`] if the poller thread panicked.
    pub fn shutdown(mut self) -> HidResult<()> {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> HidResult<()> {
        self.shared.stop.store(true, Ordering::Release);
        match self.handle.take() {
            Some(handle) => match handle.join() {
                Ok(()) => Ok(()),
                Err(_panic) => Err(HidError::ObserverPanicked),
            },
            None => Ok(()),
        }
    }
}

impl<B: HidBackend + 'static> Drop for GamepadObserver<B> {
    fn drop(&mut self) {
        if let Err(e) = self.stop_and_join() {
            warn!("Gamepad observer did not exit cleanly: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;

    const POLL: Duration = Duration::from_millis(5);

    fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        cond()
    }

    #[test]
    fn zero_interval_rejected() {
        let result = GamepadObserver::spawn(MockBackend::new(), Duration::ZERO);
        assert!(matches!(result, Err(HidError::InvalidPollInterval)));
    }

    #[test]
    fn poller_thread_discovers_devices() -> HidResult<()> {
        let backend = MockBackend::new();
        backend.add_device(GamepadInfo::new(0x054C, 0x09CC, "/dev/hidraw3"));
        let observer = GamepadObserver::spawn(backend, POLL)?;

        assert!(wait_for(|| observer.connected().len() == 1));
        assert!(observer.is_running());
        observer.shutdown()
    }

    #[test]
    fn refresh_reports_transitions() -> HidResult<()> {
        let backend = MockBackend::new();
        let observer = GamepadObserver::spawn(backend.clone(), Duration::from_secs(3600))?;
        // Let the poller finish its first pass so it cannot race the
        // explicit refreshes below.
        assert!(wait_for(|| observer.poll_count() >= 1));

        backend.add_device(GamepadInfo::new(0x054C, 0x05C4, "/dev/hidraw0"));
        let changes = observer.refresh()?;
        assert_eq!(changes.added.len(), 1);
        assert!(changes.removed.is_empty());

        assert!(observer.refresh()?.is_empty());

        backend.remove_device("/dev/hidraw0");
        let changes = observer.refresh()?;
        assert_eq!(changes.removed.len(), 1);
        assert!(observer.connected().is_empty());
        observer.shutdown()
    }

    #[test]
    fn enumeration_errors_keep_thread_alive() -> HidResult<()> {
        let backend = MockBackend::new();
        backend.set_fail_enumeration(true);
        let observer = GamepadObserver::spawn(backend.clone(), POLL)?;

        assert!(wait_for(|| backend.enumeration_count() >= 3));
        assert!(observer.is_running());
        assert_eq!(observer.poll_count(), 0);

        backend.set_fail_enumeration(false);
        assert!(wait_for(|| observer.poll_count() >= 1));
        observer.shutdown()
    }

    #[test]
    fn broadcast_rejects_empty_report() -> HidResult<()> {
        let observer = GamepadObserver::spawn(MockBackend::new(), POLL)?;
        assert!(matches!(
            observer.broadcast_output_report(&[]),
            Err(HidError::EmptyReport)
        ));
        observer.shutdown()
    }

    #[test]
    fn drop_stops_thread() -> HidResult<()> {
        let backend = MockBackend::new();
        let observer = GamepadObserver::spawn(backend.clone(), POLL)?;
        assert!(wait_for(|| backend.enumeration_count() >= 1));
        drop(observer);

        let after_drop = backend.enumeration_count();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(backend.enumeration_count(), after_drop);
        Ok(())
    }
}
