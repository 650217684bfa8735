//! Subcommand implementations.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ihparah_crc32::Crc32;
use ihparah_hid::{GamepadObserver, HidApiBackend, HidBackend};
use tracing::{info, warn};

use crate::config::{DEFAULT_MESSAGE, HarnessConfig};
use crate::hex::parse_hex_u32;

const INTERRUPT_CHECK: Duration = Duration::from_millis(20);

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct RunOverrides {
    pub message: Option<String>,
    pub settle_ms: Option<u64>,
    pub linger_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub output_report: Option<String>,
}

impl RunOverrides {
    fn apply(self, mut config: HarnessConfig) -> HarnessConfig {
        if let Some(message) = self.message {
            config.message = message;
        }
        if let Some(ms) = self.settle_ms {
            config.settle_ms = ms;
        }
        if let Some(ms) = self.linger_ms {
            config.linger_ms = ms;
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(report) = self.output_report {
            config.output_report = Some(report);
        }
        config
    }
}

/// CRC-32 of `text` or `file`, or of the pangram when neither is given.
/// With `raw`, the accumulator is returned without the final complement.
pub fn compute_checksum(text: Option<&str>, file: Option<&Path>, seed: u32, raw: bool) -> Result<u32> {
    let mut hasher = Crc32::with_seed(seed);
    match (text, file) {
        (_, Some(path)) => {
            let mut reader = File::open(path)
                .with_context(|| format!("failed to open '{}'", path.display()))?;
            io::copy(&mut reader, &mut hasher)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
        }
        (Some(text), None) => hasher.update(text.as_bytes()),
        (None, None) => hasher.update(DEFAULT_MESSAGE.as_bytes()),
    }
    Ok(if raw { hasher.state() } else { hasher.finalize() })
}

pub fn checksum(text: Option<&str>, file: Option<&Path>, seed: &str, raw: bool) -> Result<()> {
    let seed = parse_hex_u32(seed).context("invalid --seed")?;
    let crc = compute_checksum(text, file, seed, raw)?;
    println!("{crc:08x}");
    Ok(())
}

pub fn list(json: bool) -> Result<()> {
    let mut backend = HidApiBackend::new().context("failed to open HID backend")?;
    let devices = backend.enumerate().context("failed to enumerate gamepads")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("No supported gamepads found");
    }
    for d in &devices {
        let bus = format!("{:?}", d.bus_type);
        println!(
            "{:04x}:{:04x}  {bus:<10}  {}  {}",
            d.vendor_id,
            d.product_id,
            d.display_name(),
            d.path
        );
    }
    Ok(())
}

pub fn run(config_path: Option<&Path>, overrides: RunOverrides) -> Result<()> {
    let base = match config_path {
        Some(path) => HarnessConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => HarnessConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate().context("invalid configuration")?;
    let report = config.output_report_bytes()?;

    let crc = !ihparah_crc32::update(ihparah_crc32::SEED, config.message.as_bytes());
    println!("{crc:08x}");
    info!("CRC-32 of {} message bytes: 0x{crc:08X}", config.message.len());

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
            .context("failed to install Ctrl-C handler")?;
    }

    let backend = HidApiBackend::new().context("failed to open HID backend")?;
    let observer = GamepadObserver::spawn(backend, config.poll_interval())
        .context("failed to start gamepad observer")?;
    info!("Gamepad observer running");

    wait_or_interrupt(config.settle(), &interrupted);

    match (&report, interrupted.load(Ordering::Relaxed)) {
        (_, true) => warn!("Interrupted; skipping output report"),
        (None, false) => info!("No output report configured; skipping pulse"),
        (Some(bytes), false) => {
            let summary = observer
                .broadcast_output_report(bytes)
                .context("failed to send output report")?;
            println!(
                "output report sent to {}/{} gamepads ({} failed)",
                summary.written, summary.attempted, summary.failed
            );
        }
    }

    wait_or_interrupt(config.linger(), &interrupted);

    let seen = observer.connected().len();
    observer.shutdown().context("gamepad observer shutdown failed")?;
    info!("Gamepad observer stopped with {seen} gamepads attached");
    Ok(())
}

fn wait_or_interrupt(duration: Duration, interrupted: &AtomicBool) {
    let Some(deadline) = Instant::now().checked_add(duration) else {
        return;
    };
    while !interrupted.load(Ordering::Relaxed) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return;
        }
        thread::sleep(remaining.min(INTERRUPT_CHECK));
    }
}
