//! Rehab finger sensor over a serial line.
//!
//! The device streams one newline-terminated decimal per sample. Reads never
//! block: absent data is the common case and reads as neutral. A port that
//! fails to open, or dies mid-session, leaves the sensor permanently neutral
//! (0.0, no flap) and the failure goes to the log.

use crate::config::Settings;
use crate::error::SensorError;
use std::fmt;
use std::io::{self, Read};
use std::time::Duration;

/// Unterminated bytes beyond this are junk (wrong baud, binary noise).
const MAX_PENDING_BYTES: usize = 4096;

/// A non-blocking source of sensor text lines.
pub trait SignalLine {
    /// The newest complete line received since the last poll, or `None` if
    /// nothing complete has arrived.
    fn poll_line(&mut self) -> Result<Option<String>, SensorError>;
}

/// Serial port reader that buffers partial lines between polls.
pub struct SerialLine {
    port: Box<dyn serialport::SerialPort>,
    pending: Vec<u8>,
}

impl SerialLine {
    pub fn open(port: &str, baud: u32) -> Result<Self, SensorError> {
        let port = serialport::new(port, baud)
            .timeout(Duration::ZERO)
            .open()
            .map_err(|source| SensorError::Open {
                port: port.to_string(),
                baud,
                source,
            })?;
        Ok(Self {
            port,
            pending: Vec::new(),
        })
    }
}

impl SignalLine for SerialLine {
    fn poll_line(&mut self) -> Result<Option<String>, SensorError> {
        let available = self.port.bytes_to_read()? as usize;
        if available > 0 {
            let mut buf = vec![0u8; available];
            match self.port.read(&mut buf) {
                Ok(n) => self.pending.extend_from_slice(&buf[..n]),
                Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(take_latest_line(&mut self.pending))
    }
}

/// Remove every complete line from `pending` and return the last non-empty
/// one. Trailing partial data stays buffered.
pub fn take_latest_line(pending: &mut Vec<u8>) -> Option<String> {
    let Some(last_newline) = pending.iter().rposition(|&b| b == b'\n') else {
        if pending.len() > MAX_PENDING_BYTES {
            pending.clear();
        }
        return None;
    };
    let complete: Vec<u8> = pending.drain(..=last_newline).collect();
    String::from_utf8_lossy(&complete)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .map(str::to_string)
}

/// Parse one sample and clamp it to [0,1].
pub fn parse_sample(line: &str) -> Result<f64, SensorError> {
    match line.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v.clamp(0.0, 1.0)),
        _ => Err(SensorError::Malformed(line.to_string())),
    }
}

/// Threshold-crossing flap detector with a cooldown, plus a raw value
/// reading for position control.
pub struct RehabSensorInput {
    line: Option<Box<dyn SignalLine>>,
    port: String,
    baud: u32,
    threshold: f64,
    cooldown: f64,
    prev_value: f64,
    /// Time (seconds) of the last fire; `None` until the first one.
    last_fire: Option<f64>,
}

impl fmt::Debug for RehabSensorInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RehabSensorInput")
            .field("connected", &self.line.is_some())
            .field("port", &self.port)
            .field("baud", &self.baud)
            .field("threshold", &self.threshold)
            .field("cooldown", &self.cooldown)
            .field("prev_value", &self.prev_value)
            .field("last_fire", &self.last_fire)
            .finish()
    }
}

impl RehabSensorInput {
    /// Open the configured serial port. Failure is logged and yields a
    /// neutral sensor.
    pub fn open(settings: &Settings) -> Self {
        let line: Option<Box<dyn SignalLine>> =
            match SerialLine::open(&settings.rehab_serial_port, settings.rehab_baud) {
                Ok(serial) => {
                    log::info!(
                        "rehab sensor connected on {} @ {} baud",
                        settings.rehab_serial_port,
                        settings.rehab_baud
                    );
                    Some(Box::new(serial))
                }
                Err(e) => {
                    log::warn!("rehab sensor unavailable, reading neutral: {e}");
                    None
                }
            };
        Self::build(settings, line)
    }

    /// Use an already-open line (tests, alternative transports).
    pub fn with_line(settings: &Settings, line: Box<dyn SignalLine>) -> Self {
        Self::build(settings, Some(line))
    }

    /// A sensor with no device behind it.
    pub fn disconnected(settings: &Settings) -> Self {
        Self::build(settings, None)
    }

    fn build(settings: &Settings, line: Option<Box<dyn SignalLine>>) -> Self {
        Self {
            line,
            port: settings.rehab_serial_port.clone(),
            baud: settings.rehab_baud,
            threshold: settings.rehab_flap_threshold.clamp(0.0, 1.0),
            cooldown: settings.rehab_cooldown.max(0.0),
            prev_value: 0.0,
            last_fire: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.line.is_some()
    }

    /// True if this sensor was opened with the port parameters in `settings`.
    pub fn uses_port_of(&self, settings: &Settings) -> bool {
        self.port == settings.rehab_serial_port && self.baud == settings.rehab_baud
    }

    /// Pick up new threshold/cooldown values without reopening the port.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.threshold = settings.rehab_flap_threshold.clamp(0.0, 1.0);
        self.cooldown = settings.rehab_cooldown.max(0.0);
    }

    /// One poll of the line. `None` for no data, a malformed line, or a dead
    /// connection.
    fn read_sample(&mut self) -> Option<f64> {
        let line = self.line.as_mut()?;
        match line.poll_line() {
            Ok(Some(text)) => match parse_sample(&text) {
                Ok(v) => Some(v),
                Err(e) => {
                    log::debug!("{e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("rehab sensor disconnected: {e}");
                self.line = None;
                None
            }
        }
    }

    /// Current normalized reading; 0.0 when nothing usable arrived.
    pub fn value01(&mut self) -> f64 {
        self.read_sample().unwrap_or(0.0)
    }

    /// True on an upward threshold crossing at least `cooldown` seconds after
    /// the previous fire. `now` is a monotonic clock in seconds.
    pub fn flap_edge(&mut self, now: f64) -> bool {
        let Some(value) = self.read_sample() else {
            return false;
        };
        let crossed = self.prev_value < self.threshold && value >= self.threshold;
        let allowed = self
            .last_fire
            .map_or(true, |last| now - last >= self.cooldown);
        let fire = crossed && allowed;
        if fire {
            self.last_fire = Some(now);
        }
        self.prev_value = value;
        fire
    }
}
