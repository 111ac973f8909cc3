//! Boot record persistence and the derived virtual display clock

use crate::errors::{MonitorError, Result};
use chrono::{NaiveDateTime, Timelike, Utc};
use std::path::Path;
use tracing::info;

/// Start of the display-only virtual timeline
pub const VIRTUAL_EPOCH: &str = "2025-06-13 00:00:00";

/// Format of the persisted boot record
const BOOT_RECORD_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Persisted first-start timestamp
///
/// Written once, on the first run ever, and read back unchanged on every
/// subsequent startup. A corrupt record is a startup-fatal condition; the
/// clock never silently resets.
pub struct BootClock;

impl BootClock {
    /// Load the persisted boot time, initializing it on first run
    pub async fn load_or_init(path: &Path) -> Result<NaiveDateTime> {
        if tokio::fs::try_exists(path).await? {
            let raw = tokio::fs::read_to_string(path).await?;
            let boot = NaiveDateTime::parse_from_str(raw.trim(), BOOT_RECORD_FORMAT)
                .map_err(|e| {
                    MonitorError::BootClock(format!(
                        "unparseable boot record {:?} in {}: {}",
                        raw.trim(),
                        path.display(),
                        e
                    ))
                })?;
            return Ok(boot);
        }

        let now = Utc::now().naive_utc();
        let now = now.with_nanosecond(0).unwrap_or(now);
        tokio::fs::write(path, now.format(BOOT_RECORD_FORMAT).to_string()).await?;
        info!("Recorded first start at {}", now);
        Ok(now)
    }
}

/// Display-only clock offset from a fixed epoch by elapsed real seconds
///
/// Never persisted and never consulted for scheduling or journal stamps;
/// those use real time.
#[derive(Debug, Clone, Copy)]
pub struct VirtualClock {
    epoch: NaiveDateTime,
    boot: NaiveDateTime,
}

impl VirtualClock {
    /// Build the clock from the persisted boot time
    pub fn from_boot(boot: NaiveDateTime) -> Result<Self> {
        let epoch = NaiveDateTime::parse_from_str(VIRTUAL_EPOCH, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| MonitorError::Config(format!("bad virtual epoch: {}", e)))?;
        Ok(Self { epoch, boot })
    }

    /// Virtual time corresponding to a given real instant
    pub fn at(&self, real: NaiveDateTime) -> NaiveDateTime {
        let elapsed_secs = real.signed_duration_since(self.boot).num_seconds();
        self.epoch + chrono::Duration::seconds(elapsed_secs)
    }

    /// Virtual time corresponding to the current real instant
    pub fn now(&self) -> NaiveDateTime {
        self.at(Utc::now().naive_utc())
    }
}
