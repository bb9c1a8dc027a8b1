//! Terminal host configuration.

use std::env;

/// Calibration window used by the terminal host.
///
/// The host counter is a nanosecond clock, so a short window is already
/// accurate and keeps startup snappy.
pub const DEFAULT_CALIBRATION_MS: u64 = 250;

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// File that receives log records. Logging is off when unset.
    pub log_path: Option<String>,
    pub calibration_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            calibration_ms: DEFAULT_CALIBRATION_MS,
        }
    }
}

impl HostConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable or empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_path = lookup("EFI_TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let calibration_ms = lookup("EFI_TETRIS_CALIBRATION_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(DEFAULT_CALIBRATION_MS);

        Self {
            log_path,
            calibration_ms,
        }
    }

    pub fn calibration_micros(&self) -> u64 {
        self.calibration_ms.saturating_mul(1_000)
    }
}
