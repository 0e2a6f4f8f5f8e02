//! Persisted user settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fetch::DEFAULT_DELAY_MS;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "XARTICLE_CONFIG";

/// User settings, stored as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Base delay between image downloads, in milliseconds
    pub image_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Default settings file location.
    ///
    /// `$XARTICLE_CONFIG`, then `$XDG_CONFIG_HOME/xarticle/settings.json`,
    /// then `$HOME/.config/xarticle/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = non_empty_env(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let config_dir = non_empty_env("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| non_empty_env("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(config_dir.join("xarticle").join("settings.json"))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parse a delay the way a browser `Number()` coercion would, then clamp.
///
/// Blank input is `0`; finite numbers are floored and clamped at zero;
/// anything else is `None` so the caller can apply its default.
pub fn parse_delay(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return Some(0);
    }

    let number = parse_js_number(value)?;
    if !number.is_finite() {
        return None;
    }
    Some(number.floor().max(0.0) as u64)
}

fn parse_js_number(value: &str) -> Option<f64> {
    let lower = value.to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }
    // Rust accepts "inf"/"nan" spellings that Number() does not.
    if lower.contains("inf") || lower.contains("nan") {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Resolve the effective delay: flag, then persisted setting, then default.
pub fn resolve_delay(flag: Option<&str>, settings: Option<&Settings>) -> u64 {
    if let Some(raw) = flag {
        return parse_delay(raw).unwrap_or(DEFAULT_DELAY_MS);
    }
    settings
        .map(|s| s.image_delay_ms)
        .unwrap_or(DEFAULT_DELAY_MS)
}
