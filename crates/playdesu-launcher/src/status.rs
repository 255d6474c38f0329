//! Status bar data sources: clock and battery

use std::fs;
use std::path::{Path, PathBuf};

/// Current wall-clock time as hh:mm
pub fn clock_text() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

/// Reads battery level from sysfs.
pub struct BatteryReader {
    battery_path: PathBuf,
}

impl BatteryReader {
    /// Create a reader, auto-detecting the battery supply if present.
    pub fn new() -> Self {
        Self::with_root(Path::new("/sys/class/power_supply"))
    }

    /// Create a reader scanning a specific sysfs root (tests use a tempdir).
    pub fn with_root(root: &Path) -> Self {
        let mut battery_path = root.join("battery");

        if let Ok(entries) = fs::read_dir(root) {
            for entry in entries.flatten() {
                let path = entry.path();
                if let Ok(psu_type) = fs::read_to_string(path.join("type"))
                    && psu_type.trim().eq_ignore_ascii_case("battery")
                {
                    battery_path = path;
                    break;
                }
            }
        }

        Self { battery_path }
    }

    /// Battery percentage, if a battery is present.
    pub fn percent(&self) -> Option<u8> {
        fs::read_to_string(self.battery_path.join("capacity"))
            .ok()
            .and_then(|s| s.trim().parse::<u8>().ok())
            .map(|p| p.min(100))
    }
}

impl Default for BatteryReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick a battery glyph for a charge level. Buckets match the store app's
/// icon thresholds.
pub fn battery_icon(percent: u8) -> &'static str {
    match percent {
        p if p < 5 => "⚠",
        p if p < 20 => "▁",
        p if p < 30 => "▂",
        p if p < 50 => "▄",
        p if p < 60 => "▅",
        p if p < 80 => "▆",
        p if p <= 90 => "▇",
        _ => "█",
    }
}
