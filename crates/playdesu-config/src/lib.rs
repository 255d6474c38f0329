//! Configuration management for Playdesu
//!
//! TOML-based configuration with a user-then-system lookup and built-in
//! defaults when no file exists.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Standard configuration paths
pub const CONFIG_DIR: &str = "/etc/playdesu";
pub const USER_CONFIG_DIR: &str = "/roms/.playdesu";

/// Fixed store catalog endpoint
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/xrystalll/playdesu/master/store/games_db.json";

/// Main Playdesu configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaydesuConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub emulator: EmulatorConfig,
}

/// Catalog endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog document URL
    pub url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
        }
    }
}

/// Local storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where downloaded ROMs land
    pub downloads_dir: PathBuf,

    /// Frontend system directory (BIOS files etc.)
    pub system_dir: PathBuf,

    /// Save data directory
    pub saves_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            downloads_dir: PathBuf::from("/roms/downloads"),
            system_dir: PathBuf::from("/roms/.playdesu/system"),
            saves_dir: PathBuf::from("/roms/.playdesu/saves"),
        }
    }
}

/// Emulator frontend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Frontend executable
    pub frontend_path: PathBuf,

    /// Directory holding libretro core libraries
    pub cores_dir: PathBuf,

    /// Video shader: default, crt, lcd, sharp or upscaling
    pub shader: String,

    /// Forward rumble events to the pad
    pub rumble_enabled: bool,

    /// Prefer the low-latency audio path
    pub prefer_low_latency_audio: bool,

    /// UDP port for frontend network commands
    pub command_port: u16,

    /// UDP port for the frontend network remote (key forwarding)
    pub remote_port: u16,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            frontend_path: PathBuf::from("/usr/bin/retroarch"),
            cores_dir: PathBuf::from("/usr/lib/libretro"),
            shader: "default".to_string(),
            rumble_enabled: true,
            prefer_low_latency_audio: true,
            command_port: 55355,
            remote_port: 55400,
        }
    }
}

impl PlaydesuConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        // Try user config first, then system config
        let user_config = Path::new(USER_CONFIG_DIR).join("config.toml");
        if user_config.exists() {
            return Self::load(&user_config);
        }

        let system_config = Path::new(CONFIG_DIR).join("config.toml");
        if system_config.exists() {
            return Self::load(&system_config);
        }

        tracing::warn!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = PlaydesuConfig::default();
        assert_eq!(config.catalog.url, DEFAULT_CATALOG_URL);
        assert_eq!(config.emulator.shader, "default");
        assert!(config.emulator.rumble_enabled);
        assert_eq!(config.emulator.command_port, 55355);
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = PlaydesuConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: PlaydesuConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.catalog.url, parsed.catalog.url);
        assert_eq!(config.storage.downloads_dir, parsed.storage.downloads_dir);
        assert_eq!(config.emulator.shader, parsed.emulator.shader);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[catalog]
url = "http://localhost/games_db.json"

[storage]
downloads_dir = "/tmp/downloads"
system_dir = "/tmp/system"
saves_dir = "/tmp/saves"

[emulator]
frontend_path = "/usr/local/bin/retroarch"
cores_dir = "/tmp/cores"
shader = "crt"
rumble_enabled = false
prefer_low_latency_audio = true
command_port = 55355
remote_port = 55400
"#;
        write!(temp_file, "{}", config_content).unwrap();

        let config = PlaydesuConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.catalog.url, "http://localhost/games_db.json");
        assert_eq!(config.emulator.shader, "crt");
        assert!(!config.emulator.rumble_enabled);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[catalog]\nurl = \"http://x/db.json\"\n").unwrap();

        let config = PlaydesuConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.catalog.url, "http://x/db.json");
        assert_eq!(
            config.storage.downloads_dir,
            PathBuf::from("/roms/downloads")
        );
    }

    #[test]
    fn test_save_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = PlaydesuConfig::default();

        config.save(temp_file.path()).unwrap();

        let loaded = PlaydesuConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.catalog.url, loaded.catalog.url);
    }
}
