//! Frontend session configuration

use std::path::PathBuf;

/// Video shader applied by the frontend.
///
/// Default:      bilinear filtering, can cause fuzziness in retro games.
/// Crt:          classic CRT scan lines.
/// Lcd:          grid layout, similar to handheld LCD screens.
/// Sharp:        raw, unfiltered image.
/// Upscaling:    improve the quality of retro graphics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderConfig {
    #[default]
    Default,
    Crt,
    Lcd,
    Sharp,
    Upscaling,
}

impl ShaderConfig {
    /// Parse from a configuration string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "default" => Some(ShaderConfig::Default),
            "crt" => Some(ShaderConfig::Crt),
            "lcd" => Some(ShaderConfig::Lcd),
            "sharp" => Some(ShaderConfig::Sharp),
            "upscaling" => Some(ShaderConfig::Upscaling),
            _ => None,
        }
    }

    /// Get configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShaderConfig::Default => "default",
            ShaderConfig::Crt => "crt",
            ShaderConfig::Lcd => "lcd",
            ShaderConfig::Sharp => "sharp",
            ShaderConfig::Upscaling => "upscaling",
        }
    }
}

/// Everything a frontend needs to start a game session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Core library path
    pub core_path: PathBuf,

    /// ROM file path
    pub rom_path: PathBuf,

    /// Frontend system directory (BIOS files etc.)
    pub system_dir: PathBuf,

    /// Save data directory
    pub saves_dir: PathBuf,

    /// Core option overrides
    pub variables: Vec<(String, String)>,

    /// Video shader
    pub shader: ShaderConfig,

    /// Forward rumble events to the pad
    pub rumble_enabled: bool,

    /// Prefer the low-latency audio path
    pub prefer_low_latency_audio: bool,
}

impl SessionConfig {
    /// Create a config for a core/ROM pair with default presentation
    pub fn new(core_path: impl Into<PathBuf>, rom_path: impl Into<PathBuf>) -> Self {
        Self {
            core_path: core_path.into(),
            rom_path: rom_path.into(),
            system_dir: PathBuf::new(),
            saves_dir: PathBuf::new(),
            variables: Vec::new(),
            shader: ShaderConfig::Default,
            rumble_enabled: true,
            prefer_low_latency_audio: true,
        }
    }

    /// Set the system directory
    pub fn with_system_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.system_dir = dir.into();
        self
    }

    /// Set the saves directory
    pub fn with_saves_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.saves_dir = dir.into();
        self
    }

    /// Set the shader
    pub fn with_shader(mut self, shader: ShaderConfig) -> Self {
        self.shader = shader;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_parse() {
        assert_eq!(ShaderConfig::parse("crt"), Some(ShaderConfig::Crt));
        assert_eq!(ShaderConfig::parse("default"), Some(ShaderConfig::Default));
        assert_eq!(ShaderConfig::parse("scanlines"), None);
    }

    #[test]
    fn test_shader_round_trip() {
        for shader in [
            ShaderConfig::Default,
            ShaderConfig::Crt,
            ShaderConfig::Lcd,
            ShaderConfig::Sharp,
            ShaderConfig::Upscaling,
        ] {
            assert_eq!(ShaderConfig::parse(shader.as_str()), Some(shader));
        }
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::new("/cores/core.so", "/roms/g1.nes")
            .with_system_dir("/data/system")
            .with_saves_dir("/data/saves")
            .with_shader(ShaderConfig::Crt);

        assert_eq!(config.core_path, PathBuf::from("/cores/core.so"));
        assert_eq!(config.rom_path, PathBuf::from("/roms/g1.nes"));
        assert_eq!(config.shader, ShaderConfig::Crt);
        assert!(config.rumble_enabled);
        assert!(config.prefer_low_latency_audio);
        assert!(config.variables.is_empty());
    }
}
