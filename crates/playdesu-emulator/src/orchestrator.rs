//! Launch orchestration
//!
//! Ties the pieces together: tag -> system, system -> core filename,
//! id + extension -> local ROM filename, download if absent, then hand a
//! session configuration to the frontend.

use crate::{EmulatorError, GameSystem, RetroFrontend, RetroSession, SessionConfig, ShaderConfig};
use playdesu_config::PlaydesuConfig;
use playdesu_download::{DownloadOutcome, RomStore};
use std::path::PathBuf;

/// The four values the details screen hands to the launch path.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Record identifier
    pub id: String,

    /// Display name (for logs and the loading screen)
    pub display_name: String,

    /// Game system tag as published by the catalog
    pub system_tag: String,

    /// ROM source URL
    pub rom_url: String,
}

/// A successfully started game session.
pub struct LaunchedGame {
    /// Opaque session handle; input events are forwarded to it
    pub session: Box<dyn RetroSession>,

    /// Resolved local ROM path
    pub rom_path: PathBuf,

    /// Resolved system
    pub system: GameSystem,

    /// Whether the ROM had to be downloaded first
    pub outcome: DownloadOutcome,
}

/// Orchestrates ROM resolution and frontend startup.
pub struct GameLauncher {
    store: RomStore,
    frontend: Box<dyn RetroFrontend>,
    cores_dir: PathBuf,
    system_dir: PathBuf,
    saves_dir: PathBuf,
    shader: ShaderConfig,
    rumble_enabled: bool,
    prefer_low_latency_audio: bool,
}

impl GameLauncher {
    /// Create a launcher from configuration and a frontend.
    pub fn new(config: &PlaydesuConfig, frontend: Box<dyn RetroFrontend>) -> Self {
        let shader = ShaderConfig::parse(&config.emulator.shader).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown shader '{}', falling back to default",
                config.emulator.shader
            );
            ShaderConfig::Default
        });

        Self {
            store: RomStore::new(&config.storage.downloads_dir),
            frontend,
            cores_dir: config.emulator.cores_dir.clone(),
            system_dir: config.storage.system_dir.clone(),
            saves_dir: config.storage.saves_dir.clone(),
            shader,
            rumble_enabled: config.emulator.rumble_enabled,
            prefer_low_latency_audio: config.emulator.prefer_low_latency_audio,
        }
    }

    /// Expected local ROM filename for a request.
    ///
    /// Fails fast on an unrecognized system tag, before any filesystem or
    /// network work.
    pub fn resolve_rom_name(&self, request: &LaunchRequest) -> Result<String, EmulatorError> {
        let system = GameSystem::from_tag(&request.system_tag)
            .ok_or_else(|| EmulatorError::UnsupportedSystem(request.system_tag.clone()))?;

        Ok(format!("{}{}", request.id, system.rom_extension()))
    }

    /// Launch a game: resolve, ensure the ROM is present, start a session.
    pub async fn launch(&self, request: &LaunchRequest) -> Result<LaunchedGame, EmulatorError> {
        let system = GameSystem::from_tag(&request.system_tag)
            .ok_or_else(|| EmulatorError::UnsupportedSystem(request.system_tag.clone()))?;

        let rom_name = format!("{}{}", request.id, system.rom_extension());
        let (rom_path, outcome) = self.store.ensure(&rom_name, &request.rom_url).await?;

        let core_path = self.cores_dir.join(system.core_file_name());

        let mut config = SessionConfig::new(core_path, rom_path.clone())
            .with_system_dir(&self.system_dir)
            .with_saves_dir(&self.saves_dir)
            .with_shader(self.shader);
        config.rumble_enabled = self.rumble_enabled;
        config.prefer_low_latency_audio = self.prefer_low_latency_audio;

        tracing::info!(
            "Starting {} ({}) with core {}",
            request.display_name,
            system.tag(),
            system.core_file_name()
        );

        let session = self.frontend.load(&config)?;

        Ok(LaunchedGame {
            session,
            rom_path,
            system,
            outcome,
        })
    }
}
