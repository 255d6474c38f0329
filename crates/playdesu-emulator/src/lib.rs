//! Emulator launch orchestration for Playdesu
//!
//! Resolves a game-system tag to a libretro core, makes sure the ROM is
//! present locally, and hands both to an opaque frontend through a narrow
//! adapter: configuration in, session handle out, input events forwarded.

mod frontend;
mod menu;
mod orchestrator;
mod session;
mod system;

pub use frontend::{
    FrontendCommand, KeyAction, MotionSource, RetroArchFrontend, RetroFrontend, RetroPad,
    RetroSession,
};
pub use menu::{ComboTracker, GameMenuAction};
pub use orchestrator::{GameLauncher, LaunchRequest, LaunchedGame};
pub use session::{SessionConfig, ShaderConfig};
pub use system::GameSystem;

pub use playdesu_download::DownloadOutcome;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("Unsupported game system: {0}")]
    UnsupportedSystem(String),

    #[error("Core not found: {0}")]
    CoreNotFound(PathBuf),

    #[error("ROM not found: {0}")]
    RomNotFound(PathBuf),

    #[error("Launch failed: {0}")]
    LaunchFailed(String),

    #[error("ROM download failed: {0}")]
    Download(#[from] playdesu_download::DownloadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
