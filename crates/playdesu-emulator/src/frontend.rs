//! Opaque frontend adapter
//!
//! The emulator itself is an external capability. This module defines the
//! narrow surface the rest of the application sees: load a session from a
//! [`SessionConfig`], forward input events to it, stop it. The concrete
//! implementation drives a RetroArch process and talks to its UDP network
//! command and network remote interfaces.

use crate::{EmulatorError, SessionConfig};
use std::net::UdpSocket;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

/// Key event direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

/// Motion event source, mirroring the pad surfaces the original app
/// forwards: the directional pad and two analog sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionSource {
    Dpad,
    AnalogLeft,
    AnalogRight,
}

/// RetroPad buttons with their libretro device ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetroPad {
    B,
    Y,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
    A,
    X,
    L,
    R,
}

impl RetroPad {
    /// libretro RETRO_DEVICE_ID_JOYPAD id
    pub fn id(&self) -> u16 {
        match self {
            RetroPad::B => 0,
            RetroPad::Y => 1,
            RetroPad::Select => 2,
            RetroPad::Start => 3,
            RetroPad::Up => 4,
            RetroPad::Down => 5,
            RetroPad::Left => 6,
            RetroPad::Right => 7,
            RetroPad::A => 8,
            RetroPad::X => 9,
            RetroPad::L => 10,
            RetroPad::R => 11,
        }
    }
}

/// Commands understood by the frontend's network command interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendCommand {
    SaveState,
    LoadState,
    Reset,
    Quit,
}

impl FrontendCommand {
    /// Wire name of the command
    pub fn as_str(&self) -> &'static str {
        match self {
            FrontendCommand::SaveState => "SAVE_STATE",
            FrontendCommand::LoadState => "LOAD_STATE",
            FrontendCommand::Reset => "RESET",
            FrontendCommand::Quit => "QUIT",
        }
    }
}

/// A live game session handed out by a frontend.
pub trait RetroSession: Send {
    /// Forward a raw key event unmodified.
    fn send_key(&mut self, action: KeyAction, button: RetroPad) -> Result<(), EmulatorError>;

    /// Forward a raw motion event unmodified.
    fn send_motion(
        &mut self,
        source: MotionSource,
        x: f32,
        y: f32,
        port: u8,
    ) -> Result<(), EmulatorError>;

    /// Issue a frontend command (save state, reset, ...).
    fn command(&mut self, command: FrontendCommand) -> Result<(), EmulatorError>;

    /// Whether the session is still alive.
    fn is_running(&mut self) -> bool;

    /// Tear the session down.
    fn stop(&mut self) -> Result<(), EmulatorError>;
}

/// A frontend able to start game sessions. Implementations are shared
/// across threads, so the trait requires both marker bounds.
pub trait RetroFrontend: Send + Sync {
    fn load(&self, config: &SessionConfig) -> Result<Box<dyn RetroSession>, EmulatorError>;
}

/// RetroArch-backed frontend. Spawns the executable with the resolved
/// core/ROM pair and keeps a UDP socket for event forwarding.
pub struct RetroArchFrontend {
    executable: PathBuf,
    command_port: u16,
    remote_port: u16,
}

impl RetroArchFrontend {
    /// Create a frontend around a RetroArch executable
    pub fn new(executable: impl Into<PathBuf>, command_port: u16, remote_port: u16) -> Self {
        Self {
            executable: executable.into(),
            command_port,
            remote_port,
        }
    }

    /// Write a per-session overlay config carrying the directories and
    /// presentation settings, plus the network interfaces events ride on.
    fn write_session_config(&self, config: &SessionConfig) -> Result<PathBuf, EmulatorError> {
        let mut contents = String::new();

        if !config.system_dir.as_os_str().is_empty() {
            contents.push_str(&format!(
                "system_directory = \"{}\"\n",
                config.system_dir.display()
            ));
        }
        if !config.saves_dir.as_os_str().is_empty() {
            contents.push_str(&format!(
                "savefile_directory = \"{}\"\nsavestate_directory = \"{}\"\n",
                config.saves_dir.display(),
                config.saves_dir.display()
            ));
        }

        // Bilinear filtering is the "default" shader; "sharp" turns it off
        let smooth = !matches!(config.shader, crate::ShaderConfig::Sharp);
        contents.push_str(&format!("video_smooth = \"{}\"\n", smooth));

        contents.push_str(&format!(
            "input_rumble_enable = \"{}\"\naudio_latency = \"{}\"\n",
            config.rumble_enabled,
            if config.prefer_low_latency_audio { 32 } else { 64 }
        ));

        contents.push_str(&format!(
            "network_cmd_enable = \"true\"\nnetwork_cmd_port = \"{}\"\n\
             network_remote_enable = \"true\"\nnetwork_remote_base_port = \"{}\"\n",
            self.command_port, self.remote_port
        ));

        for (key, value) in &config.variables {
            contents.push_str(&format!("{} = \"{}\"\n", key, value));
        }

        let path = std::env::temp_dir().join("playdesu-session.cfg");
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl RetroFrontend for RetroArchFrontend {
    fn load(&self, config: &SessionConfig) -> Result<Box<dyn RetroSession>, EmulatorError> {
        if !config.rom_path.exists() {
            return Err(EmulatorError::RomNotFound(config.rom_path.clone()));
        }

        if !config.core_path.exists() {
            return Err(EmulatorError::CoreNotFound(config.core_path.clone()));
        }

        let mut cmd = Command::new(&self.executable);

        cmd.arg("-L").arg(&config.core_path);

        let session_cfg = self.write_session_config(config)?;
        cmd.arg("--appendconfig").arg(&session_cfg);

        // ROM path must be last
        cmd.arg(&config.rom_path);

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::info!(
            "Launching {} with core {}",
            config.rom_path.display(),
            config.core_path.display()
        );

        let child = cmd
            .spawn()
            .map_err(|e| EmulatorError::LaunchFailed(format!("Failed to spawn process: {}", e)))?;

        let socket = UdpSocket::bind("127.0.0.1:0")?;

        Ok(Box::new(RetroArchSession {
            child,
            socket,
            command_port: self.command_port,
            remote_port: self.remote_port,
        }))
    }
}

/// One running RetroArch process plus the sockets used to reach it.
struct RetroArchSession {
    child: Child,
    socket: UdpSocket,
    command_port: u16,
    remote_port: u16,
}

impl RetroArchSession {
    fn send_datagram(&self, port: u16, payload: &str) -> Result<(), EmulatorError> {
        self.socket
            .send_to(payload.as_bytes(), ("127.0.0.1", port))?;
        Ok(())
    }
}

impl RetroSession for RetroArchSession {
    fn send_key(&mut self, action: KeyAction, button: RetroPad) -> Result<(), EmulatorError> {
        // The network remote carries press pulses only
        if action == KeyAction::Up {
            return Ok(());
        }

        self.send_datagram(self.remote_port, &button.id().to_string())
    }

    fn send_motion(
        &mut self,
        source: MotionSource,
        x: f32,
        y: f32,
        _port: u8,
    ) -> Result<(), EmulatorError> {
        // The network remote has no analog channel; dpad motion arrives as
        // key events anyway, so drop the rest.
        tracing::trace!("Dropping motion event {:?} ({}, {})", source, x, y);
        Ok(())
    }

    fn command(&mut self, command: FrontendCommand) -> Result<(), EmulatorError> {
        tracing::debug!("Sending frontend command {}", command.as_str());
        self.send_datagram(self.command_port, command.as_str())
    }

    fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    fn stop(&mut self) -> Result<(), EmulatorError> {
        if self.is_running() {
            // Ask nicely first, then reap
            let _ = self.command(FrontendCommand::Quit);
            std::thread::sleep(std::time::Duration::from_millis(200));

            if self.is_running() {
                self.child.kill()?;
            }
        }

        self.child.wait()?;
        Ok(())
    }
}
