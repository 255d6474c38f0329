//! Application state and input handling

use crate::status::BatteryReader;
use crate::system_ui::SystemUi;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use playdesu_catalog::{CatalogClient, Game};
use playdesu_config::PlaydesuConfig;
use playdesu_emulator::{
    ComboTracker, GameLauncher, GameMenuAction, KeyAction, LaunchRequest, LaunchedGame,
    MotionSource, RetroArchFrontend, RetroPad, RetroSession,
};
use std::sync::Arc;
use std::sync::mpsc;

/// Current screen. Game selection travels by catalog list index, exactly
/// as the store app passes it through its navigation routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    GameDetails(usize),
    Playing,
}

/// Catalog fetch outcome reflected in the UI
#[derive(Debug)]
pub enum CatalogState {
    Loading,
    NoData,
    Error(String),
    Ready(Vec<Game>),
}

/// Completions delivered back to the UI loop
pub enum AppMessage {
    CatalogLoaded(Vec<Game>),
    CatalogFailed(String),
    LaunchFinished(Result<LaunchedGame, String>),
}

/// Rows on the home screen
pub const HOME_ROWS: usize = 2;

/// Application state
pub struct App {
    /// Configuration
    pub config: PlaydesuConfig,

    /// Launch orchestrator
    launcher: Arc<GameLauncher>,

    /// Async runtime handle for one-shot operations
    runtime: tokio::runtime::Handle,

    /// Completion channel polled by the UI loop
    tx: mpsc::Sender<AppMessage>,
    rx: mpsc::Receiver<AppMessage>,

    /// Catalog snapshot
    pub catalog: CatalogState,

    /// Current view
    pub view: View,

    /// Focused home row and per-row selection
    pub home_row: usize,
    pub home_selected: [usize; HOME_ROWS],

    /// Selected screenshot on the details screen
    pub shot_selected: usize,

    /// Active game session, if any
    pub session: Option<Box<dyn RetroSession>>,

    /// Title of the running game
    pub playing_title: String,

    /// Details screen index to return to when a session ends
    launch_origin: usize,

    /// Start+Select detection
    combo: ComboTracker,

    /// In-game menu selection, when open
    pub menu_selected: Option<usize>,

    /// A launch (possibly a download) is in flight
    pub launching: bool,

    /// Status line
    pub status: String,

    /// Status bar / chrome visibility
    pub system_ui: SystemUi,

    /// Battery source and last reading
    battery: BatteryReader,
    pub battery_percent: Option<u8>,

    /// Should quit
    pub should_quit: bool,
}

impl App {
    /// Create the application
    pub fn new(config: PlaydesuConfig, runtime: tokio::runtime::Handle) -> Self {
        let frontend = RetroArchFrontend::new(
            &config.emulator.frontend_path,
            config.emulator.command_port,
            config.emulator.remote_port,
        );
        let launcher = Arc::new(GameLauncher::new(&config, Box::new(frontend)));

        let (tx, rx) = mpsc::channel();
        let battery = BatteryReader::new();
        let battery_percent = battery.percent();

        Self {
            config,
            launcher,
            runtime,
            tx,
            rx,
            catalog: CatalogState::Loading,
            view: View::Home,
            home_row: 0,
            home_selected: [0; HOME_ROWS],
            shot_selected: 0,
            session: None,
            playing_title: String::new(),
            launch_origin: 0,
            combo: ComboTracker::new(),
            menu_selected: None,
            launching: false,
            status: "Ready".to_string(),
            system_ui: SystemUi::new(),
            battery,
            battery_percent,
            should_quit: false,
        }
    }

    /// Kick off the one-shot catalog fetch
    pub fn start_catalog_fetch(&mut self) {
        self.catalog = CatalogState::Loading;

        let client = CatalogClient::new(self.config.catalog.url.clone());
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let message = match client.fetch_all().await {
                Ok(games) => AppMessage::CatalogLoaded(games),
                Err(e) => AppMessage::CatalogFailed(e.to_string()),
            };
            let _ = tx.send(message);
        });
    }

    /// Games in the current snapshot (empty unless Ready)
    pub fn games(&self) -> &[Game] {
        match &self.catalog {
            CatalogState::Ready(games) => games,
            _ => &[],
        }
    }

    /// Game shown in the home spotlight header
    pub fn spotlight_game(&self) -> Option<&Game> {
        self.games().get(self.home_selected[self.home_row])
    }

    /// Apply queued completions. Called from the UI loop between events.
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            match message {
                AppMessage::CatalogLoaded(games) => {
                    self.catalog = if games.is_empty() {
                        CatalogState::NoData
                    } else {
                        CatalogState::Ready(games)
                    };
                }
                AppMessage::CatalogFailed(e) => {
                    tracing::error!("Catalog fetch failed: {}", e);
                    self.catalog = CatalogState::Error(e);
                }
                AppMessage::LaunchFinished(result) => {
                    self.launching = false;
                    match result {
                        Ok(launched) => {
                            self.session = Some(launched.session);
                            self.view = View::Playing;
                            self.menu_selected = None;
                            self.combo.reset();
                            self.system_ui.hide_system_ui();
                            self.status = "Ready".to_string();
                        }
                        Err(e) => {
                            tracing::error!("Launch failed: {}", e);
                            self.status = format!("Error: {}", e);
                        }
                    }
                }
            }
        }
    }

    /// Periodic upkeep between frames
    pub fn on_tick(&mut self) {
        self.battery_percent = self.battery.percent();

        // A session can end on its own (frontend closed); fall back to the
        // details screen when it does.
        if self.view == View::Playing
            && let Some(session) = self.session.as_mut()
            && !session.is_running()
        {
            self.end_session();
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.view {
            View::Home => {
                if key.kind == KeyEventKind::Press {
                    self.handle_home_key(key.code);
                }
            }
            View::GameDetails(index) => {
                if key.kind == KeyEventKind::Press {
                    self.handle_details_key(key.code, index);
                }
            }
            View::Playing => self.handle_playing_key(key),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        let count = self.games().len();

        match code {
            KeyCode::Left => {
                let sel = &mut self.home_selected[self.home_row];
                *sel = sel.checked_sub(1).unwrap_or(count.saturating_sub(1));
            }
            KeyCode::Right => {
                if count > 0 {
                    let sel = &mut self.home_selected[self.home_row];
                    *sel = (*sel + 1) % count;
                }
            }
            KeyCode::Up => {
                self.home_row = self.home_row.saturating_sub(1);
            }
            KeyCode::Down => {
                self.home_row = (self.home_row + 1).min(HOME_ROWS - 1);
            }
            KeyCode::Enter => {
                let index = self.home_selected[self.home_row];
                if index < count {
                    self.shot_selected = 0;
                    self.view = View::GameDetails(index);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_details_key(&mut self, code: KeyCode, index: usize) {
        match code {
            KeyCode::Enter => self.play(index),
            KeyCode::Left => {
                self.shot_selected = self.shot_selected.saturating_sub(1);
            }
            KeyCode::Right => {
                if let Some(game) = self.games().get(index) {
                    let last = game.screenshots.len().saturating_sub(1);
                    self.shot_selected = (self.shot_selected + 1).min(last);
                }
            }
            KeyCode::Esc | KeyCode::Backspace => {
                self.view = View::Home;
            }
            _ => {}
        }
    }

    /// Build a launch request for a selected record and run it.
    fn play(&mut self, index: usize) {
        if self.launching {
            return;
        }

        let Some(game) = self.games().get(index).cloned() else {
            return;
        };

        let request = LaunchRequest {
            id: game.id.clone(),
            display_name: game.display_name.clone(),
            system_tag: game.game_system.clone(),
            rom_url: game.file.clone(),
        };

        self.launching = true;
        self.launch_origin = index;
        self.playing_title = game.display_name.clone();
        self.status = format!("Loading {}...", game.display_name);

        let launcher = Arc::clone(&self.launcher);
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let result = launcher
                .launch(&request)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::LaunchFinished(result));
        });
    }

    fn handle_playing_key(&mut self, key: KeyEvent) {
        if self.menu_selected.is_some() {
            if key.kind == KeyEventKind::Press {
                self.handle_menu_key(key.code);
            }
            return;
        }

        // Keyboard fallback for terminals that never report key releases
        if key.code == KeyCode::Esc && key.kind == KeyEventKind::Press {
            self.open_menu();
            return;
        }

        let Some(button) = map_key(key.code) else {
            return;
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.forward_key(KeyAction::Down, button);
            }
            KeyEventKind::Release => {
                self.forward_key(KeyAction::Up, button);

                if self.combo.on_key_up(button) {
                    self.open_menu();
                }
            }
        }
    }

    /// Forward one key event to the session, plus the dpad motion surface
    /// for directional buttons.
    fn forward_key(&mut self, action: KeyAction, button: RetroPad) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Err(e) = session.send_key(action, button) {
            tracing::warn!("Failed to forward key event: {}", e);
        }

        let (x, y) = match button {
            RetroPad::Left => (-1.0, 0.0),
            RetroPad::Right => (1.0, 0.0),
            RetroPad::Up => (0.0, -1.0),
            RetroPad::Down => (0.0, 1.0),
            _ => return,
        };
        let (x, y) = if action == KeyAction::Up {
            (0.0, 0.0)
        } else {
            (x, y)
        };

        if let Err(e) = session.send_motion(MotionSource::Dpad, x, y, 0) {
            tracing::warn!("Failed to forward motion event: {}", e);
        }
    }

    fn open_menu(&mut self) {
        self.menu_selected = Some(0);
        self.system_ui.show_system_ui();
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        let Some(selected) = self.menu_selected else {
            return;
        };

        match code {
            KeyCode::Up => {
                self.menu_selected = Some(selected.saturating_sub(1));
            }
            KeyCode::Down => {
                self.menu_selected = Some((selected + 1).min(GameMenuAction::ALL.len() - 1));
            }
            KeyCode::Enter => {
                self.apply_menu_action(GameMenuAction::ALL[selected]);
            }
            KeyCode::Esc => {
                self.menu_selected = None;
                self.system_ui.hide_system_ui();
            }
            _ => {}
        }
    }

    fn apply_menu_action(&mut self, action: GameMenuAction) {
        self.menu_selected = None;

        match action {
            GameMenuAction::Quit => {
                self.end_session();
            }
            // Save, Load and Restart are not implemented yet; like Resume
            // they only restore the hidden chrome state.
            GameMenuAction::Resume
            | GameMenuAction::Save
            | GameMenuAction::Load
            | GameMenuAction::Restart => {
                self.system_ui.hide_system_ui();
            }
        }
    }

    /// Stop the active session and return to the details screen.
    fn end_session(&mut self) {
        if let Some(mut session) = self.session.take()
            && let Err(e) = session.stop()
        {
            tracing::warn!("Failed to stop session: {}", e);
        }

        self.combo.reset();
        self.menu_selected = None;
        self.system_ui.show_system_ui();
        self.view = View::GameDetails(self.launch_origin);
        self.status = "Ready".to_string();
    }
}

/// Map terminal keys onto RetroPad buttons.
pub fn map_key(code: KeyCode) -> Option<RetroPad> {
    match code {
        KeyCode::Up => Some(RetroPad::Up),
        KeyCode::Down => Some(RetroPad::Down),
        KeyCode::Left => Some(RetroPad::Left),
        KeyCode::Right => Some(RetroPad::Right),
        KeyCode::Char('z') => Some(RetroPad::B),
        KeyCode::Char('x') => Some(RetroPad::A),
        KeyCode::Char('a') => Some(RetroPad::Y),
        KeyCode::Char('s') => Some(RetroPad::X),
        KeyCode::Char('q') => Some(RetroPad::L),
        KeyCode::Char('w') => Some(RetroPad::R),
        KeyCode::Enter => Some(RetroPad::Start),
        KeyCode::Backspace => Some(RetroPad::Select),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key_pad_buttons() {
        assert_eq!(map_key(KeyCode::Up), Some(RetroPad::Up));
        assert_eq!(map_key(KeyCode::Char('z')), Some(RetroPad::B));
        assert_eq!(map_key(KeyCode::Enter), Some(RetroPad::Start));
        assert_eq!(map_key(KeyCode::Backspace), Some(RetroPad::Select));
        assert_eq!(map_key(KeyCode::Tab), None);
    }

    fn test_app() -> (App, tokio::runtime::Runtime) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let app = App::new(PlaydesuConfig::default(), runtime.handle().clone());
        (app, runtime)
    }

    fn sample_games(n: usize) -> Vec<Game> {
        (0..n)
            .map(|i| Game {
                id: format!("g{}", i),
                display_name: format!("Game {}", i),
                color: "#336699".to_string(),
                description: "desc".to_string(),
                backdrop: "http://x/b.png".to_string(),
                poster: "http://x/p.png".to_string(),
                file: format!("http://x/g{}.nes", i),
                studio: "Studio".to_string(),
                game_system: "NES".to_string(),
                release_year: "1990".to_string(),
                genre: "Action".to_string(),
                price: 0,
                downloads: 0,
                rating: 3,
                size: 1,
                screenshots: vec![],
            })
            .collect()
    }

    #[test]
    fn test_home_navigation_and_selection() {
        let (mut app, _rt) = test_app();
        app.catalog = CatalogState::Ready(sample_games(3));

        app.handle_key(KeyEvent::new(KeyCode::Right, crossterm::event::KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Right, crossterm::event::KeyModifiers::NONE));
        assert_eq!(app.home_selected[0], 2);

        // Wraps around
        app.handle_key(KeyEvent::new(KeyCode::Right, crossterm::event::KeyModifiers::NONE));
        assert_eq!(app.home_selected[0], 0);

        app.handle_key(KeyEvent::new(KeyCode::Down, crossterm::event::KeyModifiers::NONE));
        assert_eq!(app.home_row, 1);

        app.handle_key(KeyEvent::new(KeyCode::Right, crossterm::event::KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Enter, crossterm::event::KeyModifiers::NONE));
        assert_eq!(app.view, View::GameDetails(1));
    }

    #[test]
    fn test_details_back_navigation() {
        let (mut app, _rt) = test_app();
        app.catalog = CatalogState::Ready(sample_games(2));
        app.view = View::GameDetails(1);

        app.handle_key(KeyEvent::new(KeyCode::Esc, crossterm::event::KeyModifiers::NONE));
        assert_eq!(app.view, View::Home);
    }

    #[test]
    fn test_empty_catalog_reports_no_data() {
        let (mut app, _rt) = test_app();
        assert!(matches!(app.catalog, CatalogState::Loading));

        app.tx.send(AppMessage::CatalogLoaded(vec![])).unwrap();
        app.drain_messages();
        assert!(matches!(app.catalog, CatalogState::NoData));
    }

    #[test]
    fn test_failed_catalog_reports_error() {
        let (mut app, _rt) = test_app();

        app.tx
            .send(AppMessage::CatalogFailed("boom".to_string()))
            .unwrap();
        app.drain_messages();
        assert!(matches!(app.catalog, CatalogState::Error(_)));
        assert!(app.games().is_empty());
    }
}
