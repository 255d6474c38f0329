//! System UI visibility helper
//!
//! The TUI equivalent of the window-inset controller: decides whether the
//! status bar (and the rest of the chrome) is drawn, and whether a hidden
//! bar may be revealed transiently. Pure state, no side effects beyond the
//! flags it holds; the draw pass consults it every frame.

/// Reveal behavior for hidden bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarsBehavior {
    /// Hidden bars stay hidden
    Fixed,
    /// Hidden bars may be revealed transiently by user gesture
    TransientReveal,
}

/// Tracks status bar / system chrome visibility.
#[derive(Debug)]
pub struct SystemUi {
    status_bar_visible: bool,
    chrome_visible: bool,
    behavior: BarsBehavior,
}

impl Default for SystemUi {
    fn default() -> Self {
        Self {
            status_bar_visible: true,
            chrome_visible: true,
            behavior: BarsBehavior::Fixed,
        }
    }
}

impl SystemUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide only the status bar
    pub fn hide_status_bar(&mut self) {
        self.status_bar_visible = false;
        self.behavior = BarsBehavior::TransientReveal;
    }

    /// Show only the status bar
    pub fn show_status_bar(&mut self) {
        self.status_bar_visible = true;
    }

    /// Hide all chrome (used while a game session is on screen)
    pub fn hide_system_ui(&mut self) {
        self.status_bar_visible = false;
        self.chrome_visible = false;
        self.behavior = BarsBehavior::TransientReveal;
    }

    /// Show all chrome (used while the in-game menu is open)
    pub fn show_system_ui(&mut self) {
        self.status_bar_visible = true;
        self.chrome_visible = true;
    }

    pub fn status_bar_visible(&self) -> bool {
        self.status_bar_visible
    }

    pub fn chrome_visible(&self) -> bool {
        self.chrome_visible
    }

    pub fn behavior(&self) -> BarsBehavior {
        self.behavior
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_fully_visible() {
        let ui = SystemUi::new();
        assert!(ui.status_bar_visible());
        assert!(ui.chrome_visible());
        assert_eq!(ui.behavior(), BarsBehavior::Fixed);
    }

    #[test]
    fn test_hide_system_ui_hides_everything() {
        let mut ui = SystemUi::new();
        ui.hide_system_ui();
        assert!(!ui.status_bar_visible());
        assert!(!ui.chrome_visible());
        assert_eq!(ui.behavior(), BarsBehavior::TransientReveal);
    }

    #[test]
    fn test_show_system_ui_restores() {
        let mut ui = SystemUi::new();
        ui.hide_system_ui();
        ui.show_system_ui();
        assert!(ui.status_bar_visible());
        assert!(ui.chrome_visible());
    }

    #[test]
    fn test_status_bar_toggle_leaves_chrome_alone() {
        let mut ui = SystemUi::new();
        ui.hide_status_bar();
        assert!(!ui.status_bar_visible());
        assert!(ui.chrome_visible());
        ui.show_status_bar();
        assert!(ui.status_bar_visible());
    }
}
