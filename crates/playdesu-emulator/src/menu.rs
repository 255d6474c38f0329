//! In-game menu combo detection

use crate::RetroPad;

/// Actions offered by the in-game menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMenuAction {
    Resume,
    Save,
    Load,
    Quit,
    Restart,
}

impl GameMenuAction {
    /// Menu entries in display order
    pub const ALL: [GameMenuAction; 5] = [
        GameMenuAction::Resume,
        GameMenuAction::Save,
        GameMenuAction::Load,
        GameMenuAction::Quit,
        GameMenuAction::Restart,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            GameMenuAction::Resume => "Resume",
            GameMenuAction::Save => "Save",
            GameMenuAction::Load => "Load",
            GameMenuAction::Quit => "Quit",
            GameMenuAction::Restart => "Restart",
        }
    }
}

/// Detects the Start+Select combination that opens the in-game menu.
///
/// Both buttons latch on release; once both are latched the tracker fires
/// exactly once and resets, so holding the combo does not reopen the menu.
#[derive(Debug, Default)]
pub struct ComboTracker {
    start_pressed: bool,
    select_pressed: bool,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key-release event. Returns true when the combo completes.
    pub fn on_key_up(&mut self, button: RetroPad) -> bool {
        match button {
            RetroPad::Start => self.start_pressed = true,
            RetroPad::Select => self.select_pressed = true,
            _ => {}
        }

        if self.start_pressed && self.select_pressed {
            self.start_pressed = false;
            self.select_pressed = false;
            return true;
        }

        false
    }

    /// Drop any latched half of the combo.
    pub fn reset(&mut self) {
        self.start_pressed = false;
        self.select_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_fires_on_start_then_select() {
        let mut tracker = ComboTracker::new();
        assert!(!tracker.on_key_up(RetroPad::Start));
        assert!(tracker.on_key_up(RetroPad::Select));
    }

    #[test]
    fn test_combo_fires_on_select_then_start() {
        let mut tracker = ComboTracker::new();
        assert!(!tracker.on_key_up(RetroPad::Select));
        assert!(tracker.on_key_up(RetroPad::Start));
    }

    #[test]
    fn test_combo_resets_after_firing() {
        let mut tracker = ComboTracker::new();
        tracker.on_key_up(RetroPad::Start);
        assert!(tracker.on_key_up(RetroPad::Select));

        // Needs both halves again
        assert!(!tracker.on_key_up(RetroPad::Select));
        assert!(tracker.on_key_up(RetroPad::Start));
    }

    #[test]
    fn test_other_buttons_do_not_latch() {
        let mut tracker = ComboTracker::new();
        assert!(!tracker.on_key_up(RetroPad::A));
        assert!(!tracker.on_key_up(RetroPad::B));
        assert!(!tracker.on_key_up(RetroPad::Start));
        assert!(!tracker.on_key_up(RetroPad::Up));
        assert!(tracker.on_key_up(RetroPad::Select));
    }

    #[test]
    fn test_menu_entries() {
        assert_eq!(GameMenuAction::ALL.len(), 5);
        assert_eq!(GameMenuAction::ALL[0].label(), "Resume");
        assert_eq!(GameMenuAction::ALL[3].label(), "Quit");
    }
}
