//! View model for the countdown window
//!
//! Mirrors what the window shows: a handful of elements carrying text and
//! style classes, plus which control buttons are visible.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::state::Phase;

pub const INFO_ACTIVE: &str = "Complete your activity";
pub const INFO_COOLDOWN: &str = "Go to your next station";
pub const INFO_COMPLETE: &str = "Return to your original station";
pub const COUNTER_END: &str = "0";

pub const CLASS_PRIMARY: &str = "primary";
pub const CLASS_RED: &str = "red";
pub const CLASS_END: &str = "end";
pub const CLASS_EXPAND: &str = "expand";
pub const CLASS_REMOVE: &str = "remove";

/// One styled element of the window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementView {
    pub text: String,
    pub classes: BTreeSet<String>,
    /// Number of forced style flushes, each one restarts running animations
    pub reflows: u64,
}

impl ElementView {
    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn clear_classes(&mut self) {
        self.classes.clear();
    }
}

/// Visibility of the control buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonVisibility {
    pub pause: bool,
    pub restart: bool,
    /// "Mute" button, shown while sound is on
    pub mute_on: bool,
    /// "Unmute" button, shown while sound is off
    pub mute_off: bool,
}

impl Default for ButtonVisibility {
    fn default() -> Self {
        Self {
            pause: true,
            restart: false,
            mute_on: true,
            mute_off: false,
        }
    }
}

/// Elements that can be addressed by [`DisplayState::skip_transition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Body,
    Remaining,
    Counter,
    Progress,
    Info,
}

/// Everything the countdown window displays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    pub body: ElementView,
    pub remaining: ElementView,
    pub counter: ElementView,
    pub progress: ElementView,
    pub info: ElementView,
    pub buttons: ButtonVisibility,
    pub cues_played: u64,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element_mut(&mut self, element: Element) -> &mut ElementView {
        match element {
            Element::Body => &mut self.body,
            Element::Remaining => &mut self.remaining,
            Element::Counter => &mut self.counter,
            Element::Progress => &mut self.progress,
            Element::Info => &mut self.info,
        }
    }

    /// Apply `action` and flush styles on `element` so the change lands
    /// without an animated transition.
    pub fn skip_transition<F>(&mut self, element: Element, action: F)
    where
        F: FnOnce(&mut ElementView),
    {
        let view = self.element_mut(element);
        action(view);
        view.reflows += 1;
    }

    /// Bring the window back to its start-of-run look
    pub fn reset(&mut self, muted: bool) {
        self.set_muted(muted);
        self.buttons.restart = false;
        self.buttons.pause = true;
        self.body.clear_classes();
        self.counter.clear_classes();
        self.progress.clear_classes();
        self.info.clear_classes();
    }

    /// Swap the mute buttons to match the mute flag
    pub fn set_muted(&mut self, muted: bool) {
        self.buttons.mute_on = !muted;
        self.buttons.mute_off = muted;
    }

    /// Restyle the counter, progress bar and instructions for a phase
    pub fn apply_phase(&mut self, phase: Phase) {
        match phase {
            Phase::Active => {
                self.counter.remove_class(CLASS_RED);
                self.counter.add_class(CLASS_PRIMARY);
                self.progress.remove_class(CLASS_RED);
                self.info.text = INFO_ACTIVE.to_string();
            }
            Phase::Cooldown => {
                self.counter.remove_class(CLASS_PRIMARY);
                self.counter.add_class(CLASS_RED);
                self.progress.add_class(CLASS_RED);
                self.info.text = INFO_COOLDOWN.to_string();
            }
            Phase::Complete => self.show_complete(),
            Phase::Idle => {}
        }
    }

    /// Restart the progress bar fill animation from empty
    pub fn restart_progress(&mut self) {
        self.skip_transition(Element::Progress, |view| view.remove_class(CLASS_EXPAND));
        self.progress.add_class(CLASS_EXPAND);
    }

    /// Terminal look: counter shows `0`, restart replaces pause
    pub fn show_complete(&mut self) {
        self.progress.add_class(CLASS_REMOVE);
        self.skip_transition(Element::Counter, |view| view.remove_class(CLASS_RED));
        self.counter.add_class(CLASS_END);
        self.counter.text = COUNTER_END.to_string();
        self.info.text = INFO_COMPLETE.to_string();
        self.buttons.pause = false;
        self.buttons.restart = true;
    }

    /// The counter only accepts clicks once it shows the end state
    pub fn counter_clickable(&self) -> bool {
        self.counter.has_class(CLASS_END)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_styles() {
        let mut display = DisplayState::new();

        display.apply_phase(Phase::Active);
        assert!(display.counter.has_class(CLASS_PRIMARY));
        assert!(!display.progress.has_class(CLASS_RED));
        assert_eq!(display.info.text, INFO_ACTIVE);

        display.apply_phase(Phase::Cooldown);
        assert!(display.counter.has_class(CLASS_RED));
        assert!(!display.counter.has_class(CLASS_PRIMARY));
        assert!(display.progress.has_class(CLASS_RED));
        assert_eq!(display.info.text, INFO_COOLDOWN);

        display.apply_phase(Phase::Active);
        assert!(!display.counter.has_class(CLASS_RED));
        assert!(!display.progress.has_class(CLASS_RED));
    }

    #[test]
    fn test_restart_progress_reflows_and_expands() {
        let mut display = DisplayState::new();
        display.restart_progress();
        display.restart_progress();

        assert!(display.progress.has_class(CLASS_EXPAND));
        assert_eq!(display.progress.reflows, 2);
    }

    #[test]
    fn test_show_complete() {
        let mut display = DisplayState::new();
        display.apply_phase(Phase::Cooldown);
        assert!(!display.counter_clickable());

        display.show_complete();

        assert!(display.counter_clickable());
        assert!(!display.counter.has_class(CLASS_RED));
        assert!(display.progress.has_class(CLASS_REMOVE));
        assert_eq!(display.counter.text, COUNTER_END);
        assert_eq!(display.info.text, INFO_COMPLETE);
        assert!(!display.buttons.pause);
        assert!(display.buttons.restart);
    }

    #[test]
    fn test_reset_clears_classes_and_buttons() {
        let mut display = DisplayState::new();
        display.show_complete();

        display.reset(true);

        assert!(display.counter.classes.is_empty());
        assert!(display.progress.classes.is_empty());
        assert!(display.buttons.pause);
        assert!(!display.buttons.restart);
        assert!(!display.buttons.mute_on);
        assert!(display.buttons.mute_off);
    }
}
