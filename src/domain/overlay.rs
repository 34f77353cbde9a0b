use crate::domain::{Mood, ThemeName};
use chrono::Weekday;

/// Which popover is showing. At most one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    MoodMenu(Weekday),
    ThemeMenu,
    ResetConfirm,
}

/// A user action on the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    CellActivated(Weekday),
    MoodChosen(Weekday, Mood),
    ThemeToggle,
    ThemeChosen(ThemeName),
    Outside,
    ResetRequested,
    ResetConfirmed,
    ResetCancelled,
}

/// What the store has to do as a consequence of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    RecordMood(Weekday, Mood),
    ApplyTheme(ThemeName),
    ResetLog,
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::None)
    }

    /// The single transition function for overlay state.
    ///
    /// The reset dialog is modal: only confirm or cancel leave it. Choices
    /// coming from a menu that is not open are ignored.
    pub fn transition(self, gesture: Gesture) -> (Overlay, Effect) {
        if self == Overlay::ResetConfirm {
            return match gesture {
                Gesture::ResetConfirmed => (Overlay::None, Effect::ResetLog),
                Gesture::ResetCancelled => (Overlay::None, Effect::None),
                _ => (self, Effect::None),
            };
        }

        match gesture {
            Gesture::CellActivated(day) if self == Overlay::MoodMenu(day) => {
                (Overlay::None, Effect::None)
            }
            Gesture::CellActivated(day) => (Overlay::MoodMenu(day), Effect::None),
            Gesture::MoodChosen(day, mood) if self == Overlay::MoodMenu(day) => {
                (Overlay::None, Effect::RecordMood(day, mood))
            }
            Gesture::ThemeToggle if self == Overlay::ThemeMenu => (Overlay::None, Effect::None),
            Gesture::ThemeToggle => (Overlay::ThemeMenu, Effect::None),
            Gesture::ThemeChosen(theme) if self == Overlay::ThemeMenu => {
                (Overlay::None, Effect::ApplyTheme(theme))
            }
            Gesture::Outside => (Overlay::None, Effect::None),
            Gesture::ResetRequested => (Overlay::ResetConfirm, Effect::None),
            Gesture::MoodChosen(..)
            | Gesture::ThemeChosen(_)
            | Gesture::ResetConfirmed
            | Gesture::ResetCancelled => (self, Effect::None),
        }
    }
}
