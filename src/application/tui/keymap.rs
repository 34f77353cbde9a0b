use crate::domain::{Gesture, Mood, Overlay, ThemeName, WEEK_DAYS};
use chrono::Weekday;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard focus: the highlighted day and the highlighted menu row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub focused_day: Weekday,
    pub option: usize,
}

impl Cursor {
    pub fn new(focused_day: Weekday) -> Self {
        Self {
            focused_day,
            option: 0,
        }
    }

    /// Move the focused day, wrapping inside the displayed week
    pub fn move_day(&mut self, delta: i32) {
        self.focused_day = neighbour(self.focused_day, delta);
    }

    pub fn move_option(&mut self, delta: i32, len: usize) {
        if len == 0 {
            return;
        }
        let len = len as i32;
        self.option = (self.option as i32 + delta).rem_euclid(len) as usize;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Gesture(Gesture),
    MoveFocus(i32),
    MoveOption(i32),
    ShiftWeek(i64),
    Quit,
    Ignore,
}

fn neighbour(day: Weekday, delta: i32) -> Weekday {
    let index = day.num_days_from_sunday() as i32;
    WEEK_DAYS[(index + delta).rem_euclid(7) as usize]
}

/// Translate a key press into a widget action given the open overlay
pub fn action_for_key(key: KeyEvent, overlay: Overlay, cursor: &Cursor) -> KeyAction {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return KeyAction::Quit;
    }

    match overlay {
        Overlay::ResetConfirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                KeyAction::Gesture(Gesture::ResetConfirmed)
            }
            KeyCode::Char('n') | KeyCode::Char('N') => KeyAction::Gesture(Gesture::ResetCancelled),
            KeyCode::Esc => KeyAction::Gesture(Gesture::Outside),
            _ => KeyAction::Ignore,
        },

        Overlay::MoodMenu(day) => match key.code {
            KeyCode::Up | KeyCode::Char('k') => KeyAction::MoveOption(-1),
            KeyCode::Down | KeyCode::Char('j') => KeyAction::MoveOption(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let mood = Mood::ALL[cursor.option % Mood::ALL.len()];
                KeyAction::Gesture(Gesture::MoodChosen(day, mood))
            }
            KeyCode::Char(c @ '1'..='8') => {
                let mood = Mood::ALL[(c as usize) - ('1' as usize)];
                KeyAction::Gesture(Gesture::MoodChosen(day, mood))
            }
            // Hop the open menu to the adjacent day
            KeyCode::Left | KeyCode::Char('h') => {
                KeyAction::Gesture(Gesture::CellActivated(neighbour(day, -1)))
            }
            KeyCode::Right | KeyCode::Char('l') => {
                KeyAction::Gesture(Gesture::CellActivated(neighbour(day, 1)))
            }
            KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::Gesture(Gesture::ThemeToggle),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Gesture(Gesture::ResetRequested),
            KeyCode::Esc => KeyAction::Gesture(Gesture::Outside),
            KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        },

        Overlay::ThemeMenu => match key.code {
            KeyCode::Up | KeyCode::Char('k') => KeyAction::MoveOption(-1),
            KeyCode::Down | KeyCode::Char('j') => KeyAction::MoveOption(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let theme = ThemeName::ALL[cursor.option % ThemeName::ALL.len()];
                KeyAction::Gesture(Gesture::ThemeChosen(theme))
            }
            KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::Gesture(Gesture::ThemeToggle),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Gesture(Gesture::ResetRequested),
            KeyCode::Esc => KeyAction::Gesture(Gesture::Outside),
            KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        },

        Overlay::None => match key.code {
            KeyCode::Left | KeyCode::Char('h') => KeyAction::MoveFocus(-1),
            KeyCode::Right | KeyCode::Char('l') => KeyAction::MoveFocus(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                KeyAction::Gesture(Gesture::CellActivated(cursor.focused_day))
            }
            KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::Gesture(Gesture::ThemeToggle),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Gesture(Gesture::ResetRequested),
            KeyCode::Char('[') | KeyCode::PageUp => KeyAction::ShiftWeek(-1),
            KeyCode::Char(']') | KeyCode::PageDown => KeyAction::ShiftWeek(1),
            KeyCode::Esc => KeyAction::Gesture(Gesture::Outside),
            KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        },
    }
}
