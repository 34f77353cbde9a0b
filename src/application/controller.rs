use crate::application::view::{self, CellView, GridView, WidgetView};
use crate::domain::{DisplayWeek, Effect, Gesture, Mood, MoodStore, Overlay, ThemeName};
use chrono::Weekday;

/// What the surface has to repaint after a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Nothing,
    Overlay,
    Cell(Weekday),
    Grid,
    Theme,
}

/// Maps gestures onto overlay transitions and store mutations.
pub struct WidgetController<'a> {
    store: &'a mut MoodStore,
    week: DisplayWeek,
    overlay: Overlay,
}

impl<'a> WidgetController<'a> {
    pub fn new(store: &'a mut MoodStore, week: DisplayWeek) -> Self {
        Self {
            store,
            week,
            overlay: Overlay::None,
        }
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn week(&self) -> DisplayWeek {
        self.week
    }

    pub fn store(&self) -> &MoodStore {
        &*self.store
    }

    pub fn render_grid(&self) -> GridView {
        view::render_grid(&*self.store, &self.week)
    }

    pub fn render_cell(&self, day: Weekday) -> CellView {
        view::render_cell(&*self.store, day, self.week.key_of(day))
    }

    pub fn view(&self) -> WidgetView {
        view::render(&*self.store, &self.week, self.overlay)
    }

    pub fn take_warning(&mut self) -> Option<String> {
        self.store.take_warning()
    }

    /// Run one gesture through the overlay state machine and apply its effect.
    pub fn handle(&mut self, gesture: Gesture) -> Redraw {
        let previous = self.overlay;
        let (next, effect) = previous.transition(gesture);
        self.overlay = next;
        log::debug!("{:?}: {:?} -> {:?} ({:?})", gesture, previous, next, effect);

        match effect {
            Effect::RecordMood(day, mood) => {
                self.store.set(self.week.key_of(day), mood.record());
                Redraw::Cell(day)
            }
            Effect::ApplyTheme(theme) => {
                self.store.set_theme(theme);
                Redraw::Theme
            }
            Effect::ResetLog => {
                self.store.reset_all();
                Redraw::Grid
            }
            Effect::None if next != previous => Redraw::Overlay,
            Effect::None => Redraw::Nothing,
        }
    }

    pub fn on_cell_activated(&mut self, day: Weekday) -> Redraw {
        self.handle(Gesture::CellActivated(day))
    }

    pub fn on_mood_option_chosen(&mut self, day: Weekday, mood: Mood) -> Redraw {
        self.handle(Gesture::MoodChosen(day, mood))
    }

    pub fn on_theme_toggle_activated(&mut self) -> Redraw {
        self.handle(Gesture::ThemeToggle)
    }

    pub fn on_theme_chosen(&mut self, theme: ThemeName) -> Redraw {
        self.handle(Gesture::ThemeChosen(theme))
    }

    pub fn on_outside_activated(&mut self) -> Redraw {
        self.handle(Gesture::Outside)
    }

    pub fn on_reset_requested(&mut self) -> Redraw {
        self.handle(Gesture::ResetRequested)
    }

    pub fn on_reset_confirmed(&mut self) -> Redraw {
        self.handle(Gesture::ResetConfirmed)
    }

    pub fn on_reset_cancelled(&mut self) -> Redraw {
        self.handle(Gesture::ResetCancelled)
    }

    /// Move the grid by whole weeks. Only allowed with no overlay open, since
    /// an open mood menu is bound to a day of the current week.
    pub fn shift_week(&mut self, weeks: i64) -> Redraw {
        if self.overlay.is_open() {
            return Redraw::Nothing;
        }
        self.week = self.week.shifted(weeks);
        Redraw::Grid
    }
}
