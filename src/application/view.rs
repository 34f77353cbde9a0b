//! Pure projection of store + overlay state into a toolkit-free description.

use crate::domain::{
    DisplayWeek, Mood, MoodStore, Overlay, TemporalKey, ThemeName, day_label,
};
use chrono::Weekday;

pub const EMPTY_MARKER: &str = "+";
pub const SPARKLE_MARKER: &str = "✨";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Empty,
    Mood {
        color: String,
        label: String,
        sparkle: bool,
    },
}

impl CellContent {
    /// Text shown inside the cell.
    pub fn text(&self) -> String {
        match self {
            CellContent::Empty => EMPTY_MARKER.to_string(),
            CellContent::Mood {
                label,
                sparkle: true,
                ..
            } => format!("{} {}", SPARKLE_MARKER, label),
            CellContent::Mood { label, .. } => label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub day: Weekday,
    pub label: &'static str,
    pub key: TemporalKey,
    pub content: CellContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub cells: Vec<CellView>,
}

impl GridView {
    pub fn cell(&self, day: Weekday) -> Option<&CellView> {
        self.cells.iter().find(|cell| cell.day == day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayView {
    MoodMenu { day: Weekday, options: Vec<Mood> },
    ThemeMenu { options: Vec<ThemeName>, current: ThemeName },
    ResetConfirm { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub title: String,
    pub theme: ThemeName,
    pub accent: &'static str,
    pub grid: GridView,
    pub overlay: Option<OverlayView>,
    /// Storage warning shown under the grid
    pub status: Option<String>,
}

impl WidgetView {
    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = status;
        self
    }
}

pub const RESET_MESSAGE: &str = "Clear every recorded mood? Your theme is kept.";

pub fn render_cell(store: &MoodStore, day: Weekday, key: TemporalKey) -> CellView {
    let content = match store.get(&key) {
        Some(record) => CellContent::Mood {
            color: record.color.clone(),
            label: record.label.clone(),
            sparkle: record.is_awesome(),
        },
        None => CellContent::Empty,
    };

    CellView {
        day,
        label: day_label(day),
        key,
        content,
    }
}

pub fn render_grid(store: &MoodStore, week: &DisplayWeek) -> GridView {
    GridView {
        cells: week
            .slots()
            .map(|(day, key)| render_cell(store, day, key))
            .collect(),
    }
}

pub fn render(store: &MoodStore, week: &DisplayWeek, overlay: Overlay) -> WidgetView {
    let overlay = match overlay {
        Overlay::None => None,
        Overlay::MoodMenu(day) => Some(OverlayView::MoodMenu {
            day,
            options: Mood::ALL.to_vec(),
        }),
        Overlay::ThemeMenu => Some(OverlayView::ThemeMenu {
            options: ThemeName::ALL.to_vec(),
            current: store.theme(),
        }),
        Overlay::ResetConfirm => Some(OverlayView::ResetConfirm {
            message: RESET_MESSAGE,
        }),
    };

    WidgetView {
        title: format!("week of {}", week.start().format("%b %-d, %Y")),
        theme: store.theme(),
        accent: store.theme().accent(),
        grid: render_grid(store, week),
        overlay,
        status: None,
    }
}
