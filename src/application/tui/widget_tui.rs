use super::keymap::{Cursor, KeyAction, action_for_key};
use super::palette::{Palette, hex_color};
use crate::application::controller::{Redraw, WidgetController};
use crate::application::view::{CellContent, OverlayView, WidgetView};
use crate::domain::{Mood, Overlay, ThemeName};
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};
use std::io::{self, Stdout, stdout};

const CELL_WIDTH: u16 = 12;
const GRID_WIDTH: u16 = CELL_WIDTH * 7 + 8;
const GRID_HEIGHT: u16 = 7;
const HELP_HEIGHT: u16 = 2;
const STATUS_HEIGHT: u16 = 1;

const HELP_TEXT: &str =
    "←→=Day • Enter=Pick mood • t=Theme • r=Reset • [ ]=Week • Esc=Close • q=Quit";

/// Gesture handling state that does not need a terminal.
pub struct WidgetSession<'a> {
    controller: WidgetController<'a>,
    cursor: Cursor,
    status: Option<String>,
    should_exit: bool,
}

impl<'a> WidgetSession<'a> {
    pub fn new(controller: WidgetController<'a>, focused_day: chrono::Weekday) -> Self {
        Self {
            controller,
            cursor: Cursor::new(focused_day),
            status: None,
            should_exit: false,
        }
    }

    pub fn controller(&self) -> &WidgetController<'a> {
        &self.controller
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Controller view with the pending status line attached
    pub fn view(&self) -> WidgetView {
        self.controller.view().with_status(self.status.clone())
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = action_for_key(key, self.controller.overlay(), &self.cursor);

        match action {
            KeyAction::Gesture(gesture) => {
                let redraw = self.controller.handle(gesture);
                if redraw == Redraw::Overlay {
                    self.sync_cursor_to_overlay();
                }
            }
            KeyAction::MoveFocus(delta) => self.cursor.move_day(delta),
            KeyAction::MoveOption(delta) => {
                let len = match self.controller.overlay() {
                    Overlay::MoodMenu(_) => Mood::ALL.len(),
                    Overlay::ThemeMenu => ThemeName::ALL.len(),
                    _ => 0,
                };
                self.cursor.move_option(delta, len);
            }
            KeyAction::ShiftWeek(weeks) => {
                self.controller.shift_week(weeks);
            }
            KeyAction::Quit => self.should_exit = true,
            KeyAction::Ignore => {}
        }

        if let Some(warning) = self.controller.take_warning() {
            self.status = Some(warning);
        }
    }

    fn sync_cursor_to_overlay(&mut self) {
        match self.controller.overlay() {
            Overlay::MoodMenu(day) => {
                self.cursor.focused_day = day;
                self.cursor.option = 0;
            }
            Overlay::ThemeMenu => {
                let current = self.controller.store().theme();
                self.cursor.option = ThemeName::ALL
                    .iter()
                    .position(|t| *t == current)
                    .unwrap_or(0);
            }
            Overlay::ResetConfirm | Overlay::None => self.cursor.option = 0,
        }
    }
}

/// Terminal adapter around a `WidgetSession`
pub struct WidgetTui<'a> {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    session: WidgetSession<'a>,
}

impl<'a> WidgetTui<'a> {
    pub fn new(controller: WidgetController<'a>, focused_day: chrono::Weekday) -> io::Result<Self> {
        // First check if we're in a proper terminal
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode();
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self {
            terminal,
            session: WidgetSession::new(controller, focused_day),
        })
    }

    /// Run the widget loop until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        while !self.session.should_exit() {
            let view = self.session.view();
            let cursor = self.session.cursor();

            self.terminal
                .draw(|frame| draw_widget(frame, &view, &cursor))?;

            if poll(std::time::Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.session.handle_key(key);
                    }
                    // Resize and everything else just triggers a redraw
                    _ => continue,
                }
            }
        }

        self.cleanup()
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl<'a> Drop for WidgetTui<'a> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Calculate centered area with both horizontal and vertical centering
fn centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
    let width = available.width.min(needed_width);
    let height = available.height.min(needed_height);

    Rect {
        x: available.x + (available.width - width) / 2,
        y: available.y + (available.height - height) / 2,
        width,
        height,
    }
}

fn grid_table<'v>(view: &'v WidgetView, cursor: &Cursor, palette: &Palette) -> Table<'v> {
    let header = Row::new(view.grid.cells.iter().map(|cell| {
        let style = if cell.day == cursor.focused_day {
            palette.title_style().add_modifier(Modifier::UNDERLINED)
        } else {
            palette.border_style()
        };
        Cell::from(Line::from(cell.label).centered()).style(style)
    }))
    .height(1);

    let cells = view.grid.cells.iter().map(|cell| {
        let mut style = match &cell.content {
            CellContent::Empty => palette.placeholder_style(),
            CellContent::Mood { color, .. } => palette.mood_style(color),
        };
        if cell.day == cursor.focused_day {
            style = style.add_modifier(Modifier::BOLD);
        }
        let text = Text::from(vec![
            Line::default(),
            Line::from(cell.content.text()).centered(),
            Line::from(cell.key.date().format("%-d").to_string()).centered(),
        ]);
        Cell::from(text).style(style)
    });

    Table::new(
        vec![Row::new(cells).height(3)],
        [Constraint::Length(CELL_WIDTH); 7],
    )
    .header(header)
    .column_spacing(1)
    .style(palette.base())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(format!(" mood · {} ", view.title), palette.title_style()))
            .title_alignment(Alignment::Center),
    )
}

fn overlay_popup(overlay: &OverlayView, cursor: &Cursor, palette: &Palette) -> (Paragraph<'static>, u16, u16) {
    let option_style = |index: usize| {
        if index == cursor.option {
            palette.selected_option_style()
        } else {
            palette.base()
        }
    };

    let (title, lines) = match overlay {
        OverlayView::MoodMenu { day, options } => {
            let lines: Vec<Line> = options
                .iter()
                .enumerate()
                .map(|(i, mood)| {
                    Line::from(vec![
                        Span::styled("  ", Style::default().bg(hex_color(mood.color()))),
                        Span::styled(format!(" {} {:<8}", i + 1, mood.label()), option_style(i)),
                    ])
                })
                .collect();
            (format!(" {} mood ", crate::domain::day_label(*day)), lines)
        }
        OverlayView::ThemeMenu { options, current } => {
            let lines: Vec<Line> = options
                .iter()
                .enumerate()
                .map(|(i, theme)| {
                    let marker = if theme == current { "●" } else { " " };
                    Line::from(vec![
                        Span::styled("  ", Style::default().bg(hex_color(theme.accent()))),
                        Span::styled(format!(" {} {:<9}", marker, theme.as_str()), option_style(i)),
                    ])
                })
                .collect();
            (" theme ".to_string(), lines)
        }
        OverlayView::ResetConfirm { message } => (
            " reset ".to_string(),
            vec![
                Line::from(*message),
                Line::default(),
                Line::from(Span::styled("y = clear    n = keep", palette.help_style())),
            ],
        ),
    };

    let width = lines.iter().map(|l| l.width() as u16).max().unwrap_or(0) + 4;
    let height = lines.len() as u16 + 2;
    let popup = Paragraph::new(lines).style(palette.base()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(title, palette.title_style())),
    );
    (popup, width, height)
}

/// Draw a widget description; holds no state of its own.
pub fn draw_widget(frame: &mut Frame, view: &WidgetView, cursor: &Cursor) {
    let palette = Palette::for_theme(view.theme);
    let size = frame.area();

    frame.render_widget(Block::default().style(palette.base()), size);

    let area = centered_area(size, GRID_WIDTH, GRID_HEIGHT + HELP_HEIGHT + STATUS_HEIGHT);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(GRID_HEIGHT),
            Constraint::Length(HELP_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    frame.render_widget(grid_table(view, cursor, &palette), chunks[0]);

    let help = Paragraph::new(Line::from(Span::styled(HELP_TEXT, palette.help_style())))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);

    if let Some(message) = &view.status {
        let warning = Paragraph::new(Line::from(Span::styled(message.as_str(), palette.warning_style())))
            .alignment(Alignment::Center);
        frame.render_widget(warning, chunks[2]);
    }

    if let Some(overlay) = &view.overlay {
        let (popup, width, height) = overlay_popup(overlay, cursor, &palette);
        let popup_area = centered_area(size, width, height);
        frame.render_widget(Clear, popup_area);
        frame.render_widget(popup, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayWeek, MoodStore};
    use crate::infrastructure::test_utils::test_harness::{FailingStore, MemoryStore};
    use chrono::{NaiveDate, Weekday};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn week() -> DisplayWeek {
        DisplayWeek::containing(NaiveDate::from_ymd_opt(2024, 3, 13).unwrap())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(view: &WidgetView, cursor: &Cursor) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 24)).unwrap();
        terminal
            .draw(|frame| draw_widget(frame, view, cursor))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn keyboard_flow_records_a_mood() {
        let memory = MemoryStore::new();
        let mut store = MoodStore::load(Box::new(memory.clone()));
        {
            let controller = WidgetController::new(&mut store, week());
            let mut session = WidgetSession::new(controller, Weekday::Wed);

            session.handle_key(press(KeyCode::Right));
            session.handle_key(press(KeyCode::Enter));
            assert_eq!(session.controller().overlay(), Overlay::MoodMenu(Weekday::Thu));

            session.handle_key(press(KeyCode::Down));
            session.handle_key(press(KeyCode::Down));
            session.handle_key(press(KeyCode::Enter));

            assert_eq!(session.controller().overlay(), Overlay::None);
            session.handle_key(press(KeyCode::Char('q')));
            assert!(session.should_exit());
        }

        let thursday = week().key_of(Weekday::Thu);
        assert_eq!(store.get(&thursday), Some(&Mood::Rough.record()));
    }

    #[test]
    fn theme_menu_opens_on_current_theme() {
        let mut store = MoodStore::load(Box::new(MemoryStore::new()));
        store.set_theme(ThemeName::Lavender);
        let controller = WidgetController::new(&mut store, week());
        let mut session = WidgetSession::new(controller, Weekday::Sun);

        session.handle_key(press(KeyCode::Char('t')));
        assert_eq!(session.cursor().option, 2);

        session.handle_key(press(KeyCode::Down));
        session.handle_key(press(KeyCode::Enter));
        assert_eq!(session.controller().store().theme(), ThemeName::Blue);
    }

    #[test]
    fn storage_failure_shows_status_line() {
        let mut store = MoodStore::load(Box::new(FailingStore));
        let controller = WidgetController::new(&mut store, week());
        let mut session = WidgetSession::new(controller, Weekday::Mon);

        session.handle_key(press(KeyCode::Enter));
        session.handle_key(press(KeyCode::Char('1')));

        let status = session.status().expect("warning surfaced").to_owned();
        assert!(status.contains("save your mood"));

        let view = session.view();
        assert_eq!(view.status.as_deref(), Some(status.as_str()));
        assert!(screen(&view, &session.cursor()).contains("save your mood"));
    }

    #[test]
    fn draws_placeholders_and_sparkle() {
        let mut store = MoodStore::load(Box::new(MemoryStore::new()));
        store.set(week().key_of(Weekday::Wed), Mood::Awesome.record());
        let controller = WidgetController::new(&mut store, week());

        let text = screen(&controller.view(), &Cursor::new(Weekday::Wed));

        assert!(text.contains("awesome"));
        assert!(text.contains("✨"));
        assert!(text.contains("+"));
        assert!(text.contains("week of Mar 10, 2024"));
    }

    #[test]
    fn draws_open_mood_menu() {
        let mut store = MoodStore::load(Box::new(MemoryStore::new()));
        let mut controller = WidgetController::new(&mut store, week());
        controller.on_cell_activated(Weekday::Fri);

        let text = screen(&controller.view(), &Cursor::new(Weekday::Fri));

        assert!(text.contains("fri mood"));
        for mood in Mood::ALL {
            assert!(text.contains(mood.label()), "missing {}", mood.label());
        }
    }

    #[test]
    fn draws_reset_dialog() {
        let mut store = MoodStore::load(Box::new(MemoryStore::new()));
        let mut controller = WidgetController::new(&mut store, week());
        controller.on_reset_requested();

        let text = screen(&controller.view(), &Cursor::new(Weekday::Fri));
        assert!(text.contains("y = clear"));
    }

    #[test]
    fn drawing_twice_gives_same_screen() {
        let mut store = MoodStore::load(Box::new(MemoryStore::new()));
        store.set(week().key_of(Weekday::Mon), Mood::Calm.record());
        let controller = WidgetController::new(&mut store, week());
        let cursor = Cursor::new(Weekday::Mon);

        assert_eq!(
            screen(&controller.view(), &cursor),
            screen(&controller.view(), &cursor)
        );
    }
}
