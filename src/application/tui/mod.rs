pub mod doctor;
pub mod keymap;
pub mod palette;
pub mod widget_tui;

pub use doctor::*;
pub use keymap::*;
pub use palette::*;
pub use widget_tui::*;
