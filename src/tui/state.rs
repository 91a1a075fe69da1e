use crate::theme::ThemeMode;
use std::time::Instant;

pub struct TuiState {
    /// Cursor position as an index into the chronological day list.
    pub selected: usize,
    pub mode: ThemeMode,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            selected: 0,
            mode: ThemeMode::default(),
            show_help: false,
            status_message: None,
        }
    }
}
