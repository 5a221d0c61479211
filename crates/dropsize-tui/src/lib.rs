//! dropsize-tui: Terminal UI for the completion dropdown
//!
//! This crate provides:
//! - The completion dropdown widget, sized by `dropsize-core`
//! - A live preview screen that recomputes sizing on resize

pub mod dropdown;
pub mod preview;
#[cfg(test)]
pub mod test_utils;
pub mod theme;

pub use dropdown::{scroll_indicator, CompletionDropdown, CompletionItem, DropdownState};
pub use dropsize_core;
pub use preview::{render_preview, run_preview, sample_items, PreviewApp};
pub use theme::Theme;

use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dropsize_core::Config;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the live preview.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on exit.
pub fn run_preview_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_preview(&mut terminal, config.policy)?;

    terminal.show_cursor()?;
    Ok(())
}

/// Returns the TUI crate version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
