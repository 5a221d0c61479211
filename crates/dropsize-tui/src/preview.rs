//! Live preview of the completion dropdown.
//!
//! Lays out the chrome the sizing policy reserves rows for:
//! 1. Input line (with bottom border)
//! 2. Completion dropdown (title border, list, scroll indicator)
//! 3. Status line
//! 4. Help panel
//!
//! Padding surrounds the whole screen. In normal mode the title border takes
//! the bottom padding row, so the list and indicator keep their rows.
//!
//! Resizing the terminal recomputes the window size.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use dropsize_core::{SizingPolicy, SizingResult, WindowSizeTracker};

use crate::dropdown::{CompletionDropdown, CompletionItem, DropdownState};
use crate::theme::Theme;

/// Candidates shown in the preview.
const SAMPLE_COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show available commands"),
    ("/quit", "Exit the session"),
    ("/exit", "Exit the session"),
    ("/split", "Split view mode"),
    ("/focus", "Focus conversation mode"),
    ("/canvas", "Focus canvas mode"),
    ("/refresh", "Refresh status"),
    ("/clear", "Clear conversation"),
    ("/search", "Search history"),
    ("/model", "Switch active model"),
    ("/copy", "Copy last response to clipboard"),
    ("/editor", "Open in $EDITOR"),
    ("/approve", "Approve pending changes"),
    ("/reject", "Reject with optional feedback"),
    ("/pause", "Pause running operation"),
    ("/resume", "Resume paused operation"),
    ("/cancel", "Cancel current operation"),
    ("/finalize", "Finalize the draft"),
    ("/assess", "Request an assessment"),
    ("/history", "Show previous inputs"),
    ("/theme", "Switch color theme"),
    ("/config", "Show active configuration"),
    ("/export", "Export transcript"),
    ("/version", "Show version"),
];

/// The preview's fixed candidate list.
pub fn sample_items() -> Vec<CompletionItem> {
    SAMPLE_COMMANDS
        .iter()
        .map(|(label, detail)| CompletionItem::new(*label).with_detail(*detail))
        .collect()
}

/// State for the preview screen.
#[derive(Debug)]
pub struct PreviewApp {
    /// Candidates in the dropdown.
    pub items: Vec<CompletionItem>,
    /// Selection and scroll.
    pub state: DropdownState,
    /// Sizing for the current terminal height.
    pub tracker: WindowSizeTracker,
    /// Theme colors.
    pub theme: Theme,
    /// Current terminal size.
    pub terminal_size: (u16, u16),
    /// Should the app quit?
    pub should_quit: bool,
}

impl PreviewApp {
    /// Create a preview for a terminal of the given size.
    pub fn new(policy: SizingPolicy, terminal_size: (u16, u16)) -> Self {
        let mut app = Self {
            items: sample_items(),
            state: DropdownState::default(),
            tracker: WindowSizeTracker::new(policy, i32::from(terminal_size.1)),
            theme: Theme::from_env(),
            terminal_size,
            should_quit: false,
        };
        app.sync_scroll();
        app
    }

    /// Current sizing.
    pub fn sizing(&self) -> SizingResult {
        self.tracker.current()
    }

    /// Handle keyboard input.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.state.select_next(self.items.len());
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.state.select_prev(self.items.len());
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            _ => return,
        }
        self.sync_scroll();
    }

    /// Handle terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        if let Some(sizing) = self.tracker.update(i32::from(height)) {
            debug!(width, height, window_size = sizing.window_size, "terminal resized");
            self.sync_scroll();
        }
    }

    fn sync_scroll(&mut self) {
        let window = self.sizing().window_size;
        self.state.ensure_visible(window, self.items.len());
    }
}

/// Render the preview screen.
pub fn render_preview(frame: &mut Frame<'_>, app: &PreviewApp) {
    let reserved = app.tracker.policy().reserved;
    let sizing = app.sizing();

    // Normal mode spends the bottom padding row on the dropdown's title border
    let top_padding = reserved.padding / 2;
    let bottom_padding = if sizing.is_compact_mode {
        reserved.padding - top_padding
    } else {
        (reserved.padding - top_padding).saturating_sub(1)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(top_padding),
            Constraint::Length(reserved.input_line),
            Constraint::Min(0),
            Constraint::Length(reserved.status_messages),
            Constraint::Length(reserved.help_text),
            Constraint::Length(bottom_padding),
        ])
        .split(frame.area());

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(app.theme.primary)),
        Span::styled("/", Style::default().fg(app.theme.text)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(input, chunks[1]);

    let dropdown = CompletionDropdown::new(&app.items, &app.state, sizing, &app.theme);
    let list_area = Rect {
        height: dropdown.desired_height().min(chunks[2].height),
        ..chunks[2]
    };
    frame.render_widget(dropdown, list_area);

    frame.render_widget(status_line(app), chunks[3]);
    frame.render_widget(help_panel(&app.theme), chunks[4]);
}

fn status_line(app: &PreviewApp) -> Paragraph<'static> {
    let sizing = app.sizing();
    let tier = app.tracker.policy().tier(app.tracker.rows());
    let mut spans = vec![Span::styled(
        format!(
            "rows {}  window {}  available {}  {tier}",
            app.terminal_size.1, sizing.window_size, sizing.available_height
        ),
        Style::default().fg(app.theme.subtext),
    )];
    if sizing.is_compact_mode {
        spans.push(Span::styled(
            "  compact",
            Style::default().fg(app.theme.warning),
        ));
    }
    Paragraph::new(Line::from(spans))
}

fn help_panel(theme: &Theme) -> Paragraph<'static> {
    let style = Style::default().fg(theme.muted);
    Paragraph::new(vec![
        Line::styled("↑/↓ select · Tab next · q quit", style),
        Line::styled("Resize the terminal to see the window adapt", style),
    ])
}

/// Run the preview main loop.
pub fn run_preview<B: Backend>(terminal: &mut Terminal<B>, policy: SizingPolicy) -> io::Result<()> {
    let size = terminal.size()?;
    let mut app = PreviewApp::new(policy, (size.width, size.height));

    loop {
        terminal.draw(|frame| render_preview(frame, &app))?;

        // 16ms poll = ~60fps
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Resize(width, height) => app.handle_resize(width, height),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, create_test_terminal_sized};
    use dropsize_core::DEFAULT_POLICY;

    fn draw(app: &PreviewApp) -> String {
        let (width, height) = app.terminal_size;
        let mut terminal = create_test_terminal_sized(width, height);
        terminal.draw(|frame| render_preview(frame, app)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_preview_defaults() {
        let app = PreviewApp::new(DEFAULT_POLICY, (80, 20));
        assert_eq!(app.sizing().window_size, 12);
        assert_eq!(app.state, DropdownState::default());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_navigation_scrolls_window() {
        let mut app = PreviewApp::new(DEFAULT_POLICY, (80, 12));
        assert_eq!(app.sizing().window_size, 4);

        for _ in 0..5 {
            app.handle_key_event(key(KeyCode::Down));
        }
        assert_eq!(app.state.selected, 5);
        assert_eq!(app.state.offset, 2);

        app.handle_key_event(key(KeyCode::Up));
        app.handle_key_event(key(KeyCode::Char('k')));
        assert_eq!(app.state.selected, 3);
        assert_eq!(app.state.offset, 2);

        // Wrap to the last item
        let mut app = PreviewApp::new(DEFAULT_POLICY, (80, 12));
        app.handle_key_event(key(KeyCode::BackTab));
        assert_eq!(app.state.selected, app.items.len() - 1);
        assert_eq!(app.state.offset, app.items.len() - 4);
    }

    #[test]
    fn test_resize_recomputes_sizing() {
        let mut app = PreviewApp::new(DEFAULT_POLICY, (80, 50));
        assert_eq!(app.sizing().window_size, 15);
        app.state.selected = 14;

        app.handle_resize(80, 12);
        assert!(app.sizing().is_compact_mode);
        assert_eq!(app.sizing().window_size, 4);
        assert_eq!(app.state.offset, 11);
        assert_eq!(app.terminal_size, (80, 12));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = PreviewApp::new(DEFAULT_POLICY, (80, 24));
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = PreviewApp::new(DEFAULT_POLICY, (80, 24));
        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = PreviewApp::new(DEFAULT_POLICY, (80, 24));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_normal_terminal() {
        let app = PreviewApp::new(DEFAULT_POLICY, (80, 24));
        let screen = draw(&app);

        // 24 rows: 16 available, window capped at 15
        assert!(screen.contains("rows 24  window 15  available 16  standard"));
        assert!(!screen.contains("compact"));
        assert!(screen.contains("Completions"));
        assert!(screen.contains("› /help"));
        assert!(screen.contains("Show available commands"));
        assert!(screen.contains("q quit"));
    }

    #[test]
    fn test_render_compact_terminal() {
        let app = PreviewApp::new(DEFAULT_POLICY, (80, 12));
        let screen = draw(&app);

        assert!(screen.contains("window 4"));
        assert!(screen.contains("compact"));
        assert!(!screen.contains("Completions"));
        assert!(!screen.contains("Show available commands"));
        assert_eq!(screen.lines().filter(|l| l.contains("  /")).count(), 3);
        assert!(screen.contains("↓ 20 more"));
    }

    #[test]
    fn test_render_shows_indicator_when_items_hidden() {
        // 20 rows: window of 12 fills the available height exactly
        let app = PreviewApp::new(DEFAULT_POLICY, (80, 20));
        let screen = draw(&app);
        assert!(screen.contains("Completions"));
        let items_drawn = screen
            .lines()
            .filter(|l| l.starts_with("› /") || l.starts_with("  /"))
            .count();
        assert_eq!(items_drawn, 12);
        assert!(screen.contains("↓ 12 more"));

        // From 11 rows up the chrome fits around the floored available height
        for height in 11..=45 {
            let app = PreviewApp::new(DEFAULT_POLICY, (80, height));
            let screen = draw(&app);
            assert!(
                screen.contains("more"),
                "no scroll indicator at {height} rows:\n{screen}"
            );
            assert!(screen.contains("q quit"), "help panel clipped at {height} rows");
        }
    }
}
