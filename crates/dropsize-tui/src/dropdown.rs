//! Completion dropdown widget.
//!
//! Renders as many items as the [`SizingResult`] allows, scrolled so the
//! selection stays visible. Compact mode drops the title border and item
//! details. A single indicator line reports items hidden above or below.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use dropsize_core::SizingResult;

use crate::theme::Theme;

/// Marker drawn in front of the selected item.
const SELECTED_MARKER: &str = "› ";
/// Blank marker for other items.
const UNSELECTED_MARKER: &str = "  ";
/// Gap between the label column and details.
const DETAIL_GAP: usize = 2;

/// A single completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// Text inserted on accept.
    pub label: String,
    /// Optional description, hidden in compact mode.
    pub detail: Option<String>,
}

impl CompletionItem {
    /// Create an item without a description.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Selection and scroll position of the dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownState {
    /// Index of the selected item.
    pub selected: usize,
    /// Index of the first rendered item.
    pub offset: usize,
}

impl DropdownState {
    /// Move the selection down, wrapping to the top.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Move the selection up, wrapping to the bottom.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    /// Adjust the scroll offset so the selection is inside the window.
    ///
    /// Also pulls the offset back when the window grows, so no rows are
    /// wasted below the last item.
    pub fn ensure_visible(&mut self, window_size: usize, len: usize) {
        if len == 0 {
            *self = Self::default();
            return;
        }
        let window = window_size.max(1);
        self.selected = self.selected.min(len - 1);

        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + window {
            self.offset = self.selected + 1 - window;
        }
        self.offset = self.offset.min(len.saturating_sub(window));
    }
}

/// Text for the scroll indicator line, if anything is hidden.
pub fn scroll_indicator(above: usize, below: usize) -> Option<String> {
    match (above, below) {
        (0, 0) => None,
        (above, 0) => Some(format!("↑ {above} more")),
        (0, below) => Some(format!("↓ {below} more")),
        (above, below) => Some(format!("↑ {above} more · ↓ {below} more")),
    }
}

/// Completion dropdown sized by a [`SizingResult`].
pub struct CompletionDropdown<'a> {
    items: &'a [CompletionItem],
    state: &'a DropdownState,
    sizing: SizingResult,
    theme: &'a Theme,
}

impl<'a> CompletionDropdown<'a> {
    /// Create a new dropdown widget.
    pub fn new(
        items: &'a [CompletionItem],
        state: &'a DropdownState,
        sizing: SizingResult,
        theme: &'a Theme,
    ) -> Self {
        Self {
            items,
            state,
            sizing,
            theme,
        }
    }

    /// Rows the widget wants, including chrome, for the current sizing.
    pub fn desired_height(&self) -> u16 {
        let rows = self.sizing.window_size.min(self.items.len()).max(1);
        let indicator = usize::from(self.items.len() > self.sizing.window_size);
        let border = usize::from(!self.sizing.is_compact_mode);
        to_u16(rows + indicator + border)
    }

    fn row_style(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.theme.primary)
                .bg(self.theme.selection)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text)
        }
    }
}

impl Widget for CompletionDropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let compact = self.sizing.is_compact_mode;
        let inner = if compact {
            area
        } else {
            let block = Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(self.theme.border))
                .title(Span::styled(
                    " Completions ",
                    Style::default().fg(self.theme.subtext),
                ));
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        };
        if inner.is_empty() {
            return;
        }

        let width = usize::from(inner.width);
        if self.items.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y,
                "No completions",
                width,
                Style::default().fg(self.theme.muted),
            );
            return;
        }

        let height = usize::from(inner.height);
        let offset = self.state.offset.min(self.items.len() - 1);
        let rows = self
            .sizing
            .window_size
            .min(self.items.len() - offset)
            .min(height);
        let visible = &self.items[offset..offset + rows];
        let label_width = visible
            .iter()
            .map(|item| item.label.width())
            .max()
            .unwrap_or(0);

        for (row, item) in visible.iter().enumerate() {
            let y = inner.y + to_u16(row);
            let selected = offset + row == self.state.selected;
            let style = self.row_style(selected);
            if selected {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), style);
            }

            let marker = if selected {
                SELECTED_MARKER
            } else {
                UNSELECTED_MARKER
            };
            let (x, _) = buf.set_stringn(inner.x, y, marker, width, style);
            let used = usize::from(x - inner.x);
            buf.set_stringn(x, y, &item.label, width.saturating_sub(used), style);

            if compact {
                continue;
            }
            if let Some(detail) = &item.detail {
                let detail_x = inner
                    .x
                    .saturating_add(to_u16(UNSELECTED_MARKER.width() + label_width + DETAIL_GAP));
                if detail_x < inner.right() {
                    let detail_style = if selected {
                        style.remove_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(self.theme.muted)
                    };
                    buf.set_stringn(
                        detail_x,
                        y,
                        detail,
                        usize::from(inner.right() - detail_x),
                        detail_style,
                    );
                }
            }
        }

        let below = self.items.len() - offset - rows;
        if rows < height {
            if let Some(text) = scroll_indicator(offset, below) {
                buf.set_stringn(
                    inner.x,
                    inner.y + to_u16(rows),
                    text,
                    width,
                    Style::default().fg(self.theme.muted),
                );
            }
        }
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use dropsize_core::compute;

    fn items(count: usize) -> Vec<CompletionItem> {
        (0..count)
            .map(|i| CompletionItem::new(format!("/item{i:02}")).with_detail("desc"))
            .collect()
    }

    fn render(
        items: &[CompletionItem],
        state: &DropdownState,
        sizing: SizingResult,
        width: u16,
        height: u16,
    ) -> Vec<String> {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        CompletionDropdown::new(items, state, sizing, &theme).render(area, &mut buffer);
        buffer_to_string(&buffer)
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_select_wraps() {
        let mut state = DropdownState::default();
        state.select_prev(3);
        assert_eq!(state.selected, 2);
        state.select_next(3);
        assert_eq!(state.selected, 0);

        state.select_next(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_ensure_visible_scrolls() {
        let mut state = DropdownState {
            selected: 15,
            offset: 0,
        };
        state.ensure_visible(12, 20);
        assert_eq!(state.offset, 4);

        state.selected = 2;
        state.ensure_visible(12, 20);
        assert_eq!(state.offset, 2);
    }

    #[test]
    fn test_ensure_visible_pulls_back_when_window_grows() {
        let mut state = DropdownState {
            selected: 19,
            offset: 16,
        };
        state.ensure_visible(15, 20);
        assert_eq!(state.offset, 5);
        assert_eq!(state.selected, 19);
    }

    #[test]
    fn test_ensure_visible_clamps_selection() {
        let mut state = DropdownState {
            selected: 30,
            offset: 25,
        };
        state.ensure_visible(4, 10);
        assert_eq!(state.selected, 9);
        assert_eq!(state.offset, 6);

        state.ensure_visible(4, 0);
        assert_eq!(state, DropdownState::default());
    }

    #[test]
    fn test_scroll_indicator_text() {
        assert_eq!(scroll_indicator(0, 0), None);
        assert_eq!(scroll_indicator(0, 3).as_deref(), Some("↓ 3 more"));
        assert_eq!(scroll_indicator(2, 0).as_deref(), Some("↑ 2 more"));
        assert_eq!(
            scroll_indicator(1, 4).as_deref(),
            Some("↑ 1 more · ↓ 4 more")
        );
    }

    #[test]
    fn test_renders_window_size_rows() {
        let list = items(20);
        let state = DropdownState::default();
        // 20 rows: window of 12, normal mode
        let lines = render(&list, &state, compute(20), 40, 14);

        assert!(lines[0].contains("Completions"));
        assert_eq!(lines.iter().filter(|l| l.contains("/item")).count(), 12);
        assert!(lines[1].starts_with("› /item00"));
        assert!(lines[1].contains("desc"));
        assert!(lines[13].contains("↓ 8 more"));
    }

    #[test]
    fn test_compact_mode_hides_details_and_border() {
        let list = items(10);
        let state = DropdownState::default();
        // 12 rows: compact, window of 4
        let lines = render(&list, &state, compute(12), 30, 6);

        assert!(lines[0].starts_with("› /item00"));
        assert_eq!(lines.iter().filter(|l| l.contains("/item")).count(), 4);
        assert!(!lines.iter().any(|l| l.contains("desc")));
        assert!(!lines.iter().any(|l| l.contains("Completions")));
        assert!(lines[4].contains("↓ 6 more"));
    }

    #[test]
    fn test_scrolled_window() {
        let list = items(20);
        let mut state = DropdownState {
            selected: 15,
            offset: 0,
        };
        let sizing = compute(20);
        state.ensure_visible(sizing.window_size, list.len());

        let lines = render(&list, &state, sizing, 40, 14);
        assert!(lines[1].contains("/item04"));
        assert!(lines.iter().any(|l| l.starts_with("› /item15")));
        assert!(lines[13].contains("↑ 4 more · ↓ 4 more"));
    }

    #[test]
    fn test_area_smaller_than_window() {
        let list = items(20);
        let state = DropdownState::default();
        let lines = render(&list, &state, compute(50), 40, 5);
        // Title plus four items, no room for the indicator
        assert_eq!(lines.iter().filter(|l| l.contains("/item")).count(), 4);
        assert!(!lines.iter().any(|l| l.contains("more")));
    }

    #[test]
    fn test_details_align_after_longest_label() {
        let list = vec![
            CompletionItem::new("/a").with_detail("short"),
            CompletionItem::new("/longer").with_detail("long"),
        ];
        let state = DropdownState::default();
        let lines = render(&list, &state, compute(20), 40, 5);
        let column = |line: &str, needle: &str| {
            line.find(needle).map(|byte| line[..byte].chars().count())
        };
        // marker (2) + "/longer" (7) + gap (2)
        assert_eq!(column(&lines[1], "short"), Some(11));
        assert_eq!(column(&lines[2], "long"), Some(11));
    }

    #[test]
    fn test_empty_items() {
        let state = DropdownState::default();
        let lines = render(&[], &state, compute(20), 30, 4);
        assert!(lines[1].contains("No completions"));
    }

    #[test]
    fn test_desired_height() {
        let theme = Theme::default();
        let state = DropdownState::default();
        let list = items(20);

        let normal = CompletionDropdown::new(&list, &state, compute(20), &theme);
        assert_eq!(normal.desired_height(), 14);

        let compact = CompletionDropdown::new(&list[..3], &state, compute(12), &theme);
        assert_eq!(compact.desired_height(), 3);
    }
}
