use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::types::IssueState;

/// Open/closed selector. Reports the raw value of a newly chosen option
/// and leaves interpreting it to the caller.
#[derive(Debug, Clone, Copy)]
pub struct FilterControl {
    selected: IssueState,
}

impl FilterControl {
    pub fn new(selected: IssueState) -> Self {
        Self { selected }
    }

    pub fn handle_key<T>(&self, key: KeyEvent, on_change: impl FnOnce(&str) -> T) -> Option<T> {
        let choice = match key.code {
            KeyCode::Char('o') => IssueState::Open,
            KeyCode::Char('c') => IssueState::Closed,
            KeyCode::Char('f') | KeyCode::Tab => self.selected.toggled(),
            _ => return None,
        };

        if choice == self.selected {
            return None;
        }
        Some(on_change(choice.as_api_str()))
    }
}

pub fn render(frame: &mut Frame, control: &FilterControl, area: Rect) {
    let mut spans = vec![Span::styled(
        "Filters: ",
        Style::default().fg(Color::Gray),
    )];

    for state in IssueState::ALL {
        let (marker, style) = if state == control.selected {
            (
                "(*)",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("( )", Style::default().fg(Color::Gray))
        };
        spans.push(Span::styled(format!("{} {}", marker, state), style));
        spans.push(Span::raw("  "));
    }

    let filter = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(filter, area);
}
