use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Previous/next pager. It never computes target pages itself; the
/// callbacks decide what advancing or retreating means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerControl {
    current_page: u32,
    total_pages: u32,
}

impl PagerControl {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }

    pub fn can_retreat(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_advance(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Disabled actions swallow the key without invoking their callback.
    pub fn handle_key<T>(
        &self,
        key: KeyEvent,
        on_next: impl FnOnce() -> T,
        on_previous: impl FnOnce() -> T,
    ) -> Option<T> {
        match key.code {
            KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right if self.can_advance() => {
                Some(on_next())
            }
            KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left if self.can_retreat() => {
                Some(on_previous())
            }
            _ => None,
        }
    }
}

fn button(label: &str, enabled: bool) -> Span<'_> {
    let style = if enabled {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(label, style)
}

pub fn render(frame: &mut Frame, control: &PagerControl, area: Rect) {
    let line = Line::from(vec![
        button("< Previous", control.can_retreat()),
        Span::raw("   "),
        Span::styled(control.label(), Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        button("Next >", control.can_advance()),
    ]);

    let pager = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(pager, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn label_is_literal() {
        assert_eq!(PagerControl::new(3, 5).label(), "Page 3 of 5");
        assert_eq!(PagerControl::new(1, 0).label(), "Page 1 of 0");
    }

    #[test]
    fn enabled_actions_across_every_page() {
        for total in 1..=6 {
            for current in 1..=total {
                let pager = PagerControl::new(current, total);
                assert_eq!(pager.can_retreat(), current > 1, "page {current} of {total}");
                assert_eq!(pager.can_advance(), current < total, "page {current} of {total}");
            }
        }
    }

    #[test]
    fn single_page_disables_both() {
        let pager = PagerControl::new(1, 1);
        assert!(!pager.can_retreat());
        assert!(!pager.can_advance());
    }

    #[test]
    fn middle_page_triggers_both_callbacks() {
        let pager = PagerControl::new(3, 5);
        assert_eq!(pager.handle_key(press('n'), || "next", || "prev"), Some("next"));
        assert_eq!(pager.handle_key(press('p'), || "next", || "prev"), Some("prev"));
        assert_eq!(
            pager.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE), || 1, || 2),
            Some(1)
        );
    }

    #[test]
    fn first_page_swallows_previous() {
        let pager = PagerControl::new(1, 5);
        assert_eq!(pager.handle_key(press('p'), || "next", || "prev"), None);
        assert_eq!(pager.handle_key(press('n'), || "next", || "prev"), Some("next"));
    }

    #[test]
    fn last_page_swallows_next() {
        let pager = PagerControl::new(5, 5);
        assert_eq!(pager.handle_key(press('n'), || "next", || "prev"), None);
        assert_eq!(pager.handle_key(press('h'), || "next", || "prev"), Some("prev"));
    }
}
