use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::truncate;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let issues = app.browser.issues();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Issues ({}) ", issues.len()));

    if issues.is_empty() {
        let empty = Paragraph::new("No issues found")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let w = area.width.saturating_sub(2) as usize;
    let fixed = 10; // spaces(2) + #num(8)
    let flex = w.saturating_sub(fixed).max(10);

    let items: Vec<ListItem> = issues
        .iter()
        .enumerate()
        .map(|(i, issue)| {
            let link = Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED);
            let style = if i == app.issue_index {
                link.fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                link
            };

            let line = Line::from(vec![
                Span::styled(truncate(&issue.title, flex), style),
                Span::raw("  "),
                Span::styled(
                    format!("#{}", issue.number()),
                    Style::default().fg(Color::Cyan),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.issue_index));

    frame.render_stateful_widget(list, area, &mut state);
}
