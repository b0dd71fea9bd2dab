pub mod filter;
mod issue_list;
pub mod pager;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::browser::FetchState;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    filter::render(frame, &app.filter_control(), chunks[1]);

    match app.browser.fetch_state() {
        FetchState::Loading => render_message(
            frame,
            "Loading...".to_string(),
            Style::default().fg(Color::Yellow),
            chunks[2],
        ),
        FetchState::Failed(message) => render_message(
            frame,
            format!("Error: {}", message),
            Style::default().fg(Color::Red),
            chunks[2],
        ),
        FetchState::Ready(_) => {
            issue_list::render(frame, app, chunks[2]);
            pager::render(frame, &app.pager_control(), chunks[3]);
        }
    }

    render_status_bar(frame, app, chunks[4]);
}

/// Shorten to `max` characters, ending in "..." when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(vec![Span::styled(
        format!("{} issues", app.repo),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, text: String, style: Style, area: Rect) {
    let message = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(message, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(notice) = &app.notice {
        let color = if notice.starts_with("Error") {
            Color::Red
        } else {
            Color::Green
        };
        Line::from(vec![Span::styled(notice.clone(), Style::default().fg(color))])
    } else {
        let help = "o/c/f: filter | n/p: page | j/k: nav | Enter: open | y: copy url | r: refresh | q: quit";
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::mpsc;

    use super::*;
    use crate::source::fake::FakeSource;
    use crate::types::{Issue, IssueState, PageResult, RepoRef};

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(
            Arc::new(FakeSource::paged(0)),
            RepoRef::new("reactjs", "reactjs.org"),
            IssueState::Open,
            tx,
        )
    }

    fn draw(app: &App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn mocked_page() -> PageResult {
        PageResult {
            issues: vec![
                Issue {
                    title: "Issue 1".to_string(),
                    url: "https://github.com/reactjs/reactjs.org/issues/1".to_string(),
                },
                Issue {
                    title: "Issue 2".to_string(),
                    url: "https://github.com/reactjs/reactjs.org/issues/2".to_string(),
                },
            ],
            total_count: 2,
            end_cursor: Some("end".to_string()),
            has_next_page: false,
        }
    }

    #[test]
    fn loading_hides_list_and_pager() {
        let mut app = app();
        app.browser.start();
        let screen = draw(&app).join("\n");
        assert!(screen.contains("Loading..."));
        assert!(!screen.contains("Issues (0)"));
        assert!(!screen.contains("No issues found"));
        assert!(!screen.contains("Page "));
        assert!(screen.contains("reactjs/reactjs.org issues"));
    }

    #[test]
    fn loaded_issues_show_title_then_number() {
        let mut app = app();
        let request = app.browser.start();
        assert!(app.browser.resolve(request.ticket, Ok(mocked_page())));

        let rows = draw(&app);
        let first = rows.iter().find(|r| r.contains("Issue 1")).unwrap();
        assert!(first.find("Issue 1").unwrap() < first.find("#1").unwrap());
        let second = rows.iter().find(|r| r.contains("Issue 2")).unwrap();
        assert!(second.find("Issue 2").unwrap() < second.find("#2").unwrap());

        let screen = rows.join("\n");
        assert!(screen.contains("Page 1 of 1"));
        assert!(screen.contains("< Previous"));
        assert!(screen.contains("Next >"));
        assert!(!screen.contains("Loading..."));
    }

    #[test]
    fn failure_shows_error_without_list() {
        let mut app = app();
        let request = app.browser.start();
        assert!(app
            .browser
            .resolve(request.ticket, Err("Mocked error".to_string())));

        let screen = draw(&app).join("\n");
        assert!(screen.to_lowercase().contains("error"));
        assert!(screen.contains("Error: Mocked error"));
        assert!(!screen.contains("Issues (0)"));
        assert!(!screen.contains("No issues found"));
        assert!(!screen.contains("Page "));
    }

    #[test]
    fn filter_shows_selected_option() {
        let app = app();
        let screen = draw(&app).join("\n");
        assert!(screen.contains("Filters:"));
        assert!(screen.contains("(*) Open Issues"));
        assert!(screen.contains("( ) Closed Issues"));
    }

    #[test]
    fn notice_replaces_help() {
        let mut app = app();
        app.notice = Some("Copied https://x".to_string());
        let screen = draw(&app).join("\n");
        assert!(screen.contains("Copied https://x"));
        assert!(!screen.contains("q: quit"));
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
