use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::browser::{IssueBrowser, PageRequest, PAGE_SIZE};
use crate::error::DeckError;
use crate::event::Event;
use crate::source::IssueSource;
use crate::types::{Issue, IssueState, RepoRef};
use crate::ui::filter::FilterControl;
use crate::ui::pager::PagerControl;

pub struct App {
    pub browser: IssueBrowser,
    pub repo: RepoRef,
    pub issue_index: usize,
    /// Transient status-bar message (open/copy failures, confirmations)
    pub notice: Option<String>,
    pub should_quit: bool,
    source: Arc<dyn IssueSource>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        source: Arc<dyn IssueSource>,
        repo: RepoRef,
        state: IssueState,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            browser: IssueBrowser::new(PAGE_SIZE, state),
            repo,
            issue_index: 0,
            notice: None,
            should_quit: false,
            source,
            action_tx,
        }
    }

    pub fn filter_control(&self) -> FilterControl {
        FilterControl::new(self.browser.selected_state())
    }

    pub fn pager_control(&self) -> PagerControl {
        PagerControl::new(self.browser.current_page(), self.browser.total_pages())
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.browser.issues().get(self.issue_index)
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::Load,
            Event::Key(key) => self.handle_key(key),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if let Some(action) = self
            .filter_control()
            .handle_key(key, |raw| Action::FilterChanged(raw.to_string()))
        {
            return action;
        }

        if let Some(action) =
            self.pager_control()
                .handle_key(key, || Action::NextPage, || Action::PrevPage)
        {
            return action;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Enter => Action::OpenInBrowser,
            KeyCode::Char('y') => Action::YankUrl,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        if !matches!(action, Action::None) {
            self.notice = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::ScrollUp => {
                if self.issue_index > 0 {
                    self.issue_index -= 1;
                }
            }
            Action::ScrollDown => {
                let len = self.browser.issues().len();
                if len > 0 && self.issue_index < len - 1 {
                    self.issue_index += 1;
                }
            }

            Action::Load => {
                let request = self.browser.start();
                self.spawn_fetch(request);
            }
            Action::Refresh => {
                let request = self.browser.refresh();
                self.spawn_fetch(request);
            }
            Action::PageLoaded { ticket, page } => {
                if self.browser.resolve(ticket, Ok(page)) {
                    self.scroll_to_top();
                }
            }
            Action::PageFailed { ticket, message } => {
                self.browser.resolve(ticket, Err(message));
            }

            Action::FilterChanged(raw) => {
                if let Some(request) = self.browser.on_filter_change(&raw) {
                    self.scroll_to_top();
                    self.spawn_fetch(request);
                }
            }
            Action::NextPage => {
                let requested = self.browser.current_page() + 1;
                self.change_page(requested);
            }
            Action::PrevPage => {
                let requested = self.browser.current_page().saturating_sub(1);
                self.change_page(requested);
            }

            Action::OpenInBrowser => {
                if let Some(url) = self.selected_issue().map(|i| i.url.clone()) {
                    if let Err(e) = open::that(&url) {
                        self.notice = Some(format!("Error: could not open browser: {}", e));
                    }
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.selected_issue().map(|i| i.url.clone()) {
                    self.notice = Some(match copy_to_clipboard(&url) {
                        Ok(()) => format!("Copied {}", url),
                        Err(e) => format!("Error: {}", e),
                    });
                }
            }

            Action::Error(msg) => {
                self.notice = Some(format!("Error: {}", msg));
            }
            Action::None => {}
        }
    }

    fn change_page(&mut self, requested: u32) {
        if let Some(request) = self.browser.on_page_change(requested) {
            self.scroll_to_top();
            self.spawn_fetch(request);
        }
    }

    fn scroll_to_top(&mut self) {
        self.issue_index = 0;
    }

    fn spawn_fetch(&self, request: PageRequest) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        let query = request.query(self.browser.page_size());
        let ticket = request.ticket;
        tokio::spawn(async move {
            match source.fetch_issues(&query).await {
                Ok(page) => {
                    tx.send(Action::PageLoaded { ticket, page }).ok();
                }
                Err(e) => {
                    tx.send(Action::PageFailed {
                        ticket,
                        message: e.to_string(),
                    })
                    .ok();
                }
            }
        });
    }
}

fn copy_to_clipboard(text: &str) -> Result<(), DeckError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| DeckError::Api(format!("clipboard: {}", e)))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| DeckError::Api(format!("clipboard: {}", e)))
}
