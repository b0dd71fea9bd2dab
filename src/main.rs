mod action;
mod app;
mod auth;
mod browser;
mod config;
mod error;
mod event;
mod github;
mod source;
mod tui;
mod types;
mod ui;

use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::event::Event;
use crate::github::GitHub;
use crate::source::IssueSource;
use crate::tui::EventHandler;
use crate::types::{IssueState, RepoRef};

/// Page through a GitHub repository's issues
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Repository as owner/name (overrides the config file)
    #[arg(long)]
    repo: Option<RepoRef>,

    /// Initial filter: open or closed
    #[arg(long)]
    state: Option<IssueState>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let repo = args
        .repo
        .clone()
        .unwrap_or_else(|| config.repository.repo_ref());
    let state = args.state.unwrap_or(config.general.default_state);

    let token = auth::load_token(&config.auth)?;
    let github = GitHub::new(token, repo.clone())?;
    tracing::info!(source = github.name(), %repo, "starting");

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(Arc::new(github), repo, state).await;

    tui::restore()?;

    result
}

async fn run(
    source: Arc<dyn IssueSource>,
    repo: RepoRef,
    state: IssueState,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(source, repo, state, action_tx.clone());

    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
