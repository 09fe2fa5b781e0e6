mod app;
mod backend;
mod config;
mod error;
mod event;
mod github;
mod http;
mod loader;
mod logging;
mod settle;
mod table;
#[cfg(test)]
mod test_utils;
mod ui;
mod view_state;

use app::App;
use backend::client::BackendClient;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::AppEvent;
use futures::StreamExt;
use github::client::GitHubClient;
use loader::{RepositoryDetailLoader, RepositoryListLoader};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Parser)]
#[command(name = "repodeck", about = "Browse backend repositories with their latest commit and README")]
struct Cli {
    #[arg(long, help = "Base URL of the repository backend (overrides API_BASE_URL)")]
    api_base_url: Option<String>,

    #[arg(long, short, help = "Path to an alternate config.toml")]
    config: Option<PathBuf>,
}

// one cooperative UI thread; network tasks hand results back over the channel
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config, cli.api_base_url);
    logging::init(&config)?;
    info!(?config, "starting repodeck");

    let http = http::build_client(&config)?;
    let backend_client = BackendClient::new(config.api_base_url.as_deref(), http.clone());
    let github = GitHubClient::new(&config, http)?;
    let list_loader = RepositoryListLoader::new(Arc::new(backend_client));
    let detail_loader = RepositoryDetailLoader::new(Arc::new(github));

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let source_label = config
        .api_base_url
        .clone()
        .unwrap_or_else(|| "(no API_BASE_URL)".to_string());
    let mut app = App::new(list_loader, detail_loader, source_label, tx.clone());

    // Install panic hook before entering raw mode so terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    app.start();

    let input_tx = tx.clone();
    let input_task = tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(_, _) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(e) = app_event {
                if input_tx.send(e).is_err() {
                    break;
                }
            }
        }
    });
    drop(tx);

    loop {
        terminal.draw(|f| app.render(f))?;

        let first = match rx.recv().await {
            Some(e) => e,
            None => break,
        };

        app.handle_event(first);
        while let Ok(pending) = rx.try_recv() {
            app.handle_event(pending);
        }

        if app.should_quit {
            break;
        }
    }

    input_task.abort();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("repodeck exiting");
    Ok(())
}
