use std::io;

use anyhow::Result;
use crossterm::terminal as raw;
use tui::{backend::CrosstermBackend, Terminal};

use project_board::api::GraphqlClient;
use project_board::app::{run_app, App};
use project_board::{config, logging, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::init()?;

    let log_path = logging::init_file_logging(&config.log_dir)?;
    println!("Logging to {}", log_path.display());
    tracing::info!(endpoint = config.graphql_endpoint(), "starting project board");

    let client = GraphqlClient::from_config(&config);

    raw::enable_raw_mode()?;
    let result = run(client).await;
    let restored = terminal::restore(&mut io::stdout(), raw::disable_raw_mode);

    if let Err(err) = &result {
        tracing::error!(error = %err, "app loop failed");
    }
    if let Err(err) = &restored {
        tracing::error!(error = %err, "failed to restore terminal");
    }

    result?;
    restored?;
    Ok(())
}

async fn run(client: GraphqlClient) -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enter(&mut stdout)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(client);
    run_app(&mut terminal, &mut app).await
}
