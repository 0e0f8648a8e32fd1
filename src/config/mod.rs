use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use serde::Deserialize;

/// Command line flags. Anything given here wins over the environment.
#[derive(Debug, Default, Parser)]
#[command(name = "project_board", about = "Browse and create projects over GraphQL")]
pub struct Args {
    /// GraphQL endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Environment half of the configuration.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    graphql_endpoint: Option<String>,
    log_dir: Option<PathBuf>,
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    /// URL the GraphQL requests are posted to
    pub graphql_endpoint: String,
    /// Where the log file is written
    pub log_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    /// 3. Apply command line overrides
    pub fn load(args: Args) -> Result<Self> {
        dotenv().ok();

        let env = envy::from_env::<EnvConfig>()?;
        Self::merge(env, args)
    }

    fn merge(env: EnvConfig, args: Args) -> Result<Self> {
        let graphql_endpoint = args
            .endpoint
            .or(env.graphql_endpoint)
            .filter(|url| !url.trim().is_empty())
            .context("GRAPHQL_ENDPOINT is not set (use the env var or --endpoint)")?;

        let log_dir = args
            .log_dir
            .or(env.log_dir)
            .unwrap_or_else(|| PathBuf::from("logs"));

        Ok(Self {
            graphql_endpoint,
            log_dir,
        })
    }

    pub fn graphql_endpoint(&self) -> &str {
        &self.graphql_endpoint
    }
}

/// Parse the command line and load configuration
pub fn init() -> Result<Config> {
    let args = Args::parse();
    Config::load(args)
}
