mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use feedfinder::api::{self, models::DiscoverResponse};
use feedfinder::config::Config;
use feedfinder::discovery::{Discoverer, FeedExtractor, HttpPageSource};
use tracing_subscriber::EnvFilter;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<ExitCode, AnyError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Server(args) => api::run(config, args.address).await?,
        Commands::Discover(args) => return discover_once(config, &args.blog_url).await,
    }

    Ok(ExitCode::SUCCESS)
}

async fn discover_once(config: Config, blog_url: &str) -> Result<ExitCode, AnyError> {
    let source = HttpPageSource::new(&config.fetch)?;
    let discoverer = Discoverer::new(Arc::new(source), FeedExtractor::new(&config.discovery));

    match discoverer.discover(Some(blog_url)).await {
        Ok(feed_urls) => {
            let output = serde_json::to_string_pretty(&DiscoverResponse { feed_urls })?;
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{} Error: {}", err.status_code().as_u16(), err);
            Ok(ExitCode::FAILURE)
        }
    }
}
