use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "feedfinder")]
#[command(about = "Discover RSS/Atom feed URLs declared by a blog page", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $FEEDFINDER_CONFIG or config/feedfinder.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Server(ServerArgs),
    /// Discover feeds for a single blog URL and print them as JSON
    Discover(DiscoverArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (overrides server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}

#[derive(clap::Args, Debug)]
pub struct DiscoverArgs {
    /// Blog page URL
    pub blog_url: String,
}
