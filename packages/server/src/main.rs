#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the tree census dashboard server.

use std::path::PathBuf;

use clap::Parser;
use tree_census_server::ServerConfig;
use tree_census_server::config::{DEFAULT_BIND_ADDR, DEFAULT_PORT, DEFAULT_STATIC_DIR};

#[derive(Parser)]
#[command(
    name = "tree_census_server",
    about = "NYC street tree census dashboard server"
)]
struct Cli {
    /// Census CSV to load (`.csv` or `.csv.gz`)
    #[arg(long, env = "TREE_CENSUS_CSV", required_unless_present = "interactive")]
    data: Option<PathBuf>,
    /// Address to bind
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: String,
    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Directory containing the built frontend
    #[arg(long, env = "TREE_CENSUS_STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    static_dir: PathBuf,
    /// Prompt for settings before starting
    #[arg(long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let config = ServerConfig {
        data_path: cli.data.unwrap_or_default(),
        bind_addr: cli.bind_addr,
        port: cli.port,
        static_dir: cli.static_dir,
    };

    let config = if cli.interactive {
        let Some(config) = tree_census_server::interactive::prompt(config) else {
            println!("Cancelled.");
            return Ok(());
        };
        config
    } else {
        config
    };

    tree_census_server::run_server(config).await
}
