//! # stockchart CLI

use std::path::PathBuf;

use clap::Parser;

use crate::cli::Commands;

mod cli;

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        global = true,
        short = 'C',
        long = "config",
        help = "Path of the configuration file, the default is in the user config directory"
    )]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    stockchart::init(cli.config);

    match &cli.command {
        Commands::Config(cmd) => {
            cmd.exec().await;
        }
        Commands::Render(cmd) => {
            cmd.exec().await;
        }
        Commands::Show(cmd) => {
            cmd.exec().await;
        }
        Commands::View(cmd) => {
            cmd.exec().await;
        }
    }
}
