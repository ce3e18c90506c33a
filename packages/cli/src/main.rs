mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{move_nodes, names, set_name, MoveArgs, NamesArgs, SetNameArgs};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Rearrange - cut, reorder and paste named elements of markup documents
#[derive(Parser, Debug)]
#[command(name = "rearrange")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: ./rearrange.config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Choose the attribute that names elements of one type
    SetName(SetNameArgs),

    /// List the names a move would offer
    Names(NamesArgs),

    /// Cut named elements and paste them elsewhere
    Move(MoveArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();
    let config_path = Config::resolve_path(&cwd, cli.config.as_deref());

    match cli.command {
        Command::SetName(args) => set_name(args, &config_path),
        Command::Names(args) => names(args, &config_path),
        Command::Move(args) => move_nodes(args, &config_path),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
