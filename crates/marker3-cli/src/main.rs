//! Marker3 CLI - Command-line interface for gesture-driven trail markers
//!
//! This binary validates marker configurations and installs the marker's
//! gesture and toggle layers, expression parameter, and menu toggle into
//! avatar documents.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use marker3_cli::commands;

/// Marker3 - Gesture-Driven Trail Marker Installer
#[derive(Parser)]
#[command(name = "marker3")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a marker configuration
    Validate {
        /// Path to the marker configuration (JSON)
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show what an install would change without writing anything
    Plan {
        /// Path to the marker configuration (JSON)
        #[arg(short, long)]
        config: String,

        /// Path to the avatar document (JSON)
        #[arg(short, long)]
        avatar: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Install the marker into an avatar document
    Install {
        /// Path to the marker configuration (JSON)
        #[arg(short, long)]
        config: String,

        /// Path to the avatar document (JSON)
        #[arg(short, long)]
        avatar: String,

        /// Where to write the updated avatar (default: overwrite --avatar)
        #[arg(short, long)]
        out: Option<String>,

        /// Directory to write the synthesized clips into
        #[arg(long)]
        clips_dir: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List expression menus reachable from the root and their free slots
    Menus {
        /// Path to the avatar document (JSON)
        #[arg(short, long)]
        avatar: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print or write the default marker configuration
    Template {
        /// File to write (default: stdout)
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Plan {
            config,
            avatar,
            json,
        } => commands::plan::run(&config, &avatar, json),
        Commands::Install {
            config,
            avatar,
            out,
            clips_dir,
            json,
        } => commands::install::run(
            &config,
            &avatar,
            out.as_deref(),
            clips_dir.as_deref(),
            json,
        ),
        Commands::Menus { avatar, json } => commands::menus::run(&avatar, json),
        Commands::Template { out } => commands::template::run(out.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
