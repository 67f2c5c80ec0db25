//! Recording query command line interface.
//!
//! # Commands
//!
//! - `recq info` - Frame-by-frame dump of a recording
//! - `recq collisions` - Collision pairs filtered by actor category
//! - `recq blocked` - Actors stuck in place beyond a time threshold
//! - `recq list` - List recordings in the recordings directory

mod list;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use rec_query::{query_blocked, query_collisions, query_info, QueryConfig, TextEncoding};

/// recq - simulation recording queries
///
/// Reads binary recording files produced by the simulator and renders
/// textual reports.
#[derive(Parser)]
#[command(name = "recq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding the recording files
    #[arg(long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Decode length-prefixed text as UTF-16LE (historical recordings)
    #[arg(long, global = true)]
    utf16: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Frame-by-frame dump of a recording
    ///
    /// Actor life-cycle events, parenting and collisions are always shown;
    /// --all renders every packet kind.
    Info {
        /// Recording name, resolved under --dir (".log" appended if bare)
        recording: String,

        /// Show every packet kind, not only life-cycle events
        #[arg(long)]
        all: bool,
    },

    /// Collision pairs filtered by actor category
    ///
    /// Categories: o=other, v=vehicle, w=walker, t=trafficLight, h=hero,
    /// a=any. A pair is reported once at collision onset.
    Collisions {
        /// Recording name, resolved under --dir (".log" appended if bare)
        recording: String,

        /// Category filter for the first actor
        #[arg(long, default_value_t = 'a')]
        actor1: char,

        /// Category filter for the second actor
        #[arg(long, default_value_t = 'a')]
        actor2: char,
    },

    /// Actors that stayed within a radius for a minimum duration
    Blocked {
        /// Recording name, resolved under --dir (".log" appended if bare)
        recording: String,

        /// Minimum stall duration in seconds before an actor is reported
        #[arg(long, default_value_t = 30.0)]
        min_time: f64,

        /// Displacement below which an actor counts as not moving
        #[arg(long, default_value_t = 10.0)]
        min_distance: f64,
    },

    /// List recordings in the recordings directory
    List {
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let cfg = QueryConfig {
        recordings_dir: cli.dir.clone(),
        encoding: if cli.utf16 {
            TextEncoding::Utf16Le
        } else {
            TextEncoding::Utf8
        },
    };

    match cli.command {
        Commands::Info { recording, all } => {
            print!("{}", query_info(&cfg, &recording, all));
        }
        Commands::Collisions {
            recording,
            actor1,
            actor2,
        } => {
            print!("{}", query_collisions(&cfg, &recording, actor1, actor2));
        }
        Commands::Blocked {
            recording,
            min_time,
            min_distance,
        } => {
            print!("{}", query_blocked(&cfg, &recording, min_time, min_distance));
        }
        Commands::List { format } => {
            let format: list::ListFormat = format
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}", e))?;
            print!("{}", list::run(&cli.dir, format)?);
        }
    }

    Ok(())
}
