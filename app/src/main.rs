//! SCA Cupping Journal - command line interface
//!
//! Thin user surface over the session store and export formatter. All
//! operations are local and synchronous; state lives in a file-backed
//! key-value store under the configured data directory.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sca_cupping_app::config::Config;
use sca_cupping_app::export;
use sca_cupping_app::storage::FileStore;
use sca_cupping_app::store::{self, SessionStore};
use shared::score::compute_total;

#[derive(Parser)]
#[command(name = "sca-cupping")]
#[command(about = "Form-driven scoring journal for SCA cupping sessions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sessions, newest first
    List,

    /// Create a new cupping session
    New {
        /// Session title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Number of cups in the flight (1-30)
        #[arg(short, long, default_value = "5")]
        cups: usize,

        /// Session notes (roaster, location, lot information...)
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Show a session summary with per-cup totals
    Show {
        /// Session id
        id: String,
    },

    /// Mark a session complete
    Finish {
        /// Session id
        id: String,
    },

    /// Delete a session and all its cup scores
    Delete {
        /// Session id
        id: String,
    },

    /// Export a session to a file named cupping-<id>.<format>
    Export {
        /// Session id
        id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },

    /// Import a session from a JSON document
    Import {
        /// Path to the JSON file
        file: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sca_cupping=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    tracing::debug!("Environment: {}", config.environment);

    let mut flag_storage = FileStore::new(&config.storage.dir);
    if store::is_first_launch(&flag_storage)? {
        println!("Welcome! Scores follow the SCA protocol: seven 0-10 attributes,");
        println!("per-cup consistency checks and taint/fault deductions.");
        store::mark_launched(&mut flag_storage)?;
    }

    let storage = FileStore::new(&config.storage.dir);
    let mut sessions = SessionStore::open(storage)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::List => {
            if sessions.sessions().is_empty() {
                println!("No sessions yet. Start your first cupping!");
            }
            for session in sessions.sessions() {
                let title = if session.title.is_empty() {
                    "Untitled Session"
                } else {
                    &session.title
                };
                let state = if session.is_complete {
                    "complete"
                } else {
                    "in progress"
                };
                println!(
                    "{}  {}  {} cups  [{}]  {}",
                    session.id, session.date, session.num_cups, state, title
                );
            }
        }
        Commands::New { title, cups, notes } => {
            let session = sessions.create(title, cups, notes)?;
            println!("Created session {}", session.id);
        }
        Commands::Show { id } => {
            let session = sessions
                .get(&id)
                .ok_or_else(|| anyhow::anyhow!("Session {id} not found"))?;
            let title = if session.title.is_empty() {
                "Untitled Session"
            } else {
                &session.title
            };
            println!("{title}");
            println!("{} - {} cups", session.date, session.num_cups);
            if !session.session_notes.is_empty() {
                println!("{}", session.session_notes);
            }
            for (index, cup) in session.cup_scores.iter().enumerate() {
                let name = if cup.cup_title.is_empty() {
                    format!("Cup #{}", index + 1)
                } else {
                    cup.cup_title.clone()
                };
                println!("  {:<24} {}", name, compute_total(cup));
            }
        }
        Commands::Finish { id } => {
            sessions.finish(&id)?;
            println!("Session {id} marked complete");
        }
        Commands::Delete { id } => {
            sessions.delete(&id)?;
            println!("Session {id} deleted");
        }
        Commands::Export { id, format } => {
            let session = sessions
                .get(&id)
                .ok_or_else(|| anyhow::anyhow!("Session {id} not found"))?;
            let dir = Path::new(&config.export.dir);
            let path = match format {
                ExportFormat::Json => export::write_json(session, dir)?,
                ExportFormat::Csv => export::write_csv(session, dir)?,
            };
            println!("Exported {}", path.display());
        }
        Commands::Import { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let session = sessions.import(&raw)?;
            println!("Imported session {}", session.id);
        }
    }

    Ok(())
}
