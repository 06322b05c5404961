//! Campus records CLI.
//!
//! Provides the `campus` binary. The `shell` subcommand runs the
//! interactive menu over a data directory of per-kind snapshot files:
//! state is loaded (and relinked) at startup and saved as a whole at
//! shutdown. Records skipped over dangling references are reported, never
//! fatal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use campus_storage::{FlatFileStore, SnapshotStore};

mod input;
mod shell;

/// School records and menu shell.
#[derive(Parser)]
#[command(name = "campus", about = "School records and menu shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu shell.
    Shell {
        /// Directory holding the per-kind snapshot files.
        #[arg(short, long, default_value = "./data")]
        data_dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Shell { data_dir } => process::exit(run_shell(data_dir)),
    }
}

/// Execute the shell subcommand.
///
/// Returns exit code: 0 = clean exit, 1 = snapshot load/save failure.
fn run_shell(data_dir: PathBuf) -> i32 {
    let mut store = FlatFileStore::new(data_dir);

    let (mut campus, report) = match store.load_campus() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("Error: failed to load snapshot: {err}");
            return 1;
        }
    };
    tracing::info!(
        data_dir = %store.dir().display(),
        users = campus.users().len(),
        courses = campus.courses().len(),
        "snapshot loaded"
    );
    if !report.is_clean() {
        eprintln!(
            "Warning: skipped {} record(s) while loading:",
            report.skipped.len()
        );
        for skipped in &report.skipped {
            eprintln!("  - {skipped}");
        }
    }

    println!("Welcome to the Campus Records Platform!");
    shell::general_menu(&mut campus);

    match store.save_campus(&campus) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: failed to save snapshot: {err}");
            1
        }
    }
}
