use crate::Result;
use crate::app::{NoteStore, SystemClock, Theme, ViewState};
use crate::backends::{FilesystemBackend, MemoryBackend, SqliteBackend};
use crate::KeyValueStore;

use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Display theme to start in
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    theme: Theme,
    #[command(subcommand)]
    backend: Backend,
}

#[derive(Subcommand, Debug)]
enum Backend {
    /// Keep notes for this session only
    Memory,
    /// Store notes as JSON in a directory
    Filesystem {
        #[arg(short, long, env = "JOTTERS_PATH")]
        path: String,
    },
    /// Store notes in an SQLite database file
    Sqlite {
        #[arg(short, long, env = "JOTTERS_PATH")]
        path: String,
    },
}

/// Parses command-line arguments, opens the chosen backend and hydrates a `NoteStore` from it.
///
/// # Returns
///
/// The hydrated `NoteStore` and the initial `ViewState`.
///
/// # Errors
///
/// Opening the backend may fail (directory cannot be created, database cannot be opened).
/// Those errors are forwarded. A backend holding no or malformed notes is not an error.
pub fn handle_args() -> Result<(NoteStore, ViewState)> {
    let args = Args::parse();

    // Allow any struct that implements KeyValueStore, and store on heap because size is unknown at compile time
    let backend: Box<dyn KeyValueStore> = match args.backend {
        Backend::Memory => Box::new(MemoryBackend::new()),
        Backend::Filesystem { path } => Box::new(FilesystemBackend::new(&path)?),
        Backend::Sqlite { path } => Box::new(SqliteBackend::new(&path)?),
    };
    info!("Starting in {} mode", args.theme);

    Ok((
        NoteStore::open(backend, Box::new(SystemClock)),
        ViewState::new(args.theme),
    ))
}
