//! File-backed persistence for the tracked trophy list.
//!
//! The list is stored as JSON under the fixed `tracked-trophies` key. Reads
//! fall back to an empty log whenever the file is missing or unparseable;
//! only writes surface errors.

use std::{error::Error, fmt, fs, io, path::PathBuf};

use raid_roller_system_trophies::{SavedTrophies, TrophyLog};

/// File-backed store holding the tracked trophy list.
#[derive(Clone, Debug)]
pub(crate) struct TrophyStore {
    path: PathBuf,
}

impl TrophyStore {
    /// Creates a store backed by the provided file path.
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the tracked set, falling back to empty when the file is missing
    /// or does not parse.
    pub(crate) fn load(&self) -> TrophyLog {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return TrophyLog::new(),
            Err(error) => {
                tracing::warn!("could not read trophy log, starting empty: {error}");
                return TrophyLog::new();
            }
        };
        decode(&contents)
    }

    /// Rewrites the stored list with the current tracked set.
    pub(crate) fn save(&self, log: &TrophyLog) -> Result<(), TrophyStoreError> {
        fs::write(&self.path, encode(log)).map_err(TrophyStoreError::Io)
    }
}

fn decode(contents: &str) -> TrophyLog {
    match serde_json::from_str::<SavedTrophies>(contents) {
        Ok(saved) => TrophyLog::from_saved(saved),
        Err(error) => {
            tracing::warn!("trophy log was not parseable, starting empty: {error}");
            TrophyLog::new()
        }
    }
}

fn encode(log: &TrophyLog) -> String {
    serde_json::to_string_pretty(&log.to_saved())
        .expect("saved trophies serialization never fails")
}

/// Errors that can occur while persisting the trophy log.
#[derive(Debug)]
pub(crate) enum TrophyStoreError {
    /// The underlying file write failed.
    Io(io::Error),
}

impl fmt::Display for TrophyStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "could not write trophy log: {error}"),
        }
    }
}

impl Error for TrophyStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
        }
    }
}
