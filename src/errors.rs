use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures raised while reading or writing the settings file.
///
/// Read-side failures distinguish an unreadable file from a present but
/// unparseable one: the latter must reach the user instead of being
/// papered over with defaults.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not read settings file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file `{}` is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not write settings file `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
