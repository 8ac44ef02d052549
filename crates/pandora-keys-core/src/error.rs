//! Error types for the pandora-keys-core library.
//!
//! This module provides error handling using the `thiserror` crate, with one
//! variant per failure mode of a generator run.

use crate::keys::KeyName;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pandora-keys operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all pandora-keys operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input path does not name a regular file
    #[error("{} is not a file", .path.display())]
    NotAFile {
        /// The offending path
        path: PathBuf,
    },

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output directory
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        /// Path to the directory that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The tool was not started from the project's root directory
    #[error("Please run this from the project's root directory (invoked as '{invoked_as}')")]
    WrongWorkingDirectory {
        /// The invocation path that failed the check
        invoked_as: String,
    },

    /// Fewer than all four keys were collected
    #[error("Did not get all {} keys needed.  Only saw: {}", crate::REQUIRED_KEYS, format_names(.found))]
    IncompleteKeys {
        /// Keys that were collected
        found: Vec<KeyName>,
    },
}

fn format_names(names: &[KeyName]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

impl Error {
    /// Creates a new not-a-file error
    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory creation error
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new wrong working directory error
    pub fn wrong_working_directory(invoked_as: impl Into<String>) -> Self {
        Self::WrongWorkingDirectory {
            invoked_as: invoked_as.into(),
        }
    }

    /// Creates a new incomplete keys error
    pub fn incomplete_keys(found: impl IntoIterator<Item = KeyName>) -> Self {
        Self::IncompleteKeys {
            found: found.into_iter().collect(),
        }
    }

    /// Returns true if this error should be reported as a warning only
    ///
    /// An incomplete extraction skips the write but is not a failed run.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::IncompleteKeys { .. })
    }
}
