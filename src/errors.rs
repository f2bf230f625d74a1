//src/errors.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for corpus preprocessing and cluster splitting failures.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Every category directory resolved to zero FASTA files.
    #[error("found zero fasta files; check folder names and fasta locations")]
    NoFastaFiles,

    /// The label index header row lacks a required column.
    #[error("{}: missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A row in a tab-separated input could not be parsed.
    #[error("{}:{line}: {details}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        details: String,
    },
}
