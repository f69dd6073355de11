use crate::core::models::alignment::SearchResult;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for decoding the output of an external aligner.
///
/// Implementors turn one aligner invocation's output into a [`SearchResult`],
/// preserving the order in which hits and segments were reported.
pub trait SearchResultFile {
    /// The error type for decoding operations.
    type Error: Error + From<io::Error>;

    /// Reads a search result from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<SearchResult, Self::Error>;

    /// Reads a search result from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoding fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<SearchResult, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
