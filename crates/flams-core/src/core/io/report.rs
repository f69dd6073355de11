use crate::core::models::site::SiteMatch;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize report row: {0}")]
    Csv(#[from] csv::Error),
}

/// Tab-separated report with one row per matching modification site.
pub struct SiteReport;

impl SiteReport {
    /// Writes a header line followed by one line per match, in the given order.
    ///
    /// The header is written even when there are no matches.
    pub fn write_to(matches: &[SiteMatch], writer: impl Write) -> Result<(), ReportError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(HEADER)?;
        for site in matches {
            csv_writer.serialize(site)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(
        matches: &[SiteMatch],
        path: P,
    ) -> Result<(), ReportError> {
        let file = File::create(path)?;
        Self::write_to(matches, BufWriter::new(file))
    }
}

const HEADER: [&str; 13] = [
    "Collection ID",
    "Protein ID",
    "Species",
    "Modification",
    "Site position",
    "Query start",
    "Query end",
    "Subject start",
    "Subject end",
    "E-value",
    "Bit score",
    "Identity (%)",
    "Alignment length",
];
