use crate::core::io::traits::SearchResultFile;
use crate::core::models::alignment::{AlignmentStats, Hit, SearchResult, Segment};
use itertools::Itertools;
use serde::Deserialize;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

/// Output format specifier to hand to `blastp -outfmt` so that its output can
/// be decoded by [`BlastTabular`].
pub const BLAST_OUTFMT: &str =
    "6 qseqid sseqid stitle qstart qend sstart send evalue bitscore pident length";

#[derive(Debug, Error)]
pub enum SearchFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed tabular record: {0}")]
    Csv(#[from] csv::Error),
    #[error(
        "Reverse or empty alignment range on line {line} for subject '{subject}' (query {query_start}-{query_end}, subject {subject_start}-{subject_end})"
    )]
    InvalidRange {
        line: u64,
        subject: String,
        query_start: usize,
        query_end: usize,
        subject_start: usize,
        subject_end: usize,
    },
}

#[derive(Debug, Deserialize)]
struct TabularRow {
    _query_id: String,
    subject_id: String,
    subject_title: String,
    query_start: usize,
    query_end: usize,
    subject_start: usize,
    subject_end: usize,
    evalue: f64,
    bit_score: f64,
    percent_identity: f64,
    alignment_length: usize,
}

impl TabularRow {
    /// Full record title. Depending on how the database was built, `stitle`
    /// may or may not repeat the subject id in front of the description.
    fn title(&self) -> String {
        if self.subject_title.starts_with(&self.subject_id) {
            self.subject_title.clone()
        } else {
            format!("{} {}", self.subject_id, self.subject_title)
        }
    }

    fn into_segment(self) -> Segment {
        Segment::new(
            self.query_start,
            self.query_end,
            self.subject_start,
            self.subject_end,
            self.evalue,
        )
        .with_stats(AlignmentStats {
            bit_score: self.bit_score,
            percent_identity: self.percent_identity,
            alignment_length: self.alignment_length,
        })
    }
}

/// Tab-separated BLAST output in the column layout of [`BLAST_OUTFMT`].
///
/// Consecutive rows that share a subject id form one [`Hit`]; its title is
/// the `stitle` column, prefixed with the subject id when `stitle` lacks it.
pub struct BlastTabular;

impl SearchResultFile for BlastTabular {
    type Error = SearchFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<SearchResult, Self::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .comment(Some(b'#'))
            .quoting(false)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            let row: TabularRow = record.deserialize(None)?;

            if row.query_start > row.query_end || row.subject_start > row.subject_end {
                return Err(SearchFileError::InvalidRange {
                    line,
                    subject: row.subject_id,
                    query_start: row.query_start,
                    query_end: row.query_end,
                    subject_start: row.subject_start,
                    subject_end: row.subject_end,
                });
            }
            rows.push(row);
        }

        let chunks = rows.into_iter().chunk_by(|row| row.subject_id.clone());
        let hits: Vec<Hit> = chunks
            .into_iter()
            .map(|(_, group)| {
                let mut group = group.peekable();
                let title = group.peek().map(TabularRow::title).unwrap_or_default();
                Hit::new(title, group.map(TabularRow::into_segment).collect())
            })
            .collect();

        debug!(
            "Decoded {} hit(s) with {} segment(s) from tabular output.",
            hits.len(),
            hits.iter().map(|h| h.segments.len()).sum::<usize>()
        );
        Ok(SearchResult::new(hits))
    }
}
