use bio::io::fasta;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Input contains no FASTA record")]
    Empty,
    #[error("Expected the first record to start with a '>' header")]
    MissingHeader,
    #[error("Record '{id}' has an empty sequence")]
    EmptySequence { id: String },
}

/// A single protein sequence read from a FASTA file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinSequence {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl ProteinSequence {
    /// Reads the first record of a FASTA stream; later records are ignored.
    ///
    /// Residues are uppercased and whitespace inside sequence lines is dropped.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, FastaError> {
        match reader.fill_buf()?.first() {
            None => return Err(FastaError::Empty),
            Some(&b'>') => {}
            Some(_) => return Err(FastaError::MissingHeader),
        }

        let record = fasta::Reader::new(reader)
            .records()
            .next()
            .ok_or(FastaError::Empty)??;

        let id = record.id().to_string();
        let description = record.desc().map(str::trim).unwrap_or_default().to_string();
        let sequence: String = record
            .seq()
            .iter()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|&b| b.to_ascii_uppercase() as char)
            .collect();

        if sequence.is_empty() {
            return Err(FastaError::EmptySequence { id });
        }

        Ok(Self {
            id,
            description,
            sequence,
        })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, FastaError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the residue at a 1-based position.
    pub fn residue_at(&self, position: usize) -> Option<char> {
        position
            .checked_sub(1)
            .and_then(|idx| self.sequence.as_bytes().get(idx))
            .map(|&b| b as char)
    }
}
