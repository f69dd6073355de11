//! Provides input/output functionality for the files exchanged with BLAST+ and users.
//!
//! This module decodes the tabular output of `blastp` into search results, reads the
//! query protein from FASTA, and writes the final report of matching modification
//! sites as tab-separated text.

pub mod fasta;
pub mod report;
pub mod tabular;
pub mod traits;
