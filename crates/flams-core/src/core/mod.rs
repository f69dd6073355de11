//! # Core Module
//!
//! This module provides the data model and file formats that the filtering engine
//! operates on.
//!
//! ## Overview
//!
//! The core module knows nothing about filtering policy. It defines what a search
//! result, a hit, an alignment segment and a known modification site are, and how to
//! move them in and out of the files exchanged with BLAST+ and with users.
//!
//! ## Architecture
//!
//! - **Data Model** ([`models`]) - Search results, segments, modification records and types
//! - **File I/O** ([`io`]) - BLAST tabular output, query FASTA files and TSV reports

pub mod io;
pub mod models;
