//! # Engine Module
//!
//! This module implements the alignment-result filtering engine: the positional
//! matching algorithm and its application over whole search results.
//!
//! ## Overview
//!
//! The aligner reports every database record that resembles the query, but a
//! resemblance alone says nothing about the residue the user asked about. The engine
//! keeps only the alignment segments in which a record's known modification site
//! lands on, or within a tolerated distance of, the queried residue.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Query position, positional tolerance and e-value cut-off
//! - **Matching** ([`matcher`]) - The per-segment significance, containment and offset checks
//! - **Filtering** ([`filter`]) - Application of the matcher over every hit of a search result
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types and error propagation
//!
//! ## Key Capabilities
//!
//! - **Pure evaluation** over immutable inputs; filtering always builds a new result
//! - **Parallel evaluation** of hits with the `parallel` feature, with deterministic ordering
//! - **Strict title decoding**, so that a database format mismatch is surfaced, not skipped

pub mod config;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod progress;
