//! # FLAMS Core Library
//!
//! Finds known post-translational modification sites that correspond to a residue of
//! interest in a query protein, by filtering BLAST hits against curated site databases.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Value types for search results, segments and
//!   modification records, and the file formats exchanged with BLAST+ and users.
//!
//! - **[`engine`]: The Logic Core.** The positional matching algorithm that maps the
//!   queried residue and each known site into the local frame of an alignment segment,
//!   and the filter that applies it over a whole search result.
//!
//! - **[`workflows`]: The Public API.** Ties the layers together: filters the results of
//!   several modification databases and produces the report rows.
//!
//! Running the aligner itself is left to the caller; the library only consumes its output.

pub mod core;
pub mod engine;
pub mod workflows;
