//! # Core Models Module
//!
//! This module contains the value types exchanged between the aligner-facing I/O layer,
//! the filtering engine and the reporting workflow.
//!
//! ## Overview
//!
//! Every type here is a plain value: constructed fresh for each filtering pass, cheap to
//! clone, and free of backing resources. Collections are ordered vectors because the
//! order in which the aligner reports hits and segments is carried through to the
//! final report.
//!
//! ## Key Components
//!
//! - [`alignment`] - Search results, hits and alignment segments (HSPs) with their coordinates
//! - [`modification`] - Known modification sites decoded from database record titles
//! - [`ptm`] - The catalogue of modification types with a curated site database
//! - [`site`] - Report rows pairing a known site with the segment that matched it
//!
//! ## Usage
//!
//! ```ignore
//! use flams::core::models::modification::ModificationRecord;
//!
//! let record = ModificationRecord::parse("PLMD-7244|P25665|304 Acetylation [Escherichia coli]")?;
//! assert_eq!(record.position(), 304);
//! ```

pub mod alignment;
pub mod modification;
pub mod ptm;
pub mod site;
