//! # Workflows Module
//!
//! This module provides the high-level entry points that turn raw search results into
//! reportable modification sites.
//!
//! ## Overview
//!
//! A run searches the query against one site database per requested modification
//! type. The workflows here take the decoded search results of all those databases,
//! filter them with a single configuration, and produce the rows of the final report.
//!
//! - **Annotation Workflow** ([`annotate`]) - Filtering across modification databases and
//!   flattening of retained segments into [`SiteMatch`](crate::core::models::site::SiteMatch) rows.

pub mod annotate;
