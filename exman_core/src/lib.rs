//! `exman_core` is the core library for the exman manifest generator. It
//! turns loosely-structured example metadata from a documentation corpus
//! into normalized, deduplicated descriptors — resolved attributes, a
//! cleaned tag set, and a prioritized file-to-open list — and assembles
//! them into manifest documents for an external development-environment
//! browser.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Example records + filter rules (loaded by the caller)
//!   → Attribute resolver (wildcard/prefix/exact rule matching, first-writer-wins)
//!   → Tag derivation (title words + module tokens + meta tags)
//!   → Tag cleanup (stopwords, noise prefixes, short tags)
//!   → File-open prioritizer (ranked open-on-launch list, main file flagged)
//!   → Manifest assembler (one document per non-empty category)
//! ```
//!
//! The engine is a total, deterministic function over its inputs: it
//! performs no file I/O, never fails on malformed metadata, and reports
//! missing expected attributes as advisory [`ManifestDiagnostic`] values
//! rather than errors.
//!
//! ## Key Types
//!
//! - [`ExampleRecord`] — one example as discovered by the external
//!   documentation-comment parser.
//! - [`FilterRule`] — a configured mapping from name patterns to
//!   attributes and tags.
//! - [`ManifestContext`] — the read-only per-run context (module identity,
//!   doc root, install path).
//! - [`ManifestOutput`] — the assembled documents plus advisory
//!   diagnostics.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use exman_core::ExmanConfig;
//! use exman_core::ManifestContext;
//! use exman_core::generate_manifests;
//! use exman_core::parse_records;
//! use exman_core::record_format_for_path;
//!
//! let config = ExmanConfig::load(Path::new(".")).unwrap().unwrap();
//! let records_path = config.records_path();
//! let content = std::fs::read_to_string(&records_path).unwrap();
//! let format = record_format_for_path(&records_path).unwrap();
//! let records = parse_records(&content, format, "examples.json").unwrap();
//!
//! let ctx = ManifestContext::from_config(&config);
//! let output = generate_manifests(&records, &config.filter_rules(), &ctx);
//! for document in &output.documents {
//! 	println!("{}: {} entries", document.category, document.entries.len());
//! }
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use files::*;
pub use filter::*;
pub use record::*;
pub use tags::*;

pub mod config;
mod engine;
mod error;
mod files;
mod filter;
mod record;
pub mod tags;

#[cfg(test)]
mod __fixtures;
