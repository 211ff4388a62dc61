//! bikeparking CLI - tooling for the community bike parking map.
//!
//! The authoritative dataset is a single GeoJSON `FeatureCollection`
//! (`bikeparking.geojson`) kept under version control. This crate provides
//! the two operations that maintain it:
//!
//! - `merge`: combine the curated base layer with a photo-derived partial
//!   layer into one collection.
//! - `sync`: pull the export from the hosted map editor, validate it, and
//!   commit + push it when it changed.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`geojson`] - Feature collection parsing and merging
//! - [`fetch`] - Authenticated export download and validation
//! - [`git`] - Capability wrapper over the `git` binary
//! - [`sync`] - The fetch -> validate -> replace -> commit pipeline
//! - [`config`] - Environment configuration
//! - [`error`] - Error types and exit codes

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod geojson;
pub mod git;
pub mod sync;

pub use error::{Error, Result};
