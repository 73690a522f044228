//! pbxflow-extract: schema-adaptive extraction engine.
//!
//! Turns a live configuration store into one normalized [`Snapshot`],
//! tolerating table/column drift across deployed schema revisions:
//! - Client: one short-lived external `mysql` process per logical query
//! - Prober: discovers which tables and columns this installation has
//! - Sub-extractors: one per snapshot collection, each independently
//!   resilient (absent table means empty result, never an error)
//! - Pipeline: assembles the snapshot and the extraction warnings
//!
//! [`Snapshot`]: pbxflow_core::Snapshot

pub mod client;
pub mod extractors;
pub mod pipeline;
pub mod probe;
pub mod report;

pub use client::{MysqlCliClient, SqlRunner};
pub use pipeline::{extract_snapshot, extract_to_path};
pub use probe::SchemaCapabilities;
pub use report::{ExtractReport, ExtractWarning, Extraction};
