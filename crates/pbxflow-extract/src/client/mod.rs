//! Store access via an external command-line SQL client.
//!
//! No in-process database driver: locked-down PBX hosts often cannot take
//! new native libraries, but always ship the client binary. Each logical
//! query spawns one short-lived process.

pub mod mysql_cli;
pub mod rows;

pub use mysql_cli::MysqlCliClient;

use pbxflow_core::errors::StoreError;

/// A row returned by the store: ordered field values, NULLs as empty strings.
pub type Row = Vec<String>;

/// Executes one SQL query against the configuration store.
///
/// Implementations must be shareable across extraction worker threads.
pub trait SqlRunner: Send + Sync {
    /// Run one query, returning all result rows.
    fn run(&self, sql: &str) -> Result<Vec<Row>, StoreError>;
}
