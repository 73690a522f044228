//! Shared test doubles for the extraction tests.

// Each test binary compiles its own copy; not every binary uses every helper.
#![allow(dead_code)]

use pbxflow_core::errors::StoreError;
use pbxflow_extract::client::{Row, SqlRunner};
use pbxflow_extract::probe::SchemaCapabilities;

/// A scripted store: each entry pairs a SQL substring with a canned
/// response. The first matching entry wins; unmatched queries return no
/// rows, which keeps unrelated sub-extractors quiet in focused tests.
pub struct ScriptedRunner {
    scripts: Vec<(&'static str, Response)>,
}

pub enum Response {
    Rows(Vec<Vec<&'static str>>),
    Timeout(u64),
    Fail(&'static str),
}

impl ScriptedRunner {
    pub fn new(scripts: Vec<(&'static str, Response)>) -> Self {
        Self { scripts }
    }
}

impl SqlRunner for ScriptedRunner {
    fn run(&self, sql: &str) -> Result<Vec<Row>, StoreError> {
        for (needle, response) in &self.scripts {
            if sql.contains(needle) {
                return match response {
                    Response::Rows(rows) => Ok(rows
                        .iter()
                        .map(|r| r.iter().map(|s| s.to_string()).collect())
                        .collect()),
                    Response::Timeout(seconds) => Err(StoreError::QueryTimeout {
                        database: "scripted".to_string(),
                        seconds: *seconds,
                    }),
                    Response::Fail(message) => Err(StoreError::QueryFailed {
                        database: "scripted".to_string(),
                        message: message.to_string(),
                    }),
                };
            }
        }
        Ok(Vec::new())
    }
}

/// Capabilities shorthand.
pub fn caps(parts: Vec<(&str, Vec<&str>)>) -> SchemaCapabilities {
    SchemaCapabilities::from_parts(parts)
}

/// A runner with no scripts: every query returns no rows.
pub fn silent_runner() -> ScriptedRunner {
    ScriptedRunner::new(Vec::new())
}
