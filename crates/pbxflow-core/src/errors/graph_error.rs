//! Graph-build errors.

use super::error_code::{self, FlowErrorCode};

/// Errors raised while building a call-flow graph.
///
/// "Found but undecodable" is not an error: a route whose destination
/// decodes to `Unknown` still yields a two-node graph. Only a DID with no
/// matching inbound route at all is reported here.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("No inbound route matches DID {did}")]
    EntryPointNotFound { did: String },
}

impl FlowErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EntryPointNotFound { .. } => error_code::GRAPH_ENTRY_NOT_FOUND,
        }
    }
}
