use thiserror::Error;

// Unified error type for linform

#[derive(Error, Debug)]
pub enum LinformError {
    #[error("rank mismatch: {0}")]
    RankMismatch(String),
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    #[error("expected {expected} leaf array(s), got {got}")]
    LeafCount { expected: usize, got: usize },
}
