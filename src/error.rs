//! Error types surfaced by the scorer
//!
//! [`SchemaValidator::validate`](crate::scoring::SchemaValidator::validate)
//! only ever returns `SchemaParse`. `Config` comes from
//! [`SchemaValidator::from_config`](crate::scoring::SchemaValidator::from_config)
//! and config file loading. Rule failures are folded into the report and
//! transport failures are logged by the delivery thread.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to parse schema at {line}:{column}: {message}")]
    SchemaParse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("rule [{rule}] failed: {message}")]
    RuleEvaluation { rule: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ScoreError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ScoreError::SchemaParse { .. })
    }
}

pub type ScoreResult<T> = Result<T, ScoreError>;
