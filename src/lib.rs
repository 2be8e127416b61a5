//! schema-scorer - structural health scoring for GraphQL schemas
//!
//! A schema is parsed once, projected into a type reference graph and a
//! field nullability graph, and checked by a fixed battery of weighted
//! rules. The result is a single score plus per-rule detail.
//!
//! ```ignore
//! use schema_scorer::scoring::{SchemaValidator, ValidateOptions};
//!
//! let validation = SchemaValidator::new().validate(sdl, &ValidateOptions::default())?;
//! println!("{:.1}", validation.report.score);
//! ```

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod parsers;
pub mod reporters;
pub mod rules;
pub mod scoring;

pub use error::{ScoreError, ScoreResult};
pub use models::SchemaReport;
pub use scoring::{SchemaValidator, ValidateOptions};
