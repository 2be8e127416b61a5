//! Graph-based structural analyzers
//!
//! - [`cycles`]: cycle detection over the type-reference graph
//! - [`blast_radius`]: null propagation over the field nullability graph

pub mod blast_radius;
pub mod cycles;

pub use blast_radius::{BlastRadiusAnalysis, BlastRadiusConfig, BlastRadiusResult};
pub use cycles::{Cycle, CycleReport, CycleSummary};
