//! Schema structural-health scoring
//!
//! # Scoring Formula
//!
//! ```text
//! weighted = Σ weight × violations^1.5     (rules with violations > 0)
//! score    = 100 × (1 - weighted / totalFields)
//! ```
//!
//! The exponent makes a rule with many violations cost more than the same
//! number spread across rules. The score is not clamped: a dense enough
//! schema scores below zero, and a schema without fields has no defined
//! score (NaN, serialized as `null`).
//!
//! # Example
//!
//! 40 fields, 4 PII violations (weight 10) and 1 cycle (weight 15):
//!
//! ```text
//! weighted = 10 × 4^1.5 + 15 × 1^1.5 = 80 + 15 = 95
//! score    = 100 × (1 - 95 / 40) = -137.5
//! ```

mod validator;

pub use validator::{DeliveryHandle, SchemaValidator, ValidateOptions, Validation};

/// Contribution of one rule to the weighted violation total
pub fn weighted_contribution(weight: f64, violations: usize) -> f64 {
    if violations == 0 {
        return 0.0;
    }
    weight * (violations as f64).powf(1.5)
}

/// Final score from the field count and weighted violation total
pub fn compute_score(total_fields: usize, total_weighted_violations: f64) -> f64 {
    100.0 * (1.0 - total_weighted_violations / total_fields as f64)
}
