//! Metric seam for generated-vs-reference scoring

use crate::error::Result;

/// Scores a batch of generated strings against their references.
///
/// Returns one batch-level scalar (e.g. a BLEU score).
pub trait Metric {
    fn score(&self, generated: &[String], references: &[String]) -> Result<f64>;
}

impl<F> Metric for F
where
    F: Fn(&[String], &[String]) -> Result<f64>,
{
    fn score(&self, generated: &[String], references: &[String]) -> Result<f64> {
        self(generated, references)
    }
}
