mod config;
mod evaluator;
mod generation;
mod metric;
mod scope;
mod traits;

pub use config::{EvalConfig, GenerationConfig};
pub use evaluator::{EvalResult, Evaluator};
pub use generation::{banned_tokens, beam_search, NextTokenScorer};
pub use metric::Metric;
pub use scope::NoGradScope;
pub use traits::Seq2SeqModel;
