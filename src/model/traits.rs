//! Seq2SeqModel trait: interface the Evaluator drives
//!
//! Any encoder-decoder model (Burn module or otherwise) can be evaluated
//! once it exposes a loss forward pass and generation.

use burn::tensor::{backend::Backend, Int, Tensor};

use super::config::GenerationConfig;
use crate::error::Result;

/// Trait that every evaluated sequence-to-sequence model implements.
pub trait Seq2SeqModel<B: Backend> {
    /// Loss forward pass.
    /// Inputs: `[batch_size, src_len]` ids and mask, `[batch_size, tgt_len]` target ids.
    /// Output: per-example (or single-element) loss values.
    fn forward_loss(
        &self,
        source_ids: Tensor<B, 2, Int>,
        source_mask: Tensor<B, 2, Int>,
        target_ids: Tensor<B, 2, Int>,
    ) -> Result<Tensor<B, 1>>;

    /// Generates one token sequence per source row.
    ///
    /// Implementations honour `max_length`, `num_beams`, `early_stopping` and
    /// `no_repeat_ngram_size`; [`super::generation::beam_search`] does this for them.
    fn generate(
        &self,
        source_ids: Tensor<B, 2, Int>,
        source_mask: Tensor<B, 2, Int>,
        config: &GenerationConfig,
    ) -> Result<Vec<Vec<u32>>>;

    /// Switches training-only behaviour (dropout) on or off.
    fn set_training(&mut self, _training: bool) {}

    /// Enables or disables gradient tracking and returns the previous state.
    ///
    /// Models on inference-only backends never track gradients.
    fn set_grad_enabled(&mut self, _enabled: bool) -> bool {
        false
    }
}
