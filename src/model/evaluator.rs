//! Evaluation loop: loss, generation, decoding and metric over a validation set

use burn::tensor::{backend::Backend, ElementConversion};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::metric::Metric;
use super::scope::NoGradScope;
use super::traits::Seq2SeqModel;
use super::EvalConfig;
use crate::data::{Batch, IntoBatch};
use crate::distributed::Coordinator;
use crate::error::{EvalError, Result};
use crate::helpers::tensor_rows;
use crate::tokenizer::{BatchDecode, DecodeOptions};

/// Evaluation summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalResult {
    /// Mean over batches of the mean batch loss; NaN when no batch was seen
    pub eval_loss: f64,
    pub eval_bleu_score: f64,
}

impl EvalResult {
    pub fn perplexity(&self) -> f64 {
        self.eval_loss.exp()
    }
}

impl std::fmt::Display for EvalResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Loss: {:.4} | PPL: {:.2} | BLEU: {:.4}",
            self.eval_loss,
            self.perplexity(),
            self.eval_bleu_score
        )
    }
}

/// Model evaluator
pub struct Evaluator<'a, B: Backend> {
    config: &'a EvalConfig,
    device: B::Device,
    coordinator: Option<&'a dyn Coordinator<B>>,
}

impl<'a, B: Backend> Evaluator<'a, B> {
    pub fn new(config: &'a EvalConfig, device: B::Device) -> Self {
        Self {
            config,
            device,
            coordinator: None,
        }
    }

    pub fn with_coordinator(mut self, coordinator: &'a dyn Coordinator<B>) -> Self {
        self.coordinator = Some(coordinator);
        self
    }

    /// Runs the model over every batch and aggregates loss and metric.
    ///
    /// The first error from the filesystem or any collaborator is returned
    /// as is; no partial result is produced.
    pub fn evaluate<M, I, T, S>(
        &self,
        model: &mut M,
        batches: I,
        tokenizer: &T,
        metric: &S,
    ) -> Result<EvalResult>
    where
        M: Seq2SeqModel<B>,
        I: IntoIterator,
        I::Item: IntoBatch<B>,
        I::IntoIter: ExactSizeIterator,
        T: BatchDecode + ?Sized,
        S: Metric + ?Sized,
    {
        let output_dir = self.config.output_path();
        std::fs::create_dir_all(&output_dir).map_err(|source| EvalError::CreateOutputDir {
            path: output_dir.clone(),
            source,
        })?;

        let batches = batches.into_iter();
        let batch_size = self.config.eval_batch_size;

        if self.coordinator.is_some_and(|c| c.is_main_process()) {
            info!("***** Running evaluation *****");
            info!("  Num examples = {}", batches.len() * batch_size);
            info!("  Batch size = {}", batch_size);
        }
        let progress_bar = self
            .coordinator
            .is_some_and(|c| c.is_local_main_process())
            .then(|| ProgressBar::new(batches.len() as u64));

        model.set_training(false);

        let decode_options = DecodeOptions::for_scoring();
        let mut eval_loss = 0.0f64;
        let mut nb_eval_steps = 0usize;
        let mut all_bleu_score: Vec<f64> = Vec::new();

        for batch in batches {
            let Batch {
                source_ids,
                source_mask,
                target_ids,
            } = batch.into_batch()?.to_device(&self.device);

            {
                let scope = NoGradScope::<B, M>::enter(&mut *model);

                let mut loss = scope.forward_loss(
                    source_ids.clone(),
                    source_mask.clone(),
                    target_ids.clone(),
                )?;
                if let Some(coordinator) = self.coordinator {
                    loss = coordinator.gather(loss)?;
                }
                let batch_loss: f64 = loss.mean().into_scalar().elem();
                eval_loss += batch_loss;

                let generated_ids =
                    scope.generate(source_ids, source_mask, &self.config.generation)?;

                let generated = tokenizer.batch_decode(&generated_ids, &decode_options)?;
                let references =
                    tokenizer.batch_decode(&tensor_rows(target_ids)?, &decode_options)?;

                let bleu_score = metric.score(&generated, &references)?;
                all_bleu_score.push(bleu_score);

                if let Some(progress_bar) = &progress_bar {
                    progress_bar.inc(1);
                    debug!(
                        step = nb_eval_steps + 1,
                        loss = batch_loss,
                        bleu = bleu_score,
                        "Evaluating"
                    );
                }
            }
            nb_eval_steps += 1;
        }
        if let Some(progress_bar) = progress_bar {
            progress_bar.finish();
        }

        let eval_bleu_score = if all_bleu_score.is_empty() {
            0.0
        } else {
            all_bleu_score.iter().sum::<f64>() / all_bleu_score.len() as f64
        };

        let eval_loss = if nb_eval_steps == 0 {
            warn!("evaluation set produced no batches; eval_loss is NaN");
            f64::NAN
        } else {
            eval_loss / nb_eval_steps as f64
        };

        Ok(EvalResult {
            eval_loss,
            eval_bleu_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_with_fixed_keys() {
        let result = EvalResult {
            eval_loss: 1.0,
            eval_bleu_score: 0.7,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["eval_loss"], 1.0);
        assert_eq!(json["eval_bleu_score"], 0.7);
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_perplexity_is_exp_loss() {
        let result = EvalResult {
            eval_loss: 0.0,
            eval_bleu_score: 0.0,
        };
        assert!((result.perplexity() - 1.0).abs() < 1e-12);
    }
}
