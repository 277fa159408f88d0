// src/model/generation.rs
//! Constrained beam search shared by model implementations
//!
//! Models only provide next-token log-probabilities through
//! [`NextTokenScorer`]; length cap, beam width, early stopping and the
//! no-repeat n-gram ban are enforced here.

use std::cmp::Ordering;

use super::config::GenerationConfig;
use crate::error::Result;

/// Next-token scoring for a batch of source rows
pub trait NextTokenScorer {
    /// Returns one vector of vocabulary log-probabilities per prefix.
    /// Every prefix belongs to source row `row`.
    fn next_token_log_probs(&self, row: usize, prefixes: &[Vec<u32>]) -> Result<Vec<Vec<f32>>>;
}

#[derive(Debug, Clone)]
struct Hypothesis {
    tokens: Vec<u32>,
    log_prob: f32,
}

#[derive(Debug, Clone)]
struct Finished {
    tokens: Vec<u32>,
    score: f32,
}

/// Tokens that would repeat an n-gram already present in `prefix`
pub fn banned_tokens(prefix: &[u32], ngram_size: usize) -> Vec<u32> {
    if ngram_size == 0 || prefix.len() + 1 < ngram_size {
        return Vec::new();
    }

    let context = &prefix[prefix.len() + 1 - ngram_size..];
    let mut banned: Vec<u32> = prefix
        .windows(ngram_size)
        .filter(|window| &window[..ngram_size - 1] == context)
        .map(|window| window[ngram_size - 1])
        .collect();

    banned.sort_unstable();
    banned.dedup();
    banned
}

fn normalized_score(log_prob: f32, len: usize, length_penalty: f64) -> f32 {
    log_prob / (len as f64).powf(length_penalty) as f32
}

/// Highest score first; ties go to the earlier beam, then the lower token id
fn by_score_desc(a: &(usize, u32, f32), b: &(usize, u32, f32)) -> Ordering {
    b.2.partial_cmp(&a.2)
        .unwrap_or(Ordering::Equal)
        .then(a.0.cmp(&b.0))
        .then(a.1.cmp(&b.1))
}

/// Runs beam search for `rows` source rows and returns the best sequence per row.
///
/// Every sequence starts with `decoder_start_token_id` and is at most
/// `max_length` tokens long.
pub fn beam_search<S: NextTokenScorer + ?Sized>(
    scorer: &S,
    rows: usize,
    config: &GenerationConfig,
) -> Result<Vec<Vec<u32>>> {
    (0..rows).map(|row| search_row(scorer, row, config)).collect()
}

fn search_row<S: NextTokenScorer + ?Sized>(
    scorer: &S,
    row: usize,
    config: &GenerationConfig,
) -> Result<Vec<u32>> {
    let num_beams = config.num_beams.max(1);
    let mut beams = vec![Hypothesis {
        tokens: vec![config.decoder_start_token_id],
        log_prob: 0.0,
    }];
    let mut finished: Vec<Finished> = Vec::new();
    let keep = 2 * num_beams;
    let mut done = false;

    while !beams.is_empty() && beams[0].tokens.len() < config.max_length {
        let prefixes: Vec<Vec<u32>> = beams.iter().map(|b| b.tokens.clone()).collect();
        let log_probs = scorer.next_token_log_probs(row, &prefixes)?;

        let mut candidates: Vec<(usize, u32, f32)> = Vec::new();
        for (beam_idx, (beam, scores)) in beams.iter().zip(log_probs.iter()).enumerate() {
            let banned = banned_tokens(&beam.tokens, config.no_repeat_ngram_size);
            for (token, &lp) in scores.iter().enumerate() {
                let token = token as u32;
                if !lp.is_finite() || banned.binary_search(&token).is_ok() {
                    continue;
                }
                candidates.push((beam_idx, token, beam.log_prob + lp));
            }
        }

        if candidates.len() > keep {
            candidates.select_nth_unstable_by(keep - 1, by_score_desc);
            candidates.truncate(keep);
        }
        candidates.sort_by(by_score_desc);

        let mut next_beams = Vec::with_capacity(num_beams);
        for (rank, (beam_idx, token, log_prob)) in candidates.into_iter().enumerate() {
            let mut tokens = beams[beam_idx].tokens.clone();
            tokens.push(token);

            if token == config.eos_token_id {
                if rank < num_beams {
                    let score = normalized_score(log_prob, tokens.len(), config.length_penalty);
                    finished.push(Finished { tokens, score });
                }
            } else {
                next_beams.push(Hypothesis { tokens, log_prob });
            }

            if next_beams.len() == num_beams {
                break;
            }
        }
        beams = next_beams;

        if finished.len() >= num_beams {
            if config.early_stopping {
                done = true;
                break;
            }
            // Stop once no live beam can beat the worst kept hypothesis
            finished.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
            finished.truncate(num_beams);
            let worst = finished[num_beams - 1].score;
            let best_live = beams
                .iter()
                .map(|b| normalized_score(b.log_prob, b.tokens.len(), config.length_penalty))
                .fold(f32::NEG_INFINITY, f32::max);
            if best_live <= worst {
                done = true;
                break;
            }
        }
    }

    // Rows cut off by the length cap or an exhausted vocabulary still
    // compete with their live beams
    if !done {
        for beam in beams {
            let score = normalized_score(beam.log_prob, beam.tokens.len(), config.length_penalty);
            finished.push(Finished {
                tokens: beam.tokens,
                score,
            });
        }
    }

    Ok(finished
        .into_iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
        .map(|f| f.tokens)
        .unwrap_or_else(|| vec![config.decoder_start_token_id]))
}
