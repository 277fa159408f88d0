//! comment-eval: evaluation loop for sequence-to-sequence comment generators

pub mod backend;
pub mod commands;
pub mod data;
pub mod distributed;
pub mod error;
pub mod helpers;
pub mod logger;
pub mod model;
pub mod tokenizer;

// Main re-exports
pub use data::{Batch, DataLoader, DatasetConfig, IntoBatch, Seq2SeqDataset, Seq2SeqExample};
pub use distributed::{Coordinator, SingleProcess};
pub use error::{EvalError, Result};
pub use logger::MetricsCsv;
pub use model::{
    beam_search, EvalConfig, EvalResult, Evaluator, GenerationConfig, Metric, NextTokenScorer,
    NoGradScope, Seq2SeqModel,
};
pub use tokenizer::{BatchDecode, DecodeOptions, Vocab, VocabDecoder};
