// src/model/config.rs
//! Evaluation and generation settings

use std::path::{Path, PathBuf};

use burn::config::Config;

use crate::error::EvalError;

/// Decoding settings used when the evaluator asks the model to generate
#[derive(Config, Debug)]
pub struct GenerationConfig {
    /// Upper bound on generated length, decoder start token included
    #[config(default = "512")]
    pub max_length: usize,

    #[config(default = "4")]
    pub num_beams: usize,

    /// Finish a row as soon as `num_beams` hypotheses reached EOS
    #[config(default = "true")]
    pub early_stopping: bool,

    /// An n-gram of this size never appears twice in one output (0 disables)
    #[config(default = "2")]
    pub no_repeat_ngram_size: usize,

    #[config(default = "1.0")]
    pub length_penalty: f64,

    #[config(default = "0")]
    pub decoder_start_token_id: u32,

    #[config(default = "2")]
    pub eos_token_id: u32,

    #[config(default = "1")]
    pub pad_token_id: u32,
}

#[derive(Config, Debug)]
pub struct EvalConfig {
    pub output_dir: String,

    #[config(default = "16")]
    pub eval_batch_size: usize,

    #[config(default = "GenerationConfig::new()")]
    pub generation: GenerationConfig,
}

impl EvalConfig {
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let config = Self::load(path).map_err(|e| EvalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        self.save(path).map_err(|source| EvalError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.eval_batch_size == 0 {
            return Err(EvalError::Config("eval_batch_size must be > 0".into()));
        }
        if self.generation.num_beams == 0 {
            return Err(EvalError::Config("num_beams must be > 0".into()));
        }
        if self.generation.max_length < 2 {
            return Err(EvalError::Config("max_length must be >= 2".into()));
        }
        Ok(())
    }
}
