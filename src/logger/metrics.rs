// src/logger/metrics.rs
//! CSV record of evaluation results

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{EvalError, Result};
use crate::model::EvalResult;

const FILE_NAME: &str = "eval_results.csv";
const HEADER: &str = "step,eval_loss,eval_perplexity,eval_bleu_score";

/// Evaluation metrics CSV for later analysis
pub struct MetricsCsv {
    file: File,
    path: PathBuf,
}

impl MetricsCsv {
    /// Creates a fresh CSV (header included) inside `output_dir`
    pub fn new(output_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(output_dir).map_err(|source| EvalError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        let path = output_dir.join(FILE_NAME);
        let mut file = File::create(&path).map_err(|source| EvalError::FileWrite {
            path: path.clone(),
            source,
        })?;

        writeln!(file, "{}", HEADER)?;

        Ok(Self { file, path })
    }

    /// Opens an existing CSV for append, writing the header if it is new
    pub fn open_append(output_dir: &Path) -> Result<Self> {
        let path = output_dir.join(FILE_NAME);
        let is_new = !path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| EvalError::FileWrite {
                path: path.clone(),
                source,
            })?;

        if is_new {
            writeln!(file, "{}", HEADER)?;
        }

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one evaluation row
    pub fn record(&mut self, step: usize, result: &EvalResult) -> Result<()> {
        writeln!(
            self.file,
            "{},{:.6},{:.4},{:.6}",
            step,
            result.eval_loss,
            result.perplexity(),
            result.eval_bleu_score
        )?;
        self.file.flush()?;
        Ok(())
    }
}
