// src/data/dataset.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use burn::config::Config;
use burn::tensor::{backend::Backend, Int, Tensor};
use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::helpers::create_batch_tensor;

#[derive(Config, Debug)]
pub struct DatasetConfig {
    #[config(default = "256")]
    pub max_source_length: usize,

    #[config(default = "128")]
    pub max_target_length: usize,

    #[config(default = "1")]
    pub pad_token_id: u32,
}

/// One pre-tokenized (code, comment) pair
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Seq2SeqExample {
    pub source_ids: Vec<u32>,
    pub target_ids: Vec<u32>,
}

/// Example padded to the dataset's fixed shapes
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedExample {
    pub source_ids: Vec<u32>,
    pub source_mask: Vec<u32>,
    pub target_ids: Vec<u32>,
}

/// In-memory evaluation set
#[derive(Debug)]
pub struct Seq2SeqDataset {
    examples: Vec<Seq2SeqExample>,
    config: DatasetConfig,
}

impl Seq2SeqDataset {
    pub fn new(examples: Vec<Seq2SeqExample>, config: DatasetConfig) -> Self {
        Self { examples, config }
    }

    /// Reads one JSON example per non-empty line
    pub fn from_jsonl(path: &Path, config: DatasetConfig) -> crate::error::Result<Self> {
        let file = File::open(path).map_err(|source| EvalError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut examples = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let example: Seq2SeqExample =
                serde_json::from_str(&line).map_err(|e| EvalError::DataCorrupt {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            examples.push(example);
        }

        Ok(Self::new(examples, config))
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn get(&self, idx: usize) -> Option<EncodedExample> {
        let example = self.examples.get(idx)?;
        let pad = self.config.pad_token_id;

        let (source_ids, source_mask) =
            pad_to(&example.source_ids, self.config.max_source_length, pad);
        let (target_ids, _) = pad_to(&example.target_ids, self.config.max_target_length, pad);

        Some(EncodedExample {
            source_ids,
            source_mask,
            target_ids,
        })
    }
}

/// Truncates or pads `ids` to `len`; mask marks real tokens with 1
fn pad_to(ids: &[u32], len: usize, pad: u32) -> (Vec<u32>, Vec<u32>) {
    let kept = ids.len().min(len);
    let mut padded = Vec::with_capacity(len);
    padded.extend_from_slice(&ids[..kept]);
    padded.resize(len, pad);

    let mut mask = vec![1; kept];
    mask.resize(len, 0);

    (padded, mask)
}

/// A batch of fixed-shape id tensors
#[derive(Debug, Clone)]
pub struct Batch<B: Backend> {
    pub source_ids: Tensor<B, 2, Int>,
    pub source_mask: Tensor<B, 2, Int>,
    pub target_ids: Tensor<B, 2, Int>,
}

impl<B: Backend> Batch<B> {
    pub fn from_examples(examples: &[EncodedExample], device: &B::Device) -> crate::error::Result<Self> {
        let source_ids: Vec<Vec<u32>> = examples.iter().map(|e| e.source_ids.clone()).collect();
        let source_mask: Vec<Vec<u32>> = examples.iter().map(|e| e.source_mask.clone()).collect();
        let target_ids: Vec<Vec<u32>> = examples.iter().map(|e| e.target_ids.clone()).collect();

        Ok(Self {
            source_ids: create_batch_tensor(&source_ids, device)?,
            source_mask: create_batch_tensor(&source_mask, device)?,
            target_ids: create_batch_tensor(&target_ids, device)?,
        })
    }

    pub fn to_device(self, device: &B::Device) -> Self {
        Self {
            source_ids: self.source_ids.to_device(device),
            source_mask: self.source_mask.to_device(device),
            target_ids: self.target_ids.to_device(device),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.source_ids.dims()[0]
    }
}

/// Items the Evaluator accepts: ready batches or fallible loader output
pub trait IntoBatch<B: Backend> {
    fn into_batch(self) -> crate::error::Result<Batch<B>>;
}

impl<B: Backend> IntoBatch<B> for Batch<B> {
    fn into_batch(self) -> crate::error::Result<Batch<B>> {
        Ok(self)
    }
}

impl<B: Backend> IntoBatch<B> for crate::error::Result<Batch<B>> {
    fn into_batch(self) -> crate::error::Result<Batch<B>> {
        self
    }
}

/// Batched iterator, single pass
pub struct DataLoader<'a, B: Backend> {
    dataset: &'a Seq2SeqDataset,
    batch_size: usize,
    current_idx: usize,
    device: B::Device,
}

impl<'a, B: Backend> DataLoader<'a, B> {
    pub fn new(dataset: &'a Seq2SeqDataset, batch_size: usize, device: B::Device) -> Self {
        Self {
            dataset,
            batch_size: batch_size.max(1),
            current_idx: 0,
            device,
        }
    }
}

impl<B: Backend> Iterator for DataLoader<'_, B> {
    type Item = crate::error::Result<Batch<B>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_idx >= self.dataset.len() {
            return None;
        }

        let end_idx = (self.current_idx + self.batch_size).min(self.dataset.len());
        let examples: Vec<EncodedExample> = (self.current_idx..end_idx)
            .filter_map(|idx| self.dataset.get(idx))
            .collect();

        self.current_idx = end_idx;

        if examples.is_empty() {
            return None;
        }

        Some(Batch::from_examples(&examples, &self.device))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.len().saturating_sub(self.current_idx);
        let batches = remaining.div_ceil(self.batch_size);
        (batches, Some(batches))
    }
}

impl<B: Backend> ExactSizeIterator for DataLoader<'_, B> {}
