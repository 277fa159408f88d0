//! Inspect Command
//!
//! Loads an evaluation set the way the Evaluator sees it and prints
//! decoded references.

use std::path::Path;

use tracing::info;

use crate::backend::{backend_name, get_device, MyBackend};
use crate::data::{DataLoader, DatasetConfig, Seq2SeqDataset};
use crate::error::Result;
use crate::helpers::tensor_rows;
use crate::model::EvalConfig;
use crate::tokenizer::{BatchDecode, DecodeOptions, VocabDecoder};

pub fn execute(
    data_path: &Path,
    vocab_path: &Path,
    config_path: Option<&Path>,
    limit: usize,
) -> Result<()> {
    let config = match config_path {
        Some(path) => EvalConfig::from_file(path)?,
        None => EvalConfig::new("eval_output".to_string()),
    };

    let decoder = VocabDecoder::from_file(vocab_path)?;
    let dataset_config =
        DatasetConfig::new().with_pad_token_id(config.generation.pad_token_id);
    let dataset = Seq2SeqDataset::from_jsonl(data_path, dataset_config)?;

    let device = get_device();
    let loader: DataLoader<MyBackend> =
        DataLoader::new(&dataset, config.eval_batch_size, device);

    info!(backend = backend_name(), "dataset loaded");

    println!("═══════════════════════════════════════════════════════════");
    println!("  Dataset: {}", data_path.display());
    println!("  Examples: {}", dataset.len());
    println!("  Batches: {} (batch size {})", loader.len(), config.eval_batch_size);
    println!("  Vocab: {}", decoder.vocab_size());
    println!("═══════════════════════════════════════════════════════════");

    let options = DecodeOptions::for_scoring();
    let mut shown = 0usize;
    for batch in loader {
        if shown >= limit {
            break;
        }
        let rows = tensor_rows(batch?.target_ids)?;
        for text in decoder.batch_decode(&rows, &options)? {
            if shown >= limit {
                break;
            }
            shown += 1;
            println!("  {:>3}. {}", shown, text);
        }
    }

    Ok(())
}
