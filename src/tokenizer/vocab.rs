use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::normalize::DecodeNormalizer;
use crate::error::{EvalError, Result};

/// How token ids are turned back into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub skip_special_tokens: bool,
    pub clean_up_tokenization_spaces: bool,
}

impl DecodeOptions {
    /// Settings used when scoring generated text against references
    pub fn for_scoring() -> Self {
        Self {
            skip_special_tokens: true,
            clean_up_tokenization_spaces: true,
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            skip_special_tokens: false,
            clean_up_tokenization_spaces: true,
        }
    }
}

/// Batch decoding capability the Evaluator relies on
pub trait BatchDecode {
    fn batch_decode(&self, sequences: &[Vec<u32>], options: &DecodeOptions) -> Result<Vec<String>>;
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Vocab {
    pub id_to_token: Vec<String>,
    pub special_tokens: HashMap<String, u32>,
}

/// Vocabulary-table decoder, thread-safe
#[derive(Debug)]
pub struct VocabDecoder {
    id_to_token: Vec<String>,
    special_tokens: HashMap<String, u32>,
    special_ids: HashSet<u32>,
}

impl VocabDecoder {
    pub const PAD_TOKEN: &'static str = "<pad>";
    pub const BOS_TOKEN: &'static str = "<s>";
    pub const EOS_TOKEN: &'static str = "</s>";

    pub fn vocab_size(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn special_token_id(&self, token_name: &str) -> Option<u32> {
        self.special_tokens.get(token_name).copied()
    }

    pub fn is_special(&self, id: u32) -> bool {
        self.special_ids.contains(&id)
    }

    pub fn from_vocab(vocab: Vocab) -> Self {
        let special_ids = vocab.special_tokens.values().copied().collect();
        Self {
            id_to_token: vocab.id_to_token,
            special_tokens: vocab.special_tokens,
            special_ids,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| EvalError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let vocab: Vocab = serde_json::from_reader(reader)
            .map_err(|e| EvalError::TokenizerLoad(format!("{}: {}", path.display(), e)))?;

        if let Some((name, &id)) = vocab
            .special_tokens
            .iter()
            .find(|(_, id)| **id as usize >= vocab.id_to_token.len())
        {
            return Err(EvalError::TokenizerLoad(format!(
                "special token {} has id {} outside vocabulary of {}",
                name,
                id,
                vocab.id_to_token.len()
            )));
        }

        Ok(Self::from_vocab(vocab))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let vocab = Vocab {
            id_to_token: self.id_to_token.clone(),
            special_tokens: self.special_tokens.clone(),
        };
        let file = File::create(path).map_err(|source| EvalError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &vocab)
            .map_err(|e| EvalError::FileWrite {
                path: path.to_path_buf(),
                source: e.into(),
            })
    }

    pub fn decode(&self, ids: &[u32], options: &DecodeOptions) -> Result<String> {
        let mut text = String::new();

        for &id in ids {
            if options.skip_special_tokens && self.is_special(id) {
                continue;
            }
            let token = self
                .id_to_token
                .get(id as usize)
                .ok_or(EvalError::UnknownToken(id))?;
            text.push_str(token);
        }

        Ok(DecodeNormalizer::new(options.clean_up_tokenization_spaces).normalize(&text))
    }
}

impl BatchDecode for VocabDecoder {
    fn batch_decode(&self, sequences: &[Vec<u32>], options: &DecodeOptions) -> Result<Vec<String>> {
        sequences
            .par_iter()
            .map(|ids| self.decode(ids, options))
            .collect()
    }
}
