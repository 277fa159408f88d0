//! Common test utilities and helpers
//!
//! Shared stubs for integration tests.
#![allow(dead_code)]

use burn::backend::ndarray::{NdArray, NdArrayDevice};
use burn::tensor::{Int, Tensor};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use comment_eval::{
    Batch, EvalError, GenerationConfig, Result, Seq2SeqExample, Seq2SeqModel, Vocab,
    VocabDecoder,
};

pub type TestBackend = NdArray;

pub fn test_device() -> NdArrayDevice {
    NdArrayDevice::Cpu
}

/// Byte-level style vocabulary for a handful of comment words
///
/// 0 = <s>, 1 = <pad>, 2 = </s>, 3 = <unk>
pub fn test_vocab() -> Vocab {
    let id_to_token = [
        "<s>", "<pad>", "</s>", "<unk>", "returns", "\u{0120}the", "\u{0120}sum", "\u{0120}.",
        "\u{0120}of", "\u{0120}values", "\u{0120},", "closes", "\u{0120}file",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect();

    let mut special_tokens = HashMap::new();
    special_tokens.insert("<s>".to_string(), 0);
    special_tokens.insert("<pad>".to_string(), 1);
    special_tokens.insert("</s>".to_string(), 2);
    special_tokens.insert("<unk>".to_string(), 3);

    Vocab {
        id_to_token,
        special_tokens,
    }
}

pub fn test_decoder() -> VocabDecoder {
    VocabDecoder::from_vocab(test_vocab())
}

/// Builds a batch from equally long rows
pub fn make_batch(source: Vec<Vec<u32>>, target: Vec<Vec<u32>>) -> Batch<TestBackend> {
    let device = test_device();
    let mask: Vec<Vec<u32>> = source
        .iter()
        .map(|row| row.iter().map(|&id| u32::from(id != 1)).collect())
        .collect();

    Batch {
        source_ids: comment_eval::helpers::create_batch_tensor(&source, &device).unwrap(),
        source_mask: comment_eval::helpers::create_batch_tensor(&mask, &device).unwrap(),
        target_ids: comment_eval::helpers::create_batch_tensor(&target, &device).unwrap(),
    }
}

/// One-example batch with a fixed reference "returns the sum ."
pub fn single_example_batch() -> Batch<TestBackend> {
    make_batch(vec![vec![4, 5, 6, 1]], vec![vec![0, 4, 5, 6, 7, 2, 1, 1]])
}

/// Model stub returning scripted losses and a fixed generation
pub struct StubModel {
    losses: Vec<f32>,
    calls: Cell<usize>,
    pub fail_at: Option<usize>,
    pub generated: Vec<u32>,
    pub training: bool,
    pub grad_enabled: bool,
    pub grad_states_seen: RefCell<Vec<bool>>,
    pub generation_configs_seen: RefCell<Vec<GenerationConfig>>,
}

impl StubModel {
    pub fn new(losses: Vec<f32>) -> Self {
        Self {
            losses,
            calls: Cell::new(0),
            fail_at: None,
            generated: vec![0, 4, 5, 6, 7, 2],
            training: true,
            grad_enabled: true,
            grad_states_seen: RefCell::new(Vec::new()),
            generation_configs_seen: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Seq2SeqModel<TestBackend> for StubModel {
    fn forward_loss(
        &self,
        source_ids: Tensor<TestBackend, 2, Int>,
        _source_mask: Tensor<TestBackend, 2, Int>,
        _target_ids: Tensor<TestBackend, 2, Int>,
    ) -> Result<Tensor<TestBackend, 1>> {
        let idx = self.calls.get();
        self.calls.set(idx + 1);
        self.grad_states_seen.borrow_mut().push(self.grad_enabled);

        if self.fail_at == Some(idx) {
            return Err(EvalError::Model(format!("forward failed at batch {}", idx)));
        }

        let rows = source_ids.dims()[0];
        let loss = self.losses[idx % self.losses.len()];
        let values = vec![loss; rows];
        Ok(Tensor::from_floats(values.as_slice(), &source_ids.device()))
    }

    fn generate(
        &self,
        source_ids: Tensor<TestBackend, 2, Int>,
        _source_mask: Tensor<TestBackend, 2, Int>,
        config: &GenerationConfig,
    ) -> Result<Vec<Vec<u32>>> {
        self.generation_configs_seen.borrow_mut().push(config.clone());
        let rows = source_ids.dims()[0];
        Ok(vec![self.generated.clone(); rows])
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    fn set_grad_enabled(&mut self, enabled: bool) -> bool {
        std::mem::replace(&mut self.grad_enabled, enabled)
    }
}

/// Writes JSONL examples and returns the file path
pub fn create_temp_dataset(examples: &[Seq2SeqExample], dir: &Path) -> PathBuf {
    let path = dir.join("valid.jsonl");
    let mut file = std::fs::File::create(&path).expect("Failed to create dataset file");
    for example in examples {
        let line = serde_json::to_string(example).expect("Failed to serialize example");
        writeln!(file, "{}", line).expect("Failed to write example");
    }
    path
}

/// True when no n-gram of `size` occurs twice in `tokens`
pub fn has_unique_ngrams(tokens: &[u32], size: usize) -> bool {
    let mut seen = std::collections::HashSet::new();
    tokens.windows(size).all(|w| seen.insert(w.to_vec()))
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a DEBUG-level subscriber writing to a buffer; returns the output too
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
