use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    // --- I/O ---
    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    // --- Data ---
    #[error("Dataset corrupt at line {line}: {reason}")]
    DataCorrupt { line: usize, reason: String },

    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    // --- Tokenizer ---
    #[error("Unknown token ID: {0}")]
    UnknownToken(u32),

    #[error("Token ID {0} does not fit an Int tensor")]
    TokenIdOutOfRange(i64),

    #[error("Tokenizer load failed: {0}")]
    TokenizerLoad(String),

    // --- Config ---
    #[error("Invalid config: {0}")]
    Config(String),

    // --- Collaborators ---
    #[error("Model error: {0}")]
    Model(String),

    #[error("Metric error: {0}")]
    Metric(String),

    #[error("Coordinator error: {0}")]
    Coordinator(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
