// src/data/mod.rs

mod dataset;

pub use dataset::{
    Batch, DataLoader, DatasetConfig, EncodedExample, IntoBatch, Seq2SeqDataset, Seq2SeqExample,
};
