mod normalize;
mod vocab;

pub use normalize::DecodeNormalizer;
pub use vocab::{BatchDecode, DecodeOptions, Vocab, VocabDecoder};
