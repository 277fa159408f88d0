//! Tokenizer Integration Tests
//!
//! Vocabulary decoding used to turn ids back into comments.

mod common;

use comment_eval::{BatchDecode, DecodeOptions, EvalError, VocabDecoder};
use tempfile::tempdir;

#[test]
fn test_scoring_decode_skips_specials_and_cleans_up() {
    let decoder = common::test_decoder();
    let text = decoder
        .decode(&[0, 4, 5, 6, 8, 9, 7, 2, 1, 1], &DecodeOptions::for_scoring())
        .unwrap();

    assert_eq!(text, "returns the sum of values.");
}

#[test]
fn test_specials_kept_by_default() {
    let decoder = common::test_decoder();
    let text = decoder.decode(&[0, 4, 2], &DecodeOptions::default()).unwrap();

    assert_eq!(text, "<s>returns</s>");
}

#[test]
fn test_no_clean_up_keeps_spaces_before_punctuation() {
    let decoder = common::test_decoder();
    let options = DecodeOptions {
        skip_special_tokens: true,
        clean_up_tokenization_spaces: false,
    };
    let text = decoder.decode(&[4, 5, 6, 10, 7], &options).unwrap();

    assert_eq!(text, "returns the sum , .");
}

#[test]
fn test_unknown_id_is_an_error() {
    let decoder = common::test_decoder();
    let err = decoder
        .decode(&[4, 4242], &DecodeOptions::for_scoring())
        .unwrap_err();

    assert!(matches!(err, EvalError::UnknownToken(4242)));
}

#[test]
fn test_batch_decode_preserves_order() {
    let decoder = common::test_decoder();
    let rows: Vec<Vec<u32>> = (0..64)
        .map(|i| if i % 2 == 0 { vec![0, 4, 2] } else { vec![0, 11, 12, 2] })
        .collect();

    let texts = decoder
        .batch_decode(&rows, &DecodeOptions::for_scoring())
        .unwrap();

    assert_eq!(texts.len(), 64);
    for (i, text) in texts.iter().enumerate() {
        let expected = if i % 2 == 0 { "returns" } else { "closes file" };
        assert_eq!(text, expected);
    }
}

#[test]
fn test_vocab_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vocab.json");

    common::test_decoder().save(&path).unwrap();
    let loaded = VocabDecoder::from_file(&path).unwrap();

    assert_eq!(loaded.vocab_size(), common::test_vocab().id_to_token.len());
    assert_eq!(loaded.special_token_id(VocabDecoder::PAD_TOKEN), Some(1));
    assert!(loaded.is_special(2));
}

#[test]
fn test_vocab_with_out_of_range_special_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vocab.json");
    std::fs::write(
        &path,
        r#"{"id_to_token": ["<pad>"], "special_tokens": {"</s>": 5}}"#,
    )
    .unwrap();

    let err = VocabDecoder::from_file(&path).unwrap_err();
    assert!(matches!(err, EvalError::TokenizerLoad(_)));
}
