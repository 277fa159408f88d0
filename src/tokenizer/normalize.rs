// src/tokenizer/normalize.rs

/// Post-decode text clean-up
pub struct DecodeNormalizer {
    clean_up_spaces: bool,
}

impl DecodeNormalizer {
    pub fn new(clean_up_spaces: bool) -> Self {
        Self { clean_up_spaces }
    }

    pub fn normalize(&self, text: &str) -> String {
        // 1. Byte-level markers back to whitespace
        let mut result = text.replace('\u{0120}', " ").replace('\u{010A}', "\n");

        // 2. Spaces before punctuation and contractions
        if self.clean_up_spaces {
            result = self.clean_up_tokenization(&result);
            result = self.collapse_whitespace(&result);
        }

        result.trim().to_string()
    }

    fn clean_up_tokenization(&self, text: &str) -> String {
        text.replace(" .", ".")
            .replace(" ?", "?")
            .replace(" !", "!")
            .replace(" ,", ",")
            .replace(" ' ", "'")
            .replace(" n't", "n't")
            .replace(" 'm", "'m")
            .replace(" 's", "'s")
            .replace(" 've", "'ve")
            .replace(" 're", "'re")
    }

    fn collapse_whitespace(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for DecodeNormalizer {
    fn default() -> Self {
        Self::new(true)
    }
}
