// ============================================================
// Layer 4 — Vocabulary Builder
// ============================================================
// Turns raw phrases into token lists and collects the set of
// distinct tokens the embedding loader should look up.
//
// Tokenisation rule (WhitespaceTokenizer):
//   1. lower-case the phrase
//   2. split on every single ' ' character
//
// Nothing else is normalised: "film," and "film" are different
// tokens, and two consecutive spaces produce an empty token.
// Both simply fall back to the unknown index at encode time
// if no pretrained vector exists for them.
//
// Only train + validation phrases contribute to the vocabulary.
// Test phrases are tokenised but their words are never added,
// so a word seen only in the test file always encodes to 0.
//
// Reference: Rust Book §8 (Hash Sets, Strings)

use std::collections::HashSet;

use crate::domain::traits::Tokenizer;

/// The set of distinct tokens eligible for a pretrained vector.
pub type Vocabulary = HashSet<String>;

/// Lower-cases and splits on single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, phrase: &str) -> Vec<String> {
        phrase.split(' ').map(str::to_lowercase).collect()
    }
}

/// Output of [`build_vocabulary`]: the token set plus every
/// split tokenised in its original row order.
#[derive(Debug, Clone, Default)]
pub struct VocabularyBuild {
    pub vocabulary: Vocabulary,
    pub train:      Vec<Vec<String>>,
    pub validation: Vec<Vec<String>>,
    pub test:       Vec<Vec<String>>,
}

/// Tokenize all three splits and collect the train + validation vocabulary.
pub fn build_vocabulary<'a, T, I1, I2, I3>(
    tokenizer:  &T,
    train:      I1,
    validation: I2,
    test:       I3,
) -> VocabularyBuild
where
    T:  Tokenizer,
    I1: IntoIterator<Item = &'a str>,
    I2: IntoIterator<Item = &'a str>,
    I3: IntoIterator<Item = &'a str>,
{
    let train      = tokenizer.tokenize_all(train);
    let validation = tokenizer.tokenize_all(validation);
    let test       = tokenizer.tokenize_all(test);

    let vocabulary: Vocabulary = train
        .iter()
        .chain(validation.iter())
        .flatten()
        .cloned()
        .collect();

    tracing::info!("Vocabulary: {} distinct tokens", vocabulary.len());

    VocabularyBuild { vocabulary, train, validation, test }
}
