// ============================================================
// Layer 4 — Sequence Encoder
// ============================================================
// Converts tokenised phrases into fixed-length index sequences.
//
//   ["good", "movie"]  ──encode──▶  [1, 2]
//                      ──pad(4)──▶  [1, 2, 0, 0]
//
//   ["a", "very", "long", "one"] ──pad(2)──▶ ["a", "very"] indices
//
// Padding and truncation both act on the right-hand end. The
// padding value is the unknown index, so the model cannot tell
// a pad slot from an unknown word; that matches how the data
// was always fed to it.
//
// Every sequence leaving this module has exactly `max_length`
// entries, which is what lets the batcher reshape a flat Vec
// into a [batch, max_length] tensor without any masks.
//
// Reference: Rust Book §8 (Vectors)

use std::collections::HashMap;

use crate::data::embedding::UNKNOWN_INDEX;

/// Map each token to its index; unmapped tokens become [`UNKNOWN_INDEX`].
pub fn encode_phrase(tokens: &[String], word_index: &HashMap<String, u32>) -> Vec<u32> {
    tokens
        .iter()
        .map(|t| word_index.get(t).copied().unwrap_or(UNKNOWN_INDEX))
        .collect()
}

/// Right-truncate or right-pad with [`UNKNOWN_INDEX`] to exactly `max_length`.
pub fn pad_phrase(mut encoded: Vec<u32>, max_length: usize) -> Vec<u32> {
    encoded.resize(max_length, UNKNOWN_INDEX);
    encoded
}

/// Encode and pad every phrase of a split.
pub fn encode_split(
    phrases:    &[Vec<String>],
    word_index: &HashMap<String, u32>,
    max_length: usize,
) -> Vec<Vec<u32>> {
    phrases
        .iter()
        .map(|tokens| pad_phrase(encode_phrase(tokens, word_index), max_length))
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> HashMap<String, u32> {
        [("<unk>", 0), ("good", 1), ("bad", 2), ("movie", 3)]
            .into_iter()
            .map(|(w, i)| (w.to_string(), i))
            .collect()
    }

    fn tokens(s: &str) -> Vec<String> {
        s.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn test_known_tokens_map_to_their_index() {
        assert_eq!(encode_phrase(&tokens("good movie"), &index()), vec![1, 3]);
    }

    #[test]
    fn test_unknown_tokens_map_to_zero() {
        assert_eq!(encode_phrase(&tokens("awful movie"), &index()), vec![0, 3]);
        assert_eq!(encode_phrase(&tokens(""), &index()), vec![0]);
    }

    #[test]
    fn test_pads_short_sequences_with_zero() {
        assert_eq!(pad_phrase(vec![1, 3], 4), vec![1, 3, 0, 0]);
    }

    #[test]
    fn test_truncates_long_sequences_on_the_right() {
        assert_eq!(pad_phrase(vec![1, 2, 3, 1, 2], 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_exact_length_is_unchanged() {
        assert_eq!(pad_phrase(vec![2, 3], 2), vec![2, 3]);
    }

    #[test]
    fn test_every_encoded_phrase_has_max_length() {
        let phrases: Vec<Vec<String>> = [
            "good",
            "good bad movie good bad movie good bad movie good bad movie good bad movie good bad",
            "",
            "movie movie",
        ]
        .iter()
        .map(|p| tokens(p))
        .collect();

        for max_length in [1, 3, 16] {
            let encoded = encode_split(&phrases, &index(), max_length);
            assert_eq!(encoded.len(), phrases.len());
            assert!(encoded.iter().all(|seq| seq.len() == max_length));
        }
    }
}
