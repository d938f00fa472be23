// ============================================================
// Layer 3 — Phrase Domain Types
// ============================================================
// The two shapes of data the pipeline reads:
//
//   LabeledPhrase — one row of the labelled training file.
//                   Only the `Phrase` and `Sentiment` columns
//                   matter; everything else (PhraseId,
//                   SentenceId) is ignored on the way in.
//
//   TestTable     — the unlabelled test file kept as a plain
//                   table, because its identifier columns are
//                   copied into the submission untouched.
//
// Sentiment is a 5-way label:
//   0 = negative, 1 = somewhat negative, 2 = neutral,
//   3 = somewhat positive, 4 = positive
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// Number of sentiment classes in the labelled data.
pub const SENTIMENT_CLASSES: usize = 5;

/// Name of the phrase text column in both input files.
pub const PHRASE_COLUMN: &str = "Phrase";

/// Name of the label column in the training file and the submission.
pub const SENTIMENT_COLUMN: &str = "Sentiment";

/// Name of the sentence grouping column, dropped from the submission.
pub const SENTENCE_ID_COLUMN: &str = "SentenceId";

/// One labelled training row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPhrase {
    #[serde(rename = "Phrase")]
    pub phrase: String,

    /// Class index in 0..SENTIMENT_CLASSES
    #[serde(rename = "Sentiment")]
    pub sentiment: u8,
}

impl LabeledPhrase {
    #[cfg(test)]
    pub fn new(phrase: impl Into<String>, sentiment: u8) -> Self {
        Self { phrase: phrase.into(), sentiment }
    }
}

/// The unlabelled test file, held as header + raw rows.
///
/// `phrase_column` is the position of `Phrase` within `headers`,
/// resolved once when the table is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTable {
    pub headers:       Vec<String>,
    pub rows:          Vec<Vec<String>>,
    pub phrase_column: usize,
}

impl TestTable {
    /// Number of test examples
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The phrase text of every row, in file order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(self.phrase_column).map(String::as_str).unwrap_or(""))
    }
}
