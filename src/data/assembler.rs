// ============================================================
// Layer 4 — Dataset Assembler
// ============================================================
// Runs the data pipeline end to end for all three splits:
//
//   labelled rows ─split_at_row─▶ train rows / validation rows
//   phrases       ─build_vocabulary─▶ token set + token lists
//   token set     ─load vectors─▶ PretrainedEmbeddings
//   token lists   ─encode_split─▶ fixed-length index sequences
//
// The vector source is passed in as a closure so the same
// assembly runs against the real GloVe file or an in-memory
// table in tests.
//
// Reference: Rust Book §13 (Closures)

use anyhow::{ensure, Result};

use crate::data::{
    dataset::LabeledSplit,
    embedding::PretrainedEmbeddings,
    encoder::encode_split,
    splitter::split_at_row,
    vocab::{build_vocabulary, Vocabulary},
};
use crate::domain::{
    phrase::{LabeledPhrase, TestTable},
    traits::Tokenizer,
};

/// Every split encoded, plus the embeddings the encoding used.
#[derive(Debug, Clone)]
pub struct AssembledData {
    pub embeddings:      PretrainedEmbeddings,
    pub vocabulary_size: usize,
    pub train:           LabeledSplit,
    pub validation:      LabeledSplit,
    pub test:            Vec<Vec<u32>>,
}

/// Split, tokenize, look up vectors and encode.
pub struct DatasetAssembler<'t, T: Tokenizer> {
    tokenizer:  &'t T,
    max_length: usize,
    train_rows: usize,
}

impl<'t, T: Tokenizer> DatasetAssembler<'t, T> {
    pub fn new(tokenizer: &'t T, max_length: usize, train_rows: usize) -> Self {
        Self { tokenizer, max_length, train_rows }
    }

    /// Build all splits. `load_vectors` receives the train + validation
    /// vocabulary and returns the pretrained embeddings for it.
    pub fn assemble<F>(
        &self,
        labeled:      Vec<LabeledPhrase>,
        test:         &TestTable,
        load_vectors: F,
    ) -> Result<AssembledData>
    where
        F: FnOnce(&Vocabulary) -> Result<PretrainedEmbeddings>,
    {
        ensure!(self.max_length > 0, "max sequence length must be positive");

        let (train_rows, validation_rows) = split_at_row(labeled, self.train_rows);
        tracing::info!(
            "Split: {} train, {} validation, {} test",
            train_rows.len(),
            validation_rows.len(),
            test.len(),
        );

        let build = build_vocabulary(
            self.tokenizer,
            train_rows.iter().map(|r| r.phrase.as_str()),
            validation_rows.iter().map(|r| r.phrase.as_str()),
            test.phrases(),
        );

        let embeddings = load_vectors(&build.vocabulary)?;
        let word_index = embeddings.word_index();

        let train = LabeledSplit::new(
            encode_split(&build.train, word_index, self.max_length),
            train_rows.iter().map(|r| r.sentiment).collect(),
        );
        let validation = LabeledSplit::new(
            encode_split(&build.validation, word_index, self.max_length),
            validation_rows.iter().map(|r| r.sentiment).collect(),
        );
        let test = encode_split(&build.test, word_index, self.max_length);

        Ok(AssembledData {
            vocabulary_size: build.vocabulary.len(),
            embeddings,
            train,
            validation,
            test,
        })
    }
}
