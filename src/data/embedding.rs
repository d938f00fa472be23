// ============================================================
// Layer 4 — Pretrained Embedding Loader
// ============================================================
// Reads a GloVe-style text file and keeps only the vectors the
// model can actually use.
//
// File format, one token per line:
//   <token> <f_1> <f_2> ... <f_D>
// separated by arbitrary whitespace.
//
// Index layout of the result:
//   0      → "<unk>", an all-zero row
//   1..=N  → vocabulary tokens found in the file, numbered in
//            the order the file lists them
//
// Tokens in the vocabulary but missing from the file get no
// index at all; the encoder maps them to 0. Lines for tokens
// outside the vocabulary are skipped without parsing their
// floats, which keeps a full pass over the 400k-line GloVe
// file cheap. A token listed twice keeps its first vector. A
// literal "<unk>" line in the vocabulary is remapped to a fresh
// row, like any other token.
//
// The table is stored row-major in one flat Vec<f32> so it can
// go straight into a Burn TensorData of shape [N + 1, D].
//
// Reference: Rust Book §8 (Hash Maps)
//            Rust Book §12 (Reading a File)

use anyhow::{ensure, Context, Result};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::data::vocab::Vocabulary;

/// Name registered for the reserved unknown index.
pub const UNKNOWN_TOKEN: &str = "<unk>";

/// Index every unmapped token (and every padding slot) encodes to.
pub const UNKNOWN_INDEX: u32 = 0;

/// Token → index mapping plus the matching dense embedding table.
#[derive(Debug, Clone, PartialEq)]
pub struct PretrainedEmbeddings {
    word_index: HashMap<String, u32>,
    table:      Vec<f32>,
    dim:        usize,
}

impl PretrainedEmbeddings {
    /// A table holding only the zero unknown row.
    fn empty(dim: usize) -> Self {
        let mut word_index = HashMap::new();
        word_index.insert(UNKNOWN_TOKEN.to_string(), UNKNOWN_INDEX);
        Self { word_index, table: vec![0.0; dim], dim }
    }

    /// Index assigned to `token`, if it received a pretrained vector.
    pub fn index_of(&self, token: &str) -> Option<u32> {
        self.word_index.get(token).copied()
    }

    /// The full token → index mapping, `<unk>` included.
    pub fn word_index(&self) -> &HashMap<String, u32> {
        &self.word_index
    }

    /// Number of rows in the table (indexed tokens + the unknown row).
    pub fn len(&self) -> usize {
        self.table.len() / self.dim
    }

    /// Vector width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// One row of the table.
    #[cfg(test)]
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dim)?;
        self.table.get(start..start + self.dim)
    }

    /// The whole table, row-major, shape [len(), dim()].
    pub fn table(&self) -> &[f32] {
        &self.table
    }

    /// Whether `token` already took a row from the file. A literal
    /// `<unk>` line still gets its own row; padding keeps index 0.
    fn has_file_vector(&self, token: &str) -> bool {
        self.index_of(token).is_some_and(|index| index != UNKNOWN_INDEX)
    }

    fn push(&mut self, token: &str, vector: Vec<f32>) {
        let index = self.len() as u32;
        self.word_index.insert(token.to_string(), index);
        self.table.extend(vector);
    }
}

/// Load vectors for `vocabulary` from a GloVe text file.
pub fn load_pretrained(
    path:       impl AsRef<Path>,
    vocabulary: &Vocabulary,
    dim:        usize,
) -> Result<PretrainedEmbeddings> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Cannot open pretrained vectors '{}'", path.display()))?;

    let embeddings = read_pretrained(BufReader::new(file), vocabulary, dim)
        .with_context(|| format!("Cannot parse pretrained vectors '{}'", path.display()))?;

    tracing::info!(
        "Pretrained vectors: {} of {} vocabulary tokens found ({}-dim)",
        embeddings.len() - 1,
        vocabulary.len(),
        dim,
    );
    Ok(embeddings)
}

/// Same as [`load_pretrained`] over any buffered reader.
pub fn read_pretrained<R: BufRead>(
    reader:     R,
    vocabulary: &Vocabulary,
    dim:        usize,
) -> Result<PretrainedEmbeddings> {
    ensure!(dim > 0, "embedding dimension must be positive");

    let mut embeddings = PretrainedEmbeddings::empty(dim);

    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Cannot read line {}", i + 1))?;
        let mut fields = line.split_whitespace();

        let Some(token) = fields.next() else { continue };
        if !vocabulary.contains(token) || embeddings.has_file_vector(token) {
            continue;
        }

        let vector = fields
            .map(|f| f.parse::<f32>())
            .collect::<Result<Vec<f32>, _>>()
            .with_context(|| format!("line {}: bad vector component for '{token}'", i + 1))?;
        ensure!(
            vector.len() == dim,
            "line {}: '{token}' has {} components, expected {dim}",
            i + 1,
            vector.len()
        );

        embeddings.push(token, vector);
    }

    tracing::debug!("Embedding table shape: [{}, {}]", embeddings.len(), dim);
    Ok(embeddings)
}
