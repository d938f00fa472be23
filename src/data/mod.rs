// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw TSV / GloVe files and the
// tensor batches the training loop consumes.
//
// The pipeline flows in this order:
//
//   train.tsv / test.tsv
//       │
//       ▼
//   loader            → reads labelled rows and the test table
//       │
//       ▼
//   splitter          → first N rows train, remainder validation
//       │
//       ▼
//   vocab             → lower-cases, splits, collects the token set
//       │
//       ▼
//   embedding         → keeps GloVe rows for vocabulary tokens only
//       │
//       ▼
//   encoder           → token → index, truncate / zero-pad
//       │
//       ▼
//   SentimentDataset  → implements Burn's Dataset trait
//       │
//       ▼
//   SentimentBatcher  → stacks samples into tensor batches
//
// `assembler` drives the middle of that chain so the
// application layer gets every split in one call.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads the labelled TSV and the test TSV using the csv crate
pub mod loader;

/// Splits labelled rows into train / validation by position
pub mod splitter;

/// Whitespace tokenizer and vocabulary construction
pub mod vocab;

/// Pretrained word-vector loading
pub mod embedding;

/// Token → index encoding and fixed-length padding
pub mod encoder;

/// Runs splitter → vocab → embedding → encoder for all splits
pub mod assembler;

/// Implements Burn's Dataset trait for encoded phrases
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
