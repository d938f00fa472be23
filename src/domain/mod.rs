// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the pipeline
// works on: labelled phrases, the unlabelled test table, and
// the tokenizer abstraction.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Labelled rows, the test table and the column names
pub mod phrase;

// Core abstractions (traits) that other layers implement
pub mod traits;
