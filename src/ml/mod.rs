// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All model, optimisation and inference code lives here.
//
//   model.rs      — The classifier architecture
//                   • Embedding initialised from GloVe (trainable)
//                   • Bidirectional LSTM encoder
//                   • First + last time step concatenation
//                   • Linear projection → dropout → class logits
//
//   trainer.rs    — The training loop
//                   Shuffled mini-batches, cross-entropy, Adam,
//                   and a full validation pass every N batches
//
//   inferencer.rs — Whole-split prediction and accuracy
//
// Everything is generic over the Burn backend; the CLI picks
// Wgpu or NdArray at runtime.
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Bidirectional LSTM sentiment classifier
pub mod model;

/// Training loop with periodic validation
pub mod trainer;

/// Arg-max prediction and accuracy over a full split
pub mod inferencer;
