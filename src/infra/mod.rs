// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File outputs that sit outside the data pipeline and the model:
//
//   submission.rs — Prediction output
//                   Copies the test identifier columns and
//                   appends the predicted Sentiment column as
//                   a comma-separated file.
//
//   metrics.rs    — Evaluation metrics logging
//                   Appends one CSV row per validation pass
//                   (epoch, batch, train loss, accuracy) when
//                   a metrics path is configured.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Submission CSV writer
pub mod submission;

/// Validation metrics CSV logger
pub mod metrics;
