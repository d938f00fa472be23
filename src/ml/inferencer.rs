// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Whole-split prediction and accuracy. Both run one forward
// pass over every row at once; callers hand in a model that
// is already in evaluation mode (model.valid()).
use burn::{prelude::*, tensor::ElementConversion};

use crate::data::batcher::{labels_tensor, tokens_tensor};
use crate::ml::model::SentimentRnn;

/// Arg-max class per row of a [n, num_classes] logit tensor.
pub fn argmax_classes<B: Backend>(logits: Tensor<B, 2>) -> Vec<u8> {
    logits
        .argmax(1)          // [n, 1]
        .flatten::<1>(0, 1) // [n]
        .into_data()
        .iter::<i64>()
        .map(|class| class as u8)
        .collect()
}

/// Predict a sentiment class for every encoded sequence.
pub fn predict<B: Backend>(
    model:     &SentimentRnn<B>,
    sequences: &[Vec<u32>],
    device:    &B::Device,
) -> Vec<u8> {
    if sequences.is_empty() {
        return Vec::new();
    }
    let logits = model.forward(tokens_tensor::<B>(sequences, device));
    argmax_classes(logits)
}

/// Fraction of rows whose arg-max class equals the label.
/// `None` when there is nothing to evaluate.
pub fn accuracy<B: Backend>(
    model:     &SentimentRnn<B>,
    sequences: &[Vec<u32>],
    labels:    &[u8],
    device:    &B::Device,
) -> Option<f64> {
    if labels.is_empty() {
        return None;
    }
    let logits    = model.forward(tokens_tensor::<B>(sequences, device));
    let predicted = logits.argmax(1).flatten::<1>(0, 1);
    let correct: i64 = predicted
        .equal(labels_tensor::<B>(labels, device))
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    Some(correct as f64 / labels.len() as f64)
}
