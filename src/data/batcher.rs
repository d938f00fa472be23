// ============================================================
// Layer 4 — Sentiment Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<SentimentItem>
// into tensors.
//
// How batching works here:
//   Input:  Vec of N SentimentItems, each with L token indices
//   Output: SentimentBatch with tokens [N, L] and labels [N]
//
//   We flatten all token indices into one long Vec, then reshape:
//   [s1_t1, ..., s1_tL, s2_t1, ..., sN_tL] → [N, L]
//
// Every sequence was padded to the same length by the encoder,
// so no masks or dynamic padding are needed.
//
// The same flatten-and-reshape helpers build the full
// validation and test tensors, which are fed to the model in
// one piece rather than through a DataLoader.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::SentimentItem;

/// A batch of encoded phrases ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct SentimentBatch<B: Backend> {
    /// Token indices — shape: [batch_size, max_length]
    pub tokens: Tensor<B, 2, Int>,

    /// Class labels — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct SentimentBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SentimentBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<SentimentItem, SentimentBatch<B>> for SentimentBatcher<B> {
    fn batch(&self, items: Vec<SentimentItem>) -> SentimentBatch<B> {
        let labels: Vec<u8> = items.iter().map(|item| item.label).collect();
        let tokens: Vec<Vec<u32>> = items.into_iter().map(|item| item.tokens).collect();

        SentimentBatch {
            tokens: tokens_tensor::<B>(&tokens, &self.device),
            labels: labels_tensor::<B>(&labels, &self.device),
        }
    }
}

/// Stack equal-length sequences into a [n, len] Int tensor.
pub fn tokens_tensor<B: Backend>(sequences: &[Vec<u32>], device: &B::Device) -> Tensor<B, 2, Int> {
    let seq_len = sequences.first().map_or(0, Vec::len);
    let flat: Vec<i64> = sequences
        .iter()
        .flat_map(|seq| seq.iter().map(|&t| t as i64))
        .collect();

    let data = TensorData::new(flat, [sequences.len(), seq_len]).convert::<B::IntElem>();
    Tensor::from_data(data, device)
}

/// Labels as a [n] Int tensor.
pub fn labels_tensor<B: Backend>(labels: &[u8], device: &B::Device) -> Tensor<B, 1, Int> {
    let flat: Vec<i64> = labels.iter().map(|&l| l as i64).collect();
    let data = TensorData::new(flat, [labels.len()]).convert::<B::IntElem>();
    Tensor::from_data(data, device)
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_values() {
        let device  = Default::default();
        let batcher = SentimentBatcher::<TestBackend>::new(device);
        let batch   = batcher.batch(vec![
            SentimentItem { tokens: vec![1, 3, 0], label: 4 },
            SentimentItem { tokens: vec![2, 3, 0], label: 0 },
        ]);

        assert_eq!(batch.tokens.dims(), [2, 3]);
        assert_eq!(batch.labels.dims(), [2]);

        let tokens: Vec<i64> = batch.tokens.into_data().iter::<i64>().collect();
        assert_eq!(tokens, vec![1, 3, 0, 2, 3, 0]);
        let labels: Vec<i64> = batch.labels.into_data().iter::<i64>().collect();
        assert_eq!(labels, vec![4, 0]);
    }

    #[test]
    fn test_tokens_tensor_row_major() {
        let device = Default::default();
        let t = tokens_tensor::<TestBackend>(&[vec![5, 6], vec![7, 8], vec![9, 0]], &device);
        assert_eq!(t.dims(), [3, 2]);
        let values: Vec<i64> = t.into_data().iter::<i64>().collect();
        assert_eq!(values, vec![5, 6, 7, 8, 9, 0]);
    }
}
