use anyhow::{ensure, Result};
use burn::{
    module::Param,
    nn::{
        loss::CrossEntropyLossConfig,
        lstm::{BiLstm, BiLstmConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::TensorData,
};

use crate::data::embedding::PretrainedEmbeddings;

// #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct SentimentRnnConfig {
    pub vocab_size:    usize,
    pub embedding_dim: usize,
    pub hidden_size:   usize,
    pub num_classes:   usize,
    #[config(default = 1)]
    pub num_layers:    usize,
    #[config(default = 32)]
    pub projection_size: usize,
    #[config(default = 0.5)]
    pub dropout:       f64,
}

impl SentimentRnnConfig {
    /// Randomly initialised embeddings.
    pub fn init<B: Backend>(&self, device: &B::Device) -> SentimentRnn<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let encoder: Vec<BiLstm<B>> = (0..self.num_layers.max(1))
            .map(|layer| {
                // Layers after the first read both directions of the one below.
                let d_input = if layer == 0 { self.embedding_dim } else { 2 * self.hidden_size };
                BiLstmConfig::new(d_input, self.hidden_size, true).init(device)
            })
            .collect();
        // First and last time steps, each carrying both directions.
        let projection = LinearConfig::new(4 * self.hidden_size, self.projection_size).init(device);
        let classifier = LinearConfig::new(self.projection_size, self.num_classes).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        SentimentRnn { embedding, encoder, projection, dropout, classifier }
    }

    /// Embeddings copied from a pretrained table; they stay trainable.
    pub fn init_with_embeddings<B: Backend>(
        &self,
        weights: Tensor<B, 2>,
        device:  &B::Device,
    ) -> Result<SentimentRnn<B>> {
        let [rows, dim] = weights.dims();
        ensure!(
            rows == self.vocab_size && dim == self.embedding_dim,
            "embedding table is [{rows}, {dim}], model expects [{}, {}]",
            self.vocab_size,
            self.embedding_dim
        );
        let mut model = self.init(device);
        model.embedding.weight = Param::from_tensor(weights);
        Ok(model)
    }
}

/// Upload a pretrained table as a [rows, dim] float tensor.
pub fn pretrained_weights<B: Backend>(
    embeddings: &PretrainedEmbeddings,
    device:     &B::Device,
) -> Tensor<B, 2> {
    let data = TensorData::new(embeddings.table().to_vec(), [embeddings.len(), embeddings.dim()])
        .convert::<B::FloatElem>();
    Tensor::from_data(data, device)
}

#[derive(Module, Debug)]
pub struct SentimentRnn<B: Backend> {
    pub embedding:  Embedding<B>,
    pub encoder:    Vec<BiLstm<B>>,
    pub projection: Linear<B>,
    pub dropout:    Dropout,
    pub classifier: Linear<B>,
}

impl<B: Backend> SentimentRnn<B> {
    /// tokens: [batch, seq_len] → logits: [batch, num_classes]
    pub fn forward(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, seq_len] = tokens.dims();

        let mut x = self.embedding.forward(tokens); // [batch, seq_len, embedding_dim]
        for layer in &self.encoder {
            let (output, _state) = layer.forward(x, None);
            x = output;
        }
        let width = x.dims()[2]; // 2 * hidden_size

        let first = x.clone()
            .slice([0..batch_size, 0..1, 0..width])
            .reshape([batch_size, width]);
        let last = x
            .slice([0..batch_size, seq_len - 1..seq_len, 0..width])
            .reshape([batch_size, width]);
        let encoded = Tensor::cat(vec![first, last], 1); // [batch, 2 * width]

        // Dropout is a no-op outside the autodiff backend, i.e. after model.valid().
        let x = self.dropout.forward(self.projection.forward(encoded));
        self.classifier.forward(x)
    }

    pub fn forward_loss(
        &self,
        tokens: Tensor<B, 2, Int>,
        labels: Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(tokens);
        let ce = CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(logits.clone(), labels);
        (loss, logits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::module::AutodiffModule;
    use crate::data::{batcher::tokens_tensor, embedding::read_pretrained};
    use crate::ml::test_support::backend_lock;

    type TestBackend = burn::backend::NdArray;

    const GLOVE: &str = "good 0.5 -0.5\nbad -1.0 1.0\nmovie 0.25 0.75\n";

    fn embeddings() -> PretrainedEmbeddings {
        let vocab = ["good", "bad", "movie"].iter().map(|w| w.to_string()).collect();
        read_pretrained(GLOVE.as_bytes(), &vocab, 2).unwrap()
    }

    fn config() -> SentimentRnnConfig {
        SentimentRnnConfig::new(4, 2, 3, 5)
    }

    #[test]
    fn test_logits_shape() {
        let _guard = backend_lock();
        let device = Default::default();
        let model: SentimentRnn<TestBackend> = config().init(&device);
        let tokens = tokens_tensor::<TestBackend>(&[vec![1, 3, 0], vec![2, 3, 0]], &device);
        assert_eq!(model.forward(tokens).dims(), [2, 5]);
    }

    #[test]
    fn test_stacked_layers_forward() {
        let _guard = backend_lock();
        let device = Default::default();
        let model: SentimentRnn<TestBackend> = config().with_num_layers(2).init(&device);
        assert_eq!(model.encoder.len(), 2);
        let tokens = tokens_tensor::<TestBackend>(&[vec![1, 2, 3, 0]], &device);
        assert_eq!(model.forward(tokens).dims(), [1, 5]);
    }

    #[test]
    fn test_embedding_starts_from_pretrained_table() {
        let _guard = backend_lock();
        let device = Default::default();
        let e = embeddings();
        let model: SentimentRnn<TestBackend> = config()
            .init_with_embeddings(pretrained_weights(&e, &device), &device)
            .unwrap();

        let weights: Vec<f32> = model.embedding.weight.val().into_data().iter::<f32>().collect();
        assert_eq!(weights, e.table().to_vec());
        assert_eq!(&weights[0..2], &[0.0f32, 0.0][..]);
    }

    #[test]
    fn test_mismatched_table_is_rejected() {
        let _guard = backend_lock();
        let device = Default::default();
        let e = embeddings();
        let result = SentimentRnnConfig::new(10, 2, 3, 5)
            .init_with_embeddings::<TestBackend>(pretrained_weights(&e, &device), &device);
        assert!(result.is_err());
    }

    #[test]
    fn test_seeded_initial_outputs_are_reproducible() {
        let _guard = backend_lock();
        let device = Default::default();
        let e = embeddings();
        let sequences = vec![vec![1, 3, 0], vec![2, 3, 0], vec![3, 0, 0], vec![1, 2, 3]];

        let run = || {
            TestBackend::seed(7);
            let model: SentimentRnn<TestBackend> = config()
                .init_with_embeddings(pretrained_weights(&e, &device), &device)
                .unwrap();
            model.forward(tokens_tensor::<TestBackend>(&sequences, &device)).into_data()
        };

        let first  = run();
        let second = run();
        first.assert_eq(&second, true);
    }

    #[test]
    fn test_dropout_is_off_in_evaluation_mode() {
        let _guard = backend_lock();
        type TrainBackend = burn::backend::Autodiff<TestBackend>;
        let device = Default::default();
        let model: SentimentRnn<TrainBackend> = config().with_dropout(0.5).init(&device);
        let model = model.valid();
        let sequences = vec![vec![1, 3, 0], vec![2, 3, 0], vec![3, 0, 0], vec![1, 2, 3]];

        let first  = model.forward(tokens_tensor::<TestBackend>(&sequences, &device)).into_data();
        let second = model.forward(tokens_tensor::<TestBackend>(&sequences, &device)).into_data();
        first.assert_eq(&second, true);
    }

    #[test]
    fn test_loss_is_finite_and_positive() {
        let _guard = backend_lock();
        let device = Default::default();
        let model: SentimentRnn<TestBackend> = config().init(&device);
        let tokens = tokens_tensor::<TestBackend>(&[vec![1, 3, 0], vec![2, 3, 0]], &device);
        let labels = crate::data::batcher::labels_tensor::<TestBackend>(&[4, 0], &device);
        let (loss, logits) = model.forward_loss(tokens, labels);
        let loss: f32 = loss.into_scalar();
        assert!(loss.is_finite() && loss > 0.0);
        assert_eq!(logits.dims(), [2, 5]);
    }
}
