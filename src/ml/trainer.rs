// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch training with Adam and a periodic validation pass.
//
// Per batch:   forward → cross-entropy → backward → Adam step
// Every `eval_every` batches (0, 100, 200, ... within an epoch):
//   model.valid() drops to the inner backend, which disables
//   dropout, and the whole validation split is scored in one
//   forward pass.
//
// No checkpoints, no early stopping, fixed learning rate.
//
// Key Burn insight:
//   - Training uses B (Autodiff<...>) for gradients
//   - model.valid() returns the model on B::InnerBackend
//   - B::InnerBackend shares B's device, so validation tensors
//     go on the same device without conversion
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{ensure, Result};
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::{backend::AutodiffBackend, ElementConversion},
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::SentimentBatcher, dataset::LabeledSplit, embedding::PretrainedEmbeddings};
use crate::infra::metrics::{EvalRecord, MetricsLogger};
use crate::ml::inferencer::accuracy;
use crate::ml::model::{pretrained_weights, SentimentRnn, SentimentRnnConfig};

/// The trained model plus every validation evaluation made on the way.
pub struct TrainingOutcome<B: AutodiffBackend> {
    pub model:       SentimentRnn<B>,
    pub evaluations: Vec<EvalRecord>,
}

impl<B: AutodiffBackend> TrainingOutcome<B> {
    /// Accuracy of the most recent validation pass.
    pub fn last_accuracy(&self) -> Option<f64> {
        self.evaluations.last().map(|r| r.val_accuracy)
    }
}

/// Adam with epsilon 1e-8 rather than burn's 1e-5 default.
pub fn optimizer_config() -> AdamConfig {
    AdamConfig::new().with_epsilon(1e-8)
}

pub fn run_training<B: AutodiffBackend>(
    cfg:        &TrainConfig,
    embeddings: &PretrainedEmbeddings,
    train:      &LabeledSplit,
    validation: &LabeledSplit,
    metrics:    Option<&MetricsLogger>,
    device:     &B::Device,
) -> Result<TrainingOutcome<B>> {
    ensure!(!train.is_empty(), "training split is empty");

    B::seed(cfg.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = SentimentRnnConfig::new(
        embeddings.len(), cfg.embedding_dim, cfg.hidden_size, cfg.num_classes,
    )
    .with_num_layers(cfg.num_layers)
    .with_projection_size(cfg.projection_size)
    .with_dropout(cfg.dropout);
    let mut model: SentimentRnn<B> =
        model_cfg.init_with_embeddings(pretrained_weights(embeddings, device), device)?;
    tracing::info!(
        "Model ready: embedding [{}, {}], {} BiLSTM layer(s) of {}, {} params",
        embeddings.len(), cfg.embedding_dim, cfg.num_layers, cfg.hidden_size,
        model.num_params(),
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = optimizer_config().init();

    // ── Training data loader (shuffled every epoch) ───────────────────────────
    let train_loader = DataLoaderBuilder::new(SentimentBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train.to_dataset());

    if validation.is_empty() {
        tracing::warn!("Validation split is empty; accuracy will not be reported");
    }

    let mut evaluations   = Vec::new();
    let mut best_accuracy = None;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 0..cfg.epochs {
        let mut batches = 0usize;

        for (batch_idx, batch) in train_loader.iter().enumerate() {
            let (loss, _) = model.forward_loss(batch.tokens, batch.labels);
            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
            batches += 1;

            if batch_idx % cfg.eval_every != 0 {
                continue;
            }

            // ── Validation pass (dropout disabled) ────────────────────────────
            let model_valid = model.valid();
            let Some(val_accuracy) =
                accuracy(&model_valid, &validation.tokens, &validation.labels, device)
            else {
                tracing::debug!("epoch {epoch} batch {batch_idx}: train loss {loss_val:.4}");
                continue;
            };

            println!(
                "Epoch: {} | train loss: {:.4} | validation accuracy: {:.4}",
                epoch, loss_val, val_accuracy,
            );

            let record = EvalRecord::new(epoch, batch_idx, loss_val, val_accuracy);
            if record.is_improvement(best_accuracy) {
                best_accuracy = Some(val_accuracy);
                tracing::debug!("New best validation accuracy {:.4}", val_accuracy);
            }
            if let Some(logger) = metrics {
                logger.log(&record)?;
            }
            evaluations.push(record);
        }

        tracing::info!("Epoch {} done ({} batches)", epoch, batches);
    }

    if let Some(best) = best_accuracy {
        tracing::info!("Best validation accuracy: {:.4}", best);
    }
    tracing::info!("Training complete!");

    Ok(TrainingOutcome { model, evaluations })
}
