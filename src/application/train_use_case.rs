// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full pipeline in order:
//
//   Step 1: Load labelled + test TSVs        (Layer 4 - data)
//   Step 2: Split, tokenize, load GloVe,
//           encode every split               (Layer 4 - data)
//   Step 3: Open the metrics log             (Layer 6 - infra)
//   Step 4: Run the training loop            (Layer 5 - ml)
//   Step 5: Predict the test split           (Layer 5 - ml)
//   Step 6: Write the submission             (Layer 6 - infra)
//
// Reference: Burn Book §5 (Training)

use anyhow::{ensure, Result};
use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};
use serde::{Deserialize, Serialize};

use crate::data::{
    assembler::DatasetAssembler,
    embedding::load_pretrained,
    loader::{load_labeled, load_test},
    vocab::WhitespaceTokenizer,
};
use crate::domain::phrase::SENTIMENT_CLASSES;
use crate::infra::{metrics::MetricsLogger, submission::write_submission};
use crate::ml::{inferencer::predict, trainer::run_training};

/// Which Burn backend runs the tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Wgpu,
    Ndarray,
}

// ─── Training Configuration ──────────────────────────────────────────────────
// Paths and hyperparameters for one run. The defaults reproduce
// the fixed layout: ./glove, ./dataset, lr 0.01, 3 epochs, max
// length 16, batch 128, 50-dim GloVe, hidden 50, one layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub glove_path:      String,
    pub train_path:      String,
    pub test_path:       String,
    pub submission_path: String,
    pub metrics_path:    Option<String>,
    pub backend:         BackendKind,
    pub train_rows:      usize,
    pub max_length:      usize,
    pub batch_size:      usize,
    pub epochs:          usize,
    pub lr:              f64,
    pub embedding_dim:   usize,
    pub hidden_size:     usize,
    pub num_layers:      usize,
    pub num_classes:     usize,
    pub projection_size: usize,
    pub dropout:         f64,
    pub eval_every:      usize,
    pub seed:            u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            glove_path:      "./glove/glove.6B.50d.txt".to_string(),
            train_path:      "./dataset/train.tsv".to_string(),
            test_path:       "./dataset/test.tsv".to_string(),
            submission_path: "./dataset/submission.csv".to_string(),
            metrics_path:    None,
            backend:         BackendKind::Wgpu,
            train_rows:      120_000,
            max_length:      16,
            batch_size:      128,
            epochs:          3,
            lr:              0.01,
            embedding_dim:   50,
            hidden_size:     50,
            num_layers:      1,
            num_classes:     SENTIMENT_CLASSES,
            projection_size: 32,
            dropout:         0.5,
            eval_every:      100,
            seed:            42,
        }
    }
}

impl TrainConfig {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_length > 0,    "max_length must be at least 1");
        ensure!(self.batch_size > 0,    "batch_size must be at least 1");
        ensure!(self.eval_every > 0,    "eval_every must be at least 1");
        ensure!(self.embedding_dim > 0, "embedding_dim must be at least 1");
        ensure!(self.hidden_size > 0,   "hidden_size must be at least 1");
        ensure!(self.num_layers > 0,    "num_layers must be at least 1");
        ensure!(self.projection_size > 0, "projection_size must be at least 1");
        ensure!(
            self.num_classes >= SENTIMENT_CLASSES,
            "num_classes must cover all {SENTIMENT_CLASSES} sentiment labels"
        );
        ensure!((0.0..1.0).contains(&self.dropout), "dropout must be in [0, 1)");
        ensure!(self.lr > 0.0, "lr must be positive");
        Ok(())
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub train_rows:      usize,
    pub validation_rows: usize,
    pub test_rows:       usize,
    pub vocabulary_size: usize,
    pub embedded_tokens: usize,
    pub evaluations:     usize,
    pub last_accuracy:   Option<f64>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Execute the full pipeline end to end on backend `B`.
    pub fn execute<B: AutodiffBackend>(&self, device: &B::Device) -> Result<PipelineSummary> {
        let cfg = &self.config;
        cfg.validate()?;
        tracing::debug!("Resolved config: {}", serde_json::to_string(cfg)?);

        // ── Step 1: Load TSV files ────────────────────────────────────────────
        let labeled = load_labeled(&cfg.train_path)?;
        let test    = load_test(&cfg.test_path)?;

        // ── Step 2: Split, tokenize, embed, encode ────────────────────────────
        let tokenizer = WhitespaceTokenizer;
        let data = DatasetAssembler::new(&tokenizer, cfg.max_length, cfg.train_rows)
            .assemble(labeled, &test, |vocabulary| {
                load_pretrained(&cfg.glove_path, vocabulary, cfg.embedding_dim)
            })?;

        // ── Step 3: Metrics log (optional) ────────────────────────────────────
        let metrics = cfg
            .metrics_path
            .as_ref()
            .map(|path| MetricsLogger::new(path))
            .transpose()?;
        if let Some(logger) = &metrics {
            tracing::info!("Evaluation metrics → {}", logger.csv_path().display());
        }

        // ── Step 4: Train ─────────────────────────────────────────────────────
        let outcome = run_training::<B>(
            cfg,
            &data.embeddings,
            &data.train,
            &data.validation,
            metrics.as_ref(),
            device,
        )?;

        // ── Step 5: Predict the test split in evaluation mode ─────────────────
        let model_valid = outcome.model.valid();
        let predictions = predict(&model_valid, &data.test, device);

        // ── Step 6: Write submission ──────────────────────────────────────────
        write_submission(&cfg.submission_path, &test, &predictions)?;

        Ok(PipelineSummary {
            train_rows:      data.train.len(),
            validation_rows: data.validation.len(),
            test_rows:       test.len(),
            vocabulary_size: data.vocabulary_size,
            embedded_tokens: data.embeddings.len() - 1,
            evaluations:     outcome.evaluations.len(),
            last_accuracy:   outcome.last_accuracy(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::test_support::backend_lock;
    use std::{fs, path::Path};

    type TestBackend = burn::backend::Autodiff<burn::backend::NdArray>;

    const TRAIN: &str = "PhraseId\tSentenceId\tPhrase\tSentiment\n\
                         1\t1\tgood movie\t4\n\
                         2\t1\tbad movie\t0\n\
                         3\t2\tgood\t3\n\
                         4\t2\tbad\t1\n\
                         5\t3\tmovie\t2\n\
                         6\t3\tgood bad movie\t2\n";

    const TEST: &str = "PhraseId\tSentenceId\tPhrase\n\
                        10\t9\tgood movie\n\
                        11\t9\tawful\n\
                        12\t9\t\n";

    const GLOVE: &str = "good 0.5 0.5\nbad -0.5 -0.5\nmovie 0.1 0.2\nawful -1 -1\n";

    fn write_inputs(dir: &Path) -> TrainConfig {
        fs::write(dir.join("train.tsv"), TRAIN).unwrap();
        fs::write(dir.join("test.tsv"), TEST).unwrap();
        fs::write(dir.join("glove.txt"), GLOVE).unwrap();

        let path = |name: &str| dir.join(name).to_string_lossy().into_owned();
        TrainConfig {
            glove_path:      path("glove.txt"),
            train_path:      path("train.tsv"),
            test_path:       path("test.tsv"),
            submission_path: path("submission.csv"),
            metrics_path:    Some(path("metrics.csv")),
            backend:         BackendKind::Ndarray,
            train_rows:      4,
            max_length:      3,
            batch_size:      2,
            epochs:          1,
            embedding_dim:   2,
            hidden_size:     4,
            eval_every:      1,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_defaults_match_fixed_pipeline() {
        let cfg = TrainConfig::default();
        assert_eq!(cfg.glove_path, "./glove/glove.6B.50d.txt");
        assert_eq!(cfg.submission_path, "./dataset/submission.csv");
        assert_eq!((cfg.max_length, cfg.batch_size, cfg.epochs), (16, 128, 3));
        assert_eq!((cfg.embedding_dim, cfg.hidden_size, cfg.num_layers, cfg.num_classes), (50, 50, 1, 5));
        assert_eq!(cfg.train_rows, 120_000);
        assert!((cfg.lr - 0.01).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let bad = TrainConfig { max_length: 0, ..TrainConfig::default() };
        assert!(bad.validate().is_err());
        let bad = TrainConfig { batch_size: 0, ..TrainConfig::default() };
        assert!(bad.validate().is_err());
        let bad = TrainConfig { num_classes: 3, ..TrainConfig::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_config_json_round_trip_keeps_backend_name() {
        let json = serde_json::to_string(&TrainConfig::default()).unwrap();
        assert!(json.contains("\"backend\":\"wgpu\""));
        let back: TrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.backend, BackendKind::Wgpu);
    }

    #[test]
    fn test_end_to_end_writes_submission() {
        let _guard = backend_lock();
        let dir    = tempfile::tempdir().unwrap();
        let cfg    = write_inputs(dir.path());
        let device = Default::default();

        let summary = TrainUseCase::new(cfg.clone()).execute::<TestBackend>(&device).unwrap();

        assert_eq!(summary.train_rows, 4);
        assert_eq!(summary.validation_rows, 2);
        assert_eq!(summary.test_rows, 3);
        // "awful" only appears in the test file
        assert_eq!(summary.vocabulary_size, 3);
        assert_eq!(summary.embedded_tokens, 3);
        assert_eq!(summary.evaluations, 2);

        let submission = fs::read_to_string(&cfg.submission_path).unwrap();
        let lines: Vec<&str> = submission.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "PhraseId,Sentiment");
        for (line, id) in lines[1..].iter().zip(["10", "11", "12"]) {
            let (phrase_id, label) = line.split_once(',').unwrap();
            assert_eq!(phrase_id, id);
            assert!(label.parse::<u8>().unwrap() < 5);
        }

        let metrics = fs::read_to_string(cfg.metrics_path.unwrap()).unwrap();
        assert_eq!(metrics.lines().count(), 3);
    }

    #[test]
    fn test_missing_glove_file_fails() {
        let _guard = backend_lock();
        let dir    = tempfile::tempdir().unwrap();
        let cfg    = TrainConfig {
            glove_path: dir.path().join("missing.txt").to_string_lossy().into_owned(),
            ..write_inputs(dir.path())
        };
        let device = Default::default();

        let err = TrainUseCase::new(cfg).execute::<TestBackend>(&device).unwrap_err();
        assert!(format!("{err:#}").contains("missing.txt"));
    }
}
