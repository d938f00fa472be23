// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Every path and hyperparameter of a run, as a --flag.
// The defaults are the fixed layout the pipeline has always
// used, so running the binary with no flags from a directory
// holding ./glove and ./dataset just works.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, ValueEnum};
use crate::application::train_use_case::{BackendKind, TrainConfig};

/// Tensor backend choice on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    /// GPU through wgpu (Vulkan / Metal / DX12)
    Wgpu,
    /// CPU through ndarray
    Ndarray,
}

impl From<BackendArg> for BackendKind {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Wgpu    => BackendKind::Wgpu,
            BackendArg::Ndarray => BackendKind::Ndarray,
        }
    }
}

/// All arguments for a training run.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Pretrained GloVe vectors, one token per line
    #[arg(long, default_value = "./glove/glove.6B.50d.txt")]
    pub glove_path: String,

    /// Labelled phrases (tab-separated, needs Phrase and Sentiment)
    #[arg(long, default_value = "./dataset/train.tsv")]
    pub train_path: String,

    /// Unlabelled phrases (tab-separated, needs SentenceId and Phrase)
    #[arg(long, default_value = "./dataset/test.tsv")]
    pub test_path: String,

    /// Where the predictions CSV is written
    #[arg(long, default_value = "./dataset/submission.csv")]
    pub submission_path: String,

    /// Optional CSV log of every validation evaluation
    #[arg(long)]
    pub metrics_path: Option<String>,

    /// Tensor backend
    #[arg(long, value_enum, default_value_t = BackendArg::Wgpu)]
    pub backend: BackendArg,

    /// Labelled rows used for training; the rest validate
    #[arg(long, default_value_t = 120_000)]
    pub train_rows: usize,

    /// Every phrase is truncated or zero-padded to this many tokens
    #[arg(long, default_value_t = 16)]
    pub max_length: usize,

    /// Phrases per training step
    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    /// Full passes over the training rows
    #[arg(long, default_value_t = 3)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.01)]
    pub lr: f64,

    /// Width of the pretrained vectors (must match the GloVe file)
    #[arg(long, default_value_t = 50)]
    pub embedding_dim: usize,

    /// LSTM hidden size per direction
    #[arg(long, default_value_t = 50)]
    pub hidden_size: usize,

    /// Stacked bidirectional LSTM layers
    #[arg(long, default_value_t = 1)]
    pub num_layers: usize,

    /// Width of the hidden projection before the classifier
    #[arg(long, default_value_t = 32)]
    pub projection_size: usize,

    /// Dropout probability after the hidden projection
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,

    /// Run a validation pass every N training batches
    #[arg(long, default_value_t = 100)]
    pub eval_every: usize,

    /// Seeds weight initialisation, dropout and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            glove_path:      a.glove_path,
            train_path:      a.train_path,
            test_path:       a.test_path,
            submission_path: a.submission_path,
            metrics_path:    a.metrics_path,
            backend:         a.backend.into(),
            train_rows:      a.train_rows,
            max_length:      a.max_length,
            batch_size:      a.batch_size,
            epochs:          a.epochs,
            lr:              a.lr,
            embedding_dim:   a.embedding_dim,
            hidden_size:     a.hidden_size,
            num_layers:      a.num_layers,
            projection_size: a.projection_size,
            dropout:         a.dropout,
            eval_every:      a.eval_every,
            seed:            a.seed,
            ..TrainConfig::default()
        }
    }
}
