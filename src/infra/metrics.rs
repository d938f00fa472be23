// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records one row per validation evaluation to a CSV file.
//
// An evaluation happens every `eval_every` training batches, so
// a run of 3 epochs over 120k rows at batch size 128 writes
// 3 × 10 = 30 rows.
//
// Metrics recorded per evaluation:
//   - epoch:        the epoch index (starts at 0)
//   - batch:        the batch index within that epoch
//   - train_loss:   cross-entropy of the batch just trained on
//   - val_accuracy: fraction of validation rows classified correctly
//
// Example CSV output:
//   epoch,batch,train_loss,val_accuracy
//   0,0,1.612300,0.509400
//   0,100,1.032100,0.579800
//   ...
//
// The file is appended to, so consecutive runs share one log.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

const HEADER: &str = "epoch,batch,train_loss,val_accuracy";

/// One validation evaluation during training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRecord {
    pub epoch: usize,
    pub batch: usize,

    /// Loss of the batch trained on right before this evaluation
    pub train_loss: f64,

    /// Range: [0.0, 1.0]
    pub val_accuracy: f64,
}

impl EvalRecord {
    pub fn new(epoch: usize, batch: usize, train_loss: f64, val_accuracy: f64) -> Self {
        Self { epoch, batch, train_loss, val_accuracy }
    }

    /// Returns true if this evaluation beat the previous best accuracy
    pub fn is_improvement(&self, best_accuracy: Option<f64>) -> bool {
        best_accuracy.map_or(true, |best| self.val_accuracy > best)
    }
}

/// Appends evaluation records to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the logger, writing the header if the file is new.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let csv_path = path.as_ref().to_path_buf();

        if let Some(dir) = csv_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one record.
    pub fn log(&self, r: &EvalRecord) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{},{:.6},{:.6}",
            r.epoch,
            r.batch,
            r.train_loss,
            r.val_accuracy,
        )?;

        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement() {
        let r = EvalRecord::new(0, 100, 1.2, 0.55);
        assert!(r.is_improvement(None));
        assert!(r.is_improvement(Some(0.5)));
        assert!(!r.is_improvement(Some(0.55)));
        assert!(!r.is_improvement(Some(0.6)));
    }

    #[test]
    fn test_header_once_then_rows_appended() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("eval.csv");

        let logger = MetricsLogger::new(&path).unwrap();
        logger.log(&EvalRecord::new(0, 0, 1.6123, 0.5094)).unwrap();

        // A second logger on the same file must not repeat the header
        let logger = MetricsLogger::new(&path).unwrap();
        logger.log(&EvalRecord::new(0, 100, 1.0321, 0.5798)).unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec![
            "epoch,batch,train_loss,val_accuracy",
            "0,0,1.612300,0.509400",
            "0,100,1.032100,0.579800",
        ]);
    }
}
