// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses the command line with clap, picks the Burn backend,
// and hands a TrainConfig to the application layer. All the
// work happens in Layer 2.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use burn::backend::{
    ndarray::NdArrayDevice,
    wgpu::WgpuDevice,
    Autodiff, NdArray, Wgpu,
};
use clap::Parser;
use commands::TrainArgs;

use crate::application::train_use_case::{BackendKind, PipelineSummary, TrainUseCase};

#[derive(Parser, Debug)]
#[command(
    name = "phrase-sentiment",
    version,
    about = "Train a BiLSTM sentiment classifier on GloVe embeddings and write test predictions."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: TrainArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let use_case = TrainUseCase::new(self.args.into());
        let backend  = use_case.config().backend;

        tracing::info!("Training on {:?} backend", backend);
        let summary = match backend {
            BackendKind::Wgpu => {
                let device = WgpuDevice::default();
                tracing::info!("Using WGPU device: {:?}", device);
                use_case.execute::<Autodiff<Wgpu>>(&device)?
            }
            BackendKind::Ndarray => {
                use_case.execute::<Autodiff<NdArray>>(&NdArrayDevice::Cpu)?
            }
        };

        print_summary(&summary);
        Ok(())
    }
}

fn print_summary(s: &PipelineSummary) {
    println!(
        "Rows: {} train / {} validation / {} test | vocabulary {} ({} with vectors)",
        s.train_rows, s.validation_rows, s.test_rows, s.vocabulary_size, s.embedded_tokens,
    );
    match s.last_accuracy {
        Some(acc) => println!("Final validation accuracy: {:.4} ({} evaluations)", acc, s.evaluations),
        None      => println!("No validation rows, accuracy not measured"),
    }
}
