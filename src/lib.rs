//! # se-dataprep
//!
//! Data preparation for paired clean/noisy speech-enhancement training:
//! reads matched recordings, normalizes and pre-emphasizes them, segments
//! each waveform into fixed-length chunks, and collates variable-length
//! chunk sequences into rectangular batch tensors.
//!
//! ## Pipeline
//!
//! ```text
//! WAV pair → normalize → pre-emphasize → segment → collate → tensors
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use candle_core::Device;
//! use se_dataprep::{BatchLoader, PairedDataset, PipelineConfig};
//!
//! # fn run() -> se_dataprep::Result<()> {
//! let cfg = PipelineConfig::from_yaml_file("config.yaml")?;
//! let dataset = PairedDataset::new(cfg.clone(), "data/clean", "data/noisy")?;
//! let loader = BatchLoader::new(cfg, dataset, Device::Cpu)?;
//!
//! for batch in loader.epoch(0) {
//!     let batch = batch?;
//!     // batch.clean / batch.noisy: [batch, frames, time, 1]
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The batch tensors are handed to an external trainer; model code, losses,
//! and device placement live outside this crate.

#![warn(missing_docs)]

pub mod audio;
pub mod collate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod segment;

/// Re-exports for convenience
pub use audio::{de_emphasize, load_and_normalize, pre_emphasize, Waveform, EMPHASIS_COEFF};
pub use collate::{collate, Batch};
pub use config::PipelineConfig;
pub use dataset::{PairedDataset, SamplePair};
pub use error::{DataError, Result};
pub use loader::BatchLoader;
pub use segment::{Chunk, ChunkSequence, SegmentationMode, Segmenter};
