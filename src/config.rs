//! Pipeline configuration
//!
//! A statically declared, validated parameter set. The original training
//! scripts injected attributes by executing strings from a YAML file; here
//! every field is named, typed, and checked once at load time. The rest of
//! the crate receives the struct by shared reference and never re-parses it.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{DataError, Result};
use crate::segment::SegmentationMode;

/// All scalar parameters consumed by the preparation pipeline
///
/// Exactly one of `hop_per` / `tt_max` must be set; it selects the
/// segmentation strategy (overlap walk vs. fixed sub-chunking).
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Chunk window length in seconds
    pub window: f64,

    /// Overlap fraction in (0, 1]; selects overlap-mode segmentation.
    /// Only honored during training; eval always walks without overlap.
    #[serde(default)]
    pub hop_per: Option<f64>,

    /// Sub-chunk length in seconds; selects fixed-chunk segmentation
    #[serde(default)]
    pub tt_max: Option<f64>,

    /// Number of sample pairs per collated batch
    pub batch_size: usize,

    /// Worker threads for per-item loading inside a batch (0 = in-line)
    #[serde(default)]
    pub num_workers: usize,

    /// Seed for the epoch shuffle; omit for entropy-seeded shuffles
    #[serde(default)]
    pub seed: Option<u64>,

    /// Training split: shuffle, drop incomplete batches, allow overlap
    #[serde(default = "default_train")]
    pub train: bool,

    /// Validation split: overrides `train`, forcing eval-style
    /// segmentation and collation
    #[serde(default)]
    pub val: bool,
}

fn default_train() -> bool {
    true
}

/// YAML layout used by the original training scripts: one `params:` mapping
#[derive(Debug, Deserialize)]
struct ConfigFile {
    params: PipelineConfig,
}

impl PipelineConfig {
    /// Load and validate a configuration from a `params:`-keyed YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|e| DataError::file_read(path, e))?;
        let file: ConfigFile = serde_yaml::from_str(&text)
            .map_err(|e| DataError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let cfg = file.params;
        cfg.validate()?;
        Ok(Arc::new(cfg))
    }

    /// Check parameter ranges and the mode selection
    pub fn validate(&self) -> Result<()> {
        if !(self.window.is_finite() && self.window > 0.0) {
            return Err(DataError::InvalidConfig(format!(
                "window must be a positive number of seconds, got {}",
                self.window
            )));
        }
        match (self.hop_per, self.tt_max) {
            (Some(h), None) => {
                if !(h > 0.0 && h <= 1.0) {
                    return Err(DataError::InvalidConfig(format!(
                        "hop_per must lie in (0, 1], got {h}"
                    )));
                }
            }
            (None, Some(t)) => {
                if !(t.is_finite() && t > 0.0) {
                    return Err(DataError::InvalidConfig(format!(
                        "tt_max must be a positive number of seconds, got {t}"
                    )));
                }
            }
            (Some(_), Some(_)) => {
                return Err(DataError::InvalidConfig(
                    "hop_per and tt_max are mutually exclusive".to_string(),
                ));
            }
            (None, None) => {
                return Err(DataError::InvalidConfig(
                    "one of hop_per or tt_max is required".to_string(),
                ));
            }
        }
        if self.batch_size == 0 {
            return Err(DataError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether this configuration selects the training split
    pub fn is_train(&self) -> bool {
        self.train && !self.val
    }

    /// Resolve the segmentation strategy for a signal's sampling rate
    pub fn segmentation_mode(&self, sample_rate: u32) -> Result<SegmentationMode> {
        match (self.hop_per, self.tt_max) {
            (Some(hop), None) => Ok(SegmentationMode::Overlap {
                // Eval walks the signal without overlap.
                hop_fraction: if self.is_train() { hop } else { 1.0 },
            }),
            (None, Some(tt)) => Ok(SegmentationMode::FixedChunk {
                chunk_samples: (tt * sample_rate as f64) as usize,
            }),
            _ => Err(DataError::InvalidConfig(
                "exactly one of hop_per or tt_max must be set".to_string(),
            )),
        }
    }
}
