//! Paired clean/noisy dataset
//!
//! Indexes matched clean and noisy recordings by lexicographic filename
//! order and runs the full per-item pipeline: load, normalize,
//! pre-emphasize, segment. Items are independent and the dataset holds no
//! mutable state, so `get` may be called from any number of workers.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::audio::{load_and_normalize, pre_emphasize, EMPHASIS_COEFF};
use crate::config::PipelineConfig;
use crate::error::{DataError, Result};
use crate::segment::{ChunkSequence, Segmenter};

/// Clean and noisy chunk sequences for one item
pub type SamplePair = (ChunkSequence, ChunkSequence);

/// Matched clean/noisy file lists plus the shared pipeline parameters
#[derive(Debug, Clone)]
pub struct PairedDataset {
    cfg: Arc<PipelineConfig>,
    clean_files: Vec<PathBuf>,
    noisy_files: Vec<PathBuf>,
}

impl PairedDataset {
    /// Index two directories of same-named (or positionally corresponding)
    /// recordings
    ///
    /// Both listings are sorted by filename so pairing is deterministic.
    /// Mismatched file counts fail construction outright; truncating to the
    /// shorter side would silently train on misaligned pairs.
    pub fn new<P: AsRef<Path>>(
        cfg: Arc<PipelineConfig>,
        clean_dir: P,
        noisy_dir: P,
    ) -> Result<Self> {
        let clean_files = list_files(clean_dir.as_ref())?;
        let noisy_files = list_files(noisy_dir.as_ref())?;
        if clean_files.len() != noisy_files.len() {
            return Err(DataError::FileCountMismatch {
                clean: clean_files.len(),
                noisy: noisy_files.len(),
            });
        }
        Ok(Self {
            cfg,
            clean_files,
            noisy_files,
        })
    }

    /// Number of clean/noisy pairs
    pub fn len(&self) -> usize {
        self.clean_files.len()
    }

    /// Check if the dataset holds no pairs
    pub fn is_empty(&self) -> bool {
        self.clean_files.is_empty()
    }

    /// Load, normalize, emphasize, and segment both sides of one pair
    ///
    /// Both sides use identical segmentation parameters; producing
    /// different chunk counts means the recordings are misaligned and the
    /// item is aborted with [`DataError::PairLengthMismatch`].
    pub fn get(&self, index: usize) -> Result<SamplePair> {
        tracing::info!(
            index,
            total = self.len(),
            file = %self.clean_files[index].display(),
            "processing wav pair"
        );
        let clean = self.prepare(&self.clean_files[index])?;
        let noisy = self.prepare(&self.noisy_files[index])?;
        if clean.len() != noisy.len() {
            return Err(DataError::PairLengthMismatch {
                index,
                clean: clean.len(),
                noisy: noisy.len(),
            });
        }
        Ok((clean, noisy))
    }

    /// Run the single-file pipeline: read → normalize → emphasize → segment
    fn prepare(&self, path: &Path) -> Result<ChunkSequence> {
        let waveform = load_and_normalize(path)?;
        let emphasized = pre_emphasize(&waveform.samples, EMPHASIS_COEFF);
        let mode = self.cfg.segmentation_mode(waveform.sample_rate)?;
        let segmenter = Segmenter::new(self.cfg.window, waveform.sample_rate, mode)?;
        Ok(segmenter.segment(&emphasized))
    }
}

/// List regular files in a directory, sorted by filename
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| DataError::file_read(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DataError::file_read(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
