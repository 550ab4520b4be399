//! Error types for the data preparation pipeline
//!
//! Every fatal condition aborts the current item or batch and surfaces to
//! the caller; nothing in this crate retries or silently swallows an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing paired clean/noisy speech data
#[derive(Error, Debug)]
pub enum DataError {
    /// The input file is missing, unreadable, or not a decodable WAV
    #[error("failed to read {path}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    /// The signal has zero energy after mean removal; normalizing would
    /// divide by zero and flood the pipeline with non-finite values
    #[error("degenerate signal: {0}")]
    DegenerateSignal(String),

    /// A tensor entry point received something other than a rank-1 signal
    /// or a rank-2 single-column signal
    #[error("invalid signal dimensions {dims:?}, expected rank-1 or single-column rank-2")]
    InvalidDimension { dims: Vec<usize> },

    /// Clean and noisy segmentation produced different chunk counts for
    /// the same item, which signals a data-alignment or configuration bug
    #[error("item {index}: clean/noisy chunk counts differ ({clean} vs {noisy})")]
    PairLengthMismatch {
        index: usize,
        clean: usize,
        noisy: usize,
    },

    /// Clean and noisy directories hold different numbers of files
    #[error("clean/noisy file counts differ ({clean} vs {noisy}); refusing to pair by truncation")]
    FileCountMismatch { clean: usize, noisy: usize },

    /// Collation received an empty or heterogeneous batch
    #[error("unsupported batch element: {0}")]
    UnsupportedBatchElement(String),

    /// Configuration failed validation at load time
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Worker pool construction failed
    #[error("worker pool error")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Tensor construction or manipulation failed
    #[error(transparent)]
    Tensor(#[from] candle_core::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, DataError>;

impl DataError {
    /// Build a [`DataError::FileRead`] from any displayable cause
    pub fn file_read(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        DataError::FileRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_read_display() {
        let err = DataError::file_read("/tmp/missing.wav", "no such file");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.wav"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_pair_length_mismatch_display() {
        let err = DataError::PairLengthMismatch {
            index: 7,
            clean: 12,
            noisy: 11,
        };
        let msg = err.to_string();
        assert!(msg.contains("item 7"));
        assert!(msg.contains("12 vs 11"));
    }

    #[test]
    fn test_tensor_error_conversion() {
        let candle_err = candle_core::Error::Msg("shape".to_string());
        let err: DataError = candle_err.into();
        assert!(matches!(err, DataError::Tensor(_)));
    }
}
