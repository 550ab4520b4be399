//! Signal segmentation
//!
//! Splits a normalized, emphasized signal into fixed-length chunks. Two
//! strategies exist behind one enum: an overlap walk used for training
//! (hop = fraction of the window) and evaluation (hop = window), and a
//! fixed sub-chunk split that re-slices window-sized chunks down to a
//! configured sample count. Every emitted chunk has exactly the same
//! length; shorter tails are zero-padded, never truncated.

use candle_core::Tensor;

use crate::error::{DataError, Result};

/// One fixed-length frame of samples
pub type Chunk = Vec<f64>;

/// Temporally ordered chunks covering one signal
pub type ChunkSequence = Vec<Chunk>;

/// Strategy selecting how a signal is carved into chunks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentationMode {
    /// Walk the signal in hops of `hop_fraction * window_length` samples,
    /// emitting window-length chunks; the final chunk is zero-padded
    Overlap {
        /// Hop size as a fraction of the window length, in (0, 1]
        hop_fraction: f64,
    },
    /// Split into window-length top chunks, then re-split any top chunk
    /// longer than `chunk_samples` into `chunk_samples`-sized sub-chunks
    /// (remainder zero-padded); shorter top chunks are padded up
    FixedChunk {
        /// Uniform output chunk length in samples
        chunk_samples: usize,
    },
}

/// Segments signals of one sampling rate into equal-length chunks
#[derive(Debug, Clone)]
pub struct Segmenter {
    window_length: usize,
    hop_length: usize,
    mode: SegmentationMode,
}

impl Segmenter {
    /// Build a segmenter for the given window (seconds) and sampling rate
    pub fn new(window_secs: f64, sample_rate: u32, mode: SegmentationMode) -> Result<Self> {
        let window_length = (window_secs * sample_rate as f64) as usize;
        if window_length == 0 {
            return Err(DataError::InvalidConfig(format!(
                "window of {window_secs}s at {sample_rate}Hz yields an empty chunk"
            )));
        }
        let hop_length = match mode {
            SegmentationMode::Overlap { hop_fraction } => {
                let hop = (hop_fraction * window_length as f64) as usize;
                if hop == 0 {
                    return Err(DataError::InvalidConfig(format!(
                        "hop fraction {hop_fraction} yields a zero-sample hop"
                    )));
                }
                hop
            }
            SegmentationMode::FixedChunk { chunk_samples } => {
                if chunk_samples == 0 {
                    return Err(DataError::InvalidConfig(
                        "chunk_samples must be at least 1".to_string(),
                    ));
                }
                window_length
            }
        };
        Ok(Self {
            window_length,
            hop_length,
            mode,
        })
    }

    /// Uniform length of every emitted chunk
    pub fn chunk_len(&self) -> usize {
        match self.mode {
            SegmentationMode::Overlap { .. } => self.window_length,
            SegmentationMode::FixedChunk { chunk_samples } => chunk_samples,
        }
    }

    /// Window length in samples
    pub fn window_length(&self) -> usize {
        self.window_length
    }

    /// Segment a 1-D signal into equal-length chunks
    ///
    /// An empty signal yields an empty sequence. Otherwise the chunks cover
    /// the whole signal in order, with a zero-padded trailing region and no
    /// sample dropped.
    pub fn segment(&self, signal: &[f64]) -> ChunkSequence {
        let windows = self.walk(signal);
        match self.mode {
            SegmentationMode::Overlap { .. } => windows,
            SegmentationMode::FixedChunk { chunk_samples } => {
                self.sub_chunk(windows, chunk_samples)
            }
        }
    }

    /// Segment a rank-1 or single-column rank-2 tensor signal
    pub fn segment_tensor(&self, signal: &Tensor) -> Result<ChunkSequence> {
        let samples = crate::audio::tensor_to_signal(signal)?;
        Ok(self.segment(&samples))
    }

    /// Hop walk emitting window-length chunks; the chunk that reaches the
    /// signal end is zero-padded to full length and terminates the walk
    fn walk(&self, signal: &[f64]) -> ChunkSequence {
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < signal.len() {
            let end = start + self.window_length;
            if end >= signal.len() {
                let mut tail = signal[start..].to_vec();
                tail.resize(self.window_length, 0.0);
                chunks.push(tail);
                break;
            }
            chunks.push(signal[start..end].to_vec());
            start += self.hop_length;
        }
        chunks
    }

    /// Re-split window-length chunks to a uniform `chunk_samples` length
    fn sub_chunk(&self, windows: ChunkSequence, chunk_samples: usize) -> ChunkSequence {
        if chunk_samples >= self.window_length {
            // Sub-chunking disabled; pad every window up to the target.
            return windows
                .into_iter()
                .map(|mut w| {
                    w.resize(chunk_samples, 0.0);
                    w
                })
                .collect();
        }
        let mut chunks = Vec::new();
        for window in windows {
            for piece in window.chunks(chunk_samples) {
                let mut sub = piece.to_vec();
                sub.resize(chunk_samples, 0.0);
                chunks.push(sub);
            }
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_overlap_half_hop() {
        // 1600-sample window, 800-sample hop over 16000 samples.
        let seg = Segmenter::new(0.1, 16000, SegmentationMode::Overlap { hop_fraction: 0.5 })
            .unwrap();
        let signal = ramp(16000);
        let chunks = seg.segment(&signal);

        assert!(chunks.iter().all(|c| c.len() == 1600));
        // Each chunk starts at i * hop and mirrors the signal there.
        for (i, chunk) in chunks.iter().enumerate() {
            let start = i * 800;
            for (j, &v) in chunk.iter().enumerate() {
                let expected = if start + j < signal.len() {
                    signal[start + j]
                } else {
                    0.0
                };
                assert_eq!(v, expected);
            }
        }
        // The walk stops at the first window reaching the signal end.
        let last_start = (chunks.len() - 1) * 800;
        assert!(last_start + 1600 >= signal.len());
    }

    #[test]
    fn test_eval_walk_covers_signal_exactly() {
        let seg = Segmenter::new(0.1, 16000, SegmentationMode::Overlap { hop_fraction: 1.0 })
            .unwrap();
        let signal = ramp(16000);
        let chunks = seg.segment(&signal);
        assert_eq!(chunks.len(), 10);

        let rebuilt: Vec<f64> = chunks.into_iter().flatten().collect();
        assert_eq!(&rebuilt[..signal.len()], &signal[..]);
        assert!(rebuilt[signal.len()..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_tail_is_zero_padded_not_truncated() {
        let seg = Segmenter::new(0.1, 16000, SegmentationMode::Overlap { hop_fraction: 1.0 })
            .unwrap();
        let signal = ramp(1700);
        let chunks = seg.segment(&signal);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].len(), 1600);
        assert_eq!(chunks[1][99], 1699.0);
        assert!(chunks[1][100..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_signal_yields_empty_sequence() {
        let seg = Segmenter::new(0.1, 16000, SegmentationMode::Overlap { hop_fraction: 0.5 })
            .unwrap();
        assert!(seg.segment(&[]).is_empty());

        let seg = Segmenter::new(
            0.1,
            16000,
            SegmentationMode::FixedChunk { chunk_samples: 400 },
        )
        .unwrap();
        assert!(seg.segment(&[]).is_empty());
    }

    #[test]
    fn test_fixed_chunk_disabled_when_target_covers_window() {
        // 3.0s at 16kHz with a 1.0s window and a sub-chunk target equal to
        // the window: sub-chunking is a no-op and the signal divides into
        // exactly three full windows, the last one unpadded.
        let seg = Segmenter::new(
            1.0,
            16000,
            SegmentationMode::FixedChunk {
                chunk_samples: 16000,
            },
        )
        .unwrap();
        let signal = ramp(48000);
        let chunks = seg.segment(&signal);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 16000));
        assert_eq!(chunks[2][15999], 47999.0);
    }

    #[test]
    fn test_fixed_chunk_resplits_long_windows() {
        // 16000-sample windows re-split into 6400-sample sub-chunks:
        // 6400 + 6400 + 3200 (padded) per window.
        let seg = Segmenter::new(
            1.0,
            16000,
            SegmentationMode::FixedChunk { chunk_samples: 6400 },
        )
        .unwrap();
        let signal = ramp(16000);
        let chunks = seg.segment(&signal);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 6400));
        assert_eq!(chunks[0][0], 0.0);
        assert_eq!(chunks[1][0], 6400.0);
        assert_eq!(chunks[2][0], 12800.0);
        // Remainder of the last sub-chunk is padding.
        assert_eq!(chunks[2][3199], 15999.0);
        assert!(chunks[2][3200..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_fixed_chunk_pads_short_windows_up() {
        let seg = Segmenter::new(
            0.1,
            16000,
            SegmentationMode::FixedChunk { chunk_samples: 2000 },
        )
        .unwrap();
        let signal = ramp(1600);
        let chunks = seg.segment(&signal);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 2000);
        assert!(chunks[0][1600..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_segmentation_is_idempotent_on_reassembly() {
        let seg = Segmenter::new(0.1, 16000, SegmentationMode::Overlap { hop_fraction: 1.0 })
            .unwrap();
        let signal = ramp(3777);
        let first = seg.segment(&signal);
        let rebuilt: Vec<f64> = first.iter().flatten().copied().collect();
        let second = seg.segment(&rebuilt);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_rejects_zero_hop() {
        let err = Segmenter::new(
            0.1,
            16000,
            SegmentationMode::Overlap {
                hop_fraction: 0.0001,
            },
        )
        .unwrap_err();
        assert!(matches!(err, DataError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_empty_window() {
        let err =
            Segmenter::new(0.00001, 16000, SegmentationMode::Overlap { hop_fraction: 0.5 })
                .unwrap_err();
        assert!(matches!(err, DataError::InvalidConfig(_)));
    }

    #[test]
    fn test_segment_tensor_rejects_matrix() {
        use candle_core::{Device, Tensor};
        let seg = Segmenter::new(0.1, 16000, SegmentationMode::Overlap { hop_fraction: 0.5 })
            .unwrap();
        let t = Tensor::from_vec(vec![0.0f64; 8], (2, 4), &Device::Cpu).unwrap();
        assert!(matches!(
            seg.segment_tensor(&t),
            Err(DataError::InvalidDimension { .. })
        ));
    }
}
