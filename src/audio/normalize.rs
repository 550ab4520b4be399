//! Signal loading and normalization
//!
//! Reads a waveform, removes the signal mean, and scales by an RMS-derived
//! constant `C = 0.5 * sqrt(mean(signal^2))`. When the source is integer
//! PCM the mean is truncated to the integer domain before subtraction,
//! matching the reference preprocessing sample for sample.

use std::path::Path;

use candle_core::{Device, Tensor};

use crate::error::{DataError, Result};

use super::io::{read_wav, RawAudio};

/// A normalized mono waveform ready for filtering and segmentation
#[derive(Debug, Clone)]
pub struct Waveform {
    /// Normalized samples
    pub samples: Vec<f64>,
    /// Sampling rate in Hz, from the file header
    pub sample_rate: u32,
}

impl Waveform {
    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Convert to a rank-1 tensor
    pub fn to_tensor(&self, device: &Device) -> Result<Tensor> {
        Ok(Tensor::from_vec(
            self.samples.clone(),
            self.samples.len(),
            device,
        )?)
    }
}

/// Load a WAV file, remove its mean, and normalize by the RMS scale
///
/// Fails with [`DataError::FileRead`] when the file is missing or
/// undecodable and with [`DataError::DegenerateSignal`] when the
/// mean-removed signal carries no energy; a zero scale must never reach
/// the division.
pub fn load_and_normalize<P: AsRef<Path>>(path: P) -> Result<Waveform> {
    let path = path.as_ref();
    let (audio, sample_rate) = read_wav(path)?;

    if audio.is_empty() {
        return Err(DataError::DegenerateSignal(format!(
            "{} holds no samples",
            path.display()
        )));
    }

    let centered = remove_mean(audio);

    let power = centered.iter().map(|&v| v * v).sum::<f64>() / centered.len() as f64;
    let scale = 0.5 * power.sqrt();
    if !(scale.is_finite() && scale > 0.0) {
        return Err(DataError::DegenerateSignal(format!(
            "{} has zero energy after mean removal",
            path.display()
        )));
    }

    let samples = centered.into_iter().map(|v| v / scale).collect();
    Ok(Waveform {
        samples,
        sample_rate,
    })
}

/// Subtract the signal mean in the source numeric domain
///
/// For integer PCM the mean is truncated toward zero before subtraction.
/// The truncation loses up to one LSB of precision and is kept on purpose:
/// reproducibility against existing training runs outweighs the accuracy.
fn remove_mean(audio: RawAudio) -> Vec<f64> {
    match audio {
        RawAudio::Int(samples) => {
            let mean =
                samples.iter().map(|&v| v as f64).sum::<f64>() / samples.len() as f64;
            let mean = mean as i64;
            samples
                .into_iter()
                .map(|v| (v as i64 - mean) as f64)
                .collect()
        }
        RawAudio::Float(samples) => {
            let mean =
                samples.iter().map(|&v| v as f64).sum::<f64>() / samples.len() as f64;
            samples.into_iter().map(|v| v as f64 - mean).collect()
        }
    }
}
