//! WAV file I/O

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{DataError, Result};

/// Raw decoded samples, kept in the source's numeric domain
///
/// Integer PCM is not converted to float on read: the normalizer needs the
/// original integer values to reproduce the truncating mean subtraction.
#[derive(Debug, Clone)]
pub enum RawAudio {
    /// Integer PCM samples (any bit depth, widened to `i32`)
    Int(Vec<i32>),
    /// IEEE float samples
    Float(Vec<f32>),
}

impl RawAudio {
    /// Number of samples after downmixing
    pub fn len(&self) -> usize {
        match self {
            RawAudio::Int(s) => s.len(),
            RawAudio::Float(s) => s.len(),
        }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read a WAV file, downmixing multi-channel content to mono
///
/// Returns the samples in their source numeric domain along with the
/// sampling rate from the file header.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(RawAudio, u32)> {
    let path = path.as_ref();
    let reader = WavReader::open(path).map_err(|e| DataError::file_read(path, e))?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;
    let channels = spec.channels as usize;

    let audio = match spec.sample_format {
        SampleFormat::Int => {
            let samples: Vec<i32> = reader
                .into_samples::<i32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| DataError::file_read(path, e))?;
            RawAudio::Int(downmix_int(&samples, channels))
        }
        SampleFormat::Float => {
            let samples: Vec<f32> = reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| DataError::file_read(path, e))?;
            RawAudio::Float(downmix_float(&samples, channels))
        }
    };

    Ok((audio, sample_rate))
}

/// Average interleaved integer channels into one; integer division keeps
/// the result in the integer domain
fn downmix_int(samples: &[i32], channels: usize) -> Vec<i32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| (frame.iter().map(|&v| v as i64).sum::<i64>() / channels as i64) as i32)
        .collect()
}

/// Average interleaved float channels into one
fn downmix_float(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Save samples to a mono 32-bit float WAV file
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| DataError::file_read(path, e))?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| DataError::file_read(path, e))?;
    }
    writer.finalize().map_err(|e| DataError::file_read(path, e))?;
    Ok(())
}
