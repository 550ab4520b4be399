//! Pre-emphasis / de-emphasis filtering
//!
//! A first-order recurrence pair used to flatten the spectral tilt of
//! speech before training and restore it on enhanced output. Both filters
//! run at double precision.

use candle_core::Tensor;

use crate::error::Result;

/// Default emphasis coefficient for speech
pub const EMPHASIS_COEFF: f64 = 0.95;

/// Apply the pre-emphasis filter
///
/// `out[0] = signal[0]`, `out[i] = signal[i] - coeff * signal[i - 1]`.
pub fn pre_emphasize(signal: &[f64], coeff: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(signal.len());
    if let Some(&first) = signal.first() {
        out.push(first);
        for pair in signal.windows(2) {
            out.push(pair[1] - coeff * pair[0]);
        }
    }
    out
}

/// Apply the de-emphasis filter, inverting [`pre_emphasize`]
///
/// `out[0] = signal[0]`, `out[i] = signal[i] + coeff * out[i - 1]`. Each
/// output depends on the previous output, so the loop is strictly
/// sequential.
pub fn de_emphasize(signal: &[f64], coeff: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(signal.len());
    let mut prev = 0.0;
    for (i, &sample) in signal.iter().enumerate() {
        let value = if i == 0 { sample } else { sample + coeff * prev };
        out.push(value);
        prev = value;
    }
    out
}

/// Pre-emphasize a rank-1 (or single-column rank-2) tensor signal
pub fn pre_emphasize_tensor(signal: &Tensor, coeff: f64) -> Result<Tensor> {
    let samples = super::tensor_to_signal(signal)?;
    let out = pre_emphasize(&samples, coeff);
    let n = out.len();
    Ok(Tensor::from_vec(out, n, signal.device())?)
}

/// De-emphasize a rank-1 (or single-column rank-2) tensor signal
pub fn de_emphasize_tensor(signal: &Tensor, coeff: f64) -> Result<Tensor> {
    let samples = super::tensor_to_signal(signal)?;
    let out = de_emphasize(&samples, coeff);
    let n = out.len();
    Ok(Tensor::from_vec(out, n, signal.device())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::Device;

    #[test]
    fn test_pre_emphasize_recurrence() {
        let signal = vec![1.0, 2.0, 3.0];
        let out = pre_emphasize(&signal, 0.95);
        assert_eq!(out.len(), 3);
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] - (2.0 - 0.95)).abs() < 1e-12);
        assert!((out[2] - (3.0 - 0.95 * 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_de_emphasize_recurrence() {
        let signal = vec![1.0, 1.0, 1.0];
        let out = de_emphasize(&signal, 0.5);
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] - 1.5).abs() < 1e-12);
        assert!((out[2] - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_recovers_signal() {
        let signal: Vec<f64> = (0..4096).map(|i| (i as f64 * 0.013).sin()).collect();
        let emphasized = pre_emphasize(&signal, EMPHASIS_COEFF);
        let restored = de_emphasize(&emphasized, EMPHASIS_COEFF);
        assert_eq!(restored.len(), signal.len());
        for (a, b) in restored.iter().zip(signal.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_signal() {
        assert!(pre_emphasize(&[], EMPHASIS_COEFF).is_empty());
        assert!(de_emphasize(&[], EMPHASIS_COEFF).is_empty());
    }

    #[test]
    fn test_single_sample_passthrough() {
        assert_eq!(pre_emphasize(&[3.5], EMPHASIS_COEFF), vec![3.5]);
        assert_eq!(de_emphasize(&[3.5], EMPHASIS_COEFF), vec![3.5]);
    }

    #[test]
    fn test_tensor_entry_points_round_trip() {
        let device = Device::Cpu;
        let signal: Vec<f64> = (0..256).map(|i| (i as f64 * 0.1).cos()).collect();
        let t = Tensor::from_vec(signal.clone(), (256, 1), &device).unwrap();

        let emphasized = pre_emphasize_tensor(&t, EMPHASIS_COEFF).unwrap();
        let restored = de_emphasize_tensor(&emphasized, EMPHASIS_COEFF).unwrap();
        let restored: Vec<f64> = restored.to_vec1().unwrap();
        for (a, b) in restored.iter().zip(signal.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tensor_entry_rejects_matrix() {
        let t = Tensor::from_vec(vec![0.0f64; 6], (2, 3), &Device::Cpu).unwrap();
        assert!(pre_emphasize_tensor(&t, EMPHASIS_COEFF).is_err());
        assert!(de_emphasize_tensor(&t, EMPHASIS_COEFF).is_err());
    }
}
