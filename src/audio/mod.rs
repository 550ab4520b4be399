//! Audio loading and signal conditioning
//!
//! This module provides:
//! - WAV file I/O
//! - Mean-removal and RMS normalization
//! - Pre-emphasis / de-emphasis filtering

mod emphasis;
mod io;
mod normalize;

pub use emphasis::{
    de_emphasize, de_emphasize_tensor, pre_emphasize, pre_emphasize_tensor, EMPHASIS_COEFF,
};
pub use io::{read_wav, save_wav, RawAudio};
pub use normalize::{load_and_normalize, Waveform};

use candle_core::{DType, Tensor};

use crate::error::{DataError, Result};

/// Extract a 1-D `f64` signal from a rank-1 or single-column rank-2 tensor
pub(crate) fn tensor_to_signal(tensor: &Tensor) -> Result<Vec<f64>> {
    let dims = tensor.dims();
    let flat = match dims {
        [_] => tensor.clone(),
        [_, 1] => tensor.flatten_all()?,
        _ => {
            return Err(DataError::InvalidDimension {
                dims: dims.to_vec(),
            })
        }
    };
    Ok(flat.to_dtype(DType::F64)?.to_vec1::<f64>()?)
}
