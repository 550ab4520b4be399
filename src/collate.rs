//! Batch collation
//!
//! Pads variable-length chunk sequences with zero chunks up to the batch
//! maximum and stacks both sides into rectangular tensors of shape
//! `[batch, frames, time, channels]` with a single feature channel. This
//! is the axis order the downstream trainer consumes; nothing here
//! permutes it.

use candle_core::{Device, Tensor};

use crate::dataset::SamplePair;
use crate::error::{DataError, Result};

/// A collated batch of clean/noisy tensors
///
/// `lengths` keeps each item's pre-padding frame count so the trainer can
/// mask the zero-chunk tail.
#[derive(Debug)]
pub struct Batch {
    /// Clean speech, `[batch, frames, time, 1]`
    pub clean: Tensor,
    /// Noisy speech, `[batch, frames, time, 1]`
    pub noisy: Tensor,
    /// Per-item chunk counts before padding
    pub lengths: Vec<usize>,
}

impl Batch {
    /// Number of items in the batch
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Check if the batch holds no items
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

/// Pad and stack a batch of sample pairs into two rectangular tensors
///
/// The frame axis is padded on the right only; sequence order is never
/// touched. Heterogeneous chunk widths or a batch without any chunks abort
/// with [`DataError::UnsupportedBatchElement`].
pub fn collate(batch: &[SamplePair], device: &Device) -> Result<Batch> {
    if batch.is_empty() {
        return Err(DataError::UnsupportedBatchElement(
            "empty batch".to_string(),
        ));
    }

    let max_len = batch
        .iter()
        .flat_map(|(clean, noisy)| [clean.len(), noisy.len()])
        .max()
        .unwrap_or(0);
    if max_len == 0 {
        return Err(DataError::UnsupportedBatchElement(
            "batch contains no chunks".to_string(),
        ));
    }

    let width = chunk_width(batch)?;
    let lengths: Vec<usize> = batch.iter().map(|(clean, _)| clean.len()).collect();

    let clean = stack_side(batch.iter().map(|(c, _)| c), batch.len(), max_len, width, device)?;
    let noisy = stack_side(batch.iter().map(|(_, n)| n), batch.len(), max_len, width, device)?;

    Ok(Batch {
        clean,
        noisy,
        lengths,
    })
}

/// Verify every chunk on both sides shares one width and return it
fn chunk_width(batch: &[SamplePair]) -> Result<usize> {
    let mut width = None;
    for (clean, noisy) in batch {
        for chunk in clean.iter().chain(noisy.iter()) {
            match width {
                None => width = Some(chunk.len()),
                Some(w) if w != chunk.len() => {
                    return Err(DataError::UnsupportedBatchElement(format!(
                        "chunk widths differ across the batch ({w} vs {})",
                        chunk.len()
                    )));
                }
                Some(_) => {}
            }
        }
    }
    width.ok_or_else(|| {
        DataError::UnsupportedBatchElement("batch contains no chunks".to_string())
    })
}

/// Flatten one side into a `[batch, frames, time, 1]` tensor, right-padding
/// short sequences with zero chunks
fn stack_side<'a>(
    sequences: impl Iterator<Item = &'a crate::segment::ChunkSequence>,
    batch_len: usize,
    max_len: usize,
    width: usize,
    device: &Device,
) -> Result<Tensor> {
    let mut data = Vec::with_capacity(batch_len * max_len * width);
    for seq in sequences {
        for chunk in seq {
            data.extend_from_slice(chunk);
        }
        data.resize(data.len() + (max_len - seq.len()) * width, 0.0);
    }
    Ok(Tensor::from_vec(
        data,
        (batch_len, max_len, width, 1),
        device,
    )?)
}
