//! Epoch batching over a paired dataset
//!
//! Groups dataset indices into batches, loads the items of each batch on a
//! worker pool, and collates the results. Training epochs shuffle the
//! index order (seeded, for reproducible runs) and drop the trailing
//! incomplete batch; evaluation walks every item in order, one per batch.
//!
//! Items are loaded independently and never share mutable state; the
//! collate call is the only join point, and the first item error aborts
//! its batch.

use std::sync::Arc;

use candle_core::Device;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::collate::{collate, Batch};
use crate::config::PipelineConfig;
use crate::dataset::PairedDataset;
use crate::error::Result;

/// Batches a [`PairedDataset`] into collated tensors, epoch by epoch
pub struct BatchLoader {
    dataset: PairedDataset,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
    pool: Option<rayon::ThreadPool>,
    device: Device,
}

impl BatchLoader {
    /// Build a loader from the shared configuration
    ///
    /// Training: configured batch size, shuffled, incomplete final batch
    /// dropped. Evaluation: batch size 1, in order, nothing dropped.
    pub fn new(
        cfg: Arc<PipelineConfig>,
        dataset: PairedDataset,
        device: Device,
    ) -> Result<Self> {
        let pool = if cfg.num_workers > 0 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(cfg.num_workers)
                    .build()?,
            )
        } else {
            None
        };
        let (batch_size, shuffle, drop_last) = if cfg.is_train() {
            (cfg.batch_size, true, true)
        } else {
            (1, false, false)
        };
        Ok(Self {
            dataset,
            batch_size,
            shuffle,
            drop_last,
            seed: cfg.seed,
            pool,
            device,
        })
    }

    /// Number of batches per epoch
    pub fn batches_per_epoch(&self) -> usize {
        if self.drop_last {
            self.dataset.len() / self.batch_size
        } else {
            self.dataset.len().div_ceil(self.batch_size)
        }
    }

    /// The wrapped dataset
    pub fn dataset(&self) -> &PairedDataset {
        &self.dataset
    }

    /// Iterate one epoch of collated batches
    ///
    /// The epoch number perturbs the shuffle so successive epochs see
    /// different batch compositions under the same seed.
    pub fn epoch(&self, epoch: u64) -> EpochIter<'_> {
        let mut indices: Vec<usize> = (0..self.dataset.len()).collect();
        if self.shuffle {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(epoch)),
                None => StdRng::from_entropy(),
            };
            indices.shuffle(&mut rng);
        }

        let mut batches: Vec<Vec<usize>> = indices
            .chunks(self.batch_size)
            .map(|c| c.to_vec())
            .collect();
        if self.drop_last {
            batches.retain(|b| b.len() == self.batch_size);
        }

        EpochIter {
            loader: self,
            batches: batches.into_iter(),
        }
    }

    /// Load and collate one batch of indices
    fn load_batch(&self, indices: &[usize]) -> Result<Batch> {
        let pairs = match &self.pool {
            Some(pool) => pool.install(|| {
                indices
                    .par_iter()
                    .map(|&i| self.dataset.get(i))
                    .collect::<Result<Vec<_>>>()
            })?,
            None => indices
                .iter()
                .map(|&i| self.dataset.get(i))
                .collect::<Result<Vec<_>>>()?,
        };
        collate(&pairs, &self.device)
    }
}

/// Iterator over one epoch's collated batches
pub struct EpochIter<'a> {
    loader: &'a BatchLoader,
    batches: std::vec::IntoIter<Vec<usize>>,
}

impl Iterator for EpochIter<'_> {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        self.batches
            .next()
            .map(|indices| self.loader.load_batch(&indices))
    }
}
