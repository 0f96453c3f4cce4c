//! Visible grid and off-screen pool over one loaded image set.
//!
//! Grid slots and pool entries are indices into the current [`LoadedImageSet`].
//! After a set is published the two together hold every index exactly once,
//! and every later mutation is a single exchange between one slot and one
//! pool entry.

use mosaic_types::{DecodedImage, FetchError, LoadedImageSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::results::MIN_RESULTS;

pub const GRID_ROWS: usize = 4;
pub const GRID_COLUMNS: usize = 5;
pub const GRID_SIZE: usize = GRID_ROWS * GRID_COLUMNS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Placeholder,
    Image(usize),
}

/// One applied exchange between a grid slot and a pool entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub slot: usize,
    pub pool_index: usize,
    /// Image index now visible in `slot`
    pub shown: usize,
    /// Image index moved into the pool at `pool_index`
    pub hidden: usize,
}

pub struct Gallery<R = StdRng> {
    images: LoadedImageSet,
    grid: [Slot; GRID_SIZE],
    pool: Vec<usize>,
    rng: R,
}

impl Gallery<StdRng> {
    /// Seeded when `seed` is given, OS entropy otherwise
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng)
    }
}

impl<R: Rng> Gallery<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            images: LoadedImageSet::default(),
            grid: [Slot::Placeholder; GRID_SIZE],
            pool: Vec::new(),
            rng,
        }
    }

    /// Replace the current set wholesale.
    ///
    /// The first [`GRID_SIZE`] images fill the grid in order, the rest become
    /// the pool. A set too small to rotate is rejected and nothing changes.
    pub fn publish(&mut self, images: LoadedImageSet) -> Result<(), FetchError> {
        if images.len() < MIN_RESULTS {
            return Err(FetchError::InsufficientResults {
                found: images.len(),
                required: MIN_RESULTS,
            });
        }

        let mut grid = [Slot::Placeholder; GRID_SIZE];
        for (index, slot) in grid.iter_mut().enumerate() {
            *slot = Slot::Image(index);
        }
        let pool = (GRID_SIZE..images.len()).collect();

        tracing::debug!(
            images = images.len(),
            pool = images.len() - GRID_SIZE,
            "publishing image set"
        );

        self.images = images;
        self.grid = grid;
        self.pool = pool;
        Ok(())
    }

    /// Exchange the image in `slot` with the pool entry at `pool_index`
    pub fn swap(&mut self, slot: usize, pool_index: usize) -> Option<Swap> {
        let Slot::Image(visible) = *self.grid.get(slot)? else {
            return None;
        };
        let hidden = self.pool.get_mut(pool_index)?;
        let shown = *hidden;
        *hidden = visible;
        self.grid[slot] = Slot::Image(shown);

        Some(Swap {
            slot,
            pool_index,
            shown,
            hidden: visible,
        })
    }

    /// One slideshow step with uniformly chosen slot and pool entry
    pub fn swap_random(&mut self) -> Option<Swap> {
        if !self.can_play() {
            return None;
        }
        let slot = self.rng.random_range(0..GRID_SIZE);
        let pool_index = self.rng.random_range(0..self.pool.len());
        self.swap(slot, pool_index)
    }

    pub fn can_play(&self) -> bool {
        self.images.len() > GRID_SIZE && !self.pool.is_empty()
    }

    pub fn slots(&self) -> &[Slot; GRID_SIZE] {
        &self.grid
    }

    pub fn pool(&self) -> &[usize] {
        &self.pool
    }

    pub fn images(&self) -> &LoadedImageSet {
        &self.images
    }

    /// Grid and pool hold every image index exactly once
    pub fn is_partitioned(&self) -> bool {
        if self.images.is_empty() {
            return self.pool.is_empty() && self.grid.iter().all(|s| *s == Slot::Placeholder);
        }

        let mut seen = vec![false; self.images.len()];
        let visible = self.grid.iter().map(|slot| match slot {
            Slot::Image(index) => Some(*index),
            Slot::Placeholder => None,
        });
        for index in visible.chain(self.pool.iter().copied().map(Some)) {
            let Some(index) = index else {
                return false;
            };
            match seen.get_mut(index) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        seen.into_iter().all(|flag| flag)
    }
}
