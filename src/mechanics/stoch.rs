//! Stochastic helpers: seeded RNG and random strategy draws.
//! Note: uses `bevy_prng::WyRand` so a run is reproducible from one `u64`.

use bevy_prng::WyRand;
use nalgebra::DMatrix;
use rand_core::{RngCore, SeedableRng};

use crate::error::Result;
use crate::mechanics::normalize::make_row_stochastic;

/// WyRand seeded from a single `u64`.
#[inline]
pub fn seeded(seed: u64) -> WyRand {
    WyRand::from_seed(seed.to_le_bytes())
}

/// Uniform draw in the open interval (0, 1).
#[inline]
pub fn uniform_open01(rng: &mut WyRand) -> f64 {
    (((rng.next_u64() >> 11) as f64) + 0.5) / ((1u64 << 53) as f64)
}

/// Random row-stochastic matrix: i.i.d. (0,1) entries, then row-normalized.
pub fn random_row_stochastic(rows: usize, cols: usize, rng: &mut WyRand) -> Result<DMatrix<f64>> {
    let raw = DMatrix::from_fn(rows, cols, |_, _| uniform_open01(rng));
    make_row_stochastic(raw)
}
