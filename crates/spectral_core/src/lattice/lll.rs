//! LLL Lattice Reduction Algorithm
//!
//! Exact integral LLL: all Gram-Schmidt data is kept as integers
//! (see [`GramSchmidt`]), so results do not depend on floating-point
//! precision no matter how large the basis entries grow.
//!
//! # The LLL Algorithm
//!
//! Given a basis B = [b_1, ..., b_n], LLL produces a δ-reduced basis satisfying:
//! 1. **Size reduction**: |μ_ij| ≤ 1/2 for all j < i
//! 2. **Lovász condition**: δ ||b*_i||² ≤ ||b*_{i+1} + μ_{i+1,i} b*_i||²
//!
//! Gram-Schmidt rows are added lazily the first time the main loop reaches
//! them and are updated incrementally on size reductions and swaps.

use num_bigint::BigInt;
use std::time::Instant;

use super::basis::LatticeBasis;
use super::gram_schmidt::GramSchmidt;
use crate::error::{Result, SpectralError};

/// LLL configuration parameters
#[derive(Debug, Clone)]
pub struct LLLConfig {
    /// Lovász parameter δ (default 0.75 = 3/4)
    /// Must be in (1/4, 1). Higher values give better reduction but slower.
    pub delta_num: i64,
    pub delta_den: i64,
    /// Maximum iterations of the main loop; exceeding it is an error
    pub max_iterations: usize,
}

impl Default for LLLConfig {
    fn default() -> Self {
        Self {
            delta_num: 3,
            delta_den: 4,
            max_iterations: 1_000_000,
        }
    }
}

impl LLLConfig {
    /// Create config with δ = 0.99 (strong reduction)
    pub fn strong() -> Self {
        Self {
            delta_num: 99,
            delta_den: 100,
            ..Default::default()
        }
    }

    /// Create config with δ = 0.5 (fast but weaker reduction)
    pub fn fast() -> Self {
        Self {
            delta_num: 1,
            delta_den: 2,
            ..Default::default()
        }
    }

    /// δ = 0.999999999 with a budget of 10^9 iterations
    ///
    /// The setting used for figures of merit: close enough to δ = 1 that the
    /// first reduced vectors are (nearly always) shortest in low dimension.
    pub fn spectral() -> Self {
        Self {
            delta_num: 999_999_999,
            delta_den: 1_000_000_000,
            max_iterations: 1_000_000_000,
        }
    }
}

/// Statistics from LLL execution
#[derive(Debug, Clone, Default)]
pub struct LLLStats {
    /// Number of size reductions performed
    pub size_reductions: usize,
    /// Number of swaps performed
    pub swaps: usize,
    /// Total iterations
    pub iterations: usize,
    /// Total time (seconds)
    pub total_time: f64,
    /// Squared determinant of the lattice (d_n of the Gram-Schmidt data)
    pub squared_determinant: BigInt,
}

/// LLL lattice reduction algorithm
pub struct LLL;

impl LLL {
    /// Reduce a lattice basis using the LLL algorithm
    ///
    /// # Returns
    /// The reduced basis and execution statistics
    pub fn reduce(basis: &LatticeBasis, config: &LLLConfig) -> Result<(LatticeBasis, LLLStats)> {
        let mut b = basis.clone();
        let stats = Self::reduce_in_place(&mut b, config)?;
        Ok((b, stats))
    }

    /// Reduce a lattice basis in place
    ///
    /// Fails if the rows are linearly dependent or the iteration budget runs out.
    pub fn reduce_in_place(b: &mut LatticeBasis, config: &LLLConfig) -> Result<LLLStats> {
        let start = Instant::now();
        let mut stats = LLLStats::default();
        let n = b.n;

        let mut gs = GramSchmidt::new(n);
        gs.extend(b, 0)?;

        // Main LLL loop
        let mut k = 1usize;
        let mut kmax = 0usize;

        while k < n {
            if stats.iterations >= config.max_iterations {
                return Err(SpectralError::IterationLimit {
                    budget: config.max_iterations,
                });
            }
            stats.iterations += 1;

            if k > kmax {
                kmax = k;
                gs.extend(b, k)?;
            }

            // Size reduce b_k with respect to b_{k-1}
            Self::size_reduce(b, &mut gs, k, k - 1, &mut stats);

            if gs.check_lovasz(k, config.delta_num, config.delta_den) {
                // Size reduce b_k with respect to all b_j for j < k-1
                for j in (0..k - 1).rev() {
                    Self::size_reduce(b, &mut gs, k, j, &mut stats);
                }
                k += 1;
            } else {
                b.swap(k, k - 1);
                gs.update_swap(k, kmax);
                stats.swaps += 1;

                k = if k > 1 { k - 1 } else { 1 };
            }

            if stats.iterations % 100_000 == 0 {
                log::trace!(
                    "LLL iteration {}: k={}, swaps={}, reductions={}",
                    stats.iterations, k, stats.swaps, stats.size_reductions
                );
            }
        }

        stats.squared_determinant = gs.squared_determinant().clone();
        stats.total_time = start.elapsed().as_secs_f64();

        log::trace!(
            "LLL completed on {}×{}: {} iterations, {} swaps, {} reductions, {:.3}s",
            n, b.m, stats.iterations, stats.swaps, stats.size_reductions, stats.total_time
        );

        Ok(stats)
    }

    /// Perform size reduction: b_k = b_k - round(μ_kj) * b_j
    fn size_reduce(
        basis: &mut LatticeBasis,
        gs: &mut GramSchmidt,
        k: usize,
        j: usize,
        stats: &mut LLLStats,
    ) {
        if !gs.needs_size_reduction(k, j) {
            return;
        }

        let q = gs.rounded_mu(k, j);

        basis.reduce_vector(k, j, &q);
        gs.update_size_reduction(k, j, &q);

        stats.size_reductions += 1;
    }

    /// Check if a basis is LLL-reduced
    pub fn is_reduced(basis: &LatticeBasis, config: &LLLConfig) -> Result<bool> {
        let gs = GramSchmidt::compute(basis)?;
        let n = basis.n;

        for i in 1..n {
            for j in 0..i {
                if gs.needs_size_reduction(i, j) {
                    return Ok(false);
                }
            }
        }

        for k in 1..n {
            if !gs.check_lovasz(k, config.delta_num, config.delta_den) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
