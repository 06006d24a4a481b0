//! Spectral test scoring
//!
//! For each dimension d = 2..=max_dim the dual basis B_d is reduced and its
//! shortest row is normalized into a figure of merit. The scorer keeps the
//! effective modulus and normalization factors for one (modulus, lag, kind)
//! triple, so scoring many multipliers only rebuilds the lattices.

use num_bigint::BigUint;
use std::time::Instant;

use crate::backend::Backend;
use crate::dual::{DualLattice, GeneratorKind, LatticeParams};
use crate::error::{Result, SpectralError};
use crate::lattice::LLLConfig;
use crate::normalizer::{Normalizer, MAX_DIM, MIN_DIM};

/// Figures of merit of one multiplier
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralScore {
    /// Smallest figure of merit over all dimensions
    pub min: f64,
    /// Σ FM(d)/(d-1) / Σ 1/(d-1)
    pub harmonic: f64,
    /// FM(2), FM(3), ..., FM(max_dim)
    pub figures: Vec<f64>,
}

impl SpectralScore {
    /// Aggregate per-dimension figures; `figures[i]` belongs to dimension i + 2
    pub fn from_figures(figures: Vec<f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut weighted = 0.0;
        let mut weights = 0.0;

        for (i, &fm) in figures.iter().enumerate() {
            let w = 1.0 / (i + 1) as f64;
            min = min.min(fm);
            weighted += fm * w;
            weights += w;
        }

        Self {
            min,
            harmonic: weighted / weights,
            figures,
        }
    }

    /// Largest dimension scored
    pub fn max_dim(&self) -> usize {
        self.figures.len() + 1
    }
}

/// Check 2 ≤ max_dim (≤ upper, when given)
pub fn validate_dimension(max_dim: usize, upper: Option<usize>) -> Result<()> {
    if let Some(max) = upper {
        if max_dim > max {
            return Err(SpectralError::DimensionTooLarge { max });
        }
    }
    if max_dim < MIN_DIM {
        return Err(SpectralError::DimensionTooSmall { min: MIN_DIM });
    }
    Ok(())
}

/// Spectral scorer for a fixed modulus, lag and generator kind
pub struct SpectralScorer<B: Backend> {
    backend: B,
    params: LatticeParams,
    max_dim: usize,
    normalizer: Normalizer,
    config: LLLConfig,
}

impl<B: Backend> SpectralScorer<B> {
    pub fn new(
        modulus: BigUint,
        lag: u64,
        kind: GeneratorKind,
        max_dim: usize,
        backend: B,
    ) -> Result<Self> {
        Self::with_config(modulus, lag, kind, max_dim, backend, LLLConfig::spectral())
    }

    pub fn with_config(
        modulus: BigUint,
        lag: u64,
        kind: GeneratorKind,
        max_dim: usize,
        backend: B,
        config: LLLConfig,
    ) -> Result<Self> {
        if lag == 0 {
            return Err(SpectralError::NonPositiveLag);
        }
        validate_dimension(max_dim, Some(MAX_DIM))?;
        let params = LatticeParams::new(modulus, lag, kind)?;
        let normalizer = Normalizer::new(&params.effective_modulus);

        log::debug!(
            "Scorer: {} generator, effective modulus {}, dimensions {}..={}, backend {}",
            kind.label(),
            params.effective_modulus,
            MIN_DIM,
            max_dim,
            backend.name()
        );

        Ok(Self {
            backend,
            params,
            max_dim,
            normalizer,
            config,
        })
    }

    /// Score multiplier `a` in every dimension 2..=max_dim
    pub fn score(&self, a: &BigUint) -> Result<SpectralScore> {
        let a_lag = self.params.lagged_multiplier(a)?;
        let lattice = DualLattice::new(&self.params.effective_modulus, &a_lag, self.max_dim);

        let mut figures = Vec::with_capacity(self.max_dim - 1);
        for d in MIN_DIM..=self.max_dim {
            let start = Instant::now();
            let mut basis = lattice.basis(d);
            let stats = self.backend.reduce(&mut basis, &self.config)?;
            let min2 = basis.min_norm_squared();
            let fm = self.normalizer.figure_of_merit(d, &min2);

            log::debug!(
                "d={}: min ‖v‖²={}, FM={:.6} ({} swaps, {:.3}s)",
                d,
                min2,
                fm,
                stats.swaps,
                start.elapsed().as_secs_f64()
            );
            log::trace!("{}", basis);
            figures.push(fm);
        }

        Ok(SpectralScore::from_figures(figures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;
    use crate::lattice::{LatticeBasis, LLL};
    use num_bigint::BigInt;
    use num_traits::One;

    fn two_pow(k: usize) -> BigUint {
        BigUint::one() << k
    }

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-9
    }

    #[test]
    fn test_harmonic_from_figures() {
        let score = SpectralScore::from_figures(vec![0.9, 0.8, 0.6]);
        let expected = (0.9 / 1.0 + 0.8 / 2.0 + 0.6 / 3.0) / (1.0 + 1.0 / 2.0 + 1.0 / 3.0);
        assert!(close(score.harmonic, expected));
        assert_eq!(score.min, 0.6);
        assert_eq!(score.max_dim(), 4);
    }

    #[test]
    fn test_small_lcg() {
        let scorer =
            SpectralScorer::new(BigUint::from(16u32), 1, GeneratorKind::FullPeriod, 2, CpuBackend::new())
                .unwrap();
        let score = scorer.score(&BigUint::from(5u32)).unwrap();
        assert_eq!(score.figures.len(), 1);
        assert!(close(score.figures[0], 0.7357077390956626));
        assert_eq!(score.min, score.harmonic);
    }

    #[test]
    fn test_64bit_lcg_multiplier() {
        let scorer =
            SpectralScorer::new(two_pow(64), 1, GeneratorKind::FullPeriod, 8, CpuBackend::new())
                .unwrap();
        let score = scorer.score(&BigUint::from(0xd1342543de82ef95u64)).unwrap();

        let expected = [
            0.9586022781108585,
            0.9374789385926641,
            0.8707569799393149,
            0.822326109019449,
            0.8204052529486728,
            0.813064701273953,
            0.7602148615636157,
        ];
        assert_eq!(score.figures.len(), expected.len());
        for (fm, e) in score.figures.iter().zip(expected) {
            assert!(close(*fm, e), "{} vs {}", fm, e);
        }
        assert!(close(score.min, 0.7602148615636157));
        assert!(close(score.harmonic, 0.8991507939212569));
    }

    #[test]
    fn test_64bit_mcg_multiplier() {
        let scorer =
            SpectralScorer::new(two_pow(64), 1, GeneratorKind::Multiplicative, 8, CpuBackend::new())
                .unwrap();
        let score = scorer.score(&BigUint::from(0xf1357aea2e62a9c5u64)).unwrap();
        assert!(close(score.min, 0.7584149355686733));
        assert!(close(score.harmonic, 0.8797047200903088));
    }

    #[test]
    fn test_figure_ignores_row_order() {
        let normalizer = Normalizer::new(&BigUint::from(16u32));
        let config = LLLConfig::spectral();

        let basis = LatticeBasis::from_rows(&[vec![16i64, 0], vec![-5, 1]]);
        let permuted = LatticeBasis::from_rows(&[vec![-5i64, 1], vec![16, 0]]);

        let (a, _) = LLL::reduce(&basis, &config).unwrap();
        let (b, _) = LLL::reduce(&permuted, &config).unwrap();

        assert_eq!(a.min_norm_squared(), BigInt::from(10));
        assert_eq!(
            normalizer.figure_of_merit(2, &a.min_norm_squared()),
            normalizer.figure_of_merit(2, &b.min_norm_squared())
        );
    }

    #[test]
    fn test_validation() {
        let make = |modulus: BigUint, lag, kind, max_dim| {
            SpectralScorer::new(modulus, lag, kind, max_dim, CpuBackend::new())
        };

        assert!(matches!(
            make(two_pow(32), 1, GeneratorKind::FullPeriod, 25),
            Err(SpectralError::DimensionTooLarge { max: 24 })
        ));
        assert!(matches!(
            make(two_pow(32), 1, GeneratorKind::FullPeriod, 1),
            Err(SpectralError::DimensionTooSmall { min: 2 })
        ));
        assert!(matches!(
            make(two_pow(32), 0, GeneratorKind::FullPeriod, 4),
            Err(SpectralError::NonPositiveLag)
        ));
        assert!(matches!(
            make(BigUint::from(1_000_003u32), 1, GeneratorKind::Multiplicative, 4),
            Err(SpectralError::ModulusNotPowerOfTwo)
        ));

        let scorer = make(two_pow(32), 1, GeneratorKind::FullPeriod, 4).unwrap();
        assert!(matches!(
            scorer.score(&two_pow(32)),
            Err(SpectralError::MultiplierTooLarge)
        ));
    }
}
