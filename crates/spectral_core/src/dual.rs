//! Dual lattices of congruential generators
//!
//! For a multiplier a and modulus m, the points (x, a x, a² x, ...) mod m
//! lie on a lattice whose dual has the basis (Knuth, TAoCP Vol. 2, 3.3.4):
//!
//! ```text
//! [  m        0  0  ...  0 ]
//! [ -a        1  0  ...  0 ]
//! [ -a²       0  1  ...  0 ]
//! [ ...                    ]
//! [ -a^(d-1)  0  0  ...  1 ]
//! ```
//!
//! The first-column powers are exact, never reduced modulo m. Lagged
//! sequences x_0, x_ℓ, x_2ℓ, ... use a^ℓ mod m and m / gcd(m, ℓ)
//! (Entacher's characterization of lagged lattices). Multiplicative
//! generators with power-of-two modulus additionally divide the modulus by 4
//! (TAoCP Vol. 2, 3.3.4, Exercise 20).

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Result, SpectralError};
use crate::lattice::LatticeBasis;
use crate::numeric;

/// Family of generator being assessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorKind {
    /// Full-period generators: LCGs with power-of-two modulus, MCGs with prime modulus
    #[default]
    FullPeriod,
    /// Maximum-period MCGs with power-of-two modulus
    Multiplicative,
}

impl GeneratorKind {
    /// Whether the modulus must be a power of two
    pub fn requires_power_of_two(self) -> bool {
        matches!(self, GeneratorKind::Multiplicative)
    }

    /// Extra divisor applied to the (lag-corrected) modulus
    pub fn modulus_divisor(self) -> u32 {
        match self {
            GeneratorKind::FullPeriod => 1,
            GeneratorKind::Multiplicative => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GeneratorKind::FullPeriod => "full-period",
            GeneratorKind::Multiplicative => "multiplicative",
        }
    }
}

/// Modulus, lag and generator family, with the derived effective modulus
#[derive(Debug, Clone)]
pub struct LatticeParams {
    pub modulus: BigUint,
    pub lag: u64,
    pub kind: GeneratorKind,
    /// m / gcd(m, ℓ), divided by 4 for multiplicative generators
    pub effective_modulus: BigUint,
}

impl LatticeParams {
    /// Validate the parameters and derive the effective modulus
    pub fn new(modulus: BigUint, lag: u64, kind: GeneratorKind) -> Result<Self> {
        if lag == 0 {
            return Err(SpectralError::NonPositiveLag);
        }
        if kind.requires_power_of_two() && !numeric::is_power_of_two(&modulus) {
            return Err(SpectralError::ModulusNotPowerOfTwo);
        }

        let g = modulus.gcd(&BigUint::from(lag));
        let effective_modulus = if g.is_zero() {
            BigUint::zero()
        } else {
            &modulus / g / kind.modulus_divisor()
        };

        if effective_modulus.is_zero() {
            return Err(SpectralError::DegenerateModulus {
                modulus: modulus.to_string(),
                lag,
            });
        }

        Ok(Self {
            modulus,
            lag,
            kind,
            effective_modulus,
        })
    }

    /// a^ℓ mod m, after checking a < m
    pub fn lagged_multiplier(&self, a: &BigUint) -> Result<BigUint> {
        if a >= &self.modulus {
            return Err(SpectralError::MultiplierTooLarge);
        }
        Ok(a.modpow(&BigUint::from(self.lag), &self.modulus))
    }
}

/// Dual lattice bases of every dimension up to `max_dim` for one multiplier
///
/// The powers a^1 .. a^(max_dim-1) are computed once; each basis B_d is
/// assembled from the first d-1 of them.
#[derive(Debug, Clone)]
pub struct DualLattice {
    modulus: BigInt,
    powers: Vec<BigInt>,
}

impl DualLattice {
    pub fn new(effective_modulus: &BigUint, a_lag: &BigUint, max_dim: usize) -> Self {
        assert!(max_dim >= 2, "Dual lattices start at dimension 2");

        let a = BigInt::from(a_lag.clone());
        let mut powers = Vec::with_capacity(max_dim - 1);
        let mut p = BigInt::one();
        for _ in 1..max_dim {
            p *= &a;
            powers.push(p.clone());
        }

        Self {
            modulus: BigInt::from(effective_modulus.clone()),
            powers,
        }
    }

    /// Largest dimension this lattice can produce a basis for
    pub fn max_dim(&self) -> usize {
        self.powers.len() + 1
    }

    /// The d×d basis B_d
    ///
    /// # Panics
    /// Panics if d is outside [2, max_dim]
    pub fn basis(&self, d: usize) -> LatticeBasis {
        assert!(
            (2..=self.max_dim()).contains(&d),
            "Dimension {} outside [2, {}]",
            d,
            self.max_dim()
        );

        let mut vectors = vec![vec![BigInt::zero(); d]; d];
        vectors[0][0] = self.modulus.clone();
        for i in 1..d {
            vectors[i][i] = BigInt::one();
            vectors[i][0] = -&self.powers[i - 1];
        }

        LatticeBasis::new(vectors)
    }
}

/// Build a single dual basis B_d
pub fn dual_basis(effective_modulus: &BigUint, a_lag: &BigUint, d: usize) -> LatticeBasis {
    DualLattice::new(effective_modulus, a_lag, d).basis(d)
}
