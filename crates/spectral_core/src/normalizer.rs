//! Figure-of-merit normalization
//!
//! The shortest dual vector of a d-dimensional lattice with determinant m
//! is at most sqrt(γ_d) · m^(1/d), where γ_d is Hermite's constant. Dividing
//! by this bound maps lengths to figures of merit in (0, 1].
//!
//! Values of γ_d for d > 8 are the best known upper bounds on the
//! lattice packing density (Conway and Sloane, Table 1.2).

use num_bigint::BigInt;

use crate::numeric;

/// Largest supported dimension
pub const MAX_DIM: usize = 24;

/// Smallest meaningful dimension
pub const MIN_DIM: usize = 2;

/// γ_t for t = 2..=24 (index t - 2)
pub const GAMMA: [f64; MAX_DIM - 1] = [
    1.1547005383793,
    1.2599210498949,
    1.4142135623731,
    1.5157165665104,
    1.6653663553112,
    1.8114473285278,
    2.0,
    2.0,
    2.0583720179295,
    2.140198065871,
    2.3094010767585,
    2.3563484301065,
    2.4886439198224,
    2.6390158215458,
    2.8284271247462,
    2.8866811540599,
    2.986825999361,
    3.0985192845333,
    3.2490095854249,
    3.3914559675101,
    3.5727801951422,
    3.7660273525956,
    4.0,
];

/// Normalization factors for one effective modulus
///
/// Stored as natural logarithms so that moduli far outside `f64` range
/// still produce finite figures.
#[derive(Debug, Clone)]
pub struct Normalizer {
    ln_norm: [f64; MAX_DIM - 1],
}

impl Normalizer {
    pub fn new(effective_modulus: &num_bigint::BigUint) -> Self {
        let ln_m = numeric::ln(effective_modulus);
        let mut ln_norm = [0.0; MAX_DIM - 1];
        for (i, slot) in ln_norm.iter_mut().enumerate() {
            let d = (i + MIN_DIM) as f64;
            *slot = -(0.5 * GAMMA[i].ln() + ln_m / d);
        }
        Self { ln_norm }
    }

    /// 1 / (sqrt(γ_d) · m^(1/d))
    ///
    /// # Panics
    /// Panics if d is outside [2, 24]
    pub fn norm(&self, d: usize) -> f64 {
        self.ln_norm[Self::index(d)].exp()
    }

    /// norm(d) · sqrt(min_norm_squared)
    pub fn figure_of_merit(&self, d: usize, min_norm_squared: &BigInt) -> f64 {
        (self.ln_norm[Self::index(d)] + 0.5 * numeric::ln_abs(min_norm_squared)).exp()
    }

    fn index(d: usize) -> usize {
        assert!(
            (MIN_DIM..=MAX_DIM).contains(&d),
            "Dimension {} outside [{}, {}]",
            d,
            MIN_DIM,
            MAX_DIM
        );
        d - MIN_DIM
    }
}
