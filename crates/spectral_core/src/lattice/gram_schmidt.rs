//! Integral Gram-Schmidt data
//!
//! Keeps the Gram-Schmidt orthogonalization of an integer basis entirely in
//! integers, so reduction never touches rationals or floating point.
//!
//! # Representation
//!
//! For a basis B = [b_0, ..., b_{n-1}] with orthogonalization b*_i and
//! coefficients μ_ij:
//!
//! ```text
//! d_0     = 1
//! d_{i+1} = Π_{j≤i} ||b*_j||²          (Gram determinant of b_0..b_i)
//! λ_ij    = d_{j+1} μ_ij               (j < i)
//! ```
//!
//! Both d and λ are integers for an integer basis, and every division in the
//! update formulas below is exact. `d_n` is the squared lattice determinant.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use super::basis::LatticeBasis;
use crate::error::{Result, SpectralError};

/// Gram-Schmidt orthogonalization data (integral representation)
#[derive(Debug, Clone)]
pub struct GramSchmidt {
    /// Scaled coefficients λ_ij = d_{j+1} μ_ij for j < i
    /// Stored as lower triangular matrix: lambda[i][j] for j < i
    pub lambda: Vec<Vec<BigInt>>,
    /// Gram determinants d_0..d_n (d[0] = 1)
    pub d: Vec<BigInt>,
    /// Dimension
    pub n: usize,
}

impl GramSchmidt {
    /// Empty data for a basis of n vectors; rows are added with [`extend`](Self::extend)
    pub fn new(n: usize) -> Self {
        let mut d = vec![BigInt::zero(); n + 1];
        d[0] = BigInt::one();
        let lambda = (0..n).map(|i| vec![BigInt::zero(); i]).collect();
        Self { lambda, d, n }
    }

    /// Compute the full orthogonalization of a basis
    pub fn compute(basis: &LatticeBasis) -> Result<Self> {
        let mut gs = Self::new(basis.n);
        for k in 0..basis.n {
            gs.extend(basis, k)?;
        }
        Ok(gs)
    }

    /// Orthogonalize row k against rows 0..k
    ///
    /// Rows 0..k must already be present. Fails if b_k lies in the span of the
    /// previous rows.
    pub fn extend(&mut self, basis: &LatticeBasis, k: usize) -> Result<()> {
        for j in 0..=k {
            let mut u = basis.inner_product(k, j);
            for i in 0..j {
                u = (&self.d[i + 1] * &u - &self.lambda[k][i] * &self.lambda[j][i]) / &self.d[i];
            }
            if j < k {
                self.lambda[k][j] = u;
            } else {
                if u.is_zero() {
                    return Err(SpectralError::DependentBasis { row: k });
                }
                self.d[k + 1] = u;
            }
        }
        Ok(())
    }

    /// Get λ_ij
    pub fn get_lambda(&self, i: usize, j: usize) -> &BigInt {
        if j < i {
            &self.lambda[i][j]
        } else {
            panic!("λ_ij only defined for j < i")
        }
    }

    /// ||b*_i||² as the exact fraction (numerator, denominator)
    pub fn norm_sq(&self, i: usize) -> (&BigInt, &BigInt) {
        (&self.d[i + 1], &self.d[i])
    }

    /// Squared determinant of the lattice spanned by the basis
    pub fn squared_determinant(&self) -> &BigInt {
        &self.d[self.n]
    }

    /// Check if μ_ij needs size reduction (|μ_ij| > 1/2)
    pub fn needs_size_reduction(&self, i: usize, j: usize) -> bool {
        // |λ_ij / d_{j+1}| > 1/2  ⟺  |2λ_ij| > d_{j+1}
        let two_lambda: BigInt = self.get_lambda(i, j) * 2;
        two_lambda.abs() > self.d[j + 1]
    }

    /// Nearest integer to μ_ij, rounding halves up
    pub fn rounded_mu(&self, i: usize, j: usize) -> BigInt {
        use num_integer::Integer;
        // round(λ/d) = floor((2λ + d) / 2d), d > 0
        let den = &self.d[j + 1];
        let num: BigInt = self.get_lambda(i, j) * 2 + den;
        num.div_floor(&(den * 2))
    }

    /// Check Lovász condition at position k with δ = delta_num / delta_den
    ///
    /// The condition δ ||b*_{k-1}||² ≤ ||b*_k||² + μ_{k,k-1}² ||b*_{k-1}||²
    /// becomes, after multiplying through by d_{k-1} d_k²:
    ///
    /// ```text
    /// δ d_k² ≤ d_{k+1} d_{k-1} + λ_{k,k-1}²
    /// ```
    pub fn check_lovasz(&self, k: usize, delta_num: i64, delta_den: i64) -> bool {
        if k == 0 {
            return true;
        }

        let lam = &self.lambda[k][k - 1];
        let lhs = BigInt::from(delta_num) * &self.d[k] * &self.d[k];
        let rhs = BigInt::from(delta_den) * (&self.d[k + 1] * &self.d[k - 1] + lam * lam);
        lhs <= rhs
    }

    /// Update after size reduction b_k = b_k - q * b_l
    pub fn update_size_reduction(&mut self, k: usize, l: usize, q: &BigInt) {
        let step = q * &self.d[l + 1];
        self.lambda[k][l] -= step;

        for i in 0..l {
            let step = q * &self.lambda[l][i];
            self.lambda[k][i] -= step;
        }
    }

    /// Update after swapping basis vectors k and k-1
    ///
    /// Only rows up to `kmax` have been orthogonalized; rows beyond it are
    /// filled in later by [`extend`](Self::extend).
    pub fn update_swap(&mut self, k: usize, kmax: usize) {
        // λ_{k,j} and λ_{k-1,j} trade places for j < k-1
        for j in 0..k - 1 {
            let tmp = std::mem::take(&mut self.lambda[k][j]);
            self.lambda[k][j] = std::mem::replace(&mut self.lambda[k - 1][j], tmp);
        }

        let lam = self.lambda[k][k - 1].clone();

        // New d_k = (d_{k-1} d_{k+1} + λ²) / d_k
        let b = (&self.d[k - 1] * &self.d[k + 1] + &lam * &lam) / &self.d[k];

        for i in k + 1..=kmax {
            let t = self.lambda[i][k].clone();
            let new_ik = (&self.d[k + 1] * &self.lambda[i][k - 1] - &lam * &t) / &self.d[k];
            let new_ikm1 = (&b * &t + &lam * &new_ik) / &self.d[k + 1];
            self.lambda[i][k] = new_ik;
            self.lambda[i][k - 1] = new_ikm1;
        }

        self.d[k] = b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gram_schmidt_basic() {
        // Simple 2D basis
        let basis = LatticeBasis::from_rows(&[
            vec![3i64, 1],
            vec![2, 2],
        ]);

        let gs = GramSchmidt::compute(&basis).unwrap();

        // d_1 = ||b_0||^2 = 10
        assert_eq!(gs.d[1], BigInt::from(10));

        // λ_10 = d_1 μ_10 = <b_1, b_0> = 8
        assert_eq!(gs.lambda[1][0], BigInt::from(8));

        // d_2 = det^2 = (3*2 - 1*2)^2 = 16, so ||b*_1||^2 = 16/10 = 8/5
        assert_eq!(*gs.squared_determinant(), BigInt::from(16));
        let (num, den) = gs.norm_sq(1);
        assert_eq!(num * 5, den * 8);
    }

    #[test]
    fn test_gram_schmidt_3d() {
        let basis = LatticeBasis::from_rows(&[
            vec![1i64, 1, 1],
            vec![-1, 0, 2],
            vec![3, 5, 6],
        ]);

        let gs = GramSchmidt::compute(&basis).unwrap();
        assert_eq!(gs.n, 3);

        // det = 1*(0*6-2*5) - 1*(-1*6-2*3) + 1*(-5-0) = -10 + 12 - 5 = -3
        assert_eq!(*gs.squared_determinant(), BigInt::from(9));
        for i in 0..=3 {
            assert!(gs.d[i] > BigInt::zero(), "d_{} should be positive", i);
        }
    }

    #[test]
    fn test_dependent_rows_rejected() {
        let basis = LatticeBasis::from_rows(&[
            vec![1i64, 2],
            vec![2, 4],
        ]);

        let err = GramSchmidt::compute(&basis).unwrap_err();
        assert!(matches!(err, SpectralError::DependentBasis { row: 1 }));
    }

    #[test]
    fn test_lovasz_condition() {
        let identity = LatticeBasis::from_rows(&[
            vec![1i64, 0],
            vec![0, 1],
        ]);
        let gs = GramSchmidt::compute(&identity).unwrap();
        assert!(gs.check_lovasz(1, 3, 4));
        assert!(gs.check_lovasz(1, 999_999_999, 1_000_000_000));

        // A long first vector followed by a short one violates the condition
        let skewed = LatticeBasis::from_rows(&[
            vec![16i64, 0],
            vec![-5, 1],
        ]);
        let gs = GramSchmidt::compute(&skewed).unwrap();
        assert!(!gs.check_lovasz(1, 3, 4));
    }

    #[test]
    fn test_swap_update_matches_recompute() {
        let mut basis = LatticeBasis::from_rows(&[
            vec![7i64, 2, 1],
            vec![3, 9, -4],
            vec![1, -2, 8],
        ]);
        let mut gs = GramSchmidt::compute(&basis).unwrap();

        basis.swap(1, 2);
        gs.update_swap(2, 2);
        basis.swap(0, 1);
        gs.update_swap(1, 2);

        let fresh = GramSchmidt::compute(&basis).unwrap();
        assert_eq!(gs.d, fresh.d);
        assert_eq!(gs.lambda, fresh.lambda);
    }

    #[test]
    fn test_size_reduction_update_matches_recompute() {
        let mut basis = LatticeBasis::from_rows(&[
            vec![2i64, 0, 0],
            vec![1, 1, 0],
            vec![5, 7, 1],
        ]);
        let mut gs = GramSchmidt::compute(&basis).unwrap();
        assert!(gs.needs_size_reduction(2, 1));

        let q = gs.rounded_mu(2, 1);
        assert_eq!(q, BigInt::from(7));
        basis.reduce_vector(2, 1, &q);
        gs.update_size_reduction(2, 1, &q);

        let fresh = GramSchmidt::compute(&basis).unwrap();
        assert_eq!(gs.lambda, fresh.lambda);
        assert!(!gs.needs_size_reduction(2, 1));
    }
}
