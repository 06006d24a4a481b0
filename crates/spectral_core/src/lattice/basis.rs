//! Lattice basis representation
//!
//! Row-vector integer bases as consumed and produced by the reduction backend.

use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;

/// A lattice basis represented as a matrix of row vectors
///
/// Each row b_i is a basis vector in Z^m.
/// The lattice L(B) = {Σ x_i b_i : x_i ∈ Z}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeBasis {
    /// Basis vectors as rows (n vectors of dimension m)
    pub vectors: Vec<Vec<BigInt>>,
    /// Number of basis vectors (rank)
    pub n: usize,
    /// Dimension of the ambient space
    pub m: usize,
}

impl LatticeBasis {
    /// Create a new lattice basis from row vectors
    ///
    /// # Panics
    /// Panics if rows have inconsistent dimensions or if the basis is empty
    pub fn new(vectors: Vec<Vec<BigInt>>) -> Self {
        assert!(!vectors.is_empty(), "Basis cannot be empty");
        let m = vectors[0].len();
        assert!(m > 0, "Vectors cannot be empty");
        assert!(
            vectors.iter().all(|v| v.len() == m),
            "All vectors must have the same dimension"
        );

        let n = vectors.len();
        Self { vectors, n, m }
    }

    /// Create a lattice basis from integer slices
    pub fn from_rows<T: Into<BigInt> + Clone>(rows: &[Vec<T>]) -> Self {
        let vectors: Vec<Vec<BigInt>> = rows
            .iter()
            .map(|row| row.iter().map(|x| x.clone().into()).collect())
            .collect();
        Self::new(vectors)
    }

    /// Create a random square basis for testing
    ///
    /// Entries are drawn from `[-2^(bits-1), 2^(bits-1))`. The diagonal is
    /// pushed away from zero so the rows are almost surely independent.
    pub fn random(n: usize, bits: usize) -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let half = 1i64 << (bits - 1);

        let vectors: Vec<Vec<BigInt>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let val: i64 = rng.gen_range(-half..half);
                        if i == j {
                            BigInt::from(val.abs() + half * n as i64)
                        } else {
                            BigInt::from(val)
                        }
                    })
                    .collect()
            })
            .collect();

        Self { vectors, n, m: n }
    }

    /// Get vector at index i
    pub fn get(&self, i: usize) -> &[BigInt] {
        &self.vectors[i]
    }

    /// Swap two basis vectors
    pub fn swap(&mut self, i: usize, j: usize) {
        self.vectors.swap(i, j);
    }

    /// Compute inner product <b_i, b_j>
    pub fn inner_product(&self, i: usize, j: usize) -> BigInt {
        self.vectors[i]
            .iter()
            .zip(self.vectors[j].iter())
            .map(|(a, b)| a * b)
            .fold(BigInt::zero(), |acc, x| acc + x)
    }

    /// Compute squared norm ||b_i||^2
    pub fn norm_squared(&self, i: usize) -> BigInt {
        self.inner_product(i, i)
    }

    /// Smallest squared norm over all rows
    ///
    /// Independent of row order; this is the only quantity the spectral test
    /// reads from a reduced basis.
    pub fn min_norm_squared(&self) -> BigInt {
        (0..self.n)
            .map(|i| self.norm_squared(i))
            .min()
            .unwrap_or_else(BigInt::zero)
    }

    /// Update b_i = b_i - q * b_j (size reduction step)
    pub fn reduce_vector(&mut self, i: usize, j: usize, q: &BigInt) {
        for k in 0..self.m {
            let delta = q * &self.vectors[j][k];
            self.vectors[i][k] -= delta;
        }
    }
}

impl fmt::Display for LatticeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LatticeBasis ({}×{}):", self.n, self.m)?;
        for (i, v) in self.vectors.iter().enumerate() {
            write!(f, "  b_{}: [", i)?;
            for (j, x) in v.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
