//! Lattice basis reduction
//!
//! Exact integer arithmetic for reducing the dual lattices of congruential
//! generators.
//!
//! # Key Components
//!
//! - [`LatticeBasis`] - Row-vector basis representation
//! - [`GramSchmidt`] - Integral Gram-Schmidt data (d_i, λ_ij)
//! - [`LLL`] - LLL lattice reduction algorithm
//!
//! # Example
//!
//! ```
//! use num_bigint::BigInt;
//! use spectral_core::lattice::{LatticeBasis, LLL, LLLConfig};
//!
//! let basis = LatticeBasis::from_rows(&[
//!     vec![16i64, 0],
//!     vec![-5, 1],
//! ]);
//!
//! let (reduced, _stats) = LLL::reduce(&basis, &LLLConfig::spectral()).unwrap();
//! assert_eq!(reduced.min_norm_squared(), BigInt::from(10));
//! ```

pub mod basis;
pub mod gram_schmidt;
pub mod lll;

pub use basis::LatticeBasis;
pub use gram_schmidt::GramSchmidt;
pub use lll::{LLL, LLLConfig, LLLStats};
