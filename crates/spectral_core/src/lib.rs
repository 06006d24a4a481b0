//! Spectral Core Library
//!
//! Spectral-test figures of merit for congruential generators.
//!
//! # Overview
//!
//! For a multiplier a, modulus m and lag ℓ, the dual lattice of the
//! generator's d-dimensional output vectors is built for d = 2..=max_dim,
//! reduced with an exact integral LLL, and the length of its shortest
//! vector is normalized by Hermite's constant into a figure of merit in
//! (0, 1]. Scores are aggregated as a minimum and a harmonic-weighted mean.
//! A search driver enumerates or samples k-bit multipliers ≡ 5 (mod 8) and
//! reports the ones whose minimum clears a threshold.
//!
//! # Key Components
//!
//! - [`numeric`] - Literal parsing and big-integer helpers
//! - [`lattice`] - Lattice bases, integral Gram-Schmidt data and LLL
//! - [`backend`] - Backend trait for lattice reduction
//! - [`dual`] - Dual lattice construction
//! - [`normalizer`] - Hermite-constant normalization
//! - [`scorer`] - Per-dimension figures of merit and their aggregates
//! - [`candidates`] - xoshiro256** and candidate multiplier streams
//! - [`search`] - Search and evaluation drivers
//! - [`lattice_file`] - LatticeTester input files

pub mod error;
pub mod numeric;
pub mod lattice;
pub mod backend;
pub mod dual;
pub mod normalizer;
pub mod scorer;
pub mod candidates;
pub mod search;
pub mod lattice_file;

pub use error::{Result, SpectralError};
pub use lattice::{LatticeBasis, GramSchmidt, LLL, LLLConfig, LLLStats};
pub use backend::{Backend, CpuBackend};
pub use dual::{DualLattice, GeneratorKind, LatticeParams};
pub use normalizer::{Normalizer, GAMMA, MAX_DIM, MIN_DIM};
pub use scorer::{SpectralScore, SpectralScorer};
pub use candidates::{CandidateGenerator, Sampling, Xoshiro256StarStar};
pub use search::{evaluate, CandidateRecord, Search, SearchConfig, SearchStats, DEFAULT_THRESHOLD};
pub use lattice_file::emit_lattice_files;
