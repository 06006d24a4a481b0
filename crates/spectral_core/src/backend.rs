//! Backend trait for lattice reduction dispatch
//!
//! The spectral scorer only needs one capability from a reduction library:
//! turn an integer basis into a reduced one whose shortest row approximates
//! the lattice minimum. Any conforming implementation can stand behind this
//! trait; [`CpuBackend`] uses the in-crate exact LLL.

use crate::error::Result;
use crate::lattice::{LatticeBasis, LLLConfig, LLLStats, LLL};

/// Backend trait for lattice reduction
pub trait Backend: Send + Sync {
    /// Name of this backend (for logging)
    fn name(&self) -> &'static str;

    /// Reduce `basis` in place
    ///
    /// # Arguments
    /// * `basis` - Square integer basis, rows are basis vectors
    /// * `config` - Reduction quality δ (as a fraction) and iteration budget
    ///
    /// # Returns
    /// Reduction statistics, including the squared lattice determinant
    fn reduce(&self, basis: &mut LatticeBasis, config: &LLLConfig) -> Result<LLLStats>;
}

/// Single-threaded exact LLL backend
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for CpuBackend {
    fn name(&self) -> &'static str {
        "CPU (exact LLL)"
    }

    fn reduce(&self, basis: &mut LatticeBasis, config: &LLLConfig) -> Result<LLLStats> {
        LLL::reduce_in_place(basis, config)
    }
}
