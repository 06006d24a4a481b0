//! Search and evaluation drivers
//!
//! [`Search`] draws k-bit candidates, scores each one in every dimension and
//! reports those whose minimum figure of merit reaches the threshold.
//! [`evaluate`] scores a single multiplier and always reports it.
//!
//! Rows are tab-separated with figures printed as `%8.6f`:
//!
//! ```text
//! search: min  harmonic  a_dec  0xa_hex  FM(2) ... FM(max_dim)
//! eval:   min  harmonic  a_dec  0xa_hex  lag  FM(2) ... FM(max_dim)
//! ```

use num_bigint::BigUint;
use num_traits::One;
use std::fmt;
use std::time::Instant;

use crate::backend::Backend;
use crate::candidates::{CandidateGenerator, Sampling, MIN_BITS};
use crate::dual::GeneratorKind;
use crate::error::{Result, SpectralError};
use crate::normalizer::MAX_DIM;
use crate::numeric;
use crate::scorer::{validate_dimension, SpectralScore, SpectralScorer};

/// Minimum figure of merit a candidate needs to be reported
pub const DEFAULT_THRESHOLD: f64 = 0.70;

/// Progress is logged every this many candidates
const PROGRESS_INTERVAL: u64 = 1000;

/// Search parameters
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Generator seed (random) or starting offset (sequential)
    pub seed: u64,
    pub max_dim: usize,
    /// Must be a power of two
    pub modulus: BigUint,
    /// Candidate size k in bits
    pub bits: i64,
    /// Number of candidates; `None` searches until interrupted
    pub iterations: Option<u64>,
    pub sampling: Sampling,
    pub kind: GeneratorKind,
    pub threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_dim: MAX_DIM,
            modulus: BigUint::one() << 64,
            bits: 64,
            iterations: None,
            sampling: Sampling::Random,
            kind: GeneratorKind::FullPeriod,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl SearchConfig {
    pub fn new(seed: u64, max_dim: usize, modulus: BigUint, bits: i64) -> Self {
        Self {
            seed,
            max_dim,
            modulus,
            bits,
            ..Default::default()
        }
    }

    /// Apply a signed iteration count: negative values select sequential
    /// sampling of `-iters` candidates, non-negative ones random sampling.
    pub fn with_iterations(mut self, iters: Option<i64>) -> Self {
        match iters {
            Some(n) if n < 0 => {
                self.sampling = Sampling::Sequential;
                self.iterations = Some(n.unsigned_abs());
            }
            Some(n) => {
                self.sampling = Sampling::Random;
                self.iterations = Some(n as u64);
            }
            None => {
                self.sampling = Sampling::Random;
                self.iterations = None;
            }
        }
        self
    }

    pub fn with_kind(mut self, kind: GeneratorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check the parameters and return the candidate size in bits
    pub fn validate(&self) -> Result<u64> {
        validate_dimension(self.max_dim, Some(MAX_DIM))?;
        if !numeric::is_power_of_two(&self.modulus) {
            return Err(SpectralError::ModulusNotPowerOfTwo);
        }
        if self.bits < MIN_BITS as i64 {
            return Err(SpectralError::MultiplierSizeTooSmall(self.bits));
        }
        // 2^k ≤ 2^(b-1) = modulus, with b the bit length of the modulus
        let bits = self.bits as u64;
        if bits >= self.modulus.bits() {
            return Err(SpectralError::MultiplierSizeTooLarge(bits));
        }
        Ok(bits)
    }
}

/// One scored multiplier, ready to print
#[derive(Debug, Clone)]
pub struct CandidateRecord {
    pub multiplier: BigUint,
    /// Printed after the hexadecimal multiplier in evaluation rows
    pub lag: Option<u64>,
    pub score: SpectralScore,
}

impl fmt::Display for CandidateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:8.6}\t{:8.6}\t{}\t0x{}",
            self.score.min,
            self.score.harmonic,
            self.multiplier,
            numeric::to_hex(&self.multiplier)
        )?;
        if let Some(lag) = self.lag {
            write!(f, "\t{}", lag)?;
        }
        for fm in &self.score.figures {
            write!(f, "\t{:8.6}", fm)?;
        }
        Ok(())
    }
}

/// Whether a score is good enough to report
pub fn passes_threshold(score: &SpectralScore, threshold: f64) -> bool {
    score.min >= threshold
}

/// Statistics from a search run
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Candidates scored
    pub scored: u64,
    /// Candidates at or above the threshold
    pub reported: u64,
    /// Total time (seconds)
    pub elapsed: f64,
}

/// Multiplier search over a power-of-two modulus with lag 1
pub struct Search<B: Backend> {
    config: SearchConfig,
    bits: u64,
    scorer: SpectralScorer<B>,
}

impl<B: Backend> Search<B> {
    pub fn new(config: SearchConfig, backend: B) -> Result<Self> {
        let bits = config.validate()?;
        let scorer = SpectralScorer::new(
            config.modulus.clone(),
            1,
            config.kind,
            config.max_dim,
            backend,
        )?;
        Ok(Self {
            config,
            bits,
            scorer,
        })
    }

    /// Seed, dimension, modulus and candidate size, one per line
    pub fn header(&self) -> String {
        let label = match self.config.sampling {
            Sampling::Random => "Seed",
            Sampling::Sequential => "Start",
        };
        format!(
            "{}: 0x{:x}\nMaximum dimension: {}\nModulus: {}\nMultiplier size: {} bits",
            label, self.config.seed, self.config.max_dim, self.config.modulus, self.bits
        )
    }

    /// Score candidates in order and pass the ones above threshold to `emit`
    pub fn run<F>(&self, mut emit: F) -> Result<SearchStats>
    where
        F: FnMut(&CandidateRecord) -> std::io::Result<()>,
    {
        let start = Instant::now();
        let mut stats = SearchStats::default();
        let generator = CandidateGenerator::new(self.config.sampling, self.config.seed, self.bits)?;
        let limit = self.config.iterations.unwrap_or(u64::MAX);

        log::info!(
            "Searching {} {}-bit {} multipliers, threshold {}",
            self.config
                .iterations
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
            self.bits,
            self.config.kind.label(),
            self.config.threshold
        );

        for a in generator.take(usize::try_from(limit).unwrap_or(usize::MAX)) {
            let score = self.scorer.score(&a)?;
            stats.scored += 1;

            if passes_threshold(&score, self.config.threshold) {
                stats.reported += 1;
                emit(&CandidateRecord {
                    multiplier: a,
                    lag: None,
                    score,
                })?;
            }

            if stats.scored % PROGRESS_INTERVAL == 0 {
                log::info!(
                    "{} candidates scored, {} reported, {:.1}s",
                    stats.scored,
                    stats.reported,
                    start.elapsed().as_secs_f64()
                );
            }
        }

        stats.elapsed = start.elapsed().as_secs_f64();
        log::info!(
            "Search finished: {} scored, {} reported in {:.3}s",
            stats.scored,
            stats.reported,
            stats.elapsed
        );
        Ok(stats)
    }
}

/// Score one multiplier in dimensions 2..=max_dim
pub fn evaluate<B: Backend>(
    lag: u64,
    max_dim: usize,
    multiplier: &BigUint,
    modulus: &BigUint,
    kind: GeneratorKind,
    backend: B,
) -> Result<CandidateRecord> {
    let scorer = SpectralScorer::new(modulus.clone(), lag, kind, max_dim, backend)?;
    let score = scorer.score(multiplier)?;
    Ok(CandidateRecord {
        multiplier: multiplier.clone(),
        lag: Some(lag),
        score,
    })
}
