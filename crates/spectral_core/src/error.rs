//! Error types for validation and lattice reduction

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectralError {
    #[error("Invalid decimal constant {0}")]
    InvalidDecimal(String),

    #[error("Invalid hexadecimal constant {0}")]
    InvalidHexadecimal(String),

    #[error("Invalid power {0}")]
    InvalidPower(String),

    #[error("Unreadable {what}: {value}")]
    Unreadable { what: &'static str, value: String },

    #[error("The lag must be strictly positive")]
    NonPositiveLag,

    #[error("Maximum possible number of dimensions: {max}")]
    DimensionTooLarge { max: usize },

    #[error("Minimum possible number of dimensions: {min}")]
    DimensionTooSmall { min: usize },

    #[error("The modulus must be a power of two")]
    ModulusNotPowerOfTwo,

    #[error("The multiplier must be smaller than the modulus")]
    MultiplierTooLarge,

    #[error("Multiplier size too small: {0}")]
    MultiplierSizeTooSmall(i64),

    #[error("Multiplier size too large for modulus: {0}")]
    MultiplierSizeTooLarge(u64),

    #[error("Effective modulus vanishes (modulus {modulus}, lag {lag})")]
    DegenerateModulus { modulus: String, lag: u64 },

    #[error("Lattice basis is linearly dependent at row {row}")]
    DependentBasis { row: usize },

    #[error("LLL reduction exceeded its budget of {budget} iterations")]
    IterationLimit { budget: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpectralError>;
