//! Spectral CLI
//!
//! Spectral-test evaluation and search of congruential-generator multipliers.
//!
//! # Usage
//! ```bash
//! # Figures of merit of one multiplier, dimensions 2..8, lag 1
//! spectral eval 1 8 0xd1342543de82ef95 2^64
//!
//! # Random search for 64-bit MCG multipliers modulo 2^64 (10^6 candidates)
//! spectral search 0x1234 24 2^64 64 1000000 --mcg
//!
//! # Sequential scan of 1000 candidates starting at 8 * 42 + 5
//! spectral search 42 16 2^32 32 -1000
//!
//! # LatticeTester input files lcg-2.dat .. lcg-32.dat
//! spectral lattice-files 1 32 0xd1342543de82ef95 2^64 lcg
//! ```

mod logger;

use clap::{Parser, Subcommand};
use num_bigint::BigUint;
use std::io::{self, Write};

use spectral_core::numeric;
use spectral_core::{
    emit_lattice_files, evaluate, CpuBackend, GeneratorKind, Result, Search, SearchConfig,
    SpectralError, DEFAULT_THRESHOLD, MAX_DIM, MIN_DIM,
};
use spectral_core::scorer::validate_dimension;

#[derive(Parser)]
#[command(name = "spectral")]
#[command(about = "Spectral-test figures of merit for congruential generators")]
#[command(version)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print min, harmonic score, multiplier, lag and FM(2..MAXDIM) of one multiplier
    Eval {
        /// Lag (1 gives the standard spectral test)
        #[arg(allow_hyphen_values = true, value_parser = lag_arg)]
        lag: i64,

        /// Maximum dimension (2..=24)
        #[arg(allow_hyphen_values = true, value_parser = max_dim_arg)]
        max_dim: i64,

        /// Multiplier: decimal, 0x hexadecimal or 2^K
        multiplier: String,

        /// Modulus: decimal, 0x hexadecimal or 2^K
        modulus: String,

        /// Maximum-period MCG with power-of-two modulus
        #[arg(long)]
        mcg: bool,
    },

    /// Search for multipliers of MSIZE bits whose minimum score reaches the threshold
    Search {
        /// Generator seed, or start offset when ITERS is negative
        #[arg(allow_hyphen_values = true)]
        seed: String,

        /// Maximum dimension (2..=24)
        #[arg(allow_hyphen_values = true, value_parser = max_dim_arg)]
        max_dim: i64,

        /// Power-of-two modulus: decimal, 0x hexadecimal or 2^K
        modulus: String,

        /// Multiplier size in bits
        #[arg(allow_hyphen_values = true, value_parser = msize_arg)]
        msize: i64,

        /// Random candidates to test; negative scans -ITERS candidates sequentially
        #[arg(allow_hyphen_values = true, value_parser = iters_arg)]
        iters: Option<i64>,

        /// Maximum-period MCG with power-of-two modulus
        #[arg(long)]
        mcg: bool,

        /// Minimum figure of merit to report
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,
    },

    /// Write LatticeTester input files BASENAME-d.dat for d = 2..=MAXDIM
    LatticeFiles {
        /// Lag (1 gives the standard spectral test)
        #[arg(allow_hyphen_values = true, value_parser = lag_arg)]
        lag: i64,

        /// Maximum dimension (at least 2)
        #[arg(allow_hyphen_values = true, value_parser = max_dim_arg)]
        max_dim: i64,

        /// Multiplier: decimal, 0x hexadecimal or 2^K
        multiplier: String,

        /// Modulus: decimal, 0x hexadecimal or 2^K
        modulus: String,

        /// Output path prefix
        basename: String,

        /// Maximum-period MCG with power-of-two modulus
        #[arg(long)]
        mcg: bool,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    logger::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Eval {
            lag,
            max_dim,
            multiplier,
            modulus,
            mcg,
        } => run_eval(lag, max_dim, &multiplier, &modulus, kind(mcg)),
        Commands::Search {
            seed,
            max_dim,
            modulus,
            msize,
            iters,
            mcg,
            threshold,
        } => run_search(&seed, max_dim, &modulus, msize, iters, kind(mcg), threshold),
        Commands::LatticeFiles {
            lag,
            max_dim,
            multiplier,
            modulus,
            basename,
            mcg,
        } => run_lattice_files(lag, max_dim, &multiplier, &modulus, &basename, kind(mcg)),
    }
}

fn kind(mcg: bool) -> GeneratorKind {
    if mcg {
        GeneratorKind::Multiplicative
    } else {
        GeneratorKind::FullPeriod
    }
}

// Integer arguments accept decimal or 0x hexadecimal, with an optional sign
fn lag_arg(s: &str) -> std::result::Result<i64, String> {
    numeric::parse_signed(s, "lag").map_err(|e| e.to_string())
}

fn max_dim_arg(s: &str) -> std::result::Result<i64, String> {
    numeric::parse_signed(s, "maximum dimension").map_err(|e| e.to_string())
}

fn msize_arg(s: &str) -> std::result::Result<i64, String> {
    numeric::parse_signed(s, "multiplier size").map_err(|e| e.to_string())
}

fn iters_arg(s: &str) -> std::result::Result<i64, String> {
    numeric::parse_signed(s, "number of iterations").map_err(|e| e.to_string())
}

fn positive_lag(lag: i64) -> Result<u64> {
    if lag < 1 {
        return Err(SpectralError::NonPositiveLag);
    }
    Ok(lag as u64)
}

/// Negative values fail the lower-bound check the core applies to every dimension
fn dimension(max_dim: i64) -> Result<usize> {
    usize::try_from(max_dim).map_err(|_| SpectralError::DimensionTooSmall { min: MIN_DIM })
}

fn parse_pair(multiplier: &str, modulus: &str) -> Result<(BigUint, BigUint)> {
    Ok((numeric::parse_integer(multiplier)?, numeric::parse_integer(modulus)?))
}

fn run_eval(
    lag: i64,
    max_dim: i64,
    multiplier: &str,
    modulus: &str,
    kind: GeneratorKind,
) -> Result<()> {
    let lag = positive_lag(lag)?;
    let max_dim = dimension(max_dim)?;
    validate_dimension(max_dim, Some(MAX_DIM))?;
    let (a, m) = parse_pair(multiplier, modulus)?;

    let record = evaluate(lag, max_dim, &a, &m, kind, CpuBackend::new())?;
    println!("{}", record);
    Ok(())
}

fn run_search(
    seed: &str,
    max_dim: i64,
    modulus: &str,
    msize: i64,
    iters: Option<i64>,
    kind: GeneratorKind,
    threshold: f64,
) -> Result<()> {
    let seed = numeric::parse_seed(seed)?;
    let max_dim = dimension(max_dim)?;
    validate_dimension(max_dim, Some(MAX_DIM))?;
    let modulus = numeric::parse_integer(modulus)?;

    let config = SearchConfig::new(seed, max_dim, modulus, msize)
        .with_iterations(iters)
        .with_kind(kind)
        .with_threshold(threshold);
    let search = Search::new(config, CpuBackend::new())?;

    eprintln!("{}", search.header());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    search.run(|record| {
        writeln!(out, "{}", record)?;
        out.flush()
    })?;
    Ok(())
}

fn run_lattice_files(
    lag: i64,
    max_dim: i64,
    multiplier: &str,
    modulus: &str,
    basename: &str,
    kind: GeneratorKind,
) -> Result<()> {
    let lag = positive_lag(lag)?;
    let max_dim = dimension(max_dim)?;
    validate_dimension(max_dim, None)?;
    let (a, m) = parse_pair(multiplier, modulus)?;

    let paths = emit_lattice_files(lag, max_dim, &a, &m, kind, basename)?;
    log::info!("Wrote {} lattice files", paths.len());
    Ok(())
}
