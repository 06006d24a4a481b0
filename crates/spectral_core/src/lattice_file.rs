//! LatticeTester input files
//!
//! Writes the dual basis B_d of every dimension to `BASENAME-d.dat`, framed
//! by the commands LatticeTester needs to compute the spectral figure of
//! merit with BKZ reduction and branch-and-bound:
//!
//! ```text
//! SPECTRAL BESTLAT
//! BKZ ARBITRARY 0.9999999999 100
//! d
//! <d rows, each entry followed by a space>
//! 1000000000
//! TERMINAL
//! ```

use num_bigint::BigUint;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::dual::{DualLattice, GeneratorKind, LatticeParams};
use crate::error::{Result, SpectralError};
use crate::lattice::LatticeBasis;
use crate::scorer::validate_dimension;

const PREAMBLE: &str = "SPECTRAL BESTLAT\nBKZ ARBITRARY 0.9999999999 100";

/// Branch-and-bound node budget
const MAX_NODES: u64 = 1_000_000_000;

const TRAILER: &str = "TERMINAL";

/// Write one lattice file for `basis`
pub fn write_lattice_file<W: Write>(out: &mut W, basis: &LatticeBasis) -> std::io::Result<()> {
    writeln!(out, "{}", PREAMBLE)?;
    writeln!(out, "{}", basis.n)?;
    for row in &basis.vectors {
        for x in row {
            write!(out, "{} ", x)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", MAX_NODES)?;
    writeln!(out, "{}", TRAILER)
}

/// `BASENAME-d.dat`
pub fn lattice_file_path(basename: &str, d: usize) -> PathBuf {
    PathBuf::from(format!("{}-{}.dat", basename, d))
}

/// Write `BASENAME-d.dat` for d = 2..=max_dim and return the paths written
///
/// There is no upper bound on `max_dim` here: the files are reduced by an
/// external tool, not by the in-crate scorer.
pub fn emit_lattice_files(
    lag: u64,
    max_dim: usize,
    multiplier: &BigUint,
    modulus: &BigUint,
    kind: GeneratorKind,
    basename: &str,
) -> Result<Vec<PathBuf>> {
    if lag == 0 {
        return Err(SpectralError::NonPositiveLag);
    }
    validate_dimension(max_dim, None)?;
    let params = LatticeParams::new(modulus.clone(), lag, kind)?;
    let a_lag = params.lagged_multiplier(multiplier)?;
    let lattice = DualLattice::new(&params.effective_modulus, &a_lag, max_dim);

    let mut paths = Vec::with_capacity(max_dim - 1);
    for d in 2..=max_dim {
        let path = lattice_file_path(basename, d);
        let mut out = BufWriter::new(File::create(&path)?);
        write_lattice_file(&mut out, &lattice.basis(d))?;
        out.flush()?;

        log::debug!("Wrote {}", path.display());
        paths.push(path);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual::dual_basis;

    #[test]
    fn test_file_format() {
        let basis = dual_basis(&BigUint::from(16u32), &BigUint::from(5u32), 3);
        let mut out = Vec::new();
        write_lattice_file(&mut out, &basis).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "SPECTRAL BESTLAT\n\
             BKZ ARBITRARY 0.9999999999 100\n\
             3\n\
             16 0 0 \n\
             -5 1 0 \n\
             -25 0 1 \n\
             1000000000\n\
             TERMINAL\n"
        );
    }

    #[test]
    fn test_emit_files() {
        let dir = std::env::temp_dir().join(format!("spectral-lattice-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let basename = dir.join("lcg").to_string_lossy().into_owned();

        let paths = emit_lattice_files(
            2,
            30,
            &BigUint::from(5u32),
            &BigUint::from(16u32),
            GeneratorKind::FullPeriod,
            &basename,
        )
        .unwrap();

        assert_eq!(paths.len(), 29);
        assert!(paths[0].ends_with("lcg-2.dat"));

        // Lag 2: a^2 mod 16 = 9, effective modulus 16 / 2 = 8
        let text = std::fs::read_to_string(&paths[0]).unwrap();
        assert!(text.contains("\n2\n8 0 \n-9 1 \n"));
        let last = std::fs::read_to_string(paths.last().unwrap()).unwrap();
        assert!(last.lines().nth(2) == Some("30"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_emit_validation() {
        let m = BigUint::from(1000u32);
        assert!(matches!(
            emit_lattice_files(1, 1, &BigUint::from(3u32), &m, GeneratorKind::FullPeriod, "x"),
            Err(SpectralError::DimensionTooSmall { min: 2 })
        ));
        assert!(matches!(
            emit_lattice_files(1, 4, &BigUint::from(3u32), &m, GeneratorKind::Multiplicative, "x"),
            Err(SpectralError::ModulusNotPowerOfTwo)
        ));
        assert!(matches!(
            emit_lattice_files(1, 4, &m, &m, GeneratorKind::FullPeriod, "x"),
            Err(SpectralError::MultiplierTooLarge)
        ));
        assert!(matches!(
            emit_lattice_files(0, 4, &BigUint::from(3u32), &m, GeneratorKind::FullPeriod, "x"),
            Err(SpectralError::NonPositiveLag)
        ));
    }
}
