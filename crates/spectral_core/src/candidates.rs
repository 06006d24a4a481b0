//! Candidate multipliers
//!
//! Candidates have exactly k bits and are ≡ 5 (mod 8), the residue that gives
//! full period for LCGs and maximum period for MCGs with power-of-two modulus.
//! Both properties are forced by masking: `(x & mask) | surround` with
//! `mask = 2^(k-1) - 8` and `surround = 2^(k-1) | 5`.
//!
//! Random candidates come from xoshiro256**, seeded through SplitMix64.

use num_bigint::BigUint;
use num_traits::One;
use rand::{Error, RngCore, SeedableRng};

use crate::error::{Result, SpectralError};

/// Smallest bit size that can hold a value ≡ 5 (mod 8) with the top bit set
pub const MIN_BITS: u64 = 3;

/// Number of 64-bit words concatenated for a random candidate (more if k > 256)
const RANDOM_WORDS: usize = 4;

/// SplitMix64 step, used to expand a 64-bit seed
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// xoshiro256** (Blackman and Vigna)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoshiro256StarStar {
    s: [u64; 4],
}

impl Xoshiro256StarStar {
    /// Use `state` directly; it must not be all zero
    pub fn from_state(state: [u64; 4]) -> Self {
        assert!(state != [0; 4], "xoshiro256** state must not be all zero");
        Self { s: state }
    }

    pub fn state(&self) -> [u64; 4] {
        self.s
    }
}

impl RngCore for Xoshiro256StarStar {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let s = &mut self.s;
        let result = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s[1] << 17;

        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];

        s[2] ^= t;
        s[3] = s[3].rotate_left(45);

        result
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xoshiro256StarStar {
    type Seed = [u8; 32];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut s = [0u64; 4];
        for (word, bytes) in s.iter_mut().zip(seed.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(bytes);
            *word = u64::from_le_bytes(buf);
        }
        if s == [0; 4] {
            return Self::seed_from_u64(0);
        }
        Self { s }
    }

    /// Fill the state with four SplitMix64 outputs
    fn seed_from_u64(seed: u64) -> Self {
        let mut sm = seed;
        let s = [
            splitmix64(&mut sm),
            splitmix64(&mut sm),
            splitmix64(&mut sm),
            splitmix64(&mut sm),
        ];
        Self { s }
    }
}

/// How candidates are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// ((seed + i) · 8) masked, for i = 0, 1, 2, ...
    Sequential,
    /// xoshiro256** words, masked
    Random,
}

#[derive(Debug, Clone)]
enum Source {
    Sequential { next: BigUint },
    Random { rng: Xoshiro256StarStar, words: usize },
}

/// Infinite stream of k-bit multipliers ≡ 5 (mod 8)
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    mask: BigUint,
    surround: BigUint,
    source: Source,
}

impl CandidateGenerator {
    /// Candidates of `bits` bits; the random stream is seeded with `seed << 8 | bits`
    pub fn new(sampling: Sampling, seed: u64, bits: u64) -> Result<Self> {
        if bits < MIN_BITS {
            return Err(SpectralError::MultiplierSizeTooSmall(bits as i64));
        }

        let top = BigUint::one() << (bits - 1);
        // 2^(k-1) - 8 would be negative for k = 3
        let mask = if bits > MIN_BITS {
            &top - 8u32
        } else {
            BigUint::default()
        };
        let surround = top | BigUint::from(5u32);

        let source = match sampling {
            Sampling::Sequential => Source::Sequential {
                next: BigUint::from(seed),
            },
            Sampling::Random => {
                let words = RANDOM_WORDS.max(bits.div_ceil(64) as usize);
                Source::Random {
                    rng: Xoshiro256StarStar::seed_from_u64((seed << 8) | bits),
                    words,
                }
            }
        };

        Ok(Self {
            mask,
            surround,
            source,
        })
    }

    pub fn sequential(seed: u64, bits: u64) -> Result<Self> {
        Self::new(Sampling::Sequential, seed, bits)
    }

    pub fn random(seed: u64, bits: u64) -> Result<Self> {
        Self::new(Sampling::Random, seed, bits)
    }

    fn shape(&self, raw: BigUint) -> BigUint {
        (raw & &self.mask) | &self.surround
    }
}

impl Iterator for CandidateGenerator {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        let raw = match &mut self.source {
            Source::Sequential { next } => {
                let raw = &*next << 3;
                *next += 1u32;
                raw
            }
            Source::Random { rng, words } => {
                let mut raw = BigUint::default();
                for _ in 0..*words {
                    raw = (raw << 64) | BigUint::from(rng.next_u64());
                }
                raw
            }
        };
        Some(self.shape(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;

    fn values(stream: CandidateGenerator, n: usize) -> Vec<u64> {
        stream.take(n)
            .map(|a| a.to_u64().unwrap())
            .collect()
    }

    #[test]
    fn test_xoshiro_reference_vector() {
        let mut rng = Xoshiro256StarStar::from_state([1, 2, 3, 4]);
        assert_eq!(rng.next_u64(), 11520);
        assert_eq!(rng.next_u64(), 0);
        assert_eq!(rng.next_u64(), 1509978240);
        assert_eq!(rng.next_u64(), 1215971899390074240);
    }

    #[test]
    fn test_splitmix_seeding() {
        let rng = Xoshiro256StarStar::seed_from_u64(0);
        assert_eq!(
            rng.state(),
            [
                0xe220a8397b1dcdaf,
                0x6e789e6aa1b965f4,
                0x06c45d188009454f,
                0xf88bb8a8724c81ec,
            ]
        );

        let mut rng = rng;
        assert_eq!(rng.next_u64(), 11091344671253066420);
        assert_eq!(rng.next_u64(), 13793997310169335082);
        assert_eq!(rng.next_u64(), 1900383378846508768);
        assert_eq!(rng.next_u64(), 7684712102626143532);
    }

    #[test]
    fn test_zero_seed_bytes() {
        let rng = Xoshiro256StarStar::from_seed([0; 32]);
        assert_eq!(rng, Xoshiro256StarStar::seed_from_u64(0));
    }

    #[test]
    fn test_sequential_candidates() {
        let stream = CandidateGenerator::sequential(0, 8).unwrap();
        assert_eq!(values(stream, 3), vec![133, 141, 149]);
    }

    #[test]
    fn test_random_candidates() {
        let stream = CandidateGenerator::random(0, 8).unwrap();
        assert_eq!(values(stream, 3), vec![133, 173, 133]);

        let stream = CandidateGenerator::random(42, 16).unwrap();
        assert_eq!(values(stream, 3), vec![55421, 59669, 55389]);
    }

    #[test]
    fn test_reseeding_reproduces_sequence() {
        let a: Vec<_> = CandidateGenerator::random(0xdead, 64).unwrap().take(20).collect();
        let b: Vec<_> = CandidateGenerator::random(0xdead, 64).unwrap().take(20).collect();
        assert_eq!(a, b);

        let c: Vec<_> = CandidateGenerator::random(0xbeef, 64).unwrap().take(20).collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_candidate_shape() {
        for bits in [3u64, 8, 33, 64, 128, 300] {
            let low = BigUint::one() << (bits - 1);
            let high = BigUint::one() << bits;
            let stream = CandidateGenerator::random(7, bits).unwrap();
            for a in stream.take(50) {
                assert!(a >= low && a < high, "{} bits: {}", bits, a);
                assert_eq!(&a % 8u32, BigUint::from(5u32));
            }
        }
    }

    #[test]
    fn test_three_bit_candidates() {
        // mask is 0: every candidate is 5
        let stream = CandidateGenerator::random(1, 3).unwrap();
        assert_eq!(values(stream, 4), vec![5, 5, 5, 5]);
    }

    #[test]
    fn test_too_few_bits() {
        assert!(matches!(
            CandidateGenerator::sequential(0, 2),
            Err(SpectralError::MultiplierSizeTooSmall(2))
        ));
    }
}
