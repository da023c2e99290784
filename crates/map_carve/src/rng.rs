//! Deterministic counter-based random number generation.
//!
//! [`GenRng`] is a SplitMix64 generator: the state is a plain counter advanced
//! by a fixed increment, and every output is a mix of the new counter value.
//! It is the only randomness source in the crate; every algorithm takes it by
//! mutable reference so the draw order is caller-controlled and reproducible.
//! Not cryptographic.
use rand::RngCore;

use crate::error::{Error, Result};

const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;

/// Sanitizes a run seed: `0` is illegal and maps to `1`.
pub fn sanitize_seed(seed: u64) -> u64 {
    if seed == 0 {
        1
    } else {
        seed
    }
}

/// Counter-based deterministic generator (SplitMix64).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenRng {
    state: u64,
}

impl GenRng {
    /// Creates a generator from a run seed. Seed `0` is sanitized to `1`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: sanitize_seed(seed),
        }
    }

    /// One draw: advances the counter and mixes it.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// One draw, upper 32 bits.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// One draw, uniform in `[0, 1)` with 24 bits of mantissa.
    pub fn next_f32(&mut self) -> f32 {
        let x = self.next_u32() >> 8;
        (x as f32) / ((1u32 << 24) as f32)
    }

    /// One draw, uniform index in `[0, n)` via multiply-shift reduction.
    /// `n` must be non-zero.
    pub fn next_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "next_index requires n > 0");
        ((self.next_u64() as u128 * n as u128) >> 64) as usize
    }

    /// Uniform integer in `[min, max]` inclusive. Consumes one draw, except
    /// when `min == max` where no draw is consumed.
    pub fn next_range_i32(&mut self, min: i32, max: i32) -> Result<i32> {
        if min > max {
            return Err(Error::InvalidArgument(format!(
                "malformed range: [{min}, {max}]"
            )));
        }
        if min == max {
            return Ok(min);
        }
        let span = (max as i64 - min as i64 + 1) as usize;
        Ok(min + self.next_index(span) as i32)
    }

    /// Uniform integer in `[min, max]` inclusive, unsigned variant. Same draw
    /// contract as [`GenRng::next_range_i32`].
    pub fn next_range_u32(&mut self, min: u32, max: u32) -> Result<u32> {
        if min > max {
            return Err(Error::InvalidArgument(format!(
                "malformed range: [{min}, {max}]"
            )));
        }
        if min == max {
            return Ok(min);
        }
        let span = (max as u64 - min as u64 + 1) as usize;
        Ok(min + self.next_index(span) as u32)
    }
}

impl RngCore for GenRng {
    fn next_u32(&mut self) -> u32 {
        GenRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        GenRng::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = GenRng::next_u64(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
