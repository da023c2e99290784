//! Bit-packed occupancy grid.
//!
//! [`MaskGrid`] owns a packed `u64` word array over a [`Domain`]. Bits at
//! positions past `width * height` (the tail bits of the last word) are kept
//! at zero by every mutating operation, so population counts and snapshot
//! hashes never observe stale storage.
//!
//! The grid is deliberately not `Clone`: it owns backing storage, and
//! duplication is explicit via [`MaskGrid::copy_from`].
use crate::error::{Error, Result};
use crate::grid::{fnv1a_init, fnv1a_u64, Domain};
use crate::rng::GenRng;

const WORD_BITS: usize = 64;

/// Bit-packed boolean grid over a [`Domain`].
#[derive(Debug)]
pub struct MaskGrid {
    domain: Domain,
    words: Vec<u64>,
}

impl MaskGrid {
    /// Creates a cleared grid.
    pub fn new(domain: Domain) -> Self {
        let word_count = domain.len().div_ceil(WORD_BITS);
        Self {
            domain,
            words: vec![0; word_count],
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Mask for the last storage word; zero where bits fall past `len`.
    fn tail_mask(&self) -> u64 {
        let used = self.domain.len() % WORD_BITS;
        if used == 0 {
            u64::MAX
        } else {
            (1u64 << used) - 1
        }
    }

    fn apply_tail_mask(&mut self) {
        let mask = self.tail_mask();
        if let Some(last) = self.words.last_mut() {
            *last &= mask;
        }
    }

    /// Bounds-checked read.
    pub fn get(&self, x: i32, y: i32) -> Result<bool> {
        if !self.domain.in_bounds(x, y) {
            return Err(Error::out_of_range(x, y, self.domain));
        }
        Ok(self.get_unchecked(x, y))
    }

    /// Bounds-checked write.
    pub fn set(&mut self, x: i32, y: i32, value: bool) -> Result<()> {
        if !self.domain.in_bounds(x, y) {
            return Err(Error::out_of_range(x, y, self.domain));
        }
        self.set_unchecked(x, y, value);
        Ok(())
    }

    /// Read without a coordinate bounds branch. Callers must prove bounds
    /// via the surrounding loop range.
    pub fn get_unchecked(&self, x: i32, y: i32) -> bool {
        let index = self.domain.index(x, y);
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Write without a coordinate bounds branch. Callers must prove bounds.
    pub fn set_unchecked(&mut self, x: i32, y: i32, value: bool) {
        let index = self.domain.index(x, y);
        let bit = 1u64 << (index % WORD_BITS);
        if value {
            self.words[index / WORD_BITS] |= bit;
        } else {
            self.words[index / WORD_BITS] &= !bit;
        }
    }

    /// Clears every cell.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Sets every cell to `value`, re-masking tail bits.
    pub fn fill(&mut self, value: bool) {
        self.words.fill(if value { u64::MAX } else { 0 });
        self.apply_tail_mask();
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn require_same_domain(&self, other: &MaskGrid) -> Result<()> {
        if self.domain != other.domain {
            return Err(Error::domain_mismatch(self.domain, other.domain));
        }
        Ok(())
    }

    /// Whole-grid copy; dimensions must match.
    pub fn copy_from(&mut self, other: &MaskGrid) -> Result<()> {
        self.require_same_domain(other)?;
        self.words.copy_from_slice(&other.words);
        Ok(())
    }

    /// Word-wise union; dimensions must match.
    pub fn or(&mut self, other: &MaskGrid) -> Result<()> {
        self.require_same_domain(other)?;
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= *b;
        }
        self.apply_tail_mask();
        Ok(())
    }

    /// Word-wise intersection; dimensions must match.
    pub fn and(&mut self, other: &MaskGrid) -> Result<()> {
        self.require_same_domain(other)?;
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a &= *b;
        }
        self.apply_tail_mask();
        Ok(())
    }

    /// Word-wise subtraction (`self &= !other`); dimensions must match.
    pub fn and_not(&mut self, other: &MaskGrid) -> Result<()> {
        self.require_same_domain(other)?;
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a &= !*b;
        }
        self.apply_tail_mask();
        Ok(())
    }

    /// Stable 64-bit FNV-1a fingerprint over (optionally) the dimensions and
    /// then every storage word in index order. The regression-test oracle.
    pub fn snapshot_hash64(&self, include_dimensions: bool) -> u64 {
        let mut hash = fnv1a_init();
        if include_dimensions {
            hash = fnv1a_u64(hash, self.domain.width() as u64);
            hash = fnv1a_u64(hash, self.domain.height() as u64);
            hash = fnv1a_u64(hash, self.domain.len() as u64);
        }
        for word in &self.words {
            hash = fnv1a_u64(hash, *word);
        }
        hash
    }

    /// Samples uniformly among currently-set cells. Consumes exactly one RNG
    /// draw when any cell is set, none when the grid is empty.
    pub fn try_get_random_set_bit(&self, rng: &mut GenRng) -> Option<(i32, i32)> {
        let total = self.count_ones();
        if total == 0 {
            return None;
        }
        let mut target = rng.next_index(total);
        for (word_index, word) in self.words.iter().enumerate() {
            let ones = word.count_ones() as usize;
            if target < ones {
                // Rank scan: drop the lowest `target` set bits.
                let mut w = *word;
                for _ in 0..target {
                    w &= w - 1;
                }
                let index = word_index * WORD_BITS + w.trailing_zeros() as usize;
                return Some(self.domain.coords(index));
            }
            target -= ones;
        }
        unreachable!("rank exceeded population count")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(w: u32, h: u32) -> Domain {
        Domain::new(w, h).unwrap()
    }

    #[test]
    fn new_grid_is_cleared() {
        let grid = MaskGrid::new(domain(7, 5));
        assert_eq!(grid.count_ones(), 0);
        assert!(!grid.get(3, 3).unwrap());
    }

    #[test]
    fn checked_accessors_reject_out_of_bounds() {
        let mut grid = MaskGrid::new(domain(4, 4));
        assert!(matches!(grid.get(4, 0), Err(Error::OutOfRange { .. })));
        assert!(matches!(grid.get(0, -1), Err(Error::OutOfRange { .. })));
        assert!(matches!(
            grid.set(-1, 2, true),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut grid = MaskGrid::new(domain(9, 9));
        grid.set(2, 7, true).unwrap();
        assert!(grid.get(2, 7).unwrap());
        assert_eq!(grid.count_ones(), 1);
        grid.set(2, 7, false).unwrap();
        assert_eq!(grid.count_ones(), 0);
    }

    #[test]
    fn fill_true_respects_tail_bits() {
        // 10x10 = 100 cells, not a multiple of 64.
        let mut grid = MaskGrid::new(domain(10, 10));
        grid.fill(true);
        assert_eq!(grid.count_ones(), 100);
        grid.fill(false);
        assert_eq!(grid.count_ones(), 0);
        grid.fill(true);
        assert_eq!(grid.count_ones(), 100);
    }

    #[test]
    fn tail_bits_survive_boolean_ops() {
        let d = domain(9, 7); // 63 cells, one partial word
        let mut a = MaskGrid::new(d);
        let mut b = MaskGrid::new(d);
        a.fill(true);
        b.fill(true);
        a.or(&b).unwrap();
        assert_eq!(a.count_ones(), 63);
        a.and(&b).unwrap();
        assert_eq!(a.count_ones(), 63);
        a.and_not(&b).unwrap();
        assert_eq!(a.count_ones(), 0);
        a.fill(true);
        assert_eq!(a.count_ones(), 63);
    }

    #[test]
    fn boolean_ops_require_matching_domains() {
        let mut a = MaskGrid::new(domain(4, 4));
        let b = MaskGrid::new(domain(4, 5));
        assert!(matches!(a.or(&b), Err(Error::DomainMismatch { .. })));
        assert!(matches!(a.and(&b), Err(Error::DomainMismatch { .. })));
        assert!(matches!(a.and_not(&b), Err(Error::DomainMismatch { .. })));
        assert!(matches!(a.copy_from(&b), Err(Error::DomainMismatch { .. })));
    }

    #[test]
    fn and_not_subtracts() {
        let d = domain(8, 8);
        let mut a = MaskGrid::new(d);
        let mut b = MaskGrid::new(d);
        a.set(1, 1, true).unwrap();
        a.set(2, 2, true).unwrap();
        b.set(2, 2, true).unwrap();
        a.and_not(&b).unwrap();
        assert!(a.get(1, 1).unwrap());
        assert!(!a.get(2, 2).unwrap());
    }

    #[test]
    fn snapshot_hash_tracks_content_and_dimensions() {
        let mut a = MaskGrid::new(domain(8, 8));
        let b = MaskGrid::new(domain(8, 8));
        assert_eq!(a.snapshot_hash64(true), b.snapshot_hash64(true));

        a.set(3, 4, true).unwrap();
        assert_ne!(a.snapshot_hash64(true), b.snapshot_hash64(true));

        let c = MaskGrid::new(domain(4, 16));
        // Same word count and content, different dimensions.
        assert_eq!(b.snapshot_hash64(false), c.snapshot_hash64(false));
        assert_ne!(b.snapshot_hash64(true), c.snapshot_hash64(true));
    }

    #[test]
    fn copy_from_duplicates_content() {
        let d = domain(6, 6);
        let mut a = MaskGrid::new(d);
        let mut b = MaskGrid::new(d);
        a.set(5, 5, true).unwrap();
        b.copy_from(&a).unwrap();
        assert_eq!(a.snapshot_hash64(true), b.snapshot_hash64(true));
    }

    #[test]
    fn random_set_bit_returns_none_on_empty_grid() {
        let grid = MaskGrid::new(domain(8, 8));
        let mut rng = GenRng::new(1);
        let before = rng;
        assert!(grid.try_get_random_set_bit(&mut rng).is_none());
        assert_eq!(rng, before);
    }

    #[test]
    fn random_set_bit_only_returns_set_cells() {
        let mut grid = MaskGrid::new(domain(16, 16));
        grid.set(0, 0, true).unwrap();
        grid.set(15, 15, true).unwrap();
        grid.set(7, 3, true).unwrap();
        let mut rng = GenRng::new(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let (x, y) = grid.try_get_random_set_bit(&mut rng).unwrap();
            assert!(grid.get(x, y).unwrap());
            seen.insert((x, y));
        }
        // All three cells should appear across 200 uniform draws.
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn random_set_bit_consumes_exactly_one_draw() {
        let mut grid = MaskGrid::new(domain(8, 8));
        grid.set(4, 4, true).unwrap();
        let mut rng = GenRng::new(2);
        let mut reference = rng;
        grid.try_get_random_set_bit(&mut rng).unwrap();
        reference.next_u64();
        assert_eq!(rng, reference);
    }
}
