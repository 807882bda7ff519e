//! Color sets: bit-packed subsets of the input genomes.
//!
//! A [`ColorSet`] records which of the `N` input genomes ("colors") share a
//! given k-mer. Like [`crate::kmer::Kmer`], it has two backings chosen by
//! `N`: a single `u64` when `N <= 64`, and a vector of `u64` words otherwise.
//! Both backings expose the same operations, so callers never need to know
//! which one they hold.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Maximum number of colors that fit in the single-word backing.
pub const SMALL_CAPACITY: usize = 64;

/// A bit-packed subset of `{0, .., n-1}`.
#[derive(Clone, Debug)]
pub enum ColorSet {
    /// Used when the universe size is at most 64.
    Small { bits: u64, n: usize },
    /// Used when the universe size exceeds 64. `words[0]` holds colors
    /// `0..64`, `words[1]` holds `64..128`, and so on.
    Wide { words: Vec<u64>, n: usize },
}

impl ColorSet {
    /// Creates an empty color set over `n` inputs.
    #[must_use]
    pub fn empty(n: usize) -> Self {
        if n <= SMALL_CAPACITY {
            Self::Small { bits: 0, n }
        } else {
            Self::Wide {
                words: vec![0u64; n.div_ceil(64)],
                n,
            }
        }
    }

    /// Creates a color set with every bit in `0..n` set.
    #[must_use]
    pub fn full(n: usize) -> Self {
        let mut s = Self::empty(n);
        s.fill_universe();
        s
    }

    fn fill_universe(&mut self) {
        match self {
            Self::Small { bits, n } => *bits = low_mask(*n as u32),
            Self::Wide { words, n } => {
                let full_words = *n / 64;
                for w in words.iter_mut().take(full_words) {
                    *w = u64::MAX;
                }
                let rem = *n % 64;
                if rem > 0 {
                    words[full_words] = low_mask(rem as u32);
                }
            }
        }
    }

    /// The universe size `N` this color set was created with.
    #[must_use]
    pub fn universe(&self) -> usize {
        match self {
            Self::Small { n, .. } | Self::Wide { n, .. } => *n,
        }
    }

    /// Sets bit `color`. Panics if `color >= universe()`.
    pub fn set(&mut self, color: usize) {
        assert!(color < self.universe(), "color index out of range");
        match self {
            Self::Small { bits, .. } => *bits |= 1u64 << color,
            Self::Wide { words, .. } => words[color / 64] |= 1u64 << (color % 64),
        }
    }

    /// Returns whether bit `color` is set.
    #[must_use]
    pub fn test(&self, color: usize) -> bool {
        if color >= self.universe() {
            return false;
        }
        match self {
            Self::Small { bits, .. } => bits & (1u64 << color) != 0,
            Self::Wide { words, .. } => words[color / 64] & (1u64 << (color % 64)) != 0,
        }
    }

    /// Clears bit `color`.
    pub fn clear(&mut self, color: usize) {
        if color >= self.universe() {
            return;
        }
        match self {
            Self::Small { bits, .. } => *bits &= !(1u64 << color),
            Self::Wide { words, .. } => words[color / 64] &= !(1u64 << (color % 64)),
        }
    }

    /// Bitwise complement relative to the universe `0..n`.
    #[must_use]
    pub fn complement(&self) -> Self {
        match self {
            Self::Small { bits, n } => Self::Small {
                bits: (!*bits) & low_mask(*n as u32),
                n: *n,
            },
            Self::Wide { words, n } => {
                let mut out: Vec<u64> = words.iter().map(|w| !w).collect();
                let full_words = *n / 64;
                let rem = *n % 64;
                if rem > 0 {
                    out[full_words] &= low_mask(rem as u32);
                }
                Self::Wide { words: out, n: *n }
            }
        }
    }

    /// Set union. Panics if universes differ.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a | b)
    }

    /// Set intersection. Panics if universes differ.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & b)
    }

    fn zip_with(&self, other: &Self, f: impl Fn(u64, u64) -> u64) -> Self {
        assert_eq!(
            self.universe(),
            other.universe(),
            "color sets must share a universe"
        );
        match (self, other) {
            (Self::Small { bits: a, n }, Self::Small { bits: b, .. }) => Self::Small {
                bits: f(*a, *b),
                n: *n,
            },
            (Self::Wide { words: a, n }, Self::Wide { words: b, .. }) => Self::Wide {
                words: a.iter().zip(b.iter()).map(|(x, y)| f(*x, *y)).collect(),
                n: *n,
            },
            _ => unreachable!("mismatched color set backings for the same universe"),
        }
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Small { bits, .. } => *bits == 0,
            Self::Wide { words, .. } => words.iter().all(|w| *w == 0),
        }
    }

    /// Returns `true` if every bit in `0..n` is set.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.complement().is_empty()
    }

    /// Number of set bits.
    #[must_use]
    pub fn popcount(&self) -> u32 {
        match self {
            Self::Small { bits, .. } => bits.count_ones(),
            Self::Wide { words, .. } => words.iter().map(|w| w.count_ones()).sum(),
        }
    }

    /// The normalised split color: `min(self, ¬self)` under [`Ord`].
    ///
    /// A split is identified by whichever side leaves bit 0 unset, which is
    /// equivalent to the lexicographically smaller of the two sides.
    #[must_use]
    pub fn normalised(&self) -> Self {
        let comp = self.complement();
        if *self <= comp {
            self.clone()
        } else {
            comp
        }
    }

    fn words_msb_first(&self) -> Vec<u64> {
        match self {
            Self::Small { bits, .. } => vec![*bits],
            Self::Wide { words, .. } => words.iter().rev().copied().collect(),
        }
    }
}

fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl PartialEq for ColorSet {
    fn eq(&self, other: &Self) -> bool {
        self.universe() == other.universe() && self.words_msb_first() == other.words_msb_first()
    }
}

impl Eq for ColorSet {}

impl Hash for ColorSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.universe().hash(state);
        self.words_msb_first().hash(state);
    }
}

/// Lexicographic ordering over the bit vector, most significant color first.
impl PartialOrd for ColorSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ColorSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.words_msb_first().cmp(&other.words_msb_first())
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for c in 0..self.universe() {
            if self.test(c) {
                if !first {
                    write!(f, ",")?;
                }
                write!(f, "{c}")?;
                first = false;
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_test_clear_small() {
        let mut c = ColorSet::empty(5);
        assert!(!c.test(2));
        c.set(2);
        assert!(c.test(2));
        c.clear(2);
        assert!(!c.test(2));
    }

    #[test]
    fn set_test_clear_wide() {
        let mut c = ColorSet::empty(100);
        c.set(70);
        assert!(c.test(70));
        assert!(!c.test(69));
        c.clear(70);
        assert!(!c.test(70));
    }

    #[test]
    fn complement_small() {
        let mut c = ColorSet::empty(4);
        c.set(0);
        c.set(2);
        let comp = c.complement();
        assert!(comp.test(1));
        assert!(comp.test(3));
        assert!(!comp.test(0));
        assert!(!comp.test(2));
    }

    #[test]
    fn complement_wide() {
        let mut c = ColorSet::empty(130);
        c.set(0);
        c.set(129);
        let comp = c.complement();
        assert!(!comp.test(0));
        assert!(!comp.test(129));
        assert!(comp.test(1));
        assert!(comp.test(128));
    }

    #[test]
    fn union_and_intersection() {
        let mut a = ColorSet::empty(8);
        a.set(0);
        a.set(1);
        let mut b = ColorSet::empty(8);
        b.set(1);
        b.set(2);

        let u = a.union(&b);
        assert!(u.test(0) && u.test(1) && u.test(2));

        let i = a.intersection(&b);
        assert!(!i.test(0));
        assert!(i.test(1));
        assert!(!i.test(2));
    }

    #[test]
    fn popcount_matches_set_bits() {
        let mut c = ColorSet::empty(10);
        c.set(1);
        c.set(5);
        c.set(9);
        assert_eq!(c.popcount(), 3);
    }

    #[test]
    fn full_is_full_and_empty_is_empty() {
        assert!(ColorSet::full(10).is_full());
        assert!(ColorSet::empty(10).is_empty());
        assert!(!ColorSet::full(10).is_empty());
        assert!(!ColorSet::empty(10).is_full());
    }

    #[test]
    fn normalised_picks_smaller_side() {
        let n = 4;
        let mut a = ColorSet::empty(n);
        a.set(3); // bit 0 (color 0) unset -> {3} should already be the smaller "no bit 0" side? check explicitly
        let norm = a.normalised();
        let comp = a.complement();
        assert!(norm == a || norm == comp);
        assert!(norm <= comp);
    }

    #[test]
    fn normalised_is_stable_for_either_side() {
        let n = 6;
        let mut a = ColorSet::empty(n);
        a.set(0);
        a.set(1);
        let comp = a.complement();
        assert_eq!(a.normalised(), comp.normalised());
    }

    #[test]
    fn equality_and_hash_consistent_across_backings_boundary() {
        let mut small = ColorSet::empty(64);
        small.set(3);
        let mut small2 = ColorSet::empty(64);
        small2.set(3);
        assert_eq!(small, small2);
    }

    #[test]
    fn ordering_is_lexicographic_by_high_color_first() {
        let mut a = ColorSet::empty(8);
        a.set(7);
        let mut b = ColorSet::empty(8);
        b.set(0);
        assert!(b < a);
    }

    #[test]
    #[should_panic(expected = "color sets must share a universe")]
    fn mismatched_universe_panics_on_union() {
        let a = ColorSet::empty(8);
        let b = ColorSet::empty(16);
        let _ = a.union(&b);
    }

    #[test]
    fn display_lists_members() {
        let mut c = ColorSet::empty(5);
        c.set(0);
        c.set(3);
        assert_eq!(c.to_string(), "{0,3}");
    }
}
