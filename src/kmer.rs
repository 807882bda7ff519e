//! K-mer representation: bit-packed, fixed-width DNA substrings.
//!
//! Each base is packed into 2 bits (A=00, C=01, G=10, T=11). K-mers with
//! `k <= 32` fit in a single `u64`; longer k-mers fall back to a vector of
//! `u64` words. Both backings expose the same shift-in/reverse-complement/
//! canonicalisation operations so callers never branch on which is in use.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::PhyloError;

/// Maximum k-mer length that fits the single-word backing.
pub const SMALL_CAPACITY: usize = 32;

/// A single DNA base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// Parses an ASCII byte as a concrete base (`A`/`C`/`G`/`T`, case-insensitive).
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' | b'a' => Some(Self::A),
            b'C' | b'c' => Some(Self::C),
            b'G' | b'g' => Some(Self::G),
            b'T' | b't' => Some(Self::T),
            _ => None,
        }
    }

    /// The 2-bit code used for packing.
    #[must_use]
    pub const fn code(self) -> u64 {
        match self {
            Self::A => 0,
            Self::C => 1,
            Self::G => 2,
            Self::T => 3,
        }
    }

    /// Decodes a 2-bit code back into a base.
    #[must_use]
    pub const fn from_code(code: u64) -> Self {
        match code & 0b11 {
            0 => Self::A,
            1 => Self::C,
            2 => Self::G,
            _ => Self::T,
        }
    }

    /// Watson-Crick complement.
    #[must_use]
    pub const fn complement(self) -> Self {
        match self {
            Self::A => Self::T,
            Self::C => Self::G,
            Self::G => Self::C,
            Self::T => Self::A,
        }
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::A => b'A',
            Self::C => b'C',
            Self::G => b'G',
            Self::T => b'T',
        }
    }
}

/// A validated k-mer length, `1..=`[`KmerLength::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KmerLength(usize);

impl KmerLength {
    /// The largest k-mer length this crate supports.
    pub const MAX: usize = 500;

    /// Validates and wraps a k-mer length.
    ///
    /// # Errors
    ///
    /// Returns [`PhyloError::InvalidKmerLength`] if `k` is zero or exceeds
    /// [`KmerLength::MAX`].
    pub fn new(k: usize) -> Result<Self, PhyloError> {
        if k == 0 || k > Self::MAX {
            return Err(PhyloError::InvalidKmerLength {
                k,
                min: 1,
                max: Self::MAX,
            });
        }
        Ok(Self(k))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    const fn uses_small_backing(self) -> bool {
        self.0 <= SMALL_CAPACITY
    }
}

/// A bit-packed, fixed-length DNA k-mer.
#[derive(Clone, Debug)]
pub enum Kmer {
    /// Used when `k <= 32`: packed 2 bits per base, most-recent base in the
    /// low-order bits.
    Small { bits: u64, k: usize },
    /// Used when `k > 32`. `words[0]` holds the most significant bases.
    Wide { words: Vec<u64>, k: usize },
}

impl Kmer {
    /// Creates an all-`A` k-mer of length `k`: shifting real bases in from
    /// here reconstructs any k-mer of that length.
    #[must_use]
    pub fn zero(k: KmerLength) -> Self {
        if k.uses_small_backing() {
            Self::Small { bits: 0, k: k.get() }
        } else {
            let words_len = (2 * k.get()).div_ceil(64);
            Self::Wide {
                words: vec![0u64; words_len],
                k: k.get(),
            }
        }
    }

    /// Builds a k-mer directly from concrete bases. Returns `None` if
    /// `bases.len() != k`.
    #[must_use]
    pub fn from_bases(bases: &[Base], k: KmerLength) -> Option<Self> {
        if bases.len() != k.get() {
            return None;
        }
        let mut kmer = Self::zero(k);
        for &b in bases {
            kmer.shift_in(b);
        }
        Some(kmer)
    }

    /// Parses an ASCII DNA string of length `k` into a k-mer. Returns the
    /// index of the first invalid byte on failure.
    pub fn from_ascii(s: &[u8], k: KmerLength) -> Result<Self, usize> {
        if s.len() != k.get() {
            return Err(0);
        }
        let mut kmer = Self::zero(k);
        for (i, &byte) in s.iter().enumerate() {
            let base = Base::from_byte(byte).ok_or(i)?;
            kmer.shift_in(base);
        }
        Ok(kmer)
    }

    #[must_use]
    pub const fn k(&self) -> usize {
        match self {
            Self::Small { k, .. } | Self::Wide { k, .. } => *k,
        }
    }

    /// Appends `base`, shifting the k-mer left by 2 bits and masking back to
    /// `2k` bits (§4.1 shift-in).
    pub fn shift_in(&mut self, base: Base) {
        match self {
            Self::Small { bits, k } => {
                *bits = (*bits << 2 | base.code()) & low_mask_2k(*k as u32);
            }
            Self::Wide { words, .. } => {
                shift_words_left_2(words);
                let last = words.len() - 1;
                words[last] |= base.code();
            }
        }
    }

    /// Decodes the k-mer back into its concrete bases, oldest-inserted base
    /// first.
    #[must_use]
    pub fn bases(&self) -> Vec<Base> {
        match self {
            Self::Small { bits, k } => (0..*k)
                .map(|i| Base::from_code(bits >> (2 * (*k - 1 - i))))
                .collect(),
            Self::Wide { words, k } => {
                let total_bits = 2 * k;
                (0..*k)
                    .map(|i| {
                        let bit_index = total_bits - 2 * (i + 1);
                        // words[0] holds the most significant bases (see the
                        // Wide variant doc and shift_words_left_2), so the
                        // word for a given bit index counts down from the end.
                        let word = words.len() - 1 - bit_index / 64;
                        let shift = bit_index % 64;
                        Base::from_code(words[word] >> shift)
                    })
                    .collect()
            }
        }
    }

    /// Renders the k-mer as an uppercase ASCII string.
    #[must_use]
    pub fn to_ascii_string(&self) -> String {
        self.bases().into_iter().map(|b| b.as_byte() as char).collect()
    }

    /// The reverse complement: complement each base, then reverse order
    /// (§4.1). Equivalent to reading the complemented digits back to front.
    #[must_use]
    pub fn reverse_complement(&self) -> Self {
        let comp_bases: Vec<Base> = self
            .bases()
            .into_iter()
            .rev()
            .map(Base::complement)
            .collect();
        let k = KmerLength::new(self.k()).expect("k already validated by construction");
        Self::from_bases(&comp_bases, k).expect("length matches by construction")
    }

    /// The canonical form: `min(self, reverse_complement(self))`.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let rc = self.reverse_complement();
        if *self <= rc {
            self.clone()
        } else {
            rc
        }
    }

    fn words_msb_first(&self) -> Vec<u64> {
        match self {
            Self::Small { bits, .. } => vec![*bits],
            Self::Wide { words, .. } => words.clone(),
        }
    }
}

fn low_mask_2k(k: u32) -> u64 {
    let bits = 2 * k;
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Shifts a multi-word, MSB-first bit vector left by 2, discarding overflow
/// out of `words[0]`. The caller ORs the new base into the low 2 bits of the
/// last word immediately afterwards.
fn shift_words_left_2(words: &mut [u64]) {
    let mut carry = 0u64;
    for word in words.iter_mut().rev() {
        let new_carry = *word >> 62;
        *word = (*word << 2) | carry;
        carry = new_carry;
    }
}

impl PartialEq for Kmer {
    fn eq(&self, other: &Self) -> bool {
        self.k() == other.k() && self.words_msb_first() == other.words_msb_first()
    }
}

impl Eq for Kmer {}

impl Hash for Kmer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.k().hash(state);
        self.words_msb_first().hash(state);
    }
}

impl PartialOrd for Kmer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kmer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.words_msb_first().cmp(&other.words_msb_first())
    }
}

impl fmt::Display for Kmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_string())
    }
}
