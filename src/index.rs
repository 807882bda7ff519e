//! The presence index and split-weighting pass (§4.2–§4.3).
//!
//! `kmer_table` tracks, for every distinct k-mer seen, which colors it
//! occurred in and how much multiplicity it accumulated (IUPAC-expanded
//! k-mers contribute a fraction per occurrence, per §4.1). `add_weights`
//! folds that index into a per-color-set accumulator and emits the
//! surviving non-trivial splits into a bounded [`SplitList`].

use std::collections::HashMap;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::color::ColorSet;
use crate::error::PhyloError;
use crate::iupac::expand_window;
use crate::kmer::{Kmer, KmerLength};
use crate::split::SplitList;

/// A `DashMap` keyed by a fast, non-cryptographic hasher: the same shape the
/// teacher's concurrent k-mer tally used.
pub type DashFx<K, V> = DashMap<K, V, FxBuildHasher>;

/// Per-k-mer accumulator.
#[derive(Debug, Clone)]
struct KmerEntry {
    colors: ColorSet,
    multiplicity: f64,
}

/// Per-color-set accumulator populated by [`Index::add_weights`].
#[derive(Debug, Clone, Copy, Default)]
struct WeightAccumulator {
    occurrences: u32,
    total: f64,
}

/// The presence index over a fixed universe of `n` colors and k-mer length `k`.
pub struct Index {
    n: usize,
    k: KmerLength,
    kmer_table: DashFx<Kmer, KmerEntry>,
}

impl Index {
    /// Creates an empty index. `init(t)` in §6's contract corresponds to
    /// constructing an [`Index`] together with the `t` later passed to
    /// [`Index::add_weights`].
    #[must_use]
    pub fn new(n: usize, k: KmerLength) -> Self {
        Self {
            n,
            k,
            kmer_table: DashFx::default(),
        }
    }

    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    #[must_use]
    pub const fn k(&self) -> KmerLength {
        self.k
    }

    /// Number of distinct k-mers currently indexed.
    #[must_use]
    pub fn distinct_kmer_count(&self) -> usize {
        self.kmer_table.len()
    }

    /// Scans `dna` left to right with a rolling window of length `k`,
    /// inserting `color` into the color set of every window built entirely
    /// from recognised IUPAC bytes (§4.2). A window touching an
    /// unrecognised byte is skipped outright, which has the same effect as
    /// resetting the rolling window at that byte: no k-mer overlapping it is
    /// ever emitted until the window slides clear.
    ///
    /// # Errors
    ///
    /// Returns [`PhyloError::InvalidColorIndex`] if `color >= n`.
    pub fn add_kmers(
        &self,
        dna: &[u8],
        color: usize,
        canonicalise: bool,
        max_iupac: u32,
    ) -> Result<(), PhyloError> {
        if color >= self.n {
            return Err(PhyloError::InvalidColorIndex { color, n: self.n });
        }
        let k = self.k.get();
        if dna.len() < k {
            return Ok(());
        }
        for window in dna.windows(k) {
            let Some(expansion) = expand_window(window, self.k, max_iupac) else {
                continue;
            };
            for (kmer, weight) in expansion.kmers {
                let kmer = if canonicalise { kmer.canonical() } else { kmer };
                let mut entry = self.kmer_table.entry(kmer).or_insert_with(|| KmerEntry {
                    colors: ColorSet::empty(self.n),
                    multiplicity: 0.0,
                });
                entry.colors.set(color);
                entry.multiplicity += weight;
            }
        }
        Ok(())
    }

    /// Folds `kmer_table` into a per-color-set weight accumulator, then
    /// emits every non-trivial normalised split into a [`SplitList`] of
    /// capacity `t` (§4.3). Consumes the index: ingestion is complete once
    /// weights are computed.
    ///
    /// `color_table`'s `total` counter is kept as `f64` internally to carry
    /// IUPAC-fractional contributions exactly; it is rounded to the nearest
    /// `u32` only at the reducer boundary, matching the `(u32, u32) -> f64`
    /// reducer contract in §6.
    #[must_use]
    pub fn add_weights(self, t: usize, reducer: fn(u32, u32) -> f64) -> SplitList {
        let mut color_table: HashMap<ColorSet, WeightAccumulator> = HashMap::new();
        for (_, entry) in self.kmer_table {
            let acc = color_table.entry(entry.colors).or_default();
            acc.occurrences += 1;
            acc.total += entry.multiplicity;
        }

        // Two distinct C cannot normalise to the same C* (normalisation is a
        // function of the unordered pair {C, ¬C}), but we still merge by max
        // weight defensively per §4.3 point 4.
        let mut splits: HashMap<ColorSet, f64> = HashMap::new();
        for (colors, acc) in color_table {
            let normalised = colors.normalised();
            if normalised.is_empty() || normalised.is_full() {
                continue;
            }
            let weight = reducer(acc.occurrences, acc.total.round() as u32);
            splits
                .entry(normalised)
                .and_modify(|w| {
                    if weight > *w {
                        *w = weight;
                    }
                })
                .or_insert(weight);
        }

        // HashMap iteration order is not deterministic across runs; impose
        // the normalised color's natural ordering so that weight ties are
        // broken the same way every time.
        let mut ordered: Vec<(ColorSet, f64)> = splits.into_iter().collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0));

        let mut list = SplitList::new(t);
        for (color, weight) in ordered {
            list.offer(weight, color);
        }
        list
    }
}
