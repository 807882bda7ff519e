//! Fuzz target for IUPAC ambiguity expansion.
//!
//! Every emitted k-mer's weight must be consistent with the multiplicative
//! budget: weights sum to 1.0 across the expansion (within floating-point
//! tolerance) whenever the window is accepted at all.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sans_rs::iupac::expand_window;
use sans_rs::kmer::KmerLength;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > 16 {
        return;
    }
    let k = KmerLength::new(data.len()).unwrap();

    if let Some(expansion) = expand_window(data, k, 64) {
        let total: f64 = expansion.kmers.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9, "weights did not sum to 1.0: {total}");
    }
});
