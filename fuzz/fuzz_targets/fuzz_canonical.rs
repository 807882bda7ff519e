//! Fuzz target for canonical k-mer computation.
//!
//! Tests that canonical form has the expected properties:
//! 1. Is idempotent
//! 2. A k-mer and its reverse complement have the same canonical form
//! 3. Canonical form is lexicographically smallest

#![no_main]

use libfuzzer_sys::fuzz_target;
use sans_rs::kmer::{Kmer, KmerLength};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > 64 {
        return;
    }
    for &byte in data {
        if !matches!(byte, b'A' | b'C' | b'G' | b'T') {
            return;
        }
    }

    let k = KmerLength::new(data.len()).unwrap();
    let kmer = Kmer::from_ascii(data, k).unwrap();
    let canonical = kmer.canonical();

    let canonical2 = canonical.canonical();
    assert_eq!(canonical, canonical2, "canonical is not idempotent");

    let rc_canonical = kmer.reverse_complement().canonical();
    assert_eq!(
        canonical, rc_canonical,
        "k-mer and its reverse complement have different canonical forms"
    );

    let rc = kmer.reverse_complement();
    assert!(canonical <= kmer);
    assert!(canonical <= rc);
});
