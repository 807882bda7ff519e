//! Fuzz target for `Kmer::from_ascii`.
//!
//! Tests that `from_ascii` handles arbitrary byte input gracefully, either
//! accepting valid DNA sequences or rejecting invalid ones without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sans_rs::kmer::{Kmer, KmerLength};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > 64 {
        return;
    }

    let k = KmerLength::new(data.len()).unwrap();

    match Kmer::from_ascii(data, k) {
        Ok(kmer) => {
            assert_eq!(kmer.to_ascii_string().len(), data.len());
            for &byte in kmer.to_ascii_string().as_bytes() {
                assert!(matches!(byte, b'A' | b'C' | b'G' | b'T'));
            }
        }
        Err(position) => {
            assert!(position < data.len());
        }
    }
});
