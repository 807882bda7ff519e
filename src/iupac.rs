//! IUPAC ambiguity code expansion (§4.1).
//!
//! A window containing ambiguity codes (`R`, `Y`, `S`, `W`, `K`, `M`, `B`,
//! `D`, `H`, `V`, `N`) expands to several concrete k-mers. Expansion is
//! capped by `max_iupac`, a multiplicative bound on the number of concrete
//! k-mers a single window may produce; each surviving k-mer contributes
//! `1 / product` to the weight accumulator's `total` (§4.3).

use crate::kmer::{Base, Kmer, KmerLength};

/// The concrete bases an IUPAC code can stand for.
fn expansions(byte: u8) -> Option<&'static [Base]> {
    use Base::{A, C, G, T};
    Some(match byte.to_ascii_uppercase() {
        b'A' => &[A],
        b'C' => &[C],
        b'G' => &[G],
        b'T' | b'U' => &[T],
        b'R' => &[A, G],
        b'Y' => &[C, T],
        b'S' => &[G, C],
        b'W' => &[A, T],
        b'K' => &[G, T],
        b'M' => &[A, C],
        b'B' => &[C, G, T],
        b'D' => &[A, G, T],
        b'H' => &[A, C, T],
        b'V' => &[A, C, G],
        b'N' => &[A, C, G, T],
        _ => return None,
    })
}

/// Returns `true` if `byte` is a recognised base or IUPAC ambiguity code.
#[must_use]
pub fn is_iupac(byte: u8) -> bool {
    expansions(byte).is_some()
}

/// The outcome of expanding one window.
pub struct Expansion {
    /// Each concrete k-mer paired with its weight contribution (`1/product`).
    pub kmers: Vec<(Kmer, f64)>,
}

/// Expands a window of IUPAC-coded bytes into concrete k-mers, bounded by
/// `max_iupac` on the running product of per-position fan-outs.
///
/// Returns `None` if the window contains a byte that isn't a recognised
/// IUPAC code (caller treats this as an unknown base, resetting the rolling
/// window per §4.2), or if the product of fan-outs exceeds `max_iupac`
/// (caller discards the window without emitting anything, per the
/// multiplicative budget in §9).
#[must_use]
pub fn expand_window(window: &[u8], k: KmerLength, max_iupac: u32) -> Option<Expansion> {
    debug_assert_eq!(window.len(), k.get());

    let mut product: u64 = 1;
    let mut per_position: Vec<&'static [Base]> = Vec::with_capacity(window.len());
    for &byte in window {
        let choices = expansions(byte)?;
        product = product.saturating_mul(choices.len() as u64);
        if product > u64::from(max_iupac) {
            return None;
        }
        per_position.push(choices);
    }

    let weight = 1.0 / product as f64;
    let mut kmers: Vec<(Kmer, f64)> = vec![(Kmer::zero(k), weight)];
    for choices in per_position {
        let mut next = Vec::with_capacity(kmers.len() * choices.len());
        for (partial, w) in &kmers {
            for &base in choices {
                let mut extended = partial.clone();
                extended.shift_in(base);
                next.push((extended, *w));
            }
        }
        kmers = next;
    }

    Some(Expansion { kmers })
}
