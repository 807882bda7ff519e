//! Newick serialisation tests (scenario S6, invariant 6).
//!
//! No Newick *parser* is part of this crate's public contract (§4.6 only
//! specifies the writer direction), so round-tripping is exercised here by
//! checking the writer is deterministic and its output is stable via
//! `insta` snapshots, rather than by parsing the string back into a tree.

use sans_rs::color::ColorSet;
use sans_rs::filter::filter_strict;
use sans_rs::split::Split;
use sans_rs::tree::Tree;

fn c(n: usize, bits: &[usize]) -> ColorSet {
    let mut s = ColorSet::empty(n);
    for &b in bits {
        s.set(b);
    }
    s
}

fn s(weight: f64, color: ColorSet) -> Split {
    Split { weight, color }
}

#[test]
fn star_tree_snapshot() {
    let tree = Tree::build(3, &[]).unwrap();
    insta::assert_snapshot!(tree.to_newick(None), @"(0,1,2);");
}

#[test]
fn nested_splits_snapshot() {
    let accepted = vec![s(3.0, c(3, &[0])), s(1.0, c(3, &[0, 1]))];
    let tree = Tree::build(3, &accepted).unwrap();
    insta::assert_snapshot!(tree.to_newick(None), @"(2,(0:3,1):1);");
}

#[test]
fn root_never_carries_a_trailing_weight() {
    let accepted = vec![s(3.0, c(3, &[0])), s(1.0, c(3, &[0, 1]))];
    let tree = Tree::build(3, &accepted).unwrap();
    let newick = tree.to_newick(None);
    assert!(newick.ends_with(");"), "root must not print a weight: {newick}");
}

#[test]
fn newick_emission_is_deterministic() {
    let crossing = vec![
        s(3.0, c(4, &[0])),
        s(2.0, c(4, &[0, 1])),
        s(1.0, c(4, &[0, 2])),
    ];
    let accepted = filter_strict(&crossing);
    let tree_a = Tree::build(4, &accepted).unwrap();
    let tree_b = Tree::build(4, &accepted).unwrap();
    assert_eq!(tree_a.to_newick(None), tree_b.to_newick(None));
}
