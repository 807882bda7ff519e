//! Weight reducers: pure functions folding `(occurrences, total)` into a
//! split weight (§4.3).
//!
//! The engine never hard-codes a reduction strategy; `add_weights` takes any
//! `Fn(u32, u32) -> f64` closure. This module supplies the two reducers named
//! in the spec as ready-made building blocks.

/// Arithmetic mean of `occurrences` and `total`.
#[must_use]
pub fn arithmetic_mean(occurrences: u32, total: u32) -> f64 {
    (f64::from(occurrences) + f64::from(total)) / 2.0
}

/// Geometric mean of `occurrences` and `total`.
#[must_use]
pub fn geometric_mean(occurrences: u32, total: u32) -> f64 {
    (f64::from(occurrences) * f64::from(total)).sqrt()
}

/// Named reducer selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReducerKind {
    #[default]
    Mean,
    GeometricMean,
}

impl ReducerKind {
    /// Resolves the named variant to its reducer function.
    #[must_use]
    pub fn function(self) -> fn(u32, u32) -> f64 {
        match self {
            Self::Mean => arithmetic_mean,
            Self::GeometricMean => geometric_mean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_mean_of_equal_counters() {
        assert_eq!(arithmetic_mean(1, 1), 1.0);
        assert_eq!(arithmetic_mean(3, 5), 4.0);
    }

    #[test]
    fn geometric_mean_of_equal_counters() {
        assert_eq!(geometric_mean(4, 4), 4.0);
        assert_eq!(geometric_mean(2, 8), 4.0);
    }

    #[test]
    fn reducer_kind_resolves_to_matching_function() {
        let f = ReducerKind::Mean.function();
        assert_eq!(f(1, 1), arithmetic_mean(1, 1));
        let g = ReducerKind::GeometricMean.function();
        assert_eq!(g(2, 8), geometric_mean(2, 8));
    }
}
