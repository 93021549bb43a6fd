//! Size bounds of the big-step algorithm.
//!
//! With `c` priorities the big-step algorithm runs in `O(m * n^gamma(c))`.
//! Dominions up to size `pi(n, c) = n^beta(c)` are searched directly with a
//! bounded progress measure; `beta` is chosen so that the search costs as
//! much as the recursion it replaces, which makes
//! `gamma(c + 1) = gamma(c) + 1 - beta(c)`.

pub fn gamma(c: usize) -> f64 {
    if c < 2 {
        return 0.0;
    }

    let even = c % 2 == 0;
    let c = c as f64;
    match even {
        true => c / 3.0 + 1.0 / 2.0 - 1.0 / (3.0 * c) - 4.0 / (c * c),
        false => c / 3.0 + 1.0 / 2.0 - 4.0 / (c * c - 1.0),
    }
}

pub fn beta(c: usize) -> f64 {
    if c < 2 {
        return 0.0;
    }

    let even = c % 2 == 0;
    let c = c as f64;
    match even {
        true => 2.0 / 3.0 - 1.0 / (3.0 * c) - 4.0 / (c * c) + 4.0 / (c * c + 2.0 * c),
        false => 2.0 / 3.0 + 1.0 / (3.0 * (c + 1.0)) + 4.0 / ((c + 1.0) * (c + 1.0)) - 4.0 / (c * c - 1.0),
    }
}

/// Largest dominion size searched directly in a subgame with `n` vertices
/// and `c` priorities. Always between 1 and `n` (for non-empty subgames),
/// since `beta(c) < 1`.
pub fn pi(n: usize, c: usize) -> usize {
    // Rounding noise in beta must not push exact powers to the next integer.
    let bound = ((n as f64).powf(beta(c)) - 1e-9).ceil();

    (bound as usize).clamp(1, n.max(1))
}
