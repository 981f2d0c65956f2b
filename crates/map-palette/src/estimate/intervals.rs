//! Bookkeeping of which grid intervals already have tables.
//!
//! A table built at interval `f` can answer a request at interval `n`
//! whenever `f` divides `n`: every grid point of `n` is also a grid point of
//! `f`, so the finer table is at least as precise. Requests at 10 are
//! therefore covered by tables at 2 or 5.

use std::collections::{BTreeMap, BTreeSet};

/// All divisors of `n` greater than 1, ascending, found by trial division
/// up to `sqrt(n)`.
///
/// ```
/// use map_palette::estimate::factors;
///
/// assert_eq!(factors(10), vec![2, 5, 10]);
/// assert_eq!(factors(7), vec![7]);
/// ```
pub fn factors(n: u32) -> Vec<u32> {
    let mut found = BTreeSet::new();
    let mut i = 1u32;
    while u64::from(i) * u64::from(i) <= u64::from(n) {
        if n % i == 0 {
            found.insert(i);
            found.insert(n / i);
        }
        i += 1;
    }
    found.into_iter().filter(|&f| f > 1).collect()
}

/// Registered table intervals plus the table chosen for each requested
/// interval.
///
/// Once a request at `n` has been routed to a table, it keeps being routed
/// there even if a finer table registered later would also cover it. That
/// keeps repeated resolutions at `n` stable.
#[derive(Debug, Clone, Default)]
pub struct IntervalRegistry {
    built: BTreeSet<u32>,
    routes: BTreeMap<u32, u32>,
}

impl IntervalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a table exists for `n`.
    pub fn register(&mut self, n: u32) {
        self.built.insert(n);
    }

    pub fn contains(&self, n: u32) -> bool {
        self.built.contains(&n)
    }

    /// Whether `n` or one of its factors has a table.
    pub fn is_covered(&self, n: u32) -> bool {
        self.routes.contains_key(&n) || factors(n).iter().any(|f| self.built.contains(f))
    }

    /// Route already chosen for `n`, if any.
    pub fn route(&self, n: u32) -> Option<u32> {
        self.routes.get(&n).copied()
    }

    /// Interval of the table that answers requests at `n`, fixing the
    /// choice on first use.
    ///
    /// Prefers `n` itself, then its smallest registered factor (the most
    /// precise table available). Returns `None` when nothing covers `n`.
    pub fn covering(&mut self, n: u32) -> Option<u32> {
        if let Some(route) = self.route(n) {
            return Some(route);
        }

        let chosen = if self.built.contains(&n) {
            Some(n)
        } else {
            factors(n).into_iter().find(|f| self.built.contains(f))
        }?;

        self.routes.insert(n, chosen);
        Some(chosen)
    }

    /// Intervals with a table, ascending.
    pub fn intervals(&self) -> impl Iterator<Item = u32> + '_ {
        self.built.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.built.len()
    }

    pub fn is_empty(&self) -> bool {
        self.built.is_empty()
    }
}
