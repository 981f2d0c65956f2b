//! Tiered nearest-palette-entry resolution.
//!
//! Lookup order for a grid request at interval `n`:
//!
//! 1. exact match in the palette's inverse index
//! 2. the estimation table routed to `n` (a table at `n` or at one of its
//!    factors), looked up at that table's grid point
//! 3. the brute-force cache, keyed by the grid point `color` snaps to
//! 4. brute force on that grid point, which is then cached, and the table
//!    for `n` is built so later requests stop at step 2
//!
//! Steps 3 and 4 answer for the *grid point*, not for the raw color. That is
//! exactly the value the freshly built table will hold, so the first
//! resolution of a color and every later one agree.
//!
//! Exact requests ([`Resolver::resolve_exact`]) skip the grid entirely:
//! exact match, then cache, then brute force on the color itself.
//!
//! Every cached value is the brute-force answer for its key, and every table
//! cell is the brute-force answer for its grid point; the tiers only differ
//! in which color they quantize to before asking.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::color::Color;
use crate::error::ResolveError;
use crate::estimate::{check_interval, round_to_interval, EstimationTable, IntervalRegistry, TableMode};
use crate::palette::{Palette, PaletteIndex};

/// Interval used when the caller does not choose one.
pub const DEFAULT_INTERVAL: u32 = 10;

/// Precision and table layout for grid resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Grid step per channel; must be greater than 1
    pub interval: u32,
    /// Layout of a table built for this request
    pub mode: TableMode,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            mode: TableMode::Dense,
        }
    }
}

/// Snapshot of resolver counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolverStats {
    pub exact_hits: u64,
    pub table_hits: u64,
    pub cache_hits: u64,
    pub brute_force: u64,
    pub tables_built: u64,
}

#[derive(Debug, Default)]
struct Counters {
    exact_hits: AtomicU64,
    table_hits: AtomicU64,
    cache_hits: AtomicU64,
    brute_force: AtomicU64,
    tables_built: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ResolverStats {
        ResolverStats {
            exact_hits: self.exact_hits.load(Ordering::Relaxed),
            table_hits: self.table_hits.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            brute_force: self.brute_force.load(Ordering::Relaxed),
            tables_built: self.tables_built.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Default)]
struct TableSet {
    registry: IntervalRegistry,
    tables: BTreeMap<u32, Arc<EstimationTable>>,
}

impl TableSet {
    fn routed(&self, n: u32) -> Option<Arc<EstimationTable>> {
        self.registry
            .route(n)
            .and_then(|f| self.tables.get(&f))
            .cloned()
    }

    fn covering(&mut self, n: u32) -> Option<Arc<EstimationTable>> {
        self.registry
            .covering(n)
            .and_then(|f| self.tables.get(&f))
            .cloned()
    }

    fn insert(&mut self, table: EstimationTable) -> Arc<EstimationTable> {
        let n = table.interval();
        let table = Arc::new(table);
        self.tables.insert(n, Arc::clone(&table));
        self.registry.register(n);
        table
    }
}

/// Nearest-entry resolver for one palette.
///
/// Owns the palette's estimation tables and brute-force cache. Safe to share
/// between threads: table construction happens under a single write lock, so
/// a table is built at most once per interval.
///
/// # Example
///
/// ```
/// use map_palette::{Color, Palette, Resolver, TableMode};
///
/// let resolver = Resolver::new(Palette::build(
///     &[Color::new(0, 0, 0), Color::new(127, 178, 56)],
///     &[180, 220, 255, 135],
///     Color::new(0, 0, 0),
/// ).unwrap());
///
/// assert_eq!(resolver.resolve(Color::new(127, 178, 56), 10, TableMode::Dense).unwrap(), 6);
/// assert!(resolver.resolve(Color::new(2, 3, 1), 1, TableMode::Dense).is_err());
/// assert_eq!(resolver.resolve_exact(Color::new(2, 3, 1)), 0);
/// ```
#[derive(Debug)]
pub struct Resolver {
    palette: Arc<Palette>,
    tables: RwLock<TableSet>,
    cache: RwLock<HashMap<Color, PaletteIndex>>,
    counters: Counters,
}

impl Resolver {
    pub fn new(palette: Palette) -> Self {
        Self::with_palette(Arc::new(palette))
    }

    pub fn with_palette(palette: Arc<Palette>) -> Self {
        Self {
            palette,
            tables: RwLock::new(TableSet::default()),
            cache: RwLock::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Resolve `color` using a grid of the given interval.
    ///
    /// # Errors
    ///
    /// [`ResolveError::InvalidInterval`] when `interval <= 1` and `color` is
    /// not on the palette; exact resolution goes through
    /// [`Resolver::resolve_exact`] instead.
    pub fn resolve(
        &self,
        color: Color,
        interval: u32,
        mode: TableMode,
    ) -> Result<PaletteIndex, ResolveError> {
        if let Some(idx) = self.palette.index_of(color) {
            Counters::bump(&self.counters.exact_hits);
            return Ok(idx);
        }

        let n = check_interval(interval)?;

        let routed = self.read_tables().routed(n);
        let table = match routed {
            Some(table) => table,
            None => {
                let mut set = self.write_tables();
                match set.covering(n) {
                    Some(table) => table,
                    None => {
                        let representative = Color::new(
                            round_to_interval(n, color.r),
                            round_to_interval(n, color.g),
                            round_to_interval(n, color.b),
                        );
                        let idx = self.nearest_cached(representative);

                        tracing::debug!(interval = n, mode = ?mode, "Building estimation table on demand");
                        set.insert(EstimationTable::generate(n, &self.palette, mode));
                        Counters::bump(&self.counters.tables_built);
                        return Ok(idx);
                    }
                }
            }
        };

        match table.lookup(color) {
            Some(idx) => {
                Counters::bump(&self.counters.table_hits);
                Ok(idx)
            }
            None => Ok(self.nearest_cached(table.representative(color))),
        }
    }

    /// Resolve with an options bundle.
    pub fn resolve_with(
        &self,
        color: Color,
        options: &ResolveOptions,
    ) -> Result<PaletteIndex, ResolveError> {
        self.resolve(color, options.interval, options.mode)
    }

    /// Resolve `color` to its true nearest entry.
    ///
    /// Exact matches come from the inverse index; anything else is answered
    /// from the cache or by a full palette scan whose result is cached.
    pub fn resolve_exact(&self, color: Color) -> PaletteIndex {
        if let Some(idx) = self.palette.index_of(color) {
            Counters::bump(&self.counters.exact_hits);
            return idx;
        }
        self.nearest_cached(color)
    }

    /// Build the table for `interval` ahead of time.
    ///
    /// Returns `true` if a table was built, `false` if one already existed
    /// at exactly this interval.
    pub fn prepare(&self, interval: u32, mode: TableMode) -> Result<bool, ResolveError> {
        let n = check_interval(interval)?;
        let mut set = self.write_tables();
        if set.registry.contains(n) {
            return Ok(false);
        }
        set.insert(EstimationTable::generate(n, &self.palette, mode));
        Counters::bump(&self.counters.tables_built);
        Ok(true)
    }

    /// Table built at exactly `interval`, if any.
    pub fn table(&self, interval: u32) -> Option<Arc<EstimationTable>> {
        self.read_tables().tables.get(&interval).cloned()
    }

    /// Intervals with a built table, ascending.
    pub fn intervals(&self) -> Vec<u32> {
        self.read_tables().registry.intervals().collect()
    }

    /// Whether a request at `interval` would be served by an existing table.
    pub fn is_covered(&self, interval: u32) -> bool {
        self.read_tables().registry.is_covered(interval)
    }

    /// Number of colors held by the brute-force cache.
    pub fn cache_len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn stats(&self) -> ResolverStats {
        self.counters.snapshot()
    }

    /// Cached brute-force answer for `color`.
    fn nearest_cached(&self, color: Color) -> PaletteIndex {
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&color)
            .copied();
        if let Some(idx) = cached {
            Counters::bump(&self.counters.cache_hits);
            return idx;
        }

        Counters::bump(&self.counters.brute_force);
        let idx = self.palette.nearest(color);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(color, idx);
        idx
    }

    // Every mutation under these locks inserts a deterministic value, so a
    // poisoned lock still guards consistent state.
    fn read_tables(&self) -> RwLockReadGuard<'_, TableSet> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tables(&self) -> RwLockWriteGuard<'_, TableSet> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}
