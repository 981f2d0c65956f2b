//! Precomputed nearest-entry tables sampled on a channel grid.

use std::collections::HashMap;
use std::time::Instant;

use super::grid::{grid_len, grid_points, round_to_index, round_to_interval};
use crate::color::Color;
use crate::error::ResolveError;
use crate::palette::{Palette, PaletteIndex};

/// Storage layout of an estimation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableMode {
    /// Flat 3-D array addressed by grid index
    #[default]
    Dense,
    /// Hash map keyed by the rounded channel triple
    Sparse,
}

impl TableMode {
    /// `use_grid = true` selects the dense array.
    pub fn from_use_grid(use_grid: bool) -> Self {
        if use_grid {
            TableMode::Dense
        } else {
            TableMode::Sparse
        }
    }
}

/// Table contents, one variant per [`TableMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableRepr {
    Dense {
        /// Samples per channel
        side: usize,
        cells: Vec<PaletteIndex>,
    },
    Sparse(HashMap<[u8; 3], PaletteIndex>),
}

/// Nearest palette entries for every point of an interval grid.
///
/// Built once per interval and never modified afterwards; a table stays
/// valid as long as the palette it was sampled from.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationTable {
    interval: u32,
    repr: TableRepr,
}

impl EstimationTable {
    /// Sample `palette` on the grid of interval `n`.
    ///
    /// Every one of the `(floor(255/n) + 2)^3` grid points is resolved by
    /// brute force, so this is the expensive step the lookup tiers exist to
    /// amortize (about 20k palette scans for `n = 10`). `n` must already be
    /// validated with [`check_interval`](super::check_interval).
    pub fn generate(n: u32, palette: &Palette, mode: TableMode) -> Self {
        let started = Instant::now();
        let points: Vec<u8> = grid_points(n).collect();

        let repr = match mode {
            TableMode::Dense => {
                let side = grid_len(n);
                let mut cells = Vec::with_capacity(side * side * side);
                for &r in &points {
                    for &g in &points {
                        for &b in &points {
                            cells.push(palette.nearest(Color::new(r, g, b)));
                        }
                    }
                }
                TableRepr::Dense { side, cells }
            }
            TableMode::Sparse => {
                let mut map = HashMap::with_capacity(points.len().pow(3));
                for &r in &points {
                    for &g in &points {
                        for &b in &points {
                            map.insert([r, g, b], palette.nearest(Color::new(r, g, b)));
                        }
                    }
                }
                TableRepr::Sparse(map)
            }
        };

        let table = Self { interval: n, repr };
        tracing::debug!(
            interval = n,
            mode = ?mode,
            entries = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated estimation table"
        );
        table
    }

    #[inline]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn mode(&self) -> TableMode {
        match self.repr {
            TableRepr::Dense { .. } => TableMode::Dense,
            TableRepr::Sparse(_) => TableMode::Sparse,
        }
    }

    pub fn repr(&self) -> &TableRepr {
        &self.repr
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        match &self.repr {
            TableRepr::Dense { cells, .. } => cells.len(),
            TableRepr::Sparse(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The grid point `color` snaps to at this table's interval.
    pub fn representative(&self, color: Color) -> Color {
        let n = self.interval;
        Color::new(
            round_to_interval(n, color.r),
            round_to_interval(n, color.g),
            round_to_interval(n, color.b),
        )
    }

    /// Palette index stored for the grid point nearest to `color`.
    ///
    /// Tables produced by [`EstimationTable::generate`] hold every grid
    /// point, so this only returns `None` for hand-assembled sparse tables.
    pub fn lookup(&self, color: Color) -> Option<PaletteIndex> {
        let n = self.interval;
        match &self.repr {
            TableRepr::Dense { side, cells } => {
                let r = round_to_index(n, color.r);
                let g = round_to_index(n, color.g);
                let b = round_to_index(n, color.b);
                cells.get((r * side + g) * side + b).copied()
            }
            TableRepr::Sparse(map) => map.get(&self.representative(color).to_bytes()).copied(),
        }
    }

    /// Like [`EstimationTable::lookup`] but reports a miss as an error.
    ///
    /// There is no fallback here; use the resolver for a lookup that always
    /// produces an answer.
    pub fn try_lookup(&self, color: Color) -> Result<PaletteIndex, ResolveError> {
        self.lookup(color).ok_or(ResolveError::Unresolvable {
            r: color.r,
            g: color.g,
            b: color.b,
            interval: self.interval,
        })
    }

    /// Assemble a table from precomputed sparse entries.
    pub fn from_sparse(interval: u32, entries: HashMap<[u8; 3], PaletteIndex>) -> Self {
        Self {
            interval,
            repr: TableRepr::Sparse(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::DEFAULT_ALPHA_COLOR;
    use pretty_assertions::assert_eq;

    fn small_palette() -> Palette {
        Palette::build(
            &[Color::new(0, 0, 0), Color::new(127, 178, 56), Color::new(255, 255, 255)],
            &[180, 220, 255, 135],
            DEFAULT_ALPHA_COLOR,
        )
        .unwrap()
    }

    #[test]
    fn test_dense_table_size() {
        let table = EstimationTable::generate(10, &small_palette(), TableMode::Dense);
        assert_eq!(table.len(), 27 * 27 * 27);
        assert_eq!(table.mode(), TableMode::Dense);
        assert_eq!(table.interval(), 10);
    }

    #[test]
    fn test_sparse_table_deduplicates_terminal_point() {
        // 5 divides 255, so the terminal 255 repeats and collapses in the map
        let table = EstimationTable::generate(5, &small_palette(), TableMode::Sparse);
        assert_eq!(table.len(), 52 * 52 * 52);
        assert_eq!(table.mode(), TableMode::Sparse);
    }

    #[test]
    fn test_entries_match_brute_force_at_grid_points() {
        let palette = small_palette();
        for mode in [TableMode::Dense, TableMode::Sparse] {
            let table = EstimationTable::generate(17, &palette, mode);
            for r in grid_points(17) {
                for g in grid_points(17) {
                    for b in grid_points(17) {
                        let c = Color::new(r, g, b);
                        assert_eq!(table.lookup(c), Some(palette.nearest(c)), "{mode:?} {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_dense_and_sparse_agree_for_all_inputs() {
        let palette = small_palette();
        let dense = EstimationTable::generate(12, &palette, TableMode::Dense);
        let sparse = EstimationTable::generate(12, &palette, TableMode::Sparse);
        for v in (0..=255u8).step_by(3) {
            let c = Color::new(v, 255 - v, v / 2);
            assert_eq!(dense.lookup(c), sparse.lookup(c), "{c}");
            assert!(dense.lookup(c).is_some());
        }
    }

    #[test]
    fn test_lookup_answers_for_representative() {
        let palette = small_palette();
        let table = EstimationTable::generate(10, &palette, TableMode::Dense);
        let c = Color::new(126, 181, 52);
        let rep = table.representative(c);
        assert_eq!(rep, Color::new(130, 180, 50));
        assert_eq!(table.lookup(c), Some(palette.nearest(rep)));
    }

    #[test]
    fn test_try_lookup_reports_missing_key() {
        let table = EstimationTable::from_sparse(10, HashMap::new());
        assert!(table.is_empty());
        assert_eq!(
            table.try_lookup(Color::new(1, 2, 3)),
            Err(ResolveError::Unresolvable {
                r: 1,
                g: 2,
                b: 3,
                interval: 10
            })
        );
    }

    #[test]
    fn test_table_mode_from_use_grid() {
        assert_eq!(TableMode::from_use_grid(true), TableMode::Dense);
        assert_eq!(TableMode::from_use_grid(false), TableMode::Sparse);
        assert_eq!(TableMode::default(), TableMode::Dense);
    }
}
