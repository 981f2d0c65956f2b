//! Grid estimation tables
//!
//! Coarse lookup tables that map every point of a channel grid to its
//! nearest palette entry, plus the bookkeeping that lets a table at one
//! interval serve requests at its multiples.

mod grid;
mod intervals;
mod table;

pub use grid::{
    check_interval, grid_len, grid_points, round_to_index, round_to_interval, MIN_INTERVAL,
};
pub use intervals::{factors, IntervalRegistry};
pub use table::{EstimationTable, TableMode, TableRepr};
