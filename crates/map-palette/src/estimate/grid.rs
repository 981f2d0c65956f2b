//! Channel quantization for estimation grids.
//!
//! A grid of interval `n` samples each channel at `0, n, 2n, ...` and always
//! adds `255` as a terminal point, so the whole `0..=255` range is covered
//! even when 255 is not a multiple of `n`. Lookups snap a channel to the
//! nearest grid point with the same terminal rule: any value within `n` of
//! the top goes to 255.

use std::iter;

use crate::error::ResolveError;

/// Smallest interval a grid can be built for. Interval 1 means exact
/// resolution and is served by brute force instead.
pub const MIN_INTERVAL: u32 = 2;

/// Check that `n` is usable as a grid interval.
pub fn check_interval(n: u32) -> Result<u32, ResolveError> {
    if n < MIN_INTERVAL {
        return Err(ResolveError::InvalidInterval(n));
    }
    Ok(n)
}

/// Sample points along one channel, in index order.
///
/// Yields `floor(255 / n) + 2` values; when `n` divides 255 the last two
/// are both 255.
pub fn grid_points(n: u32) -> impl Iterator<Item = u8> {
    (0..=255u8).step_by(n as usize).chain(iter::once(255))
}

/// Number of sample points per channel.
#[inline]
pub fn grid_len(n: u32) -> usize {
    255 / n as usize + 2
}

/// Snap a channel value to its grid point (value form).
///
/// ```
/// use map_palette::estimate::round_to_interval;
///
/// assert_eq!(round_to_interval(10, 250), 255);
/// assert_eq!(round_to_interval(10, 244), 240);
/// assert_eq!(round_to_interval(10, 245), 250);
/// ```
#[inline]
pub fn round_to_interval(n: u32, value: u8) -> u8 {
    if 255 - u32::from(value) < n {
        return 255;
    }
    // val <= 255 - n keeps the result strictly below 255
    (half_up(n, value) * n) as u8
}

/// Snap a channel value to its grid point (index form).
///
/// The top index is `ceil(255 / n)`, which addresses a 255 sample for every
/// `n`.
#[inline]
pub fn round_to_index(n: u32, value: u8) -> usize {
    if 255 - u32::from(value) < n {
        return 255_u32.div_ceil(n) as usize;
    }
    half_up(n, value) as usize
}

/// `round(value / n)` with halves rounded up, in integer arithmetic.
#[inline]
fn half_up(n: u32, value: u8) -> u32 {
    (2 * u32::from(value) + n) / (2 * n)
}
