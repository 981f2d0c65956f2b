//! mapcolor - map item color data tooling
//!
//! Converts between images and the 128x128 color payload of a map item,
//! using the palette resolver from `map-palette`.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
