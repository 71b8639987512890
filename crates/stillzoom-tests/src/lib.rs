//! Integration test crate for StillZoom.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the stillzoom crates to verify they work together.

#[cfg(test)]
mod pipeline;

#[cfg(test)]
mod zoom_geometry;
