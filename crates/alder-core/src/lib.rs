//! Alder Core
//!
//! This crate contains the shared foundation for the Alder UI toolkit:
//! optimized collection aliases, logging bootstrap, and the geometry
//! primitives used by layout and hit testing.

pub mod alloc;
pub mod geometry;
pub mod logging;
