//! **gridwalk-core** — grid coordinates and bounds.
//!
//! This crate provides the value types shared across the *gridwalk*
//! workspace: the [`Point`] coordinate used as node identity by the search
//! engine, and the half-open [`Range`] describing the extent of a map.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
