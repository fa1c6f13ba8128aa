//! Tile-level storage: prefix-sum addressed, struct-of-arrays channel data.

pub mod deep;
