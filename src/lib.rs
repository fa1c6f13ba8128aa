//! Deeptile is a deep-image sample state engine.
//!
//! A deep image stores, per pixel, an ordered list of alpha-premultiplied
//! radiance samples, each occupying a depth interval `[Z, ZBack]`. Deeptile
//! moves those lists between three canonical states:
//!
//! 1. **Sorted**: ascending by `(Z, ZBack)`; overlaps permitted.
//! 2. **Tidy**: sorted, with partially-overlapping samples split at every
//!    depth boundary and coincident samples merged volumetrically, so that
//!    depth intervals form a partition.
//! 3. **Flat**: a single composited sample per pixel (front-to-back "over").
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic and pure**: transforms are stable for a given input and
//!   idempotent once the target state already holds.
//! - **No IO**: tiles arrive and leave as in-memory channel arrays; fetching
//!   and storing them belongs to the calling layer.
//! - **Tile-parallel**: pixels are independent; batches of tiles fan out
//!   across a worker pool with cooperative cancellation between tiles.
//!
//! # Getting started
//!
//! Build a [`DeepTile`] from per-channel arrays, pick a [`StateOptions`]
//! describing the requested [`DeepState`], and call [`apply`] (one tile) or
//! [`apply_tiles`] (a batch).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod sample;
mod state;
mod tile;

pub use foundation::core::DeepState;
pub use foundation::error::{DeeptileError, DeeptileResult};
pub use sample::flatten::{FlatSample, flatten};
pub use sample::list::SampleList;
pub use sample::merge::merge_coincident;
pub use sample::prune::{prune_occluded, prune_transparent};
pub use sample::sort::sort_samples;
pub use sample::split::split_fraction;
pub use sample::tidy::tidy;
pub use state::apply::apply;
pub use state::detect::{TileState, classify_list, classify_tile};
pub use state::options::StateOptions;
pub use state::pipeline::{
    ApplyStats, CancelToken, TileThreading, apply_tiles, apply_tiles_with_stats,
};
pub use tile::deep::{DeepTile, TileChannels};
