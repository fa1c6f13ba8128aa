use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::foundation::error::{DeeptileError, DeeptileResult};
use crate::state::apply::apply_impl;
use crate::state::options::StateOptions;
use crate::tile::deep::DeepTile;

/// Threading controls for batch tile processing.
#[derive(Clone, Debug, Default)]
pub struct TileThreading {
    /// Fan tiles out across a worker pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Shared cooperative cancellation flag, polled between tiles.
///
/// Cloning shares the flag. Cancellation is observed at tile granularity:
/// a pixel in flight is always finished, a cancelled batch publishes no
/// output.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Irrevocable for this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Aggregated batch counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Tiles submitted.
    pub tiles_total: u64,
    /// Tiles that required at least one transform pass.
    pub tiles_transformed: u64,
    /// Tiles already in the target state, passed through untouched.
    pub tiles_passed_through: u64,
}

/// Transform a batch of tiles to the requested state.
///
/// Tiles are independent; with [`TileThreading::parallel`] set they are
/// processed across a dedicated rayon pool. `cancel` is polled between
/// tiles: once cancelled the batch returns [`DeeptileError::Cancelled`]
/// and no partial output is published.
pub fn apply_tiles(
    tiles: &[DeepTile],
    opts: &StateOptions,
    threading: &TileThreading,
    cancel: Option<&CancelToken>,
) -> DeeptileResult<Vec<DeepTile>> {
    apply_tiles_with_stats(tiles, opts, threading, cancel).map(|(tiles, _)| tiles)
}

/// Like [`apply_tiles`], but also reports batch statistics.
#[tracing::instrument(skip_all, fields(tiles = tiles.len(), target = ?opts.target))]
pub fn apply_tiles_with_stats(
    tiles: &[DeepTile],
    opts: &StateOptions,
    threading: &TileThreading,
    cancel: Option<&CancelToken>,
) -> DeeptileResult<(Vec<DeepTile>, ApplyStats)> {
    opts.validate()?;

    let results: Vec<(DeepTile, bool)> = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            tiles
                .par_iter()
                .map(|tile| {
                    if cancelled(cancel) {
                        return Err(DeeptileError::Cancelled);
                    }
                    apply_impl(tile, opts)
                })
                .collect::<DeeptileResult<Vec<_>>>()
        })?
    } else {
        let mut out = Vec::with_capacity(tiles.len());
        for tile in tiles {
            if cancelled(cancel) {
                return Err(DeeptileError::Cancelled);
            }
            out.push(apply_impl(tile, opts)?);
        }
        out
    };

    let mut stats = ApplyStats {
        tiles_total: tiles.len() as u64,
        ..ApplyStats::default()
    };
    let out = results
        .into_iter()
        .map(|(tile, passed_through)| {
            if passed_through {
                stats.tiles_passed_through += 1;
            } else {
                stats.tiles_transformed += 1;
            }
            tile
        })
        .collect();
    Ok((out, stats))
}

fn cancelled(cancel: Option<&CancelToken>) -> bool {
    cancel.is_some_and(CancelToken::is_cancelled)
}

fn build_thread_pool(threads: Option<usize>) -> DeeptileResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        if n == 0 {
            return Err(DeeptileError::validation(
                "thread count must be > 0 when set",
            ));
        }
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DeeptileError::validation(format!("failed to build thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/state/pipeline.rs"]
mod tests;
