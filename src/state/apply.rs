use crate::foundation::core::DeepState;
use crate::foundation::error::DeeptileResult;
use crate::sample::flatten::flatten;
use crate::sample::list::SampleList;
use crate::sample::prune::{prune_occluded, prune_transparent};
use crate::sample::sort::sort_samples;
use crate::sample::tidy::tidy;
use crate::state::detect::classify_tile;
use crate::state::options::StateOptions;
use crate::tile::deep::{DeepTile, TileBuilder};

/// Transform one tile to the requested state.
///
/// The controller plans the minimal pass sequence: inputs already in the
/// target state pass through byte-identical, already-tidy inputs flatten
/// directly without re-splitting, and everything else runs
/// sort → tidy → (prune) → (flatten) per pixel. Flat (non-deep) inputs are
/// never modified. The output's deep flag is cleared exactly when the
/// target state is [`DeepState::Flat`].
#[tracing::instrument(skip(tile, opts), fields(target = ?opts.target))]
pub fn apply(tile: &DeepTile, opts: &StateOptions) -> DeeptileResult<DeepTile> {
    apply_impl(tile, opts).map(|(out, _)| out)
}

/// Like [`apply`], but also reports whether the tile passed through
/// untouched (for batch statistics).
pub(crate) fn apply_impl(
    tile: &DeepTile,
    opts: &StateOptions,
) -> DeeptileResult<(DeepTile, bool)> {
    opts.validate()?;

    if !tile.is_deep() {
        return Ok((tile.clone(), true));
    }

    let state = classify_tile(tile);
    let pass_through = match opts.target {
        DeepState::Sorted => state.sorted,
        DeepState::Tidy => state.tidy && !opts.prunes(),
        DeepState::Flat => false,
    };
    if pass_through {
        tracing::debug!("input already satisfies target state");
        return Ok((tile.clone(), true));
    }

    let mut scratch = tile.pixel_scratch();
    let mut builder = TileBuilder::shaped_like(tile);

    match opts.target {
        DeepState::Sorted => {
            for pixel in 0..tile.pixels() {
                tile.extract_pixel(pixel, &mut scratch);
                sort_samples(&mut scratch);
                builder.push_pixel(&scratch);
            }
            Ok((builder.finish(true), false))
        }
        DeepState::Tidy => {
            for pixel in 0..tile.pixels() {
                tile.extract_pixel(pixel, &mut scratch);
                if state.tidy {
                    run_prunes(&mut scratch, opts);
                    builder.push_pixel(&scratch);
                } else {
                    sort_samples(&mut scratch);
                    let mut tidied = tidy(&scratch);
                    run_prunes(&mut tidied, opts);
                    builder.push_pixel(&tidied);
                }
            }
            Ok((builder.finish(true), false))
        }
        DeepState::Flat => {
            if state.tidy {
                tracing::debug!("tidy input, direct flatten");
                for pixel in 0..tile.pixels() {
                    tile.extract_pixel(pixel, &mut scratch);
                    run_prunes(&mut scratch, opts);
                    push_flat_pixel(&mut builder, &scratch);
                }
            } else {
                for pixel in 0..tile.pixels() {
                    tile.extract_pixel(pixel, &mut scratch);
                    sort_samples(&mut scratch);
                    let mut tidied = tidy(&scratch);
                    run_prunes(&mut tidied, opts);
                    push_flat_pixel(&mut builder, &tidied);
                }
            }
            Ok((builder.finish(false), false))
        }
    }
}

fn run_prunes(list: &mut SampleList, opts: &StateOptions) {
    if opts.prune_transparent {
        prune_transparent(list);
    }
    if opts.prune_occluded {
        prune_occluded(list, opts.occluded_threshold);
    }
}

/// Flatten one tidy pixel into the builder as exactly one sample; empty
/// pixels composite to all-zero samples.
fn push_flat_pixel(builder: &mut TileBuilder, list: &SampleList) {
    let flat = flatten(list);
    let mut one = SampleList::with_shape(list.channel_count(), list.has_alpha());
    one.push(flat.z, flat.z_back, flat.alpha, &flat.channels);
    builder.push_pixel(&one);
}

#[cfg(test)]
#[path = "../../tests/unit/state/apply.rs"]
mod tests;
