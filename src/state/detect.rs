use crate::sample::list::SampleList;
use crate::tile::deep::DeepTile;

/// Sorted/tidy classification of existing sample data.
///
/// `tidy` implies `sorted`. The scan never mutates anything; the controller
/// uses it to skip passes whose invariant already holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileState {
    /// Every pixel is ascending by `(Z, ZBack)`.
    pub sorted: bool,
    /// Sorted, and no pixel has partially-overlapping or duplicate
    /// intervals.
    pub tidy: bool,
}

/// Classify every pixel of a tile in one scan.
///
/// A flat tile is trivially sorted and tidy.
pub fn classify_tile(tile: &DeepTile) -> TileState {
    if !tile.is_deep() {
        return TileState {
            sorted: true,
            tidy: true,
        };
    }
    let z = tile.z();
    let z_back = tile.z_back().unwrap_or(z);
    classify_slices(tile.sample_offsets(), z, z_back)
}

/// Classify a single pixel's samples.
pub fn classify_list(list: &SampleList) -> TileState {
    classify_slices(&[list.len() as u32], &list.z, &list.z_back)
}

/// The per-pixel walk behind [`classify_tile`] and [`classify_list`].
///
/// Consecutive-pair rules, per pixel:
/// - descending `(Z, ZBack)` keys are unsorted (and therefore untidy);
/// - a sample opening in front of its predecessor's back is a partial
///   overlap: untidy;
/// - identical intervals must still be merged: untidy;
/// - a zero-thickness sample followed by a volume sample opening at the
///   same depth is tidy (the point sits on the partition boundary).
pub(crate) fn classify_slices(sample_offsets: &[u32], z: &[f32], z_back: &[f32]) -> TileState {
    let mut state = TileState {
        sorted: true,
        tidy: true,
    };

    let mut start = 0_usize;
    for &offset in sample_offsets {
        let end = offset as usize;
        for i in (start + 1)..end {
            let (prev_z, prev_back) = (z[i - 1], z_back[i - 1]);
            let (next_z, next_back) = (z[i], z_back[i]);
            if next_z < prev_z || (next_z == prev_z && next_back < prev_back) {
                return TileState {
                    sorted: false,
                    tidy: false,
                };
            }
            if next_z < prev_back || (next_z == prev_z && next_back == prev_back) {
                state.tidy = false;
            }
        }
        start = end;
    }
    state
}

#[cfg(test)]
#[path = "../../tests/unit/state/detect.rs"]
mod tests;
