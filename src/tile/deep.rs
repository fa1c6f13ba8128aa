use std::ops::Range;

use crate::foundation::error::{DeeptileError, DeeptileResult};
use crate::sample::list::SampleList;

/// Raw per-tile channel arrays handed in by the calling layer.
///
/// Each array is one flat `f32` row covering every sample of every pixel in
/// tile order. `z` is mandatory; a missing `z_back` means every sample has
/// zero thickness (`ZBack = Z`), and a missing `alpha` means samples carry
/// no occlusion model and are summed rather than composited. `extra` holds
/// the remaining channels (RGB, AOVs) in a fixed order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileChannels {
    /// Front depth per sample.
    pub z: Vec<f32>,
    /// Back depth per sample; clamped to `max(Z, ZBack)` on ingestion.
    pub z_back: Option<Vec<f32>>,
    /// Premultiplied alpha per sample.
    pub alpha: Option<Vec<f32>>,
    /// Ordered `(name, values)` rows for all remaining channels.
    pub extra: Vec<(String, Vec<f32>)>,
}

/// A fixed-size rectangular block of pixels, each with an independent deep
/// sample list.
///
/// Samples are addressed through a per-pixel prefix-sum offsets array:
/// pixel `i` occupies sample indices `[offsets[i-1], offsets[i])` of every
/// channel row. A flat tile (`deep == false`) has exactly one sample per
/// pixel and conventional addressing.
#[derive(Clone, Debug, PartialEq)]
pub struct DeepTile {
    width: u32,
    height: u32,
    deep: bool,
    sample_offsets: Vec<u32>,
    channels: TileChannels,
}

impl DeepTile {
    /// Build a deep tile, validating the calling layer's contract.
    ///
    /// Checks: nonzero dimensions, one offset per pixel and monotone
    /// non-decreasing, every channel row exactly as long as the declared
    /// sample count, and finite non-negative depths. `ZBack` is clamped to
    /// `max(Z, ZBack)` per sample after validation.
    pub fn new(
        width: u32,
        height: u32,
        sample_offsets: Vec<u32>,
        channels: TileChannels,
    ) -> DeeptileResult<Self> {
        let mut tile = Self {
            width,
            height,
            deep: true,
            sample_offsets,
            channels,
        };
        tile.validate()?;
        if let Some(z_back) = &mut tile.channels.z_back {
            for (zb, &z) in z_back.iter_mut().zip(&tile.channels.z) {
                *zb = zb.max(z);
            }
        }
        Ok(tile)
    }

    /// Build a flat (non-deep) tile: one sample per pixel, in pixel order.
    pub fn flat(width: u32, height: u32, channels: TileChannels) -> DeeptileResult<Self> {
        let pixels = width as usize * height as usize;
        let sample_offsets = (1..=pixels as u32).collect();
        let mut tile = Self::new(width, height, sample_offsets, channels)?;
        tile.deep = false;
        Ok(tile)
    }

    fn validate(&self) -> DeeptileResult<()> {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 {
            return Err(DeeptileError::validation(format!(
                "tile {w}x{h}: dimensions must be nonzero"
            )));
        }

        let pixels = w as usize * h as usize;
        if self.sample_offsets.len() != pixels {
            return Err(DeeptileError::contract(format!(
                "tile {w}x{h}: {} sample offsets for {pixels} pixels",
                self.sample_offsets.len()
            )));
        }
        let mut prev = 0_u32;
        for (pixel, &offset) in self.sample_offsets.iter().enumerate() {
            if offset < prev {
                return Err(DeeptileError::contract(format!(
                    "tile {w}x{h}: sample offsets decrease at pixel {pixel}"
                )));
            }
            prev = offset;
        }

        let total = self.total_samples();
        self.check_row_len("Z", &self.channels.z, total)?;
        if let Some(z_back) = &self.channels.z_back {
            self.check_row_len("ZBack", z_back, total)?;
        }
        if let Some(alpha) = &self.channels.alpha {
            self.check_row_len("A", alpha, total)?;
        }
        for (name, row) in &self.channels.extra {
            if matches!(name.as_str(), "Z" | "ZBack" | "A") {
                return Err(DeeptileError::validation(format!(
                    "tile {w}x{h}: channel \"{name}\" must use its dedicated slot"
                )));
            }
            self.check_row_len(name, row, total)?;
        }
        let mut names: Vec<&str> = self.channels.extra.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(DeeptileError::validation(format!(
                "tile {w}x{h}: duplicate channel \"{}\"",
                pair[0]
            )));
        }

        self.check_depths("Z", &self.channels.z)?;
        if let Some(z_back) = &self.channels.z_back {
            self.check_depths("ZBack", z_back)?;
        }
        Ok(())
    }

    fn check_row_len(&self, name: &str, row: &[f32], total: usize) -> DeeptileResult<()> {
        if row.len() != total {
            return Err(DeeptileError::contract(format!(
                "tile {}x{}: channel \"{name}\" has {} values for {total} samples",
                self.width,
                self.height,
                row.len()
            )));
        }
        Ok(())
    }

    fn check_depths(&self, name: &str, row: &[f32]) -> DeeptileResult<()> {
        for (index, &depth) in row.iter().enumerate() {
            if !depth.is_finite() || depth < 0.0 {
                let pixel = self.pixel_of_sample(index);
                return Err(DeeptileError::contract(format!(
                    "tile {}x{}: channel \"{name}\" has depth {depth} at pixel {pixel}",
                    self.width, self.height,
                )));
            }
        }
        Ok(())
    }

    /// Pixel owning flat sample index `index`.
    fn pixel_of_sample(&self, index: usize) -> usize {
        self.sample_offsets
            .partition_point(|&offset| offset as usize <= index)
    }

    /// Tile width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Tile height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel count.
    pub fn pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `false` once the tile holds exactly one composited sample per pixel.
    pub fn is_deep(&self) -> bool {
        self.deep
    }

    /// Per-pixel prefix-sum sample offsets.
    pub fn sample_offsets(&self) -> &[u32] {
        &self.sample_offsets
    }

    /// Total sample count across all pixels.
    pub fn total_samples(&self) -> usize {
        self.sample_offsets.last().copied().unwrap_or(0) as usize
    }

    /// Sample index range of pixel `pixel`.
    pub fn sample_range(&self, pixel: usize) -> Range<usize> {
        let start = if pixel == 0 {
            0
        } else {
            self.sample_offsets[pixel - 1] as usize
        };
        start..self.sample_offsets[pixel] as usize
    }

    /// Per-pixel sample counts.
    pub fn sample_counts(&self) -> Vec<u32> {
        (0..self.pixels())
            .map(|pixel| self.sample_range(pixel).len() as u32)
            .collect()
    }

    /// Front depths, one value per sample.
    pub fn z(&self) -> &[f32] {
        &self.channels.z
    }

    /// Back depths, if the tile carries a ZBack channel.
    pub fn z_back(&self) -> Option<&[f32]> {
        self.channels.z_back.as_deref()
    }

    /// Premultiplied alphas, if the tile carries an alpha channel.
    pub fn alpha(&self) -> Option<&[f32]> {
        self.channels.alpha.as_deref()
    }

    /// Ordered auxiliary channels.
    pub fn extra_channels(&self) -> &[(String, Vec<f32>)] {
        &self.channels.extra
    }

    /// Values of the auxiliary channel called `name`, if present.
    pub fn extra_channel(&self, name: &str) -> Option<&[f32]> {
        self.channels
            .extra
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, row)| row.as_slice())
    }

    /// Copy pixel `pixel`'s samples into `out`, which must be shaped for
    /// this tile (same channel count and alpha presence). A missing ZBack
    /// channel materializes as `ZBack = Z`.
    pub fn extract_pixel(&self, pixel: usize, out: &mut SampleList) {
        debug_assert_eq!(out.channel_count(), self.channels.extra.len());
        debug_assert_eq!(out.has_alpha(), self.channels.alpha.is_some());
        out.clear();
        let range = self.sample_range(pixel);
        out.z.extend_from_slice(&self.channels.z[range.clone()]);
        match &self.channels.z_back {
            Some(z_back) => out.z_back.extend_from_slice(&z_back[range.clone()]),
            None => out.z_back.extend_from_slice(&self.channels.z[range.clone()]),
        }
        if let (Some(out_alpha), Some(alpha)) = (&mut out.alpha, &self.channels.alpha) {
            out_alpha.extend_from_slice(&alpha[range.clone()]);
        }
        for (row, (_, values)) in out.channels.iter_mut().zip(&self.channels.extra) {
            row.extend_from_slice(&values[range.clone()]);
        }
    }

    /// An empty [`SampleList`] shaped to receive this tile's pixels.
    pub fn pixel_scratch(&self) -> SampleList {
        SampleList::with_shape(self.channels.extra.len(), self.channels.alpha.is_some())
    }

    /// `true` when every pixel is ascending by `(Z, ZBack)`.
    pub fn is_sorted(&self) -> bool {
        crate::state::detect::classify_tile(self).sorted
    }

    /// `true` when every pixel's intervals already form a partition.
    pub fn is_tidy(&self) -> bool {
        crate::state::detect::classify_tile(self).tidy
    }
}

/// Accumulates transformed pixels back into tile-shaped channel rows.
pub(crate) struct TileBuilder {
    width: u32,
    height: u32,
    names: Vec<String>,
    sample_offsets: Vec<u32>,
    z: Vec<f32>,
    z_back: Vec<f32>,
    alpha: Option<Vec<f32>>,
    channels: Vec<Vec<f32>>,
}

impl TileBuilder {
    /// A builder shaped like `tile`, with ZBack always materialized.
    pub(crate) fn shaped_like(tile: &DeepTile) -> Self {
        Self {
            width: tile.width,
            height: tile.height,
            names: tile.channels.extra.iter().map(|(n, _)| n.clone()).collect(),
            sample_offsets: Vec::with_capacity(tile.pixels()),
            z: Vec::with_capacity(tile.total_samples()),
            z_back: Vec::with_capacity(tile.total_samples()),
            alpha: tile.channels.alpha.as_ref().map(|_| Vec::new()),
            channels: vec![Vec::new(); tile.channels.extra.len()],
        }
    }

    /// Append one pixel's samples in order.
    pub(crate) fn push_pixel(&mut self, list: &SampleList) {
        self.z.extend_from_slice(&list.z);
        self.z_back.extend_from_slice(&list.z_back);
        if let (Some(out), Some(row)) = (&mut self.alpha, &list.alpha) {
            out.extend_from_slice(row);
        }
        for (out, row) in self.channels.iter_mut().zip(&list.channels) {
            out.extend_from_slice(row);
        }
        self.sample_offsets.push(self.z.len() as u32);
    }

    /// Finish as a deep or flat tile. The builder output already satisfies
    /// the construction contract, so this does not fail.
    pub(crate) fn finish(self, deep: bool) -> DeepTile {
        DeepTile {
            width: self.width,
            height: self.height,
            deep,
            sample_offsets: self.sample_offsets,
            channels: TileChannels {
                z: self.z,
                z_back: Some(self.z_back),
                alpha: self.alpha,
                extra: self.names.into_iter().zip(self.channels).collect(),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tile/deep.rs"]
mod tests;
