/// Canonical states for a pixel's deep samples.
///
/// States are ordered: every Tidy list is Sorted, and a Flat pixel (at most
/// one sample) is trivially Tidy. Transforms move monotonically towards the
/// requested state and are no-ops once it already holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DeepState {
    /// Ascending by `(Z, ZBack)`; overlapping intervals permitted.
    Sorted,
    /// Sorted, and depth intervals form a partition: no partial overlaps,
    /// identical intervals fully merged.
    Tidy,
    /// Exactly one (or zero) composited sample per pixel.
    Flat,
}
