/// Attenuation weights for carving a sub-range out of a volume sample.
///
/// `x` is the fraction of the sample's thickness covered by the sub-range,
/// in `(0, 1]`. Returns `(new_alpha, channel_scale)`: the fragment's alpha
/// and the factor applied to every premultiplied channel value. `x == 1`
/// is a bit-exact identity.
///
/// - `alpha == 1`: opaque samples are hard walls; the fragment is unchanged.
/// - `alpha == 0` (or no alpha channel): nothing absorbs, so alpha and
///   channels scale linearly with the covered fraction.
/// - otherwise the sample is exponential fog over its interval:
///   `new_alpha = 1 - (1 - alpha)^x`, evaluated via `log1p`/`expm1` to keep
///   precision near zero alpha, and channels rescale to the new alpha.
pub fn split_fraction(alpha: f32, x: f32) -> (f32, f32) {
    debug_assert!(x > 0.0 && x <= 1.0);
    if alpha >= 1.0 {
        (1.0, 1.0)
    } else if x == 1.0 {
        // Whole-sample fragments must be bit-exact identities: re-tidying
        // tidy data walks through here for every sample.
        (alpha, 1.0)
    } else if alpha <= 0.0 {
        (alpha * x, x)
    } else {
        let new_alpha = -(x * (-alpha).ln_1p()).exp_m1();
        (new_alpha, new_alpha / alpha)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/split.rs"]
mod tests;
