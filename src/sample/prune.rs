use crate::sample::list::SampleList;

/// Remove no-op samples from a tidy list: zero alpha (or no alpha channel)
/// *and* every auxiliary channel exactly zero.
///
/// Zero-alpha samples carrying nonzero channel data are pure emission and
/// are retained; dropping them would change the flattened result.
pub fn prune_transparent(list: &mut SampleList) {
    let keep: Vec<bool> = (0..list.len())
        .map(|i| list.alpha_at(i) != 0.0 || list.channels.iter().any(|row| row[i] != 0.0))
        .collect();
    if keep.iter().any(|&k| !k) {
        list.retain_samples(&keep);
    }
}

/// Drop every sample behind the point where cumulative front-to-back alpha
/// reaches `threshold`; kept samples are left unperturbed.
///
/// `threshold` must lie in `(0, 1]` (1.0 drops only fully occluded
/// samples). The sample count never increases, and a stricter threshold
/// prunes at least as much as a looser one.
pub fn prune_occluded(list: &mut SampleList, threshold: f32) {
    debug_assert!(threshold > 0.0 && threshold <= 1.0);
    let mut accum = 0.0_f32;
    for i in 0..list.len() {
        if accum >= threshold {
            list.truncate(i);
            return;
        }
        let alpha = list.alpha_at(i);
        accum = accum + alpha - accum * alpha;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/prune.rs"]
mod tests;
