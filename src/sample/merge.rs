use std::ops::Range;

use crate::sample::list::SampleList;

/// Merge the samples in `group`, which must all share one exact depth
/// interval, into a single `(alpha, channel values)` pair.
///
/// If any input is solid (`alpha == 1`), the merged sample is solid and its
/// channels are the unweighted average of exactly the solid inputs; fog
/// merged with a wall at the same depth contributes nothing.
///
/// Otherwise the inputs are independent co-located media: optical depths
/// (`-log(1 - alpha)`) add, which makes the result independent of input
/// order. The fold is still performed pairwise left-to-right in list order
/// for bit-stable determinism. With every alpha at zero (including lists
/// without an alpha channel) the formula degrades to a plain channel sum.
pub fn merge_coincident(list: &SampleList, group: Range<usize>) -> (f32, Vec<f32>) {
    debug_assert!(!group.is_empty());
    let channel_count = list.channel_count();

    let solid_count = group.clone().filter(|&i| list.alpha_at(i) >= 1.0).count();
    if solid_count > 0 {
        let mut values = vec![0.0; channel_count];
        for i in group {
            if list.alpha_at(i) >= 1.0 {
                for (c, value) in values.iter_mut().enumerate() {
                    *value += list.channels[c][i];
                }
            }
        }
        for value in &mut values {
            *value /= solid_count as f32;
        }
        return (1.0, values);
    }

    let mut alpha = list.alpha_at(group.start);
    let mut values: Vec<f32> = list.channels.iter().map(|row| row[group.start]).collect();
    for i in group.skip(1) {
        alpha = merge_pair(alpha, &mut values, list.alpha_at(i), |c| {
            list.channels[c][i]
        });
    }
    (alpha, values)
}

/// Fold one non-solid sample `(b_alpha, b_value(c))` into the running
/// non-solid accumulator `(a_alpha, a_values)`, returning the merged alpha.
fn merge_pair(
    a_alpha: f32,
    a_values: &mut [f32],
    b_alpha: f32,
    b_value: impl Fn(usize) -> f32,
) -> f32 {
    let merged_alpha = a_alpha + b_alpha - a_alpha * b_alpha;

    let u1 = -(-a_alpha).ln_1p();
    let v1 = finite_or_one(u1 / a_alpha);
    let u2 = -(-b_alpha).ln_1p();
    let v2 = finite_or_one(u2 / b_alpha);

    let u = u1 + u2;
    let w = finite_or_one(merged_alpha / u);

    for (c, value) in a_values.iter_mut().enumerate() {
        *value = (*value * v1 + b_value(c) * v2) * w;
    }
    merged_alpha
}

/// Guard against inf/NaN when a tiny optical depth is divided by a
/// near-zero alpha: a non-finite ratio means both quantities have vanished
/// and the limit of the ratio is 1.
fn finite_or_one(ratio: f32) -> f32 {
    if ratio.is_finite() { ratio } else { 1.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/merge.rs"]
mod tests;
