use crate::sample::list::SampleList;
use crate::sample::merge::merge_coincident;
use crate::sample::sort::sort_samples;
use crate::sample::split::split_fraction;

/// Rewrite a pixel's samples into the tidy form: split every volume sample
/// at each depth boundary present in the pixel, merge samples that end up
/// sharing an identical interval, and return the result sorted.
///
/// Works on input in any order; merge groups fold in the input's order, so
/// callers wanting the canonical result sort first. Tidying a tidy list
/// returns it unchanged.
pub fn tidy(list: &SampleList) -> SampleList {
    if list.len() <= 1 {
        return list.clone();
    }

    // Step A: the ordered set of distinct boundary depths in this pixel.
    let mut splits: Vec<f32> = Vec::with_capacity(list.len() * 2);
    splits.extend_from_slice(&list.z);
    splits.extend_from_slice(&list.z_back);
    splits.sort_by(f32::total_cmp);
    splits.dedup();

    // Step B: carve volume samples at every boundary strictly inside their
    // interval; zero-thickness samples pass through.
    let mut fragments = SampleList::with_shape(list.channel_count(), list.has_alpha());
    let mut values = vec![0.0; list.channel_count()];
    for i in 0..list.len() {
        let (z, z_back) = (list.z[i], list.z_back[i]);
        if z == z_back {
            fragments.push_from(list, i);
            continue;
        }

        let alpha = list.alpha_at(i);
        let thickness = z_back - z;
        let mut front = z;
        let mut boundary = splits.partition_point(|&s| s <= z);
        loop {
            let back = if boundary < splits.len() && splits[boundary] < z_back {
                splits[boundary]
            } else {
                z_back
            };
            let x = (back - front) / thickness;
            let (new_alpha, scale) = split_fraction(alpha, x);
            for (value, row) in values.iter_mut().zip(&list.channels) {
                *value = row[i] * scale;
            }
            fragments.push(
                front,
                back,
                list.alpha.is_some().then_some(new_alpha),
                &values,
            );
            if back == z_back {
                break;
            }
            front = back;
            boundary += 1;
        }
    }

    // Steps C and D: a stable depth sort makes identical intervals adjacent
    // while keeping each group in original order, so one run-merging pass
    // yields the sorted tidy list.
    sort_samples(&mut fragments);
    let mut out = SampleList::with_shape(list.channel_count(), list.has_alpha());
    let mut start = 0;
    while start < fragments.len() {
        let mut end = start + 1;
        while end < fragments.len()
            && fragments.z[end] == fragments.z[start]
            && fragments.z_back[end] == fragments.z_back[start]
        {
            end += 1;
        }
        if end == start + 1 {
            out.push_from(&fragments, start);
        } else {
            let (alpha, values) = merge_coincident(&fragments, start..end);
            out.push(
                fragments.z[start],
                fragments.z_back[start],
                fragments.alpha.is_some().then_some(alpha),
                &values,
            );
        }
        start = end;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/sample/tidy.rs"]
mod tests;
