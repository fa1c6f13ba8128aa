use crate::sample::list::SampleList;

/// Stable-sort a pixel's samples by `(Z, ZBack)`.
///
/// Ties keep their original order so that downstream merging folds
/// coincident samples deterministically. Already-sorted lists are left
/// untouched (no reallocation).
pub fn sort_samples(list: &mut SampleList) {
    if is_depth_sorted(&list.z, &list.z_back) {
        return;
    }

    let mut order: Vec<u32> = (0..list.len() as u32).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (a as usize, b as usize);
        list.z[a]
            .total_cmp(&list.z[b])
            .then_with(|| list.z_back[a].total_cmp(&list.z_back[b]))
    });
    list.apply_order(&order);
}

pub(crate) fn is_depth_sorted(z: &[f32], z_back: &[f32]) -> bool {
    (1..z.len()).all(|i| {
        z[i - 1] < z[i] || (z[i - 1] == z[i] && z_back[i - 1] <= z_back[i])
    })
}
