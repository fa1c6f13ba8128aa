use super::*;

fn list(samples: &[(f32, f32)]) -> SampleList {
    let mut out = SampleList::with_shape(0, false);
    for &(z, z_back) in samples {
        out.push(z, z_back, None, &[]);
    }
    out
}

#[test]
fn empty_and_single_are_sorted_and_tidy() {
    for samples in [&[][..], &[(1.0, 2.0)][..]] {
        let state = classify_list(&list(samples));
        assert!(state.sorted && state.tidy);
    }
}

#[test]
fn descending_depths_are_unsorted() {
    let state = classify_list(&list(&[(2.0, 3.0), (1.0, 2.0)]));
    assert!(!state.sorted && !state.tidy);

    let state = classify_list(&list(&[(1.0, 3.0), (1.0, 2.0)]));
    assert!(!state.sorted && !state.tidy);
}

#[test]
fn partial_overlap_is_sorted_but_untidy() {
    let state = classify_list(&list(&[(0.0, 2.0), (1.0, 3.0)]));
    assert!(state.sorted && !state.tidy);
}

#[test]
fn equal_front_with_growing_back_is_untidy() {
    let state = classify_list(&list(&[(1.0, 2.0), (1.0, 3.0)]));
    assert!(state.sorted && !state.tidy);
}

#[test]
fn identical_intervals_must_still_merge() {
    let state = classify_list(&list(&[(1.0, 1.0), (1.0, 1.0)]));
    assert!(state.sorted && !state.tidy);

    let state = classify_list(&list(&[(1.0, 2.0), (1.0, 2.0)]));
    assert!(state.sorted && !state.tidy);
}

#[test]
fn point_then_volume_at_same_depth_is_tidy() {
    let state = classify_list(&list(&[(1.0, 1.0), (1.0, 2.0)]));
    assert!(state.sorted && state.tidy);
}

#[test]
fn abutting_partition_is_tidy() {
    let state = classify_list(&list(&[(0.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 4.0)]));
    assert!(state.sorted && state.tidy);
}

#[test]
fn pixels_are_classified_independently() {
    // Two pixels, each internally fine; a cross-pixel decrease is not a
    // violation.
    let offsets = [2_u32, 4];
    let z = [5.0_f32, 6.0, 0.0, 1.0];
    let z_back = [5.5_f32, 6.5, 0.5, 1.5];
    let state = classify_slices(&offsets, &z, &z_back);
    assert!(state.sorted && state.tidy);
}
