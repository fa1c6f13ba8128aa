use super::*;
use crate::sample::flatten::flatten;

fn assert_close(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "{what}: {actual} vs {expected}"
    );
}

#[test]
fn disjoint_samples_are_untouched() {
    let mut list = SampleList::with_shape(3, true);
    list.push(0.0, 1.0, Some(1.0), &[1.0, 0.0, 0.0]);
    list.push(2.0, 3.0, Some(1.0), &[0.0, 1.0, 0.0]);
    assert_eq!(tidy(&list), list);
}

#[test]
fn empty_and_single_sample_lists_pass_through() {
    let empty = SampleList::with_shape(2, true);
    assert_eq!(tidy(&empty), empty);

    let mut single = SampleList::with_shape(2, false);
    single.push(1.0, 5.0, None, &[0.5, 0.125]);
    assert_eq!(tidy(&single), single);
}

#[test]
fn partial_overlap_splits_and_merges() {
    // Two half-transparent unit-value volumes offset by half their depth.
    let mut list = SampleList::with_shape(1, true);
    list.push(0.0, 2.0, Some(0.5), &[1.0]);
    list.push(1.0, 3.0, Some(0.5), &[1.0]);

    let out = tidy(&list);
    assert_eq!(out.z, vec![0.0, 1.0, 2.0]);
    assert_eq!(out.z_back, vec![1.0, 2.0, 3.0]);

    let half = 1.0 - 0.5_f32.sqrt();
    let alpha = out.alpha.as_ref().unwrap();
    assert_close(alpha[0], half, "front fragment alpha");
    assert_close(alpha[1], 0.5, "merged middle alpha");
    assert_close(alpha[2], half, "back fragment alpha");
    assert_close(out.channels[0][0], half / 0.5, "front fragment value");
    assert_close(out.channels[0][1], 1.0, "merged middle value");
    assert_close(out.channels[0][2], half / 0.5, "back fragment value");
}

#[test]
fn point_sample_splits_enclosing_volume() {
    let mut list = SampleList::with_shape(1, true);
    list.push(0.0, 4.0, Some(0.5), &[1.0]);
    list.push(2.0, 2.0, Some(0.0), &[0.0]);

    let out = tidy(&list);
    assert_eq!(out.z, vec![0.0, 2.0, 2.0]);
    assert_eq!(out.z_back, vec![2.0, 2.0, 4.0]);
    let half = 1.0 - 0.5_f32.sqrt();
    assert_close(out.alpha.as_ref().unwrap()[0], half, "front alpha");
    assert_close(out.channels[0][0], half / 0.5, "front value");
}

#[test]
fn coincident_point_samples_merge() {
    let mut list = SampleList::with_shape(1, true);
    list.push(1.0, 1.0, Some(0.5), &[0.25]);
    list.push(1.0, 1.0, Some(0.5), &[0.25]);

    let out = tidy(&list);
    assert_eq!(out.len(), 1);
    assert_eq!(out.alpha.as_ref().unwrap()[0], 0.75);
    assert_close(out.channels[0][0], 0.375, "merged point value");
}

#[test]
fn tidy_is_idempotent() {
    let mut list = SampleList::with_shape(1, true);
    list.push(0.0, 2.0, Some(0.5), &[1.0]);
    list.push(1.0, 3.0, Some(0.25), &[0.5]);
    list.push(1.0, 1.0, Some(0.9), &[0.3]);

    let once = tidy(&list);
    assert_eq!(tidy(&once), once);
}

#[test]
fn splitting_preserves_the_flattened_result() {
    // A transparent point forces a split; compositing the fragments
    // front-to-back must reproduce the unsplit sample.
    let mut split_by_point = SampleList::with_shape(1, true);
    split_by_point.push(0.0, 4.0, Some(0.5), &[0.8]);
    split_by_point.push(2.0, 2.0, Some(0.0), &[0.0]);

    let flat = flatten(&tidy(&split_by_point));
    assert_close(flat.alpha.unwrap(), 0.5, "recomposed alpha");
    assert_close(flat.channels[0], 0.8, "recomposed value");
    assert_eq!(flat.z, 0.0);
    assert_eq!(flat.z_back, 4.0);
}

#[test]
fn unsorted_input_still_produces_tidy_output() {
    let mut list = SampleList::with_shape(1, true);
    list.push(5.0, 6.0, Some(0.5), &[1.0]);
    list.push(0.0, 2.0, Some(0.5), &[1.0]);
    list.push(1.0, 3.0, Some(0.5), &[1.0]);

    let out = tidy(&list);
    assert_eq!(out.z, vec![0.0, 1.0, 2.0, 5.0]);
    assert_eq!(out.z_back, vec![1.0, 2.0, 3.0, 6.0]);
}
