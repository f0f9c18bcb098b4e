//! Append, sub-range, selection and conversion

use crate::common::{empty, init_tracing, patterned, ramp};
use proptest::prelude::*;
use ssi::{AdjustOutcome, DataType, Error, ScalarKind, Stream};

#[test]
fn concatenate_appends_after_logical_end() {
    init_tracing();
    let mut stream = ramp(4, 2, 100.0);
    stream.adjust(2);
    let addition = ramp(1, 2, 100.0);

    // Fits inside the old allocation
    assert_eq!(stream.concatenate(&addition).unwrap(), AdjustOutcome::InPlace);
    assert_eq!(stream.num(), 3);
    assert_eq!(
        stream.values::<f32>().unwrap(),
        vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0]
    );

    assert_eq!(stream.concatenate(&ramp(3, 2, 100.0)).unwrap(), AdjustOutcome::Reallocated);
    assert_eq!(stream.num(), 6);
    assert_eq!(stream.num_real(), 6);
}

#[test]
fn concatenate_rejects_shape_mismatch_untouched() {
    init_tracing();
    let mut stream = ramp(3, 2, 100.0);
    let before = stream.clone();
    let err = stream.concatenate(&ramp(3, 3, 100.0)).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
    assert_eq!(stream, before);
}

#[test]
fn concatenate_ignores_rate_and_keeps_own() {
    let mut stream = ramp(2, 1, 100.0);
    stream.concatenate(&ramp(2, 1, 99.5)).unwrap();
    assert_eq!(stream.sample_rate(), 100.0);
    assert_eq!(stream.num(), 4);
}

#[test]
fn concatenate_accepts_other_kind_of_same_width() {
    let mut stream = ramp(1, 2, 100.0);
    let ints = Stream::from_values(&[7i32, 8], 2, 10.0).unwrap();
    stream.concatenate(&ints).unwrap();
    assert_eq!(stream.kind(), DataType::Scalar(ScalarKind::Float32));
    assert_eq!(stream.num(), 2);
    assert_eq!(stream.sample_bytes(1), ints.data());
}

#[test]
fn copy_range_bounds() {
    let stream = ramp(5, 1, 10.0);
    assert_eq!(stream.copy_range(5, 5).unwrap().num(), 0);
    assert!(matches!(
        stream.copy_range(3, 2),
        Err(Error::InvalidRange { from: 3, to: 2, num: 5 })
    ));
    assert!(matches!(stream.copy_range(0, 6), Err(Error::InvalidRange { .. })));
}

#[test]
fn copy_range_of_aperiodic_stream_keeps_time() {
    let mut stream = ramp(5, 1, 0.0);
    stream.set_time(2.5);
    assert_eq!(stream.copy_range(2, 4).unwrap().time(), 2.5);
}

#[test]
fn select_dimensions_permutes_and_clamps() {
    let stream = ramp(2, 3, 10.0);
    let picked = stream.select_dimensions(&[2, 0, 9], 0).unwrap();
    assert_eq!(picked.dim(), 3);
    assert_eq!(
        picked.values::<f32>().unwrap(),
        vec![2.0, 0.0, 2.0, 5.0, 3.0, 5.0]
    );
    assert_eq!(picked.sample_rate(), 10.0);
}

#[test]
fn select_dimensions_rotates_channels() {
    let stream = ramp(4, 3, 10.0);
    let picked = stream.select_dimensions(&[2, 0, 1], 0).unwrap();
    assert_eq!(picked.dim(), 3);
    assert_eq!(picked.num(), 4);
    for i in 0..4 {
        for (j, d) in [2usize, 0, 1].into_iter().enumerate() {
            assert_eq!(
                picked.get::<f32>(i, j).unwrap(),
                stream.get::<f32>(i, d).unwrap()
            );
        }
    }
}

#[test]
fn select_dimensions_repeats_per_group() {
    // Two stacked blocks of three channels
    let stream = ramp(1, 6, 10.0);
    let picked = stream.select_dimensions(&[1], 3).unwrap();
    assert_eq!(picked.values::<f32>().unwrap(), vec![1.0, 4.0]);

    assert!(matches!(
        stream.select_dimensions(&[0], 7),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn select_dimensions_moves_opaque_bytes() {
    let mut stream = Stream::new(1, 2, 3, DataType::Struct, 0.0, 0.0);
    stream.data_mut().copy_from_slice(&[1, 2, 3, 4, 5, 6]);
    let picked = stream.select_dimensions(&[1], 0).unwrap();
    assert_eq!(picked.data(), &[4, 5, 6]);
}

#[test]
fn convert_type_casts_and_copies_timing() {
    init_tracing();
    let source = Stream::from_values(&[1.9f32, -2.5, 300.0, 0.0], 2, 44.1).unwrap();
    let mut dest = Stream::of_kind(0, 2, ScalarKind::Int32, 0.0);
    source.convert_type(&mut dest).unwrap();
    assert_eq!(dest.num(), 2);
    assert_eq!(dest.sample_rate(), 44.1);
    assert_eq!(dest.values::<i32>().unwrap(), vec![1, -2, 300, 0]);

    let flags = source.converted(ScalarKind::Bool).unwrap();
    assert_eq!(flags.values::<bool>().unwrap(), vec![true, true, true, false]);
}

#[test]
fn convert_type_rejects_opaque_and_dim_mismatch() {
    init_tracing();
    let image = Stream::new(1, 1, 12, DataType::Image, 0.0, 0.0);
    let mut dest = Stream::of_kind(0, 1, ScalarKind::UInt8, 0.0);
    assert!(matches!(
        image.convert_type(&mut dest),
        Err(Error::UnsupportedKind(DataType::Image))
    ));

    let source = ramp(2, 3, 0.0);
    let mut narrow = Stream::of_kind(0, 2, ScalarKind::Float64, 0.0);
    assert!(matches!(
        source.convert_type(&mut narrow),
        Err(Error::ShapeMismatch { .. })
    ));
    assert_eq!(narrow.num(), 0);
}

proptest! {
    #[test]
    fn concatenate_adds_sample_counts(
        dim in 1usize..4,
        a in 0usize..20,
        b in 0usize..20
    ) {
        let base = ramp(a, dim, 10.0);
        let addition = ramp(b, dim, 10.0);
        let mut stream = base.clone();
        stream.concatenate(&addition).unwrap();
        prop_assert_eq!(stream.num(), a + b);
        prop_assert_eq!(stream.tot(), base.tot() + addition.tot());
        prop_assert_eq!(&stream.data()[..base.tot()], base.data());
        let head = stream.copy_range(0, a).unwrap();
        prop_assert_eq!(head.data(), base.data());
        let tail = stream.copy_range(a, a + b).unwrap();
        prop_assert_eq!(tail.data(), addition.data());
    }

    #[test]
    fn identity_selection_reproduces_stream(num in 0usize..10, dim in 1usize..6) {
        let stream = ramp(num, dim, 10.0);
        let dims: Vec<usize> = (0..dim).collect();
        prop_assert_eq!(stream.select_dimensions(&dims, 0).unwrap(), stream);
    }

    #[test]
    fn identity_conversion_copies_bytes(
        kind in prop::sample::select(ScalarKind::ALL.to_vec()),
        num in 0usize..10,
        seed in any::<u8>()
    ) {
        let source = patterned(num, 3, kind, seed);
        let mut dest = Stream::of_kind(2, 3, kind, 0.0);
        source.convert_type(&mut dest).unwrap();
        prop_assert_eq!(dest.data(), source.data());
        prop_assert_eq!(dest.time(), source.time());
    }

    #[test]
    fn widening_conversion_is_lossless(values in prop::collection::vec(any::<i16>(), 1..32)) {
        let stream = Stream::from_values(&values, 1, 0.0).unwrap();
        let wide = stream.converted(ScalarKind::Float64).unwrap();
        let back = wide.converted(ScalarKind::Int16).unwrap();
        prop_assert_eq!(back.values::<i16>().unwrap(), values);
    }

    #[test]
    fn copy_range_of_empty_stream_is_empty(dim in 1usize..4) {
        let stream = empty(dim, 100.0);
        let part = stream.copy_range(0, 0).unwrap();
        prop_assert_eq!(part.num(), 0);
        prop_assert!(!part.is_allocated());
    }
}
