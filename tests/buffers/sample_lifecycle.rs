//! Slots, deep copies and limits

use crate::common::ramp;
use ssi::{Error, Limits, Sample, ScalarKind, Stream, GARBAGE_CLASS_ID};

/// Audio, video-feature and skeleton slots, the last one missing
fn multimodal() -> Sample {
    let mut sample = Sample::new(3, 12, 1, 4.5, 0.75);
    sample.set_stream(0, ramp(160, 1, 16000.0));
    sample.set_stream(1, Stream::of_kind(1, 128, ScalarKind::UInt8, 25.0));
    sample
}

#[test]
fn missing_modality_is_reported_as_absent() {
    let sample = multimodal();
    assert_eq!(sample.num(), 3);
    assert_eq!(sample.present(), 2);
    assert!(!sample.is_complete());
    assert!(sample.stream(2).is_none());
    assert_eq!(sample.stream(1).unwrap().dim(), 128);
}

#[test]
fn clone_owns_every_stream() {
    let sample = multimodal();
    let mut copy = sample.clone();
    assert_eq!(copy, sample);

    copy.stream_mut(0).unwrap().adjust(10);
    copy.time = 0.0;
    assert_eq!(sample.stream(0).unwrap().num(), 160);
    assert_eq!(sample.time, 4.5);
    assert!(copy.stream(2).is_none());
}

#[test]
fn streams_move_between_samples() {
    let mut source = multimodal();
    let mut target = Sample::new(1, 0, GARBAGE_CLASS_ID, 0.0, 0.0);
    assert!(target.is_garbage());

    let audio = source.take_stream(0).unwrap();
    assert!(target.set_stream(0, audio).is_none());
    assert!(target.is_complete());
    assert_eq!(source.present(), 1);
}

#[test]
fn destroy_then_rebuild() {
    let mut sample = multimodal();
    sample.destroy();
    assert_eq!(sample.num(), 0);
    assert_eq!(sample.present(), 0);
    sample.destroy();
    assert!(sample.streams().is_empty());

    sample = Sample::new(2, 12, 3, 9.0, 0.5);
    sample.set_stream(0, ramp(4, 2, 100.0));
    sample.set_stream(1, ramp(2, 1, 10.0));
    assert!(sample.is_complete());
    assert_eq!(sample.class_id, 3);
    assert_eq!(sample.stream(1).unwrap().values::<f32>().unwrap(), vec![0.0, 1.0]);
}

#[test]
fn sample_and_stream_limits() {
    let limits = Limits::with_small_limits();
    assert!(matches!(
        Sample::try_new(&limits, limits.max_sample_streams + 1, 0, 0, 0.0, 0.0),
        Err(Error::Limit(_))
    ));
    let too_wide = Stream::try_new(
        &limits,
        1,
        limits.max_dim + 1,
        4,
        ScalarKind::Float32.into(),
        0.0,
        0.0,
    );
    assert!(matches!(too_wide, Err(Error::Limit(_))));
    let overflow = Stream::try_new(&limits, usize::MAX, 2, 4, ScalarKind::Float32.into(), 0.0, 0.0);
    assert!(matches!(overflow, Err(Error::Limit(_))));
}
