//! Size bookkeeping and the adjust policy

use crate::common::{empty, init_tracing, patterned, ramp};
use proptest::prelude::*;
use ssi::{AdjustOutcome, DataType, ScalarKind, Stream};

fn assert_sizes(s: &Stream) {
    assert!(s.num() <= s.num_real(), "{}", s);
    assert_eq!(s.tot(), s.num() * s.dim() * s.byte(), "{}", s);
    assert_eq!(s.tot_real(), s.num_real() * s.dim() * s.byte(), "{}", s);
    assert_eq!(s.is_allocated(), s.tot_real() > 0, "{}", s);
}

#[test]
fn capture_scenario_grow_then_slice() {
    init_tracing();
    let mut stream = empty(2, 100.0);
    assert!(!stream.is_allocated());

    assert_eq!(stream.adjust(5), AdjustOutcome::Reallocated);
    assert_eq!(stream.num(), 5);
    assert_eq!(stream.num_real(), 5);
    assert_eq!(stream.tot(), 40);
    assert_sizes(&stream);

    for i in 0..5 {
        stream.set(i, 0, i as f32).unwrap();
        stream.set(i, 1, -(i as f32)).unwrap();
    }

    let part = stream.copy_range(1, 4).unwrap();
    assert_eq!(part.num(), 3);
    assert_eq!(part.num_real(), 3);
    assert_eq!(part.tot(), 24);
    assert!((part.time() - 0.01).abs() < 1e-12);
    assert_eq!(part.values::<f32>().unwrap(), vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
}

#[test]
fn shrink_keeps_allocation_and_bytes() {
    let mut stream = ramp(8, 3, 50.0);
    let ptr = stream.buffer().as_ptr();

    assert_eq!(stream.adjust(2), AdjustOutcome::InPlace);
    assert_eq!(stream.num(), 2);
    assert_eq!(stream.num_real(), 8);
    assert_eq!(stream.buffer().as_ptr(), ptr);
    assert_sizes(&stream);

    // Growing back inside the allocation shows the old bytes again
    assert_eq!(stream.adjust(8), AdjustOutcome::InPlace);
    assert_eq!(stream.get::<f32>(7, 2).unwrap(), 23.0);
    assert_eq!(stream.buffer().as_ptr(), ptr);
}

#[test]
fn grow_past_allocation_preserves_prefix() {
    let mut stream = ramp(4, 2, 10.0);
    stream.adjust(1);
    assert_eq!(stream.adjust(6), AdjustOutcome::Reallocated);
    assert_eq!(stream.num_real(), 6);
    assert_eq!(stream.get::<f32>(0, 1).unwrap(), 1.0);
    assert_sizes(&stream);
}

#[test]
fn reset_keeps_shape_destroy_clears_it() {
    let mut stream = Stream::of_kind(10, 4, ScalarKind::Int16, 16000.0);
    stream.set_time(3.0);

    stream.reset();
    assert_eq!(stream.num(), 0);
    assert_eq!(stream.time(), 0.0);
    assert_eq!(stream.dim(), 4);
    assert_eq!(stream.kind(), DataType::Scalar(ScalarKind::Int16));
    assert_eq!(stream.sample_rate(), 16000.0);
    assert!(!stream.is_allocated());
    assert_sizes(&stream);

    stream.destroy();
    assert_eq!(stream.dim(), 0);
    assert_eq!(stream.kind(), DataType::Undefined);
    stream.destroy();
    assert_eq!(stream, Stream::default());
}

#[test]
fn opaque_stream_bookkeeping() {
    let mut stream = Stream::new(3, 1, 640 * 480 * 3, DataType::Image, 25.0, 0.0);
    assert_eq!(stream.tot(), 3 * 640 * 480 * 3);
    assert!(stream.value(0, 0).is_err());
    stream.adjust(1);
    assert_sizes(&stream);
}

#[test]
fn display_summarises_shape() {
    let stream = ramp(2, 3, 100.0);
    let text = stream.to_string();
    assert!(text.contains("float32"), "{}", text);
    assert!(text.contains("dim=3"), "{}", text);
}

proptest! {
    #[test]
    fn adjust_sequence_keeps_size_invariants(
        dim in 1usize..6,
        sizes in prop::collection::vec(0usize..64, 1..20)
    ) {
        let mut stream = empty(dim, 10.0);
        let mut high_water = 0;
        for n in sizes {
            let outcome = stream.adjust(n);
            if n > high_water {
                prop_assert_eq!(outcome, AdjustOutcome::Reallocated);
                high_water = n;
            } else {
                prop_assert_ne!(outcome, AdjustOutcome::Reallocated);
            }
            prop_assert_eq!(stream.num(), n);
            prop_assert_eq!(stream.num_real(), high_water);
            prop_assert!(stream.num() <= stream.num_real());
            prop_assert_eq!(stream.tot(), n * dim * 4);
        }
    }

    #[test]
    fn shrink_then_grow_is_identity_inside_allocation(
        num in 1usize..40,
        dim in 1usize..5,
        cut in 0usize..40
    ) {
        let cut = cut.min(num);
        let mut stream = ramp(num, dim, 0.0);
        let before = stream.clone();
        stream.adjust(cut);
        stream.adjust(num);
        prop_assert_eq!(stream, before);
    }

    #[test]
    fn clone_copies_every_kind(
        kind in prop::sample::select(ScalarKind::ALL.to_vec()),
        num in 1usize..12,
        dim in 1usize..6,
        seed in any::<u8>()
    ) {
        let mut stream = patterned(num, dim, kind, seed);
        stream.adjust(num / 2);
        let copy = stream.clone();
        prop_assert_eq!(copy.header(), stream.header());
        prop_assert_eq!(copy.data(), stream.data());
        prop_assert_eq!(copy.buffer().allocated(), stream.buffer().allocated());
        prop_assert_ne!(copy.buffer().as_ptr(), stream.buffer().as_ptr());
    }

    #[test]
    fn clone_is_equal_and_independent(num in 0usize..20, dim in 1usize..5) {
        let stream = ramp(num, dim, 25.0);
        let mut copy = stream.clone();
        prop_assert_eq!(&copy, &stream);
        prop_assert_eq!(copy.num_real(), stream.num_real());
        if num > 0 {
            copy.set(0, 0, 1000.0f32).unwrap();
            prop_assert_eq!(stream.get::<f32>(0, 0).unwrap(), 0.0);
        }
    }
}
