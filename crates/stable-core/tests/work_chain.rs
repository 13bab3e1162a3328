#![cfg(feature = "test-util")]
//! `Work` 链条的端到端行为：转发透明、析构恰好一次、链条之间互不干扰。

use proptest::prelude::*;
use stable_core::test_stubs::WorkCounters;
use stable_core::{Work, create_stable_work};

#[test]
fn three_calls_then_release() {
    let counters = WorkCounters::new();
    let stable = create_stable_work(Box::new(counters.stub()));

    stable.do_work();
    stable.do_work();
    stable.do_work();
    assert_eq!(counters.calls(), 3);
    assert_eq!(counters.drops(), 0);

    drop(stable);
    assert_eq!(counters.drops(), 1);
}

#[test]
fn chains_from_different_implementations_are_independent() {
    let left = WorkCounters::new();
    let right = WorkCounters::new();
    let left_stable = create_stable_work(Box::new(left.stub()));
    let right_stable = create_stable_work(Box::new(right.stub()));

    left_stable.do_work();
    drop(left_stable);

    assert_eq!((left.calls(), left.drops()), (1, 1));
    assert_eq!((right.calls(), right.drops()), (0, 0));
    drop(right_stable);
}

#[test]
fn returned_handle_is_only_typed_as_the_interface() {
    fn accepts_interface(work: &dyn Work) {
        work.do_work();
    }

    let counters = WorkCounters::new();
    let stable: Box<dyn Work> = create_stable_work(Box::new(counters.stub()));
    accepts_interface(stable.as_ref());
    assert_eq!(counters.calls(), 1);
}

#[test]
fn stable_handle_can_be_wrapped_again() {
    let counters = WorkCounters::new();
    let inner = create_stable_work(Box::new(counters.stub()));
    let outer = create_stable_work(inner);

    outer.do_work();
    drop(outer);
    assert_eq!((counters.calls(), counters.drops()), (1, 1));
}

proptest! {
    #[test]
    fn forwarded_calls_match_direct_calls(rounds in 0usize..64) {
        let direct = WorkCounters::new();
        let forwarded = WorkCounters::new();
        {
            let implementation = direct.stub();
            let stable = create_stable_work(Box::new(forwarded.stub()));
            for _ in 0..rounds {
                implementation.do_work();
                stable.do_work();
            }
        }
        prop_assert_eq!(direct.calls(), forwarded.calls());
        prop_assert_eq!(direct.drops(), 1);
        prop_assert_eq!(forwarded.drops(), 1);
    }
}
