use crate::WorkFactory;
use crate::case::{TckCase, TckSuite};
use stable_core::Work;
use stable_core::test_stubs::WorkCounters;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const CASES: &[TckCase] = &[
    TckCase {
        name: "independent_chains_do_not_alias",
        test: independent_chains_do_not_alias,
    },
    TckCase {
        name: "distinct_implementations_share_one_handle_type",
        test: distinct_implementations_share_one_handle_type,
    },
];

const SUITE: TckSuite = TckSuite {
    name: "isolation",
    cases: CASES,
};

/// 返回“隔离”主题的测试套件。
pub const fn suite() -> &'static TckSuite {
    &SUITE
}

fn independent_chains_do_not_alias(factory: WorkFactory) {
    let first = WorkCounters::new();
    let second = WorkCounters::new();
    let first_stable = factory(Box::new(first.stub()));
    let second_stable = factory(Box::new(second.stub()));

    first_stable.do_work();
    first_stable.do_work();
    for _ in 0..5 {
        second_stable.do_work();
    }
    drop(first_stable);

    assert_eq!((first.calls(), first.drops()), (2, 1));
    assert_eq!((second.calls(), second.drops()), (5, 0));
    drop(second_stable);
    assert_eq!(second.drops(), 1);
}

/// 以步长累加的实现，与计数桩是不同的具体类型。
struct Stride {
    total: Arc<AtomicUsize>,
    step: usize,
}

impl Work for Stride {
    fn do_work(&self) {
        self.total.fetch_add(self.step, Ordering::SeqCst);
    }
}

fn distinct_implementations_share_one_handle_type(factory: WorkFactory) {
    let counters = WorkCounters::new();
    let total = Arc::new(AtomicUsize::new(0));

    let handles: Vec<Box<dyn Work>> = vec![
        factory(Box::new(counters.stub())),
        factory(Box::new(Stride {
            total: Arc::clone(&total),
            step: 10,
        })),
    ];
    for handle in &handles {
        handle.do_work();
    }

    assert_eq!(counters.calls(), 1);
    assert_eq!(total.load(Ordering::SeqCst), 10);
}
