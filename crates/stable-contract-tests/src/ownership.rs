use crate::WorkFactory;
use crate::case::{TckCase, TckSuite};
use stable_core::test_stubs::WorkCounters;

const CASES: &[TckCase] = &[
    TckCase {
        name: "assembly_neither_calls_nor_drops",
        test: assembly_neither_calls_nor_drops,
    },
    TckCase {
        name: "release_drops_implementation_exactly_once",
        test: release_drops_implementation_exactly_once,
    },
    TckCase {
        name: "moving_handle_keeps_single_owner",
        test: moving_handle_keeps_single_owner,
    },
];

const SUITE: TckSuite = TckSuite {
    name: "ownership",
    cases: CASES,
};

/// 返回“所有权链条”主题的测试套件。
pub const fn suite() -> &'static TckSuite {
    &SUITE
}

fn assembly_neither_calls_nor_drops(factory: WorkFactory) {
    let counters = WorkCounters::new();
    let stable = factory(Box::new(counters.stub()));
    assert_eq!(counters.calls(), 0);
    assert_eq!(counters.drops(), 0);
    drop(stable);
}

fn release_drops_implementation_exactly_once(factory: WorkFactory) {
    let counters = WorkCounters::new();
    {
        let stable = factory(Box::new(counters.stub()));
        stable.do_work();
    }
    assert_eq!(counters.drops(), 1);
}

// 句柄在容器之间移动不会复制或提前释放链条。
fn moving_handle_keeps_single_owner(factory: WorkFactory) {
    let counters = WorkCounters::new();
    let stable = factory(Box::new(counters.stub()));

    let mut holders = Vec::new();
    holders.push(stable);
    let stable = holders.pop().expect("handle was pushed");
    assert_eq!(counters.drops(), 0);

    stable.do_work();
    drop(holders);
    assert_eq!(counters.drops(), 0);

    drop(stable);
    assert_eq!(counters.drops(), 1);
    assert_eq!(counters.calls(), 1);
}
