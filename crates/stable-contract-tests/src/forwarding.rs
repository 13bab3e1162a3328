use crate::WorkFactory;
use crate::case::{TckCase, TckSuite};
use crate::support::payload_text;
use stable_core::Work;
use stable_core::test_stubs::{PanickingWork, WorkCounters};
use std::panic;

const CASES: &[TckCase] = &[
    TckCase {
        name: "three_calls_reach_implementation",
        test: three_calls_reach_implementation,
    },
    TckCase {
        name: "call_counts_match_direct_invocation",
        test: call_counts_match_direct_invocation,
    },
    TckCase {
        name: "implementation_panic_passes_through",
        test: implementation_panic_passes_through,
    },
];

const SUITE: TckSuite = TckSuite {
    name: "forwarding",
    cases: CASES,
};

/// 返回“转发透明”主题的测试套件。
pub const fn suite() -> &'static TckSuite {
    &SUITE
}

/// 三次调用全部抵达实现，且释放句柄后实现恰好析构一次。
fn three_calls_reach_implementation(factory: WorkFactory) {
    let counters = WorkCounters::new();
    let stable = factory(Box::new(counters.stub()));

    for _ in 0..3 {
        stable.do_work();
    }
    assert_eq!(counters.calls(), 3);
    assert_eq!(counters.drops(), 0, "句柄存活期间实现不应被析构");

    drop(stable);
    assert_eq!(counters.drops(), 1);
}

/// 经由工厂调用与直接调用实现产生完全相同的可观测效果。
fn call_counts_match_direct_invocation(factory: WorkFactory) {
    for rounds in [0usize, 1, 7] {
        let direct = WorkCounters::new();
        let forwarded = WorkCounters::new();

        let implementation: Box<dyn Work> = Box::new(direct.stub());
        let stable = factory(Box::new(forwarded.stub()));
        for _ in 0..rounds {
            implementation.do_work();
            stable.do_work();
        }

        assert_eq!(direct.calls(), forwarded.calls(), "rounds = {rounds}");
    }
}

/// 实现内部的 panic 不被吞掉或改写。
fn implementation_panic_passes_through(factory: WorkFactory) {
    let stable = factory(Box::new(PanickingWork));
    let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| stable.do_work()));
    let payload = outcome.expect_err("panic 应穿透转发层");
    assert_eq!(payload_text(&*payload), PanickingWork::MESSAGE);
}
