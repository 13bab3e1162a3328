//! 稳定接口契约测试套件（TCK）入口。
//!
//! # 综述（Why / How / What）
//! - **为什么存在**：任何“实现 → Bridge → Proxy”工厂都必须对调用方完全透明；
//!   本 crate 把这一要求固化为可复用的用例集合，第三方工厂按统一准绳自测。
//! - **如何集成**：在 `tests` 目录下使用 `#[stable_tck(factory = path::to::factory)]`，
//!   或直接调用 `run_*_suite(factory)`；工厂签名须为 [`WorkFactory`]。
//! - **覆盖主题**：`forwarding`（转发透明与错误穿透）、`ownership`（析构恰好一次）、
//!   `isolation`（链条之间无隐藏别名）。
//!
//! 用例使用 `stable_core::test_stubs` 中的计数桩，因此依赖 `stable-core` 的 `test-util` 特性。

mod forwarding;
mod isolation;
mod ownership;
mod support;

use case::{TckSuite, run_suite};
use stable_core::Work;
pub use stable_contract_tests_macros::stable_tck;

/// 被测工厂的统一签名：接收实现所有权，返回擦除后的稳定句柄。
pub type WorkFactory = fn(Box<dyn Work>) -> Box<dyn Work>;

const ALL_SUITES: [&TckSuite; 3] = [
    forwarding::suite(),
    ownership::suite(),
    isolation::suite(),
];

mod case {
    use super::{WorkFactory, support};
    use std::panic;

    /// 单个 TCK 用例：名称与接收被测工厂的断言函数。
    ///
    /// `test` 必须在失败时 panic，名称会出现在失败信息中。
    #[derive(Clone, Copy)]
    pub struct TckCase {
        pub name: &'static str,
        pub test: fn(WorkFactory),
    }

    /// 同一主题的一组用例，`cases` 不允许为空。
    #[derive(Clone, Copy)]
    pub struct TckSuite {
        pub name: &'static str,
        pub cases: &'static [TckCase],
    }

    /// 依次执行套件中的用例；任一用例失败时附加“套件/用例”上下文后重新 panic。
    pub fn run_suite(suite: &TckSuite, factory: WorkFactory) {
        assert!(!suite.cases.is_empty(), "TCK 套件不应为空");
        for case in suite.cases {
            tracing::debug!(suite = suite.name, case = case.name, "running stable tck case");
            let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| (case.test)(factory)));
            if let Err(payload) = outcome {
                support::panic_with_context(suite.name, case.name, payload);
            }
        }
    }
}

/// 返回所有已注册的套件，顺序与宏默认展开顺序一致。
pub fn all_suites() -> &'static [&'static TckSuite] {
    &ALL_SUITES
}

/// 对同一工厂运行全部套件。
pub fn run_all_suites(factory: WorkFactory) {
    for suite in all_suites() {
        run_suite(suite, factory);
    }
}

/// 运行“转发透明”主题：调用次数一致、实现的 panic 原样穿透。
pub fn run_forwarding_suite(factory: WorkFactory) {
    run_suite(forwarding::suite(), factory);
}

/// 运行“所有权链条”主题：组装不触发调用或析构，释放句柄恰好析构实现一次。
pub fn run_ownership_suite(factory: WorkFactory) {
    run_suite(ownership::suite(), factory);
}

/// 运行“隔离”主题：独立链条互不影响，不同实现类型可共存于同一容器。
pub fn run_isolation_suite(factory: WorkFactory) {
    run_suite(isolation::suite(), factory);
}
