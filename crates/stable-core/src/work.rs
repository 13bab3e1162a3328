//! `Work` 稳定接口及其 Bridge/Proxy 链条。
//!
//! # 结构概览
//! - [`Work`]：公开的能力契约，无数据成员；
//! - `detail::WorkBridge`：crate 私有，独占持有真实实现，以普通方法转发；
//! - [`WorkProxy`]：独占持有 Bridge，以转发方式实现 [`Work`]；
//! - [`create_stable_work`]：唯一的构造入口，返回值只暴露 `Box<dyn Work>`。
//!
//! # 所有权
//! Proxy → Bridge → 实现，逐层独占、严格线性；释放调用方句柄即按序释放整条链，
//! 实现恰好被析构一次。

use core::fmt;

/// 公开的工作能力契约。
///
/// - 无前置条件，也不约定失败语义：实现自行决定如何报告错误；
/// - 通过 `Box<dyn Work>` 释放任意实现都会执行其自身的析构逻辑。
pub trait Work {
    /// 执行一次工作。
    fn do_work(&self);
}

mod detail {
    use super::Work;

    /// 隐藏 Bridge：独占持有实现，并以非多态方法暴露相同的操作集合。
    ///
    /// 自身布局只包含一个胖指针，实现类型如何变化都不影响它。
    pub(crate) struct WorkBridge {
        implementation: Box<dyn Work>,
    }

    impl WorkBridge {
        pub(crate) fn new(implementation: Box<dyn Work>) -> Self {
            Self { implementation }
        }

        #[inline]
        pub(crate) fn do_work(&self) {
            self.implementation.do_work();
        }
    }
}

/// 以转发方式实现 [`Work`] 的稳定代理。
///
/// 调用方通常只以 `Box<dyn Work>` 持有它；类型本身不提供公开构造函数，
/// 只能经由 [`create_stable_work`] 获得。
pub struct WorkProxy {
    bridge: Box<detail::WorkBridge>,
}

impl WorkProxy {
    fn new(bridge: Box<detail::WorkBridge>) -> Self {
        Self { bridge }
    }
}

impl Work for WorkProxy {
    #[inline]
    fn do_work(&self) {
        self.bridge.do_work();
    }
}

impl fmt::Debug for WorkProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkProxy").finish_non_exhaustive()
    }
}

/// 组装稳定链条：实现 → Bridge → Proxy，并擦除为 `Box<dyn Work>`。
///
/// 组装过程不会失败，也不会调用实现的任何方法。
pub fn create_stable_work(implementation: Box<dyn Work>) -> Box<dyn Work> {
    let bridge = Box::new(detail::WorkBridge::new(implementation));
    tracing::trace!(target: "stable_core::work", "stable work chain assembled");
    Box::new(WorkProxy::new(bridge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tracing_test::traced_test;

    struct Tally {
        calls: Rc<Cell<usize>>,
    }

    impl Work for Tally {
        fn do_work(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn proxy_forwards_to_implementation() {
        let calls = Rc::new(Cell::new(0));
        let stable = create_stable_work(Box::new(Tally {
            calls: Rc::clone(&calls),
        }));

        stable.do_work();
        stable.do_work();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn assembling_does_not_invoke_implementation() {
        let calls = Rc::new(Cell::new(0));
        let _stable = create_stable_work(Box::new(Tally {
            calls: Rc::clone(&calls),
        }));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn proxy_hides_its_layout_in_debug_output() {
        let proxy = WorkProxy::new(Box::new(detail::WorkBridge::new(Box::new(Tally {
            calls: Rc::new(Cell::new(0)),
        }))));
        assert_eq!(format!("{proxy:?}"), "WorkProxy { .. }");
    }

    #[test]
    #[traced_test]
    fn factory_emits_trace_event() {
        let _stable = create_stable_work(Box::new(Tally {
            calls: Rc::new(Cell::new(0)),
        }));
        assert!(logs_contain("stable work chain assembled"));
    }
}
