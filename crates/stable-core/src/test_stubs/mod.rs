//! `Work` 契约的计数型测试桩。
//!
//! # 使用方式（How）
//! - 通过 [`WorkCounters::stub`] 生成任意数量的 [`CountingWork`]，它们共享同一组计数器；
//! - 每次 `do_work` 累加 `calls`，每次析构累加 `drops`，借此断言转发透明性与所有权链条；
//! - 不同的 [`WorkCounters`] 彼此独立，可用于验证两条链条之间没有隐藏别名。
//!
//! 仅在 `test-util` 特性开启时编译，生产代码不应依赖。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Work;

/// 共享计数器句柄，克隆后指向同一组计数。
#[derive(Debug, Default, Clone)]
pub struct WorkCounters {
    calls: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
}

impl WorkCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// 构造一个向本计数器汇报的实现。
    pub fn stub(&self) -> CountingWork {
        CountingWork {
            counters: self.clone(),
        }
    }

    /// 已记录的 `do_work` 调用次数。
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 已析构的桩实例数量。
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

/// 计数型 `Work` 实现。
#[derive(Debug)]
pub struct CountingWork {
    counters: WorkCounters,
}

impl Work for CountingWork {
    fn do_work(&self) {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for CountingWork {
    fn drop(&mut self) {
        self.counters.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// 每次 `do_work` 都以固定信息 panic 的实现，用于验证错误原样穿透转发层。
#[derive(Debug, Default)]
pub struct PanickingWork;

impl PanickingWork {
    /// panic 负载中的固定信息。
    pub const MESSAGE: &'static str = "work implementation failed";
}

impl Work for PanickingWork {
    fn do_work(&self) {
        panic!("{}", Self::MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_shared_between_clones_only() {
        let counters = WorkCounters::new();
        let other = WorkCounters::new();

        {
            let stub = counters.stub();
            stub.do_work();
            counters.clone().stub().do_work();
        }

        assert_eq!(counters.calls(), 2);
        assert_eq!(counters.drops(), 2);
        assert_eq!(other.calls(), 0);
        assert_eq!(other.drops(), 0);
    }
}
