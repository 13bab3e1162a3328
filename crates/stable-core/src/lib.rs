#![deny(unsafe_code)]
#![doc = "stable-core: 以 Bridge/Proxy 间接层维持接口边界稳定的核心契约。"]
#![doc = ""]
#![doc = "== 边界约定 =="]
#![doc = "调用方只持有 `Box<dyn Trait>`：工厂将实现装入隐藏 Bridge，再由 Proxy 以转发方式实现公开 Trait。"]
#![doc = "实现类型的替换或重新编译不会改变调用方所见的类型与布局；Bridge 类型从不出现在公开签名中。"]
#![doc = ""]
#![doc = "== 生成器 =="]
#![doc = "[`Work`] 链条为手写的参考形态；任意对象安全 Trait 可通过 [`stable_interface`] 属性宏生成同构链条。"]

/// 为对象安全 Trait 生成隐藏 Bridge、转发 Proxy 与工厂函数。
///
/// 在调用方 crate 中执行 `use stable_core::stable_interface;` 后直接标注 Trait 即可，
/// 生成代码仅依赖 `std`。
pub use stable_macros::stable_interface;

pub mod work;

#[cfg(feature = "test-util")]
pub mod test_stubs;

pub use work::{Work, WorkProxy, create_stable_work};
