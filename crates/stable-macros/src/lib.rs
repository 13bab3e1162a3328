//! 稳定接口过程宏入口。
//!
//! # 集成方式（How）
//! - 业务 crate 通过 `stable_core::stable_interface` 使用本宏，无需直接依赖本 crate；
//! - 展开逻辑全部位于 `stable-codegen`，本 crate 只负责把编译器的 `TokenStream` 交给生成器并转换结果。

use proc_macro::TokenStream;

/// 为对象安全 Trait 生成“隐藏 Bridge + 转发 Proxy + 工厂函数”三件套。
///
/// # 语义说明（What）
/// - **输入**：无泛型、无关联项的 Trait，所有方法以 `&self` 或 `&mut self` 为接收者；
/// - **输出**：原 Trait、私有模块 `{trait}_detail` 中的 `{Trait}Bridge`、
///   与 Trait 同可见性的 `{Trait}Proxy` 及 `create_stable_{trait}` 工厂；
/// - **可选参数**：`bridge` / `proxy` / `factory` / `detail` 覆盖默认命名，
///   例如 `#[stable_interface(factory = make_stable)]`。
///
/// ```ignore
/// use stable_core::stable_interface;
///
/// #[stable_interface]
/// pub trait Greeter {
///     fn greet(&self, name: &str) -> String;
/// }
///
/// let greeter: Box<dyn Greeter> = create_stable_greeter(Box::new(English));
/// ```
#[proc_macro_attribute]
pub fn stable_interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    stable_codegen::expand_stable_interface(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
