//! 稳定接口桥接代码生成核心。
//!
//! # 设计意图（Why）
//! - 对象安全 Trait 一旦作为边界暴露，调用方持有的只应是 `Box<dyn Trait>`；
//!   实现类型及其内存布局的变化都被隐藏 Bridge 吸收，调用方无需重新编译；
//! - Bridge/Proxy/工厂属于纯样板，交由生成器展开可保证每个方法都被逐一转发。
//!
//! # 集成方式（How）
//! - `stable-macros` 的 `#[stable_interface]` 调用 [`expand_stable_interface`] 在编译期展开；
//! - `stable-bridgegen` 命令行工具复用 [`Interface`]、[`StableNames`] 与 [`expand_chain`]
//!   将同样的链条写入独立源文件。
//!
//! 生成代码只依赖 `std`，不会向使用方引入日志或其他运行时依赖。

mod forward;
mod interface;
mod options;

pub use forward::expand_chain;
pub use interface::{ForwardedMethod, Interface};
pub use options::{StableNames, StableOptions};

use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemTrait;

/// 属性宏入口：原样保留 Trait，并在其后追加 Bridge/Proxy/工厂。
///
/// 参数错误直接返回；Trait 校验失败时仍回显原 Trait，避免使用方在诊断之外
/// 再收到大量“找不到 Trait”的连带错误。
pub fn expand_stable_interface(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let options = StableOptions::parse(attr)?;
    let item: ItemTrait = syn::parse2(item)?;
    match Interface::parse(&item) {
        Ok(interface) => {
            let names = StableNames::resolve(&interface.ident, &options);
            let chain = expand_chain(&interface, &names);
            Ok(quote! {
                #item
                #chain
            })
        }
        Err(error) => {
            let diagnostics = error.to_compile_error();
            Ok(quote! {
                #item
                #diagnostics
            })
        }
    }
}
