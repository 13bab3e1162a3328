//! 转发代码渲染：Bridge（隐藏）、Proxy（对外）与工厂函数。
//!
//! 生成形态固定为三层独占所有权：
//! `Box<dyn Trait>`（Proxy）→ `Box<Bridge>` → `Box<dyn Trait>`（真实实现）。
//! Bridge 位于私有模块内，其名字不会出现在任何对外签名中。
//! 两层都只在工厂中以结构体字面量构造，不占用任何固有方法名，
//! 因此 Trait 方法可以自由取名（包括 `new`）。

use proc_macro2::TokenStream;
use quote::quote;

use crate::interface::{ForwardedMethod, Interface};
use crate::options::StableNames;

/// 渲染完整的桥接链条（不含 Trait 本身）。
pub fn expand_chain(interface: &Interface, names: &StableNames) -> TokenStream {
    let Interface { ident, vis, methods } = interface;
    let StableNames {
        bridge,
        proxy,
        factory,
        detail,
    } = names;

    let bridge_methods = methods.iter().map(|method| bridge_method(ident, method));
    let proxy_methods = methods
        .iter()
        .map(|method| proxy_method(detail, bridge, method));

    let proxy_doc = format!(" 以转发方式实现 [`{ident}`] 的稳定代理，仅能经由 [`{factory}`] 构造。");
    let factory_doc = format!(
        " 将实现依次装入隐藏 Bridge 与 [`{proxy}`]，并以 `Box<dyn {ident}>` 形式交还调用方。"
    );

    quote! {
        #[doc(hidden)]
        mod #detail {
            #[allow(unused_imports)]
            use super::*;

            pub(super) struct #bridge {
                pub(super) implementation: ::std::boxed::Box<dyn #ident>,
            }

            impl #bridge {
                #(#bridge_methods)*
            }
        }

        #[doc = #proxy_doc]
        #vis struct #proxy {
            bridge: ::std::boxed::Box<#detail::#bridge>,
        }

        impl #ident for #proxy {
            #(#proxy_methods)*
        }

        #[doc = #factory_doc]
        #vis fn #factory(implementation: ::std::boxed::Box<dyn #ident>) -> ::std::boxed::Box<dyn #ident> {
            let bridge = ::std::boxed::Box::new(#detail::#bridge { implementation });
            ::std::boxed::Box::new(#proxy { bridge })
        }
    }
}

// 通过完全限定语法调用，避免 `Box` 自身实现的同名方法（如 `as_ref`）抢先匹配。
fn bridge_method(interface: &syn::Ident, method: &ForwardedMethod) -> TokenStream {
    let ForwardedMethod {
        attrs,
        sig,
        args,
        mutable,
    } = method;
    let name = &sig.ident;
    let receiver = if *mutable {
        quote!(&mut *self.implementation)
    } else {
        quote!(&*self.implementation)
    };
    let call = quote! { <dyn #interface as #interface>::#name(#receiver #(, #args)*) };
    let body = guard_unsafe(sig, call);
    quote! {
        #(#attrs)*
        #[inline]
        pub(super) #sig {
            #body
        }
    }
}

fn proxy_method(
    detail: &syn::Ident,
    bridge: &syn::Ident,
    method: &ForwardedMethod,
) -> TokenStream {
    let ForwardedMethod {
        attrs,
        sig,
        args,
        mutable,
    } = method;
    let name = &sig.ident;
    let receiver = if *mutable {
        quote!(&mut *self.bridge)
    } else {
        quote!(&*self.bridge)
    };
    let call = quote! { #detail::#bridge::#name(#receiver #(, #args)*) };
    let body = guard_unsafe(sig, call);
    quote! {
        #(#attrs)*
        #[inline]
        #sig {
            #body
        }
    }
}

fn guard_unsafe(sig: &syn::Signature, call: TokenStream) -> TokenStream {
    if sig.unsafety.is_some() {
        quote! { unsafe { #call } }
    } else {
        call
    }
}
