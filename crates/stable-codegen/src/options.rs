//! 生成参数与命名解析。
//!
//! `#[stable_interface(...)]` 的属性参数与 `stable-bridgegen` 的命令行覆盖项共用
//! [`StableOptions`]；最终名称由 [`StableNames::resolve`] 统一推导，保证宏与命令行
//! 生成的代码在相同输入下完全一致。

use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::format_ident;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Error, Expr, ExprLit, ExprPath, Ident, Lit, Meta, Token};

/// 生成阶段可覆盖的命名选项，未设置的字段按约定从 Trait 名推导。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StableOptions {
    /// 隐藏 Bridge 结构体名，默认 `{Trait}Bridge`。
    pub bridge: Option<Ident>,
    /// 对外 Proxy 结构体名，默认 `{Trait}Proxy`。
    pub proxy: Option<Ident>,
    /// 工厂函数名，默认 `create_stable_{trait}`。
    pub factory: Option<Ident>,
    /// 承载 Bridge 的隐藏模块名，默认 `{trait}_detail`。
    pub detail: Option<Ident>,
}

impl StableOptions {
    /// 解析属性参数，形如 `bridge = WorkBridge, factory = "make_work"`。
    ///
    /// - 空参数返回全默认配置；
    /// - 取值既可以是裸标识符，也可以是字符串字面量；
    /// - 未知键、重复键或非 `key = value` 形式均返回带 Span 的 [`syn::Error`]。
    pub fn parse(attr: TokenStream) -> syn::Result<Self> {
        let mut options = Self::default();
        if attr.is_empty() {
            return Ok(options);
        }

        let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(attr)?;
        for meta in metas {
            let pair = match meta {
                Meta::NameValue(pair) => pair,
                other => {
                    return Err(Error::new(
                        other.span(),
                        "stable_interface 仅接受 `key = value` 形式的参数",
                    ));
                }
            };
            let key = pair
                .path
                .get_ident()
                .ok_or_else(|| Error::new(pair.path.span(), "参数名需为标识符"))?;
            let slot = match key.to_string().as_str() {
                "bridge" => &mut options.bridge,
                "proxy" => &mut options.proxy,
                "factory" => &mut options.factory,
                "detail" => &mut options.detail,
                _ => {
                    return Err(Error::new(
                        key.span(),
                        "未知参数，可选值为 bridge / proxy / factory / detail",
                    ));
                }
            };
            if slot.is_some() {
                return Err(Error::new(key.span(), format!("参数 `{key}` 重复设置")));
            }
            *slot = Some(expr_to_ident(&pair.value)?);
        }
        Ok(options)
    }
}

fn expr_to_ident(expr: &Expr) -> syn::Result<Ident> {
    match expr {
        Expr::Path(ExprPath {
            attrs, qself: None, path,
        }) if attrs.is_empty() => path
            .get_ident()
            .cloned()
            .ok_or_else(|| Error::new(path.span(), "期望单个标识符")),
        Expr::Lit(ExprLit {
            lit: Lit::Str(text),
            ..
        }) => text.parse::<Ident>(),
        other => Err(Error::new(other.span(), "期望标识符或字符串字面量")),
    }
}

/// 一次生成所用的全部名称。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableNames {
    pub bridge: Ident,
    pub proxy: Ident,
    pub factory: Ident,
    pub detail: Ident,
}

impl StableNames {
    /// 以 Trait 名为基准推导名称，显式覆盖项优先。
    pub fn resolve(interface: &Ident, options: &StableOptions) -> Self {
        let snake = interface.to_string().to_snake_case();
        Self {
            bridge: options
                .bridge
                .clone()
                .unwrap_or_else(|| format_ident!("{}Bridge", interface)),
            proxy: options
                .proxy
                .clone()
                .unwrap_or_else(|| format_ident!("{}Proxy", interface)),
            factory: options
                .factory
                .clone()
                .unwrap_or_else(|| format_ident!("create_stable_{}", snake)),
            detail: options
                .detail
                .clone()
                .unwrap_or_else(|| format_ident!("{}_detail", snake)),
        }
    }
}
