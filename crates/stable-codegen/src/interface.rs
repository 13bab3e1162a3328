//! 接口解析：把一个 `ItemTrait` 校验并归一化为可转发的方法清单。
//!
//! # 契约说明（What）
//! - **输入**：任意 Trait 定义；
//! - **输出**：[`Interface`]，其中每个 [`ForwardedMethod`] 都已去掉默认实现体，参数模式统一改写为标识符；
//! - **失败**：所有不满足对象安全或无法忠实转发的条目会被合并成一个 [`syn::Error`]，
//!   以便一次编译即可看到全部问题。

use std::collections::HashSet;

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{
    Attribute, Error, FnArg, GenericParam, Ident, ItemTrait, Pat, PatIdent, Signature, TraitItem,
    TraitItemFn, Type, TypeParamBound, Visibility, WherePredicate,
};

/// 经过校验的稳定接口。
#[derive(Debug, Clone)]
pub struct Interface {
    pub ident: Ident,
    pub vis: Visibility,
    pub methods: Vec<ForwardedMethod>,
}

/// 单个需要在 Bridge 与 Proxy 上转发的方法。
#[derive(Debug, Clone)]
pub struct ForwardedMethod {
    /// 仅保留 `#[cfg]`，其余属性（文档等）留在原 Trait 上。
    pub attrs: Vec<Attribute>,
    /// 归一化后的签名：参数模式均为纯标识符。
    pub sig: Signature,
    /// 按顺序转发的参数名。
    pub args: Vec<Ident>,
    /// 接收者是否为 `&mut self`。
    pub mutable: bool,
}

impl Interface {
    /// 校验并解析 Trait。
    pub fn parse(item: &ItemTrait) -> syn::Result<Self> {
        let mut errors = Errors::default();

        if item.unsafety.is_some() {
            errors.push(item.unsafety.span(), "unsafe trait 的实现契约无法由转发代理自动满足");
        }
        if item.auto_token.is_some() {
            errors.push(item.auto_token.span(), "auto trait 不包含可转发的方法");
        }
        if !item.generics.params.is_empty() {
            errors.push(item.generics.span(), "稳定接口暂不支持带泛型或生命周期参数的 Trait");
        }
        if let Some(where_clause) = &item.generics.where_clause {
            errors.push(where_clause.span(), "稳定接口暂不支持 Trait 级 where 子句");
        }
        for bound in &item.supertraits {
            check_supertrait(bound, &mut errors);
        }

        let mut methods = Vec::new();
        for trait_item in &item.items {
            match trait_item {
                TraitItem::Fn(method) => {
                    if let Some(forwarded) = parse_method(method, &mut errors) {
                        methods.push(forwarded);
                    }
                }
                TraitItem::Type(assoc) => {
                    errors.push(assoc.span(), "关联类型会让 `dyn Trait` 暴露实现细节，稳定接口不支持")
                }
                TraitItem::Const(assoc) => {
                    errors.push(assoc.span(), "关联常量无法通过 `dyn Trait` 访问，稳定接口不支持")
                }
                other => errors.push(other.span(), "稳定接口仅支持方法条目"),
            }
        }

        if methods.is_empty() && errors.is_empty() {
            errors.push(item.ident.span(), "稳定接口至少需要一个可转发的方法");
        }

        errors.finish()?;
        Ok(Self {
            ident: item.ident.clone(),
            vis: item.vis.clone(),
            methods,
        })
    }
}

fn check_supertrait(bound: &TypeParamBound, errors: &mut Errors) {
    match bound {
        TypeParamBound::Lifetime(_) => {}
        TypeParamBound::Trait(trait_bound) => {
            let marker = trait_bound.lifetimes.is_none()
                && trait_bound
                    .path
                    .segments
                    .last()
                    .is_some_and(|segment| {
                        segment.arguments.is_none()
                            && (segment.ident == "Send" || segment.ident == "Sync")
                    });
            if !marker {
                errors.push(
                    trait_bound.span(),
                    "父 Trait 仅允许 Send / Sync 与生命周期，其他父 Trait 无法由 Proxy 转发",
                );
            }
        }
        other => errors.push(other.span(), "不支持的父 Trait 约束"),
    }
}

fn parse_method(method: &TraitItemFn, errors: &mut Errors) -> Option<ForwardedMethod> {
    let sig = &method.sig;

    if requires_sized_self(sig) {
        if method.default.is_none() {
            errors.push(
                sig.ident.span(),
                "`where Self: Sized` 方法无法经由 `dyn Trait` 调用，需提供默认实现",
            );
        }
        return None;
    }

    let before = errors.len();
    if let Some(token) = &sig.constness {
        errors.push(token.span(), "const fn 无法转发");
    }
    if let Some(token) = &sig.asyncness {
        errors.push(token.span(), "async fn 不满足对象安全，无法生成稳定转发");
    }
    if let Some(variadic) = &sig.variadic {
        errors.push(variadic.span(), "可变参数方法无法转发");
    }
    for param in &sig.generics.params {
        if !matches!(param, GenericParam::Lifetime(_)) {
            errors.push(param.span(), "方法仅允许生命周期泛型，类型或常量泛型不满足对象安全");
        }
    }

    let mut normalized = sig.clone();
    let mut args = Vec::new();
    let mut mutable = false;
    let mut taken: HashSet<String> = sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(typed) => plain_ident(&typed.pat).map(Ident::to_string),
            FnArg::Receiver(_) => None,
        })
        .collect();
    for (index, input) in normalized.inputs.iter_mut().enumerate() {
        match input {
            FnArg::Receiver(receiver) if index == 0 => {
                if receiver.reference.is_none() || receiver.colon_token.is_some() {
                    errors.push(receiver.span(), "接收者必须是 `&self` 或 `&mut self`");
                }
                mutable = receiver.mutability.is_some();
            }
            FnArg::Receiver(receiver) => errors.push(receiver.span(), "接收者必须位于首位"),
            FnArg::Typed(typed) => {
                if index == 0 {
                    errors.push(typed.span(), "关联函数无法经由 `dyn Trait` 调用，需以 `&self` 为接收者");
                }
                if matches!(typed.ty.as_ref(), Type::ImplTrait(_)) {
                    errors.push(typed.ty.span(), "`impl Trait` 参数等价于泛型，不满足对象安全");
                }
                let name = match plain_ident(&typed.pat) {
                    Some(ident) => ident.clone(),
                    None => fresh_name(index.saturating_sub(1), typed.pat.span(), &mut taken),
                };
                *typed.pat = Pat::Ident(PatIdent {
                    attrs: Vec::new(),
                    by_ref: None,
                    mutability: None,
                    ident: name.clone(),
                    subpat: None,
                });
                args.push(name);
            }
        }
    }
    if normalized.inputs.is_empty() {
        errors.push(sig.ident.span(), "关联函数无法经由 `dyn Trait` 调用，需以 `&self` 为接收者");
    }

    if errors.len() != before {
        return None;
    }

    Some(ForwardedMethod {
        attrs: method
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .cloned()
            .collect(),
        sig: normalized,
        args,
        mutable,
    })
}

fn plain_ident(pat: &Pat) -> Option<&Ident> {
    match pat {
        Pat::Ident(PatIdent {
            by_ref: None,
            subpat: None,
            ident,
            ..
        }) => Some(ident),
        _ => None,
    }
}

/// 为无法按名转发的参数挑选 `arg{position}`，与已有参数名冲突时追加序号。
fn fresh_name(position: usize, span: Span, taken: &mut HashSet<String>) -> Ident {
    let base = format!("arg{position}");
    let mut candidate = base.clone();
    let mut suffix = 0usize;
    while taken.contains(&candidate) {
        suffix += 1;
        candidate = format!("{base}_{suffix}");
    }
    let ident = Ident::new(&candidate, span);
    taken.insert(candidate);
    ident
}

fn requires_sized_self(sig: &Signature) -> bool {
    let Some(where_clause) = &sig.generics.where_clause else {
        return false;
    };
    where_clause.predicates.iter().any(|predicate| {
        let WherePredicate::Type(predicate) = predicate else {
            return false;
        };
        let is_self = matches!(&predicate.bounded_ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self"));
        is_self
            && predicate.bounds.iter().any(|bound| {
                matches!(bound, TypeParamBound::Trait(t) if t.path.segments.last().is_some_and(|s| s.ident == "Sized"))
            })
    })
}

/// 收集多处诊断并在最后一次性返回。
#[derive(Default)]
struct Errors {
    inner: Option<Error>,
    count: usize,
}

impl Errors {
    fn push(&mut self, span: Span, message: &str) {
        let error = Error::new(span, message);
        match &mut self.inner {
            Some(existing) => existing.combine(error),
            None => self.inner = Some(error),
        }
        self.count += 1;
    }

    fn len(&self) -> usize {
        self.count
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn finish(self) -> syn::Result<()> {
        match self.inner {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn messages(error: Error) -> Vec<String> {
        error.into_iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn parses_const_and_mutable_methods() {
        let item: ItemTrait = parse_quote! {
            pub trait Ledger: Send + Sync {
                fn balance(&self) -> u64;
                fn deposit(&mut self, mut amount: u64, (_, memo): (u8, &str)) -> Result<(), String>;
            }
        };
        let interface = Interface::parse(&item).expect("valid interface");
        assert_eq!(interface.ident, "Ledger");
        assert_eq!(interface.methods.len(), 2);

        let balance = &interface.methods[0];
        assert!(!balance.mutable);
        assert!(balance.args.is_empty());

        let deposit = &interface.methods[1];
        assert!(deposit.mutable);
        // 元组模式无法按名转发，改写为按位置命名。
        assert_eq!(deposit.args, ["amount", "arg1"]);
    }

    #[test]
    fn positional_names_avoid_existing_parameters() {
        let item: ItemTrait = parse_quote! {
            trait Mixer {
                fn mix(&self, arg1: u8, (a, b): (u8, u8), _: u8, arg3: u8);
            }
        };
        let interface = Interface::parse(&item).expect("valid interface");
        let args = &interface.methods[0].args;
        assert_eq!(args, &["arg1", "arg1_1", "arg2", "arg3"]);

        let unique: HashSet<String> = args.iter().map(Ident::to_string).collect();
        assert_eq!(unique.len(), args.len());
    }

    #[test]
    fn keeps_only_cfg_attributes() {
        let item: ItemTrait = parse_quote! {
            trait Probe {
                /// 文档不会复制到转发方法上。
                #[cfg(feature = "probe")]
                #[must_use]
                fn ping(&self) -> bool;
            }
        };
        let interface = Interface::parse(&item).expect("valid interface");
        let attrs = &interface.methods[0].attrs;
        assert_eq!(attrs.len(), 1);
        assert!(attrs[0].path().is_ident("cfg"));
    }

    #[test]
    fn skips_sized_methods_with_default_body() {
        let item: ItemTrait = parse_quote! {
            trait Work {
                fn do_work(&self);
                fn boxed(self) -> Box<dyn Work> where Self: Sized + 'static { Box::new(self) }
            }
        };
        let interface = Interface::parse(&item).expect("valid interface");
        assert_eq!(interface.methods.len(), 1);
        assert_eq!(interface.methods[0].sig.ident, "do_work");
    }

    #[test]
    fn rejects_non_object_safe_methods_all_at_once() {
        let item: ItemTrait = parse_quote! {
            trait Broken {
                fn create() -> Self;
                fn consume(self);
                fn generic<T>(&self, value: T);
                async fn later(&self);
                fn shown(&self, value: impl core::fmt::Display);
                fn required(&self) where Self: Sized;
            }
        };
        let found = messages(Interface::parse(&item).unwrap_err());
        assert_eq!(found.len(), 6, "{found:?}");
        assert!(found.iter().any(|m| m.contains("关联函数")));
        assert!(found.iter().any(|m| m.contains("接收者必须是")));
        assert!(found.iter().any(|m| m.contains("生命周期泛型")));
        assert!(found.iter().any(|m| m.contains("async fn")));
        assert!(found.iter().any(|m| m.contains("impl Trait")));
        assert!(found.iter().any(|m| m.contains("Self: Sized")));
    }

    #[test]
    fn rejects_trait_level_shapes() {
        let item: ItemTrait = parse_quote! {
            unsafe trait Codec<T>: Clone {
                type Output;
                const VERSION: u32;
                fn encode(&self, value: T) -> Self::Output;
            }
        };
        let found = messages(Interface::parse(&item).unwrap_err());
        assert!(found.iter().any(|m| m.contains("unsafe trait")));
        assert!(found.iter().any(|m| m.contains("泛型或生命周期")));
        assert!(found.iter().any(|m| m.contains("父 Trait")));
        assert!(found.iter().any(|m| m.contains("关联类型")));
        assert!(found.iter().any(|m| m.contains("关联常量")));
    }

    #[test]
    fn rejects_empty_interface() {
        let item: ItemTrait = parse_quote! { trait Marker {} };
        let found = messages(Interface::parse(&item).unwrap_err());
        assert_eq!(found, ["稳定接口至少需要一个可转发的方法"]);
    }

    #[test]
    fn accepts_lifetime_generics_on_methods() {
        let item: ItemTrait = parse_quote! {
            trait Lookup {
                fn find<'a>(&'a self, key: &str) -> Option<&'a str>;
            }
        };
        let interface = Interface::parse(&item).expect("lifetimes are object safe");
        assert_eq!(interface.methods[0].args, ["key"]);
    }
}
