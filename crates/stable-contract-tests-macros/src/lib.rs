//! # stable-contract-tests-macros
//!
//! 提供 `stable_tck` 属性宏：为目标模块注入每个契约套件对应的 `#[test]` 入口，
//! 并把被测工厂路径传给 `stable_contract_tests::run_*_suite`。宏分三步展开：
//! 解析参数、确定套件列表、把测试函数植入模块。

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, Ident, ItemMod, Meta, Path, Result as SynResult, Token, parse_macro_input};

/// 为模块注入契约测试。
///
/// - `factory = path`：被测工厂，签名须为 `fn(Box<dyn Work>) -> Box<dyn Work>`，
///   缺省为 `::stable_core::create_stable_work`；
/// - `suites(a, b)`：仅生成指定套件，缺省生成全部套件。
#[proc_macro_attribute]
pub fn stable_tck(attr: TokenStream, item: TokenStream) -> TokenStream {
    let module = parse_macro_input!(item as ItemMod);

    match TckArgs::parse(attr.into()).and_then(|args| inject_tests(args, module)) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct TckArgs {
    factory: Path,
    suites: Vec<Ident>,
}

impl TckArgs {
    fn parse(attr: proc_macro2::TokenStream) -> SynResult<Self> {
        let mut factory = None;
        let mut suites = None;

        let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(attr)?;
        for meta in metas {
            match meta {
                Meta::NameValue(pair) if pair.path.is_ident("factory") => {
                    if factory.is_some() {
                        return Err(syn::Error::new(pair.span(), "factory 只能设置一次"));
                    }
                    match pair.value {
                        Expr::Path(expr) => factory = Some(expr.path),
                        other => {
                            return Err(syn::Error::new(other.span(), "factory 需为函数路径"));
                        }
                    }
                }
                Meta::List(list) if list.path.is_ident("suites") => {
                    let nested: Punctuated<Ident, Token![,]> =
                        list.parse_args_with(Punctuated::parse_terminated)?;
                    for suite in &nested {
                        if !SUITES.contains(&suite.to_string().as_str()) {
                            return Err(syn::Error::new(
                                suite.span(),
                                format!("未知套件，可选值为 {}", SUITES.join(" / ")),
                            ));
                        }
                    }
                    suites = Some(nested.into_iter().collect::<Vec<_>>());
                }
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "stable_tck 属性仅支持 factory = path 与 suites(...)",
                    ));
                }
            }
        }

        Ok(Self {
            factory: factory.unwrap_or_else(|| syn::parse_quote!(::stable_core::create_stable_work)),
            suites: suites
                .filter(|list: &Vec<Ident>| !list.is_empty())
                .unwrap_or_else(default_suite_idents),
        })
    }
}

const SUITES: [&str; 3] = ["forwarding", "ownership", "isolation"];

fn default_suite_idents() -> Vec<Ident> {
    SUITES
        .iter()
        .map(|name| Ident::new(name, Span::call_site()))
        .collect()
}

/// 为每个套件生成 `#[test]` 函数并追加到内联模块。
///
/// 文件模块（`mod foo;`）的内容在展开时不可见，追加测试会让文件内容丢失，因此直接报错。
fn inject_tests(args: TckArgs, mut module: ItemMod) -> SynResult<proc_macro2::TokenStream> {
    if module.content.is_none() {
        return Err(syn::Error::new(
            module.span(),
            "stable_tck 仅支持内联模块，请写成 `mod name {}`",
        ));
    }

    let TckArgs { factory, suites } = args;
    let generated = suites.iter().map(|suite| -> syn::Item {
        let test_ident = format_ident!("{}_suite", suite);
        let run_fn = format_ident!("run_{}_suite", suite);
        syn::parse_quote! {
            #[test]
            fn #test_ident() {
                ::stable_contract_tests::#run_fn(#factory);
            }
        }
    });
    if let Some((_, items)) = module.content.as_mut() {
        items.extend(generated);
    }
    Ok(quote! { #module })
}
