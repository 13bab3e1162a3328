//! 源文件层面的接口定位与渲染。

use std::path::{Path, PathBuf};

use heck::ToSnakeCase;
use quote::quote;
use stable_codegen::{Interface, StableNames, StableOptions, expand_chain};
use syn::{File, Ident, Item, ItemTrait};

use crate::BridgegenError;
use crate::layout::format_tokens;

/// 定位到的接口及其所在的内联模块路径（自文件根起）。
#[derive(Debug, Clone)]
pub struct LocatedInterface<'a> {
    pub item: &'a ItemTrait,
    pub scope: Vec<&'a Ident>,
}

/// 在语法树中查找接口：优先匹配 `name`，否则取第一个 trait；内联模块按出现顺序递归搜索。
pub fn find_interface<'a>(file: &'a File, name: Option<&str>) -> Option<LocatedInterface<'a>> {
    let mut scope = Vec::new();
    find_in_items(&file.items, name, &mut scope).map(|item| LocatedInterface { item, scope })
}

fn find_in_items<'a>(
    items: &'a [Item],
    name: Option<&str>,
    scope: &mut Vec<&'a Ident>,
) -> Option<&'a ItemTrait> {
    for item in items {
        match item {
            Item::Trait(item_trait) if name.is_none_or(|wanted| item_trait.ident == wanted) => {
                return Some(item_trait);
            }
            Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    scope.push(&module.ident);
                    if let Some(found) = find_in_items(nested, name, scope) {
                        return Some(found);
                    }
                    scope.pop();
                }
            }
            _ => {}
        }
    }
    None
}

/// 渲染独立的生成文件内容。
///
/// 生成文件预期作为源文件对应模块的子模块引入：接口位于文件根时以 `use super::*;`
/// 取得接口及其签名中的类型，位于内联模块时改为 `use super::<模块路径>::*;`。
/// `trait_path` 用于接口不在上述作用域时显式导入。
pub fn render(
    located: &LocatedInterface<'_>,
    options: &StableOptions,
    trait_path: Option<&syn::Path>,
    source_name: &str,
) -> Result<String, BridgegenError> {
    let item = located.item;
    let interface = Interface::parse(item).map_err(|source| BridgegenError::Interface {
        name: item.ident.to_string(),
        source,
    })?;
    let names = StableNames::resolve(&interface.ident, options);

    let scope = &located.scope;
    let import = trait_path.map(|path| quote!(use #path;));
    let chain = expand_chain(&interface, &names);
    let body = quote! {
        #[allow(unused_imports)]
        use super #(:: #scope)* ::*;
        #import
        #chain
    };
    syn::parse2::<File>(body.clone()).map_err(|source| BridgegenError::Interface {
        name: item.ident.to_string(),
        source,
    })?;

    let mut out = format!(
        "// @generated 由 stable-bridgegen 根据 `{source_name}` 生成，请勿手工编辑。\n\
         // 接口 {}：Bridge `{}::{}`，Proxy `{}`，工厂 `{}`。\n\n",
        interface.ident, names.detail, names.bridge, names.proxy, names.factory
    );
    out.push_str(&format_tokens(body));
    Ok(out)
}

/// 生成文件的默认位置：`<输入目录>/stable/<trait 蛇形名>.rs`，`out_dir` 可覆盖目录。
pub fn output_path(input: &Path, out_dir: Option<&Path>, interface: &ItemTrait) -> PathBuf {
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("stable"),
    };
    dir.join(format!("{}.rs", interface.ident.to_string().to_snake_case()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn finds_first_trait_or_named_trait_in_nested_modules() {
        let file: File = parse_quote! {
            struct Noise;
            mod outer {
                mod inner {
                    pub trait Hidden { fn run(&self); }
                }
            }
            pub trait IWork { fn do_work(&self); }
        };
        let first = find_interface(&file, None).expect("first trait");
        assert_eq!(first.item.ident, "Hidden");
        assert_eq!(first.scope, ["outer", "inner"]);

        let named = find_interface(&file, Some("IWork")).expect("named trait");
        assert_eq!(named.item.ident, "IWork");
        assert!(named.scope.is_empty());
        assert!(find_interface(&file, Some("Missing")).is_none());
    }

    #[test]
    fn renders_header_imports_and_chain() {
        let file: File = parse_quote! { pub trait IWork { fn do_work(&self); } };
        let located = find_interface(&file, None).expect("trait");
        let path: syn::Path = parse_quote!(crate::api::IWork);
        let text = render(&located, &StableOptions::default(), Some(&path), "src/iwork.rs")
            .expect("render succeeds");

        let mut lines = text.lines();
        assert!(lines.next().is_some_and(|line| line.starts_with("// @generated")));
        assert!(text.contains("\nuse super::*;\nuse crate::api::IWork;\n"));
        assert!(text.contains("\npub struct IWorkProxy {\n    bridge: ::std::boxed::Box<i_work_detail::IWorkBridge>,\n}\n"));
        assert!(text.contains("\npub fn create_stable_i_work(implementation: ::std::boxed::Box<dyn IWork>) -> ::std::boxed::Box<dyn IWork> {\n"));
        syn::parse_file(&text).expect("rendered file is valid Rust");
    }

    #[test]
    fn nested_interfaces_import_their_module_scope() {
        let file: File = parse_quote! {
            pub mod api {
                pub struct Payload;
                pub trait Sink { fn push(&self, payload: Payload); }
            }
        };
        let located = find_interface(&file, None).expect("trait");
        let text = render(&located, &StableOptions::default(), None, "lib.rs").expect("render");
        assert!(text.contains("\nuse super::api::*;\n"), "{text}");
        assert!(!text.contains("use super::*;"));
        syn::parse_file(&text).expect("rendered file is valid Rust");
    }

    #[test]
    fn default_output_lives_next_to_input() {
        let item: ItemTrait = parse_quote! { trait IWork { fn do_work(&self); } };
        let path = output_path(Path::new("src/api/iwork.rs"), None, &item);
        assert_eq!(path, Path::new("src/api/stable/i_work.rs"));

        let path = output_path(Path::new("iwork.rs"), Some(Path::new("gen")), &item);
        assert_eq!(path, Path::new("gen/i_work.rs"));
    }
}
