//! stable-bridgegen：把源文件中的接口 Trait 展开为独立的 Bridge/Proxy/工厂源文件。
//!
//! # 使用方式（How）
//! 1. 定位输入文件中的接口（首个 trait，或 `trait_name` 指定的 trait）；
//! 2. 以与 `#[stable_interface]` 相同的规则校验并生成链条；
//! 3. 写入 `<输入目录>/stable/<trait>.rs`，由接口所在模块以子模块形式引入。
//!
//! 与属性宏相比，生成文件可以提交进版本库并接受评审，适合接口定义不便修改的场景。

pub mod cli;
mod error;
mod layout;
mod render;

use std::fs;
use std::path::PathBuf;

pub use error::{BridgegenError, describe};
pub use render::{LocatedInterface, find_interface, output_path, render};
pub use stable_codegen::StableOptions;

/// 一次生成请求。
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// 包含接口定义的源文件。
    pub input: PathBuf,
    /// 输出目录；缺省为输入文件同级的 `stable/`。
    pub out_dir: Option<PathBuf>,
    /// 指定 trait 名；缺省取文件中的第一个 trait。
    pub trait_name: Option<String>,
    /// 额外导入接口的路径，接口不在生成文件父模块中时使用。
    pub trait_path: Option<syn::Path>,
    pub options: StableOptions,
}

/// 执行生成并返回写入的文件路径。
pub fn generate_file(request: &GenerateRequest) -> Result<PathBuf, BridgegenError> {
    let input = &request.input;
    let source = fs::read_to_string(input).map_err(|source| BridgegenError::Read {
        path: input.clone(),
        source,
    })?;
    let file = syn::parse_file(&source).map_err(|source| BridgegenError::Parse {
        path: input.clone(),
        source,
    })?;

    let wanted = request.trait_name.as_deref();
    let located = find_interface(&file, wanted).ok_or_else(|| match wanted {
        Some(name) => BridgegenError::TraitNotFound {
            path: input.clone(),
            name: name.to_string(),
        },
        None => BridgegenError::NoInterface {
            path: input.clone(),
        },
    })?;
    let interface = located.item;
    tracing::debug!(
        interface = %interface.ident,
        depth = located.scope.len(),
        input = %input.display(),
        "interface located"
    );

    let source_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let rendered = render(
        &located,
        &request.options,
        request.trait_path.as_ref(),
        &source_name,
    )?;

    let output = output_path(input, request.out_dir.as_deref(), interface);
    if let Some(dir) = output.parent() {
        fs::create_dir_all(dir).map_err(|source| BridgegenError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::write(&output, rendered).map_err(|source| BridgegenError::Write {
        path: output.clone(),
        source,
    })?;

    tracing::info!(
        interface = %interface.ident,
        output = %output.display(),
        "stable bridge generated"
    );
    Ok(output)
}
