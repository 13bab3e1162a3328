use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 生成流程中可能出现的全部失败路径。
///
/// 每个变体都携带出错文件或名称，调用方无需再额外拼接上下文即可直接展示给用户。
#[derive(Debug, Error)]
pub enum BridgegenError {
    #[error("读取 {} 失败", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("写入 {} 失败", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("解析 {} 失败：{}", path.display(), describe(source))]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },
    #[error("{} 中未找到任何 trait 定义", path.display())]
    NoInterface { path: PathBuf },
    #[error("{} 中未找到名为 `{name}` 的 trait", path.display())]
    TraitNotFound { path: PathBuf, name: String },
    #[error("接口 `{name}` 无法生成稳定桥接：{}", describe(source))]
    Interface {
        name: String,
        #[source]
        source: syn::Error,
    },
    #[error("`{value}` 不是合法的 Rust {kind}")]
    InvalidName {
        value: String,
        kind: &'static str,
        #[source]
        source: syn::Error,
    },
}

/// 把（可能合并过的）`syn::Error` 展开为 `行:列: 信息` 列表。
pub fn describe(error: &syn::Error) -> String {
    error
        .clone()
        .into_iter()
        .map(|single| {
            let start = single.span().start();
            format!("{}:{}: {}", start.line, start.column + 1, single)
        })
        .collect::<Vec<_>>()
        .join("; ")
}
