//! 命令行参数与执行流程；二进制入口只负责初始化日志并调用 [`execute`]。

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::{BridgegenError, GenerateRequest, StableOptions, generate_file};

/// 从接口 Trait 生成稳定桥接源文件。
#[derive(Debug, Parser)]
#[command(name = "stable-bridgegen", version, about)]
pub struct Cli {
    /// 包含接口 Trait 的 Rust 源文件。
    pub input: PathBuf,
    /// 输出目录，默认 `<输入目录>/stable`。
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// 指定接口名，默认取文件中的第一个 trait。
    #[arg(long)]
    pub trait_name: Option<String>,
    /// 额外导入接口的路径，例如 `crate::api::IWork`。
    #[arg(long)]
    pub trait_path: Option<String>,
    /// 覆盖 Bridge 结构体名。
    #[arg(long)]
    pub bridge: Option<String>,
    /// 覆盖 Proxy 结构体名。
    #[arg(long)]
    pub proxy: Option<String>,
    /// 覆盖工厂函数名。
    #[arg(long)]
    pub factory: Option<String>,
    /// 覆盖隐藏模块名。
    #[arg(long)]
    pub detail: Option<String>,
}

impl Cli {
    /// 校验命名参数并转换为生成请求。
    pub fn into_request(self) -> Result<GenerateRequest, BridgegenError> {
        Ok(GenerateRequest {
            input: self.input,
            out_dir: self.out_dir,
            trait_name: self.trait_name,
            trait_path: self
                .trait_path
                .map(|value| parse_name::<syn::Path>(value, "路径"))
                .transpose()?,
            options: StableOptions {
                bridge: parse_ident(self.bridge)?,
                proxy: parse_ident(self.proxy)?,
                factory: parse_ident(self.factory)?,
                detail: parse_ident(self.detail)?,
            },
        })
    }
}

fn parse_ident(value: Option<String>) -> Result<Option<syn::Ident>, BridgegenError> {
    value
        .map(|value| parse_name::<syn::Ident>(value, "标识符"))
        .transpose()
}

fn parse_name<T: syn::parse::Parse>(value: String, kind: &'static str) -> Result<T, BridgegenError> {
    syn::parse_str::<T>(&value).map_err(|source| BridgegenError::InvalidName {
        value,
        kind,
        source,
    })
}

/// 执行一次生成，返回写入的文件路径。
pub fn run(cli: Cli) -> anyhow::Result<PathBuf> {
    let input = cli.input.clone();
    let request = cli.into_request()?;
    generate_file(&request).with_context(|| format!("为 {} 生成稳定桥接失败", input.display()))
}

/// 执行并映射退出码：成功时把输出路径写到 `out`，失败时记录错误并返回非零码。
pub fn execute(cli: Cli, out: &mut dyn Write) -> ExitCode {
    let result = run(cli).and_then(|path| {
        writeln!(out, "{}", path.display()).context("写出生成路径失败")?;
        Ok(path)
    });
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stable-bridgegen").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn naming_overrides_become_options() {
        let request = parse(&[
            "api.rs",
            "--bridge",
            "Inner",
            "--proxy",
            "Outer",
            "--factory",
            "make_outer",
            "--detail",
            "hidden",
            "--trait-path",
            "crate::api::IWork",
        ])
        .into_request()
        .expect("valid names");

        assert_eq!(request.input, PathBuf::from("api.rs"));
        let options = &request.options;
        assert!(options.bridge.as_ref().is_some_and(|ident| ident == "Inner"));
        assert!(options.proxy.as_ref().is_some_and(|ident| ident == "Outer"));
        assert!(options.factory.as_ref().is_some_and(|ident| ident == "make_outer"));
        assert!(options.detail.as_ref().is_some_and(|ident| ident == "hidden"));
        let path = request.trait_path.expect("trait path");
        assert_eq!(path.segments.len(), 3);
    }

    #[test]
    fn invalid_identifier_is_rejected() {
        let err = parse(&["api.rs", "--factory", "1bad"]).into_request().unwrap_err();
        assert!(matches!(
            err,
            BridgegenError::InvalidName { ref value, kind: "标识符", .. } if value == "1bad"
        ));
        assert!(err.to_string().contains("`1bad` 不是合法的 Rust 标识符"));
    }

    #[test]
    fn invalid_path_is_rejected() {
        let err = parse(&["api.rs", "--trait-path", "crate::"]).into_request().unwrap_err();
        assert!(matches!(err, BridgegenError::InvalidName { kind: "路径", .. }));
    }

    #[test]
    fn missing_input_is_a_usage_error() {
        assert!(Cli::try_parse_from(["stable-bridgegen"]).is_err());
    }
}
