//! # filter 子命令 CLI 定义
//!
//! 输出去噪/衰减后的时域信号。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/filter.rs`

use super::common::{InputArgs, OutputFormat, PlotArgs, PreprocessArgs};
use clap::Args;
use std::path::PathBuf;

/// filter 子命令参数
#[derive(Args, Debug)]
pub struct FilterArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub preprocess: PreprocessArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Output: file path (single mode) or directory (batch mode)
    #[arg(short, long, default_value = "filtered_signal.xy")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}
