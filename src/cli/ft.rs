//! # ft 子命令 CLI 定义
//!
//! 离散 Fourier 变换谱。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/ft.rs`

use super::common::{InputArgs, OutputFormat, PlotArgs, PreprocessArgs, SpectrumArgs};
use clap::Args;
use std::path::PathBuf;

/// ft 子命令参数
#[derive(Args, Debug)]
pub struct FtArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub preprocess: PreprocessArgs,

    #[command(flatten)]
    pub spectrum: SpectrumArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Number of FFT points (zero-pads or truncates; default: signal length)
    #[arg(short = 'n', long)]
    pub points: Option<usize>,

    /// Output: file path (single mode) or directory (batch mode)
    #[arg(short, long, default_value = "ft_spectrum.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}
