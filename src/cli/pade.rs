//! # pade 子命令 CLI 定义
//!
//! Padé 近似谱。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/pade.rs`

use super::common::{InputArgs, OutputFormat, PlotArgs, PreprocessArgs, SpectrumArgs};
use crate::spectral::PadeSolver;
use clap::Args;
use std::path::PathBuf;

/// pade 子命令参数
#[derive(Args, Debug)]
pub struct PadeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub preprocess: PreprocessArgs,

    #[command(flatten)]
    pub spectrum: SpectrumArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Frequency range to evaluate, in the output unit (e.g., "0-2")
    #[arg(short, long, default_value = "0-2")]
    pub range: String,

    /// Number of frequency samples in the range
    #[arg(long, default_value_t = 5000)]
    pub samples: usize,

    /// How the denominator system is assembled
    #[arg(long, value_enum, default_value = "toeplitz")]
    pub solver: PadeSolver,

    /// Output: file path (single mode) or directory (batch mode)
    #[arg(short, long, default_value = "pade_spectrum.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}
