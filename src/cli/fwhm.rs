//! # fwhm 子命令 CLI 定义
//!
//! 计算 Fourier 谱的半高宽。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fwhm.rs`

use super::common::{InputArgs, PreprocessArgs};
use crate::models::{FrequencyUnit, SpectrumComponent};
use clap::Args;

/// fwhm 子命令参数
#[derive(Args, Debug)]
pub struct FwhmArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub preprocess: PreprocessArgs,

    /// Spectrum component whose peaks are measured
    #[arg(long, value_enum, default_value = "abs")]
    pub component: SpectrumComponent,

    /// Frequency unit for the reported width
    #[arg(long, value_enum, default_value = "hartree")]
    pub unit: FrequencyUnit,

    /// Number of FFT points (zero-pads or truncates; default: signal length)
    #[arg(short = 'n', long)]
    pub points: Option<usize>,
}
