//! # 子命令共享参数
//!
//! 各子命令通过 `#[command(flatten)]` 复用的参数组：
//! - `InputArgs`: 输入文件/目录与批量处理选项
//! - `PreprocessArgs`: 变换前的时域预处理
//! - `SpectrumArgs`: 谱分量、单位与峰位报告
//! - `PlotArgs`: 图像尺寸与标题
//!
//! ## 依赖关系
//! - 被 `cli/` 下各子命令使用
//! - 使用 `models/spectrum.rs` 的分量与单位枚举

use crate::models::{FrequencyUnit, SpectrumComponent};

use clap::{Args, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 输入
// ─────────────────────────────────────────────────────────────

/// 输入参数
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input: signal file or directory containing signal files
    pub input: PathBuf,

    /// Time step; overrides the value inferred from the time column or '# dt =' header
    #[arg(long)]
    pub dt: Option<f64>,

    /// Signal column for multi-column files (column 0 is time)
    #[arg(short, long, default_value_t = 1)]
    pub column: usize,

    /// Glob pattern for input files (batch mode, e.g., "*.dat,*.csv")
    #[arg(long, default_value = "*.dat,*.txt,*.csv,*.xy")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0, env = "RTSPEC_JOBS")]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

// ─────────────────────────────────────────────────────────────
// 预处理
// ─────────────────────────────────────────────────────────────

/// 时域预处理参数
#[derive(Args, Debug, Clone, Default)]
pub struct PreprocessArgs {
    /// Zero Fourier coefficients whose power |f̂|²/n is at or below this level
    #[arg(long)]
    pub denoise: Option<f64>,

    /// Multiply the signal by exp(-t/τ) with this damping time τ
    #[arg(long)]
    pub damp: Option<f64>,
}

impl PreprocessArgs {
    pub fn is_empty(&self) -> bool {
        self.denoise.is_none() && self.damp.is_none()
    }
}

// ─────────────────────────────────────────────────────────────
// 谱
// ─────────────────────────────────────────────────────────────

/// 谱输出参数
#[derive(Args, Debug, Clone)]
pub struct SpectrumArgs {
    /// Normalise real and imaginary parts separately to a maximum of 1
    #[arg(long, default_value_t = false)]
    pub norm: bool,

    /// Spectrum component used for plots, XY output, peaks and FWHM
    #[arg(long, value_enum, default_value = "imag")]
    pub component: SpectrumComponent,

    /// Frequency unit for output
    #[arg(long, value_enum, default_value = "hartree")]
    pub unit: FrequencyUnit,

    /// Number of strongest peaks to report
    #[arg(long, default_value_t = 10)]
    pub peaks: usize,

    /// Mark reported peaks on the plot
    #[arg(long, default_value_t = false)]
    pub label_peaks: bool,
}

// ─────────────────────────────────────────────────────────────
// 输出
// ─────────────────────────────────────────────────────────────

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file
    Csv,
    /// XY data file (two tab-separated columns)
    Xy,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Csv => "csv",
            OutputFormat::Xy => "xy",
        }
    }
}

/// 绘图参数
#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200, env = "RTSPEC_PLOT_WIDTH")]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800, env = "RTSPEC_PLOT_HEIGHT")]
    pub height: u32,

    /// Title for the plot (default: signal name)
    #[arg(long)]
    pub title: Option<String>,
}

/// 解析频率范围 "min-max"
///
/// 分隔符是第一个不属于指数部分（如 `1e-3`）的 `-`。
pub fn parse_frequency_range(range: &str) -> Result<(f64, f64), String> {
    let (lower, upper) = split_range(range)
        .ok_or_else(|| format!("'{}' (expected 'min-max', e.g. '0-2')", range))?;

    let min: f64 = lower
        .trim()
        .parse()
        .map_err(|_| format!("'{}' has a non-numeric lower bound", range))?;
    let max: f64 = upper
        .trim()
        .parse()
        .map_err(|_| format!("'{}' has a non-numeric upper bound", range))?;

    if min < 0.0 || max <= min {
        return Err(format!("'{}' (must be 0 <= min < max)", range));
    }

    Ok((min, max))
}

fn split_range(range: &str) -> Option<(&str, &str)> {
    let mut previous = None;
    for (i, c) in range.char_indices() {
        if c == '-' && !matches!(previous, None | Some('e') | Some('E')) {
            return Some((&range[..i], &range[i + 1..]));
        }
        if !c.is_whitespace() {
            previous = Some(c);
        }
    }
    None
}
