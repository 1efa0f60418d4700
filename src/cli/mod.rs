//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `ft`: 离散 Fourier 变换谱
//! - `pade`: Padé 近似谱
//! - `filter`: 时域去噪/衰减
//! - `fwhm`: 谱峰半高宽
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, ft, pade, filter, fwhm

pub mod common;
pub mod filter;
pub mod ft;
pub mod fwhm;
pub mod pade;

use clap::{Parser, Subcommand};

/// rtspec - 实时传播信号谱分析工具箱
#[derive(Parser)]
#[command(name = "rtspec")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Spectral analysis of real-time coupled-cluster propagations", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Fourier-transform a time signal into a spectrum
    Ft(ft::FtArgs),

    /// Compute a Padé-approximant spectrum of a time signal
    Pade(pade::PadeArgs),

    /// Denoise and/or damp a time signal
    Filter(filter::FilterArgs),

    /// Report the full width at half maximum of the dominant spectral peak
    Fwhm(fwhm::FwhmArgs),
}
