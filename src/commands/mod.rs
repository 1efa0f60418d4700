//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `spectral/`, `batch/`, `utils/`
//! - 子模块: common, ft, pade, filter, fwhm

pub mod common;
pub mod filter;
pub mod ft;
pub mod fwhm;
pub mod pade;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Ft(args) => ft::execute(args),
        Commands::Pade(args) => pade::execute(args),
        Commands::Filter(args) => filter::execute(args),
        Commands::Fwhm(args) => fwhm::execute(args),
    }
}
