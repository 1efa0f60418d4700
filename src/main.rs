//! # rtspec - 实时传播信号谱分析工具箱
//!
//! 把实时耦合簇（RT-CC）等实时传播计算得到的时域信号（如诱导偶极矩）
//! 转换为吸收谱，统一成单一可执行文件。
//!
//! ## 子命令
//! - `ft`     - 离散 Fourier 变换谱
//! - `pade`   - Padé 近似谱
//! - `filter` - 时域信号去噪与指数衰减
//! - `fwhm`   - 谱峰半高宽
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (信号文件解析)
//!   │     ├── spectral/  (FFT、Padé、滤波、峰位、导出与绘图)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod spectral;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
