//! # 解析器模块
//!
//! 提供实时传播时间序列文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: signal

pub mod signal;

pub use signal::{parse_signal_file, SignalOptions};
