//! # 数据模型模块
//!
//! 定义统一的时域信号和频域谱数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `spectral/` 和 `commands/` 使用
//! - 子模块: signal, spectrum

pub mod signal;
pub mod spectrum;

pub use signal::Signal;
pub use spectrum::{normalize_components, FrequencyUnit, Spectrum, SpectrumComponent};
