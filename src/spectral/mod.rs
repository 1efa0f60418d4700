//! # 谱分析模块
//!
//! 把实时传播的时域信号转换为频域谱并进行后处理。
//!
//! ## 子模块
//! - `fft`: 快速 Fourier 变换
//! - `transform`: 离散 Fourier 变换谱
//! - `pade`: Padé 近似谱
//! - `filter`: 去噪与指数衰减
//! - `peaks`: 峰位与半高宽
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/`

pub mod export;
pub mod fft;
pub mod filter;
pub mod pade;
pub mod peaks;
pub mod plot;
pub mod transform;

pub use pade::{Pade, PadeSolver};
pub use peaks::SpectralPeak;
