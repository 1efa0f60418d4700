//! # 时域信号数据模型
//!
//! 存储实时传播（如诱导偶极矩）产生的均匀采样时间序列。
//!
//! ## 依赖关系
//! - 被 `parsers/signal.rs` 构造
//! - 被 `spectral/` 与 `commands/` 使用

use crate::error::{Result, RtspecError};

/// 均匀采样的实数时域信号
#[derive(Debug, Clone)]
pub struct Signal {
    /// 信号名称（通常为文件名）
    pub name: String,
    /// 时间步长
    pub dt: f64,
    /// 采样时刻
    pub times: Vec<f64>,
    /// 采样值
    pub values: Vec<f64>,
}

impl Signal {
    /// 从采样值和时间步长创建信号，时间轴从 0 开始
    pub fn new(name: impl Into<String>, dt: f64, values: Vec<f64>) -> Result<Self> {
        Self::with_start(name, dt, 0.0, values)
    }

    /// 指定起始时刻创建信号
    pub fn with_start(
        name: impl Into<String>,
        dt: f64,
        t0: f64,
        values: Vec<f64>,
    ) -> Result<Self> {
        if dt <= 0.0 || !dt.is_finite() {
            return Err(RtspecError::InvalidSignal(format!(
                "time step must be positive, got {}",
                dt
            )));
        }
        if values.is_empty() {
            return Err(RtspecError::InvalidSignal("signal is empty".to_string()));
        }

        let times = (0..values.len()).map(|i| t0 + i as f64 * dt).collect();
        Ok(Signal {
            name: name.into(),
            dt,
            times,
            values,
        })
    }

    /// 采样点数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 总传播时长
    pub fn duration(&self) -> f64 {
        self.dt * self.len().saturating_sub(1) as f64
    }

    /// (t, f(t)) 数据点
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }

    /// 用新的采样值替换信号，保留时间轴
    pub fn with_values(&self, values: Vec<f64>) -> Signal {
        debug_assert_eq!(values.len(), self.times.len());
        Signal {
            name: self.name.clone(),
            dt: self.dt,
            times: self.times.clone(),
            values,
        }
    }
}
