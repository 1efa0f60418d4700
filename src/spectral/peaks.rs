//! # 谱峰识别与半高宽
//!
//! 一维离散数据的峰位、突出度（prominence）与峰宽计算，行为与
//! `scipy.signal.find_peaks` / `peak_prominences` / `peak_widths` 一致
//! （不设 `wlen` 窗口）。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 无外部模块依赖

use crate::error::{Result, RtspecError};

use std::f64::consts::PI;

/// 峰突出度
#[derive(Debug, Clone, PartialEq)]
pub struct Prominence {
    pub prominence: f64,
    pub left_base: usize,
    pub right_base: usize,
}

/// 峰宽
#[derive(Debug, Clone, PartialEq)]
pub struct PeakWidth {
    /// 宽度（以采样点为单位）
    pub width: f64,
    /// 计算宽度所在的高度
    pub height: f64,
    /// 左侧插值交点位置
    pub left_ip: f64,
    /// 右侧插值交点位置
    pub right_ip: f64,
}

/// 报告用的谱峰
#[derive(Debug, Clone)]
pub struct SpectralPeak {
    pub frequency: f64,
    pub intensity: f64,
}

/// 局部极大值
///
/// 平台型极大值取中点（向下取整），首尾两点不计为峰。
pub fn find_peaks(x: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }

    let i_max = x.len() - 1;
    let mut i = 1;
    while i < i_max {
        if x[i - 1] < x[i] {
            let mut i_ahead = i + 1;
            while i_ahead < i_max && x[i_ahead] == x[i] {
                i_ahead += 1;
            }

            if x[i_ahead] < x[i] {
                let left_edge = i;
                let right_edge = i_ahead - 1;
                peaks.push((left_edge + right_edge) / 2);
                i = i_ahead;
            }
        }
        i += 1;
    }

    peaks
}

/// 计算各峰的突出度
pub fn peak_prominences(x: &[f64], peaks: &[usize]) -> Vec<Prominence> {
    peaks
        .iter()
        .map(|&peak| {
            let height = x[peak];

            // 向左搜索，直到遇到更高的点或边界
            let mut left_base = peak;
            let mut left_min = height;
            let mut i = peak as isize;
            while i >= 0 && x[i as usize] <= height {
                if x[i as usize] < left_min {
                    left_min = x[i as usize];
                    left_base = i as usize;
                }
                i -= 1;
            }

            let mut right_base = peak;
            let mut right_min = height;
            let mut i = peak;
            while i < x.len() && x[i] <= height {
                if x[i] < right_min {
                    right_min = x[i];
                    right_base = i;
                }
                i += 1;
            }

            Prominence {
                prominence: height - left_min.max(right_min),
                left_base,
                right_base,
            }
        })
        .collect()
}

/// 在 `x[p] - prominence·rel_height` 高度处计算峰宽
pub fn peak_widths(x: &[f64], peaks: &[usize], rel_height: f64) -> Vec<PeakWidth> {
    let prominences = peak_prominences(x, peaks);

    peaks
        .iter()
        .zip(&prominences)
        .map(|(&peak, prom)| {
            let height = x[peak] - prom.prominence * rel_height;

            let mut i = peak;
            while prom.left_base < i && height < x[i] {
                i -= 1;
            }
            let mut left_ip = i as f64;
            if x[i] < height {
                left_ip += (height - x[i]) / (x[i + 1] - x[i]);
            }

            let mut i = peak;
            while i < prom.right_base && height < x[i] {
                i += 1;
            }
            let mut right_ip = i as f64;
            if x[i] < height {
                right_ip -= (height - x[i]) / (x[i - 1] - x[i]);
            }

            PeakWidth {
                width: right_ip - left_ip,
                height,
                left_ip,
                right_ip,
            }
        })
        .collect()
}

/// 频域谱的半高宽（FWHM）
///
/// `intensity` 为正频率一侧的谱强度，`dt` 为原始信号时间步长。返回半高
/// 位置最高的峰的半高宽，单位为角频率。
pub fn fwhm(intensity: &[f64], dt: f64) -> Result<f64> {
    if dt <= 0.0 || !dt.is_finite() {
        return Err(RtspecError::InvalidArgument(format!(
            "time step must be positive, got {}",
            dt
        )));
    }

    // 还原产生该谱的 FFT 长度，得到频率间隔
    let length = if intensity.len() % 2 == 1 {
        2 * (intensity.len() + 1)
    } else {
        2 * intensity.len()
    };
    let spacing = 2.0 * PI / (length as f64 * dt);

    let peaks = find_peaks(intensity);
    if peaks.is_empty() {
        return Err(RtspecError::NoPeaks("spectrum".to_string()));
    }

    let widths = peak_widths(intensity, &peaks, 0.5);
    let best = widths
        .iter()
        .fold(None::<&PeakWidth>, |best, w| match best {
            Some(b) if b.height >= w.height => Some(b),
            _ => Some(w),
        })
        .ok_or_else(|| RtspecError::NoPeaks("spectrum".to_string()))?;

    Ok(best.width * spacing)
}

/// 按强度降序排列的前 `count` 个峰
pub fn top_peaks(intensity: &[f64], frequencies: &[f64], count: usize) -> Vec<SpectralPeak> {
    let mut peaks: Vec<SpectralPeak> = find_peaks(intensity)
        .into_iter()
        .map(|index| SpectralPeak {
            frequency: frequencies[index],
            intensity: intensity[index],
        })
        .collect();

    peaks.sort_by(|a, b| {
        b.intensity
            .partial_cmp(&a.intensity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    peaks.truncate(count);
    peaks
}
