//! # 离散 Fourier 变换谱
//!
//! 把时域信号变换为正频率一侧的复数谱。
//!
//! ## 约定
//! - 变换长度 `n` 默认取信号长度，可补零或截断
//! - 只保留 `1..n/2` 号频点（去掉直流分量与 Nyquist 及负频率）
//! - 频率为角频率 `ω_k = 2πk / (n·dt)`
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `spectral/fft.rs`, `models/spectrum.rs`

use crate::error::{Result, RtspecError};
use crate::models::{normalize_components, Signal, Spectrum};
use crate::spectral::fft;

use std::f64::consts::PI;

/// 对等间隔实数序列做 DFT
///
/// `n` 为 `None` 或 `Some(0)` 时使用数据长度。`norm` 为真时实部、虚部
/// 分别按各自最大绝对值归一化。
pub fn fourier_transform(data: &[f64], dt: f64, norm: bool, n: Option<usize>) -> Result<Spectrum> {
    if data.is_empty() {
        return Err(RtspecError::InvalidSignal(
            "cannot transform an empty signal".to_string(),
        ));
    }
    if dt <= 0.0 || !dt.is_finite() {
        return Err(RtspecError::InvalidArgument(format!(
            "time step must be positive, got {}",
            dt
        )));
    }

    let n = match n {
        Some(n) if n > 0 => n,
        _ => data.len(),
    };
    if n < 4 {
        return Err(RtspecError::InvalidArgument(format!(
            "{} FFT points leave no positive-frequency bins (need at least 4)",
            n
        )));
    }

    let spectrum = fft::rfft_padded(data, n);
    let freq = fft::fftfreq(n, 1.0);

    let upper = n / 2;
    let mut values = spectrum[1..upper].to_vec();
    let frequencies = freq[1..upper].iter().map(|f| f * 2.0 * PI / dt).collect();

    if norm {
        normalize_components(&mut values);
    }

    Ok(Spectrum::new("", frequencies, values))
}

/// 对信号做 DFT，谱沿用信号名称
pub fn transform_signal(signal: &Signal, norm: bool, n: Option<usize>) -> Result<Spectrum> {
    let mut spectrum = fourier_transform(&signal.values, signal.dt, norm, n)?;
    spectrum.name = signal.name.clone();
    Ok(spectrum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frequency_grid() {
        let data = vec![0.0; 10];
        let spectrum = fourier_transform(&data, 0.5, false, None).unwrap();
        // bins 1..5
        assert_eq!(spectrum.len(), 4);
        assert_relative_eq!(spectrum.frequencies[0], 2.0 * PI / (10.0 * 0.5), epsilon = 1e-12);
        assert_relative_eq!(spectrum.frequencies[3], 4.0 * 2.0 * PI / (10.0 * 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_cosine_peaks_at_its_frequency() {
        let dt = 0.1;
        let n = 200;
        let omega = 2.0 * PI * 10.0 / (n as f64 * dt); // 正好落在第 10 号频点
        let data: Vec<f64> = (0..n).map(|i| (omega * i as f64 * dt).cos()).collect();

        let spectrum = fourier_transform(&data, dt, false, None).unwrap();
        let magnitudes: Vec<f64> = spectrum.values.iter().map(|v| v.norm()).collect();
        let (imax, _) = magnitudes
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &m)| if m > acc.1 { (i, m) } else { acc });

        assert_relative_eq!(spectrum.frequencies[imax], omega, epsilon = 1e-10);
        assert_relative_eq!(magnitudes[imax], n as f64 / 2.0, epsilon = 1e-8);
    }

    #[test]
    fn test_zero_padding_changes_resolution() {
        let data: Vec<f64> = (0..50).map(|i| (i as f64 * 0.3).sin()).collect();
        let spectrum = fourier_transform(&data, 1.0, false, Some(128)).unwrap();
        assert_eq!(spectrum.len(), 63);
        assert_relative_eq!(spectrum.frequencies[0], 2.0 * PI / 128.0, epsilon = 1e-12);

        // Some(0) 等同于默认长度
        let default = fourier_transform(&data, 1.0, false, Some(0)).unwrap();
        assert_eq!(default.len(), 24);
    }

    #[test]
    fn test_norm_bounds_components() {
        let data: Vec<f64> = (0..64).map(|i| 3.0 * (i as f64 * 0.7).sin()).collect();
        let spectrum = fourier_transform(&data, 0.2, true, None).unwrap();
        let max_re = spectrum.values.iter().map(|v| v.re.abs()).fold(0.0, f64::max);
        let max_im = spectrum.values.iter().map(|v| v.im.abs()).fold(0.0, f64::max);
        assert_relative_eq!(max_re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(max_im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(fourier_transform(&[], 1.0, false, None).is_err());
        assert!(fourier_transform(&[1.0, 2.0, 3.0], 0.0, false, None).is_err());
        assert!(fourier_transform(&[1.0, 2.0], 1.0, false, None).is_err());
    }

    #[test]
    fn test_transform_signal_keeps_name() {
        let signal = Signal::new("mu_x", 0.1, vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0]).unwrap();
        let spectrum = transform_signal(&signal, false, None).unwrap();
        assert_eq!(spectrum.name, "mu_x");
    }
}
