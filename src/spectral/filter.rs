//! # 时域信号滤波
//!
//! - `denoise`: 基于功率谱阈值的 FFT 去噪
//! - `damp`: 指数衰减窗口，压制截断带来的 Gibbs 振荡并人为展宽谱峰
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `spectral/fft.rs`

use crate::error::{Result, RtspecError};
use crate::spectral::fft;

use num_complex::Complex64;

/// 功率谱阈值去噪
///
/// 功率谱 `PS_k = |f̂_k|² / n`，只保留 `PS_k > filter_level` 的 Fourier 系数，
/// 逆变换后取实部。
pub fn denoise(signal: &[f64], filter_level: f64) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let input: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let mut fhat = fft::fft(&input);

    let zero = Complex64::new(0.0, 0.0);
    for coeff in fhat.iter_mut() {
        let power = coeff.norm_sqr() / n as f64;
        if power <= filter_level {
            *coeff = zero;
        }
    }

    fft::ifft(&fhat).into_iter().map(|v| v.re).collect()
}

/// 功率谱 `|f̂_k|² / n`，用于挑选去噪阈值
pub fn power_spectrum(signal: &[f64]) -> Vec<f64> {
    let n = signal.len() as f64;
    let input: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    fft::fft(&input)
        .iter()
        .map(|c| c.norm_sqr() / n)
        .collect()
}

/// 指数衰减 `f(t)·exp(-t/τ)`，`t_i = i·dt`
pub fn damp(signal: &[f64], dt: f64, tau: f64) -> Result<Vec<f64>> {
    if dt <= 0.0 || !dt.is_finite() {
        return Err(RtspecError::InvalidArgument(format!(
            "time step must be positive, got {}",
            dt
        )));
    }
    if tau <= 0.0 || !tau.is_finite() {
        return Err(RtspecError::InvalidArgument(format!(
            "damping time must be positive, got {}",
            tau
        )));
    }

    Ok(signal
        .iter()
        .enumerate()
        .map(|(i, &f)| f * (-(i as f64) * dt / tau).exp())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_denoise_removes_weak_component() {
        let n = 128;
        let clean: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 5.0 * i as f64 / n as f64).sin())
            .collect();
        let noisy: Vec<f64> = clean
            .iter()
            .enumerate()
            .map(|(i, x)| x + 0.01 * (2.0 * PI * 40.0 * i as f64 / n as f64).cos())
            .collect();

        let filtered = denoise(&noisy, 1.0);
        for (f, c) in filtered.iter().zip(&clean) {
            assert_relative_eq!(*f, *c, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_denoise_zero_threshold_keeps_signal() {
        let signal = vec![0.3, -1.2, 2.5, 0.0, 4.1, -0.7, 1.1];
        let filtered = denoise(&signal, 0.0);
        for (f, s) in filtered.iter().zip(&signal) {
            assert_relative_eq!(*f, *s, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_denoise_high_threshold_flattens() {
        let signal = vec![1.0, 2.0, 3.0, 4.0];
        let filtered = denoise(&signal, 1e6);
        assert!(filtered.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_power_spectrum_parseval() {
        let signal = vec![1.0, -2.0, 0.5, 3.0, 0.0];
        let energy: f64 = signal.iter().map(|x| x * x).sum();
        let total: f64 = power_spectrum(&signal).iter().sum();
        assert_relative_eq!(total, energy, epsilon = 1e-10);
    }

    #[test]
    fn test_damp_envelope() {
        let damped = damp(&[2.0, 2.0, 2.0], 0.5, 1.0).unwrap();
        assert_relative_eq!(damped[0], 2.0);
        assert_relative_eq!(damped[1], 2.0 * (-0.5_f64).exp());
        assert_relative_eq!(damped[2], 2.0 * (-1.0_f64).exp());
    }

    #[test]
    fn test_damp_rejects_non_positive_tau() {
        assert!(damp(&[1.0], 0.1, 0.0).is_err());
        assert!(damp(&[1.0], 0.1, -5.0).is_err());
        assert!(damp(&[1.0], 0.0, 5.0).is_err());
    }
}
