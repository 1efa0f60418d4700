//! # Padé 近似谱
//!
//! 用有理函数 `P(z)/Q(z)` 近似时域信号的离散 Fourier 变换，在较短的传播
//! 时间下即可得到高分辨率谱。
//!
//! ## 算法概述
//! 对 `M + 1 = 2N + 1` 个采样点 `c_k`，`z = exp(-iωΔt)`：
//! 1. 解 `N × N` 线性方程组 `Σ_m b_m c_{N-m+k} = -c_{N+k}` 得分母系数 `b`（`b_0 = 1`）
//! 2. 分子系数 `a_k = Σ_{m≤k} b_m c_{k-m}`
//! 3. `F(ω) = Σ a_k z^k / Σ b_k z^k`
//!
//! ## 参考
//! - A. Bruner, D. LaMaster, K. Lopata, J. Chem. Theory Comput. 12, 3741 (2016)
//!
//! ## 依赖关系
//! - 被 `commands/pade.rs` 调用
//! - 使用 `nalgebra` 求解线性方程组

use crate::error::{Result, RtspecError};
use crate::models::{normalize_components, Spectrum};

use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

/// 分母方程组的构造方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PadeSolver {
    /// Build G as a Toeplitz matrix from its first column and row
    #[default]
    Toeplitz,
    /// Fill G element by element
    Direct,
}

impl std::fmt::Display for PadeSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PadeSolver::Toeplitz => write!(f, "toeplitz"),
            PadeSolver::Direct => write!(f, "direct"),
        }
    }
}

/// 待求解的 Padé 问题
#[derive(Debug, Clone)]
pub struct Pade {
    /// 以首点为零点平移后的数据（奇数个点）
    data: Vec<f64>,
    /// 时间步长
    dt: f64,
    /// 是否丢弃了末尾采样点
    trimmed: bool,
}

/// 已求得系数的 Padé 近似
#[derive(Debug, Clone)]
pub struct PadeApproximant {
    /// 分子系数 a_0..a_N
    pub a: Vec<f64>,
    /// 分母系数 b_0..b_N（b_0 = 1）
    pub b: Vec<f64>,
    /// 时间步长
    pub dt: f64,
}

impl Pade {
    /// 准备 Padé 问题
    ///
    /// 要求 `len(data) = M + 1` 为奇数；偶数长度时丢弃最后一个点，
    /// 可通过 [`Pade::trimmed`] 查询。
    pub fn new(data: &[f64], dt: f64) -> Result<Self> {
        if dt <= 0.0 || !dt.is_finite() {
            return Err(RtspecError::InvalidArgument(format!(
                "time step must be positive, got {}",
                dt
            )));
        }

        let trimmed = data.len() % 2 == 0;
        let used = if trimmed { &data[..data.len().saturating_sub(1)] } else { data };

        if used.len() < 3 {
            return Err(RtspecError::InvalidSignal(format!(
                "Padé approximant needs at least 3 points, got {}",
                data.len()
            )));
        }

        let origin = used[0];
        let data = used.iter().map(|v| v - origin).collect();

        Ok(Pade { data, dt, trimmed })
    }

    /// 是否为凑成奇数长度而丢弃了最后一个点
    pub fn trimmed(&self) -> bool {
        self.trimmed
    }

    /// M（数据点数减一）
    pub fn m(&self) -> usize {
        self.data.len() - 1
    }

    /// N = M / 2，即近似的阶数
    pub fn order(&self) -> usize {
        self.m() / 2
    }

    /// 求解 Padé 系数
    pub fn build(&self, solver: PadeSolver) -> Result<PadeApproximant> {
        let n = self.order();
        let c = &self.data;

        let d: Vec<f64> = c[n + 1..].iter().map(|v| -v).collect();
        if d.len() != n {
            return Err(RtspecError::Other(format!(
                "right-hand side has {} elements, expected {}",
                d.len(),
                n
            )));
        }

        let g = match solver {
            PadeSolver::Toeplitz => {
                let column = &c[n..2 * n];
                let row: Vec<f64> = c[..=n].iter().rev().take(n).copied().collect();
                toeplitz(column, &row)
            }
            PadeSolver::Direct => DMatrix::from_fn(n, n, |k, m| c[n - m + k]),
        };

        let rhs = DVector::from_vec(d);
        let solution = g
            .lu()
            .solve(&rhs)
            .ok_or(RtspecError::SingularMatrix { order: n })?;

        if solution.iter().any(|v| !v.is_finite()) {
            return Err(RtspecError::SingularMatrix { order: n });
        }

        let mut b = Vec::with_capacity(n + 1);
        b.push(1.0);
        b.extend(solution.iter().copied());

        let a = (0..=n)
            .map(|k| (0..=k).map(|m| b[m] * c[k - m]).sum::<f64>())
            .collect();

        Ok(PadeApproximant { a, b, dt: self.dt })
    }
}

impl PadeApproximant {
    /// 在给定角频率处求近似谱 `P(z)/Q(z)`，`z = exp(-iωΔt)`
    pub fn approx(&self, omegas: &[f64], norm: bool) -> Spectrum {
        let mut values: Vec<Complex64> = omegas
            .iter()
            .map(|&w| {
                let z = Complex64::from_polar(1.0, -w * self.dt);
                horner(&self.a, z) / horner(&self.b, z)
            })
            .collect();

        if norm {
            normalize_components(&mut values);
        }

        Spectrum::new("", omegas.to_vec(), values)
    }
}

/// 由首列与首行构造 Toeplitz 矩阵，首行的第一个元素被首列覆盖
fn toeplitz(column: &[f64], row: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(column.len(), row.len(), |i, j| {
        if i >= j {
            column[i - j]
        } else {
            row[j - i]
        }
    })
}

/// 升幂系数多项式求值
fn horner(coeffs: &[f64], z: Complex64) -> Complex64 {
    coeffs
        .iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
}

/// `[start, end]` 上 `count` 个等距点
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + i as f64 * step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn damped_sine(n: usize, dt: f64, omega: f64, tau: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 * dt;
                (omega * t).sin() * (-t / tau).exp()
            })
            .collect()
    }

    #[test]
    fn test_even_length_is_trimmed_and_centred() {
        let pade = Pade::new(&[2.0, 3.0, 5.0, 7.0], 0.1).unwrap();
        assert!(pade.trimmed());
        assert_eq!(pade.m(), 2);
        assert_eq!(pade.order(), 1);
        assert_eq!(pade.data, vec![0.0, 1.0, 3.0]);

        let odd = Pade::new(&[1.0, 1.0, 1.0], 0.1).unwrap();
        assert!(!odd.trimmed());
    }

    #[test]
    fn test_too_short_or_bad_dt() {
        assert!(Pade::new(&[1.0, 2.0], 0.1).is_err());
        assert!(Pade::new(&[1.0, 2.0, 3.0, 4.0], 0.0).is_err());
    }

    #[test]
    fn test_toeplitz_layout() {
        let g = toeplitz(&[1.0, 2.0, 3.0], &[9.0, 4.0, 5.0]);
        assert_eq!(g[(0, 0)], 1.0);
        assert_eq!(g[(0, 1)], 4.0);
        assert_eq!(g[(0, 2)], 5.0);
        assert_eq!(g[(1, 0)], 2.0);
        assert_eq!(g[(2, 0)], 3.0);
        assert_eq!(g[(2, 1)], 2.0);
    }

    #[test]
    fn test_first_order_coefficients_by_hand() {
        // c = [0, 1, 3], N = 1: G = [c1] = [1], d = [-3] -> b = [1, -3]
        // a_0 = c0 = 0, a_1 = b0 c1 + b1 c0 = 1
        let pade = Pade::new(&[2.0, 3.0, 5.0], 1.0).unwrap();
        let approx = pade.build(PadeSolver::Toeplitz).unwrap();
        assert_eq!(approx.b, vec![1.0, -3.0]);
        assert_eq!(approx.a, vec![0.0, 1.0]);
    }

    #[test]
    fn test_damped_sine_recurrence_recovered() {
        // 衰减正弦满足二阶递推 c_{k+2} = 2r cosθ c_{k+1} - r² c_k
        let (dt, omega, tau) = (0.1, 1.3, 10.0);
        let data = damped_sine(5, dt, omega, tau);
        let r = (-dt / tau).exp();
        let theta = omega * dt;

        for solver in [PadeSolver::Toeplitz, PadeSolver::Direct] {
            let approx = Pade::new(&data, dt).unwrap().build(solver).unwrap();
            assert_relative_eq!(approx.b[0], 1.0);
            assert_relative_eq!(approx.b[1], -2.0 * r * theta.cos(), epsilon = 1e-10);
            assert_relative_eq!(approx.b[2], r * r, epsilon = 1e-10);
            assert_relative_eq!(approx.a[0], 0.0, epsilon = 1e-12);
            assert_relative_eq!(approx.a[1], data[1], epsilon = 1e-12);
            assert_relative_eq!(approx.a[2], 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_pade_matches_infinite_transform() {
        // 两指数之和的 z 变换是 [1/2] 有理函数，五个点即可精确重现
        let (dt, omega, tau) = (0.1, 1.3, 10.0);
        let approx = Pade::new(&damped_sine(5, dt, omega, tau), dt)
            .unwrap()
            .build(PadeSolver::Toeplitz)
            .unwrap();

        let long = damped_sine(6000, dt, omega, tau);
        for &w in &[0.4, 1.0, 1.3, 2.2] {
            let z = Complex64::from_polar(1.0, -w * dt);
            let mut zk = Complex64::new(1.0, 0.0);
            let mut series = Complex64::new(0.0, 0.0);
            for &c in &long {
                series += zk * c;
                zk *= z;
            }

            let value = approx.approx(&[w], false).values[0];
            assert!((value - series).norm() < 1e-6 * series.norm());
        }
    }

    #[test]
    fn test_pade_peak_matches_oscillation_frequency() {
        let (dt, omega0) = (0.1, 1.3);
        let data = damped_sine(5, dt, omega0, 10.0);
        let approx = Pade::new(&data, dt).unwrap().build(PadeSolver::Toeplitz).unwrap();

        let omegas = linspace(0.5, 2.5, 2001);
        let spectrum = approx.approx(&omegas, false);
        let (imax, _) = spectrum
            .values
            .iter()
            .map(|v| v.norm())
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, m)| if m > acc.1 { (i, m) } else { acc });

        assert!((spectrum.frequencies[imax] - omega0).abs() < 0.01);
    }

    #[test]
    fn test_constant_signal_is_singular() {
        let pade = Pade::new(&[4.0; 7], 0.1).unwrap();
        assert!(matches!(
            pade.build(PadeSolver::Direct),
            Err(RtspecError::SingularMatrix { order: 3 })
        ));
    }

    #[test]
    fn test_horner_and_linspace() {
        let z = Complex64::from_polar(1.0, PI / 2.0);
        let v = horner(&[1.0, 2.0, 3.0], z); // 1 + 2i + 3(-1)
        assert_relative_eq!(v.re, -2.0, epsilon = 1e-12);
        assert_relative_eq!(v.im, 2.0, epsilon = 1e-12);

        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
