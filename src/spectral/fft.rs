//! # 快速 Fourier 变换
//!
//! 复数 DFT 的纯 Rust 实现。
//!
//! ## 算法概述
//! - 长度为 2 的幂：迭代 radix-2 Cooley-Tukey
//! - 任意长度：Bluestein chirp-z，把 DFT 化为 2 的幂长度的循环卷积
//!
//! 约定与 numpy 一致：正变换 `X_k = Σ x_j exp(-2πi jk/n)`，逆变换带 `1/n`。
//!
//! ## 依赖关系
//! - 被 `spectral/transform.rs`, `spectral/filter.rs` 调用
//! - 使用 `num-complex`

use num_complex::Complex64;
use std::f64::consts::PI;

/// 正向 DFT
pub fn fft(input: &[Complex64]) -> Vec<Complex64> {
    let mut buf = input.to_vec();
    transform_in_place(&mut buf);
    buf
}

/// 逆向 DFT（含 1/n 归一化）
pub fn ifft(input: &[Complex64]) -> Vec<Complex64> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }

    // ifft(x) = conj(fft(conj(x))) / n
    let mut buf: Vec<Complex64> = input.iter().map(|v| v.conj()).collect();
    transform_in_place(&mut buf);
    let scale = 1.0 / n as f64;
    buf.iter().map(|v| v.conj() * scale).collect()
}

/// 实数序列的 DFT，补零或截断到 `n` 点
pub fn rfft_padded(data: &[f64], n: usize) -> Vec<Complex64> {
    let mut buf: Vec<Complex64> = data
        .iter()
        .take(n)
        .map(|&x| Complex64::new(x, 0.0))
        .collect();
    buf.resize(n, Complex64::new(0.0, 0.0));
    transform_in_place(&mut buf);
    buf
}

/// DFT 采样频率（周期/单位时间），排列方式同 `numpy.fft.fftfreq`
pub fn fftfreq(n: usize, d: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    let scale = 1.0 / (n as f64 * d);
    let positive = n.div_ceil(2);
    (0..n)
        .map(|k| {
            if k < positive {
                k as f64 * scale
            } else {
                (k as f64 - n as f64) * scale
            }
        })
        .collect()
}

fn transform_in_place(buf: &mut Vec<Complex64>) {
    let n = buf.len();
    if n <= 1 {
        return;
    }

    if n.is_power_of_two() {
        radix2(buf);
    } else {
        *buf = bluestein(buf);
    }
}

/// 迭代 radix-2 变换，要求长度为 2 的幂
fn radix2(buf: &mut [Complex64]) {
    let n = buf.len();

    // 位反转置换
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            buf.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let step = -2.0 * PI / len as f64;
        // 直接计算旋转因子，避免累乘误差
        let twiddles: Vec<Complex64> = (0..half)
            .map(|k| Complex64::from_polar(1.0, step * k as f64))
            .collect();

        for start in (0..n).step_by(len) {
            for k in 0..half {
                let u = buf[start + k];
                let v = buf[start + k + half] * twiddles[k];
                buf[start + k] = u + v;
                buf[start + k + half] = u - v;
            }
        }
        len <<= 1;
    }
}

/// Bluestein chirp-z 变换，适用于任意长度
fn bluestein(input: &[Complex64]) -> Vec<Complex64> {
    let n = input.len();
    let m = (2 * n - 1).next_power_of_two();
    let two_n = 2 * n as u64;

    // chirp_k = exp(-iπ k²/n)，k² 对 2n 取模以保持相位精度
    let chirp: Vec<Complex64> = (0..n as u64)
        .map(|k| {
            let k2 = (k * k) % two_n;
            Complex64::from_polar(1.0, -PI * k2 as f64 / n as f64)
        })
        .collect();

    let zero = Complex64::new(0.0, 0.0);

    let mut a = vec![zero; m];
    for (k, (x, c)) in input.iter().zip(&chirp).enumerate() {
        a[k] = x * c;
    }

    let mut b = vec![zero; m];
    b[0] = chirp[0].conj();
    for k in 1..n {
        let c = chirp[k].conj();
        b[k] = c;
        b[m - k] = c;
    }

    radix2(&mut a);
    radix2(&mut b);
    for (x, y) in a.iter_mut().zip(&b) {
        *x *= *y;
    }

    // 逆变换：conj -> 正变换 -> conj，再除以 m
    for x in a.iter_mut() {
        *x = x.conj();
    }
    radix2(&mut a);
    let scale = 1.0 / m as f64;

    chirp
        .iter()
        .enumerate()
        .map(|(k, c)| a[k].conj() * scale * c)
        .collect()
}
