//! # 频域谱数据模型
//!
//! 存储 Fourier 变换或 Padé 近似得到的复数谱。
//!
//! ## 依赖关系
//! - 被 `spectral/` 构造
//! - 被 `commands/`, `spectral/export.rs`, `spectral/plot.rs` 使用

use clap::ValueEnum;
use num_complex::Complex64;

/// 1 Hartree 对应的 eV
pub const HARTREE_TO_EV: f64 = 27.211386245988;

/// 谱的分量
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum SpectrumComponent {
    /// Real part
    Real,
    /// Imaginary part (absorptive for a delta-kick dipole)
    #[default]
    Imag,
    /// Modulus
    Abs,
}

impl std::fmt::Display for SpectrumComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectrumComponent::Real => write!(f, "real"),
            SpectrumComponent::Imag => write!(f, "imag"),
            SpectrumComponent::Abs => write!(f, "abs"),
        }
    }
}

/// 频率单位
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    /// Atomic units (Hartree)
    #[default]
    Hartree,
    /// Electron volts
    Ev,
}

impl FrequencyUnit {
    /// 从原子单位换算到该单位的因子
    pub fn factor(self) -> f64 {
        match self {
            FrequencyUnit::Hartree => 1.0,
            FrequencyUnit::Ev => HARTREE_TO_EV,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FrequencyUnit::Hartree => "Eh",
            FrequencyUnit::Ev => "eV",
        }
    }
}

impl std::fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 复数谱
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// 来源信号名称
    pub name: String,
    /// 角频率
    pub frequencies: Vec<f64>,
    /// 复数谱值
    pub values: Vec<Complex64>,
    /// 频率单位
    pub unit: FrequencyUnit,
}

impl Spectrum {
    pub fn new(name: impl Into<String>, frequencies: Vec<f64>, values: Vec<Complex64>) -> Self {
        debug_assert_eq!(frequencies.len(), values.len());
        Spectrum {
            name: name.into(),
            frequencies,
            values,
            unit: FrequencyUnit::Hartree,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 提取某一实数分量
    pub fn component(&self, component: SpectrumComponent) -> Vec<f64> {
        self.values
            .iter()
            .map(|v| match component {
                SpectrumComponent::Real => v.re,
                SpectrumComponent::Imag => v.im,
                SpectrumComponent::Abs => v.norm(),
            })
            .collect()
    }

    /// (频率, 分量) 数据点
    pub fn points(&self, component: SpectrumComponent) -> Vec<(f64, f64)> {
        self.frequencies
            .iter()
            .copied()
            .zip(self.component(component))
            .collect()
    }

    /// 换算频率轴单位
    pub fn to_unit(mut self, unit: FrequencyUnit) -> Self {
        let scale = unit.factor() / self.unit.factor();
        for w in &mut self.frequencies {
            *w *= scale;
        }
        self.unit = unit;
        self
    }
}

/// 实部与虚部分别按各自最大绝对值归一化
///
/// 最大值为 0 的分量保持不变。
pub fn normalize_components(values: &mut [Complex64]) {
    let max_re = values.iter().map(|v| v.re.abs()).fold(0.0_f64, f64::max);
    let max_im = values.iter().map(|v| v.im.abs()).fold(0.0_f64, f64::max);

    for v in values.iter_mut() {
        if max_re > 0.0 {
            v.re /= max_re;
        }
        if max_im > 0.0 {
            v.im /= max_im;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_component_extraction() {
        let spectrum = Spectrum::new(
            "s",
            vec![0.1, 0.2],
            vec![Complex64::new(3.0, 4.0), Complex64::new(-1.0, 0.0)],
        );
        assert_eq!(spectrum.component(SpectrumComponent::Real), vec![3.0, -1.0]);
        assert_eq!(spectrum.component(SpectrumComponent::Imag), vec![4.0, 0.0]);
        assert_relative_eq!(spectrum.component(SpectrumComponent::Abs)[0], 5.0);
    }

    #[test]
    fn test_unit_conversion_round_trip() {
        let spectrum = Spectrum::new("s", vec![1.0], vec![Complex64::new(1.0, 0.0)]);
        let ev = spectrum.to_unit(FrequencyUnit::Ev);
        assert_relative_eq!(ev.frequencies[0], HARTREE_TO_EV);
        let back = ev.to_unit(FrequencyUnit::Hartree);
        assert_relative_eq!(back.frequencies[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_components_independent() {
        let mut values = vec![Complex64::new(2.0, -0.5), Complex64::new(-4.0, 0.25)];
        normalize_components(&mut values);
        assert_relative_eq!(values[0].re, 0.5);
        assert_relative_eq!(values[1].re, -1.0);
        assert_relative_eq!(values[0].im, -1.0);
        assert_relative_eq!(values[1].im, 0.5);
    }

    #[test]
    fn test_normalize_zero_component_untouched() {
        let mut values = vec![Complex64::new(2.0, 0.0), Complex64::new(1.0, 0.0)];
        normalize_components(&mut values);
        assert_relative_eq!(values[0].re, 1.0);
        assert!(values.iter().all(|v| v.im == 0.0 && v.im.is_finite()));
    }
}
