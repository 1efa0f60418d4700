//! # 谱与信号图表生成
//!
//! 使用 `plotters` 库绘制时域信号和频域谱。
//!
//! ## 功能
//! - 连续曲线，坐标轴自动缩放
//! - 可选谱峰标注
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/` 的 Signal, Spectrum 结构
//! - 使用 `spectral/peaks.rs` 的 SpectralPeak
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, RtspecError};
use crate::models::{Signal, Spectrum, SpectrumComponent};
use crate::spectral::peaks::SpectralPeak;

use plotters::prelude::*;
use std::path::Path;

/// 图表外观设置
#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

/// 峰位标注
struct Marker {
    x: f64,
    y: f64,
    label: String,
}

/// 绘制时域信号
pub fn generate_signal_plot(signal: &Signal, output_path: &Path, style: &PlotStyle) -> Result<()> {
    render(
        output_path,
        style,
        &signal.points(),
        &[],
        "Time (a.u.)",
        "Signal",
    )
}

/// 绘制频域谱的某一分量
pub fn generate_spectrum_plot(
    spectrum: &Spectrum,
    component: SpectrumComponent,
    peaks: &[SpectralPeak],
    output_path: &Path,
    style: &PlotStyle,
) -> Result<()> {
    let markers: Vec<Marker> = peaks
        .iter()
        .map(|p| Marker {
            x: p.frequency,
            y: p.intensity,
            label: format!("{:.4}", p.frequency),
        })
        .collect();

    let x_desc = format!("ω ({})", spectrum.unit.label());
    let y_desc = format!("{} part (arb. units)", component);

    render(
        output_path,
        style,
        &spectrum.points(component),
        &markers,
        &x_desc,
        &y_desc,
    )
}

fn render(
    output_path: &Path,
    style: &PlotStyle,
    data: &[(f64, f64)],
    markers: &[Marker],
    x_desc: &str,
    y_desc: &str,
) -> Result<()> {
    if style.use_svg {
        let root = SVGBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_line_chart(&root, data, markers, &style.title, x_desc, y_desc)?;
        root.present()
            .map_err(|e| RtspecError::PlotError(e.to_string()))?;
    } else {
        let root =
            BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_line_chart(&root, data, markers, &style.title, x_desc, y_desc)?;
        root.present()
            .map_err(|e| RtspecError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 数据范围，退化时补足一个单位宽度，并留 5% 余量
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }

    let margin = (max - min) * 0.05;
    (min - margin, max + margin)
}

/// 绘制折线图的核心逻辑
fn draw_line_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    data: &[(f64, f64)],
    markers: &[Marker],
    title: &str,
    x_desc: &str,
    y_desc: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| RtspecError::PlotError(format!("{:?}", e)))?;

    let x_min = data.first().map(|(x, _)| *x).unwrap_or(0.0);
    let x_max = data.last().map(|(x, _)| *x).unwrap_or(1.0);
    let (x_min, x_max) = if x_max > x_min {
        (x_min, x_max)
    } else {
        (x_min, x_min + 1.0)
    };
    let (y_min, y_max) = axis_range(data.iter().map(|(_, y)| *y));

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| RtspecError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| RtspecError::PlotError(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(
            data.iter().copied().filter(|(_, y)| y.is_finite()),
            line_color.stroke_width(2),
        ))
        .map_err(|e| RtspecError::PlotError(format!("{:?}", e)))?;

    // 标注峰位
    let marker_color = RGBColor(204, 51, 0);
    for marker in markers {
        chart
            .draw_series(std::iter::once(Circle::new(
                (marker.x, marker.y),
                4,
                marker_color.filled(),
            )))
            .map_err(|e| RtspecError::PlotError(format!("{:?}", e)))?;

        let text_style = ("sans-serif", 12).into_font().color(&BLACK);
        let offset = (y_max - y_min) * 0.02;
        chart
            .draw_series(std::iter::once(Text::new(
                marker.label.clone(),
                (marker.x, marker.y + offset),
                text_style,
            )))
            .map_err(|e| RtspecError::PlotError(format!("{:?}", e)))?;
    }

    Ok(())
}
