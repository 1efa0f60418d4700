//! # 谱与信号数据导出
//!
//! 导出数据到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: 谱为 frequency, real, imag, abs；信号为 time, value
//! - XY: `#` 注释头 + 两列制表符分隔数据
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/` 的 Signal, Spectrum 结构
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::error::{Result, RtspecError};
use crate::models::{Signal, Spectrum, SpectrumComponent};

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 谱的一行 CSV 记录
#[derive(Debug, Serialize)]
struct SpectrumRecord {
    frequency: f64,
    real: f64,
    imag: f64,
    abs: f64,
}

/// 信号的一行 CSV 记录
#[derive(Debug, Serialize)]
struct SignalRecord {
    time: f64,
    value: f64,
}

/// 导出完整复数谱为 CSV 格式
pub fn spectrum_to_csv(spectrum: &Spectrum, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (frequency, value) in spectrum.frequencies.iter().zip(&spectrum.values) {
        wtr.serialize(SpectrumRecord {
            frequency: *frequency,
            real: value.re,
            imag: value.im,
            abs: value.norm(),
        })?;
    }

    wtr.flush().map_err(|e| RtspecError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出时域信号为 CSV 格式
pub fn signal_to_csv(signal: &Signal, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (time, value) in signal.points() {
        wtr.serialize(SignalRecord { time, value })?;
    }

    wtr.flush().map_err(|e| RtspecError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出谱的某一分量为 XY 格式
pub fn spectrum_to_xy(
    spectrum: &Spectrum,
    component: SpectrumComponent,
    method: &str,
    output_path: &Path,
) -> Result<()> {
    let header = [
        format!("Spectrum: {} ({})", spectrum.name, method),
        format!(
            "Columns: frequency ({}), {} part",
            spectrum.unit.label(),
            component
        ),
    ];
    write_xy(output_path, &header, &spectrum.points(component))
}

/// 导出时域信号为 XY 格式
pub fn signal_to_xy(signal: &Signal, output_path: &Path) -> Result<()> {
    let header = [
        format!("Signal: {}", signal.name),
        format!("dt = {}", signal.dt),
        "Columns: time, value".to_string(),
    ];
    write_xy(output_path, &header, &signal.points())
}

fn write_xy(output_path: &Path, header: &[String], data: &[(f64, f64)]) -> Result<()> {
    let write_err = |e: std::io::Error| RtspecError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut file = BufWriter::new(file);

    for line in header {
        writeln!(file, "# {}", line).map_err(write_err)?;
    }
    writeln!(file, "#").map_err(write_err)?;

    for (x, y) in data {
        writeln!(file, "{:.8e}\t{:.8e}", x, y).map_err(write_err)?;
    }

    file.flush().map_err(write_err)?;
    Ok(())
}
