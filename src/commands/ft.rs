//! # ft 子命令实现
//!
//! 对时域信号做离散 Fourier 变换，输出谱图或谱数据。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 可选去噪/衰减预处理
//! - 补零或截断到指定 FFT 点数
//! - 输出 PNG/SVG 图像或 CSV/XY 数据，并报告主要谱峰
//!
//! ## 依赖关系
//! - 使用 `cli/ft.rs` 定义的 FtArgs
//! - 使用 `spectral/transform.rs` 计算谱
//! - 使用 `batch/` 模块进行批量处理

use super::common;
use crate::batch::{BatchResult, BatchRunner, ProcessResult};
use crate::cli::common::OutputFormat;
use crate::cli::ft::FtArgs;
use crate::error::Result;
use crate::models::Spectrum;
use crate::spectral::{peaks, transform, SpectralPeak};
use crate::utils::output;

use std::path::Path;

/// 执行 ft 命令
pub fn execute(args: FtArgs) -> Result<()> {
    output::print_header("Fourier-Transform Spectrum");

    if args.input.input.is_file() {
        execute_single_file(&args)
    } else if args.input.input.is_dir() {
        execute_batch(&args).map(|_| ())
    } else {
        Err(common::missing_input(&args.input.input))
    }
}

/// 单文件模式
fn execute_single_file(args: &FtArgs) -> Result<()> {
    let input = &args.input.input;
    output::print_info(&format!("Single file mode: '{}'", input.display()));

    let (spectrum, found) = compute(input, args)?;
    output::print_info(&format!(
        "{} frequency points, resolution {:.5} {}",
        spectrum.len(),
        resolution(&spectrum),
        spectrum.unit.label()
    ));

    let format = args
        .format
        .unwrap_or_else(|| common::guess_format_from_extension(&args.output));
    write(&spectrum, &found, &args.output, format, args)?;

    common::print_peak_table(&found, args.spectrum.unit, args.spectrum.component);
    output::print_success(&format!("Spectrum saved to '{}'", args.output.display()));
    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &FtArgs) -> Result<BatchResult> {
    let output_dir = common::batch_output_dir(&args.output);
    let files = common::collect_batch_inputs(&args.input, &output_dir)?;
    if files.is_empty() {
        return Ok(BatchResult::default());
    }

    let format = args
        .format
        .unwrap_or_else(|| common::guess_format_from_extension(&args.output));
    output::print_info(&format!("Output format: {:?}", format));

    let runner = BatchRunner::new(args.input.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));
    let result = runner.run(files, |file| {
        let target = common::batch_output_path(&output_dir, file, "ft", format);
        if target.exists() && !args.input.overwrite {
            return ProcessResult::Skipped(format!(
                "Output exists, skipping: {}",
                target.display()
            ));
        }

        match compute(file, args).and_then(|(s, p)| write(&s, &p, &target, format, args)) {
            Ok(()) => ProcessResult::Success(format!("{} -> {}", file.display(), target.display())),
            Err(e) => ProcessResult::Failed(file.display().to_string(), e.to_string()),
        }
    })?;

    common::print_batch_summary(&result);
    Ok(result)
}

/// 读取、预处理并变换单个信号
fn compute(input: &Path, args: &FtArgs) -> Result<(Spectrum, Vec<SpectralPeak>)> {
    let signal = common::load_signal(input, &args.input)?;
    let signal = common::preprocess(signal, &args.preprocess)?;

    let spectrum = transform::transform_signal(&signal, args.spectrum.norm, args.points)?
        .to_unit(args.spectrum.unit);

    let found = peaks::top_peaks(
        &spectrum.component(args.spectrum.component),
        &spectrum.frequencies,
        args.spectrum.peaks,
    );

    Ok((spectrum, found))
}

fn write(
    spectrum: &Spectrum,
    found: &[SpectralPeak],
    target: &Path,
    format: OutputFormat,
    args: &FtArgs,
) -> Result<()> {
    let style = common::plot_style(&args.plot, &spectrum.name, format);
    let labels: &[SpectralPeak] = if args.spectrum.label_peaks { found } else { &[] };
    common::write_spectrum(
        spectrum,
        args.spectrum.component,
        labels,
        "FT",
        target,
        format,
        &style,
    )
}

/// 相邻频率点间隔
fn resolution(spectrum: &Spectrum) -> f64 {
    match spectrum.frequencies.as_slice() {
        [first, second, ..] => second - first,
        _ => 0.0,
    }
}
