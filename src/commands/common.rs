//! # 子命令共享逻辑
//!
//! 信号读取、预处理、输出格式推断、结果写出与批量汇总。
//!
//! ## 依赖关系
//! - 被 `commands/` 下各子命令使用
//! - 使用 `cli/common.rs` 的参数组
//! - 使用 `parsers/`, `spectral/`, `batch/`

use crate::batch::{BatchResult, FileCollector};
use crate::cli::common::{InputArgs, OutputFormat, PlotArgs, PreprocessArgs};
use crate::error::{Result, RtspecError};
use crate::models::{FrequencyUnit, Signal, Spectrum, SpectrumComponent};
use crate::parsers::{self, SignalOptions};
use crate::spectral::{export, filter, plot, SpectralPeak};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 失败列表最多显示的条目
const MAX_LISTED_FAILURES: usize = 10;

/// 读取信号文件
pub fn load_signal(path: &Path, input: &InputArgs) -> Result<Signal> {
    let options = SignalOptions {
        column: input.column,
        dt: input.dt,
    };
    parsers::parse_signal_file(path, &options)
}

/// 依次应用去噪与指数衰减
pub fn preprocess(signal: Signal, args: &PreprocessArgs) -> Result<Signal> {
    let mut values = signal.values.clone();

    if let Some(level) = args.denoise {
        if level < 0.0 || !level.is_finite() {
            return Err(RtspecError::InvalidArgument(format!(
                "denoise level must be non-negative, got {}",
                level
            )));
        }
        values = filter::denoise(&values, level);
    }

    if let Some(tau) = args.damp {
        values = filter::damp(&values, signal.dt, tau)?;
    }

    Ok(signal.with_values(values))
}

/// 从文件扩展名推断输出格式
pub fn guess_format_from_extension(path: &Path) -> OutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => OutputFormat::Svg,
        Some("csv") => OutputFormat::Csv,
        Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
        _ => OutputFormat::Png,
    }
}

/// 批量模式的输出目录
///
/// `-o` 带扩展名（如默认的 `ft_spectrum.png`）时去掉扩展名作为目录名。
pub fn batch_output_dir(output: &Path) -> PathBuf {
    if output.extension().is_some() {
        output.with_extension("")
    } else {
        output.to_path_buf()
    }
}

/// 批量模式中单个输入对应的输出文件：`<stem>_<suffix>.<ext>`
pub fn batch_output_path(
    output_dir: &Path,
    input: &Path,
    suffix: &str,
    format: OutputFormat,
) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("signal");
    output_dir.join(format!("{}_{}.{}", stem, suffix, format.extension()))
}

/// 收集批量模式的输入文件并创建输出目录
pub fn collect_batch_inputs(input: &InputArgs, output_dir: &Path) -> Result<Vec<PathBuf>> {
    output::print_info(&format!("Batch mode: directory '{}'", input.input.display()));

    let files = FileCollector::new(input.input.clone())
        .with_pattern(&input.pattern)?
        .recursive(input.recursive)
        .excluding(output_dir)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            input.pattern
        ));
        return Ok(files);
    }

    output::print_info(&format!("Found {} signal files", files.len()));

    fs::create_dir_all(output_dir).map_err(|e| RtspecError::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    Ok(files)
}

/// 输入既不是文件也不是目录
pub fn missing_input(input: &Path) -> RtspecError {
    RtspecError::FileNotFound {
        path: input.display().to_string(),
    }
}

/// 组装绘图样式
pub fn plot_style(args: &PlotArgs, default_title: &str, format: OutputFormat) -> plot::PlotStyle {
    plot::PlotStyle {
        title: args
            .title
            .clone()
            .unwrap_or_else(|| default_title.to_string()),
        width: args.width,
        height: args.height,
        use_svg: format == OutputFormat::Svg,
    }
}

/// 按格式写出谱
///
/// CSV 保存全部分量，XY 与图像只包含所选分量。
pub fn write_spectrum(
    spectrum: &Spectrum,
    component: SpectrumComponent,
    peaks: &[SpectralPeak],
    method: &str,
    output: &Path,
    format: OutputFormat,
    style: &plot::PlotStyle,
) -> Result<()> {
    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            plot::generate_spectrum_plot(spectrum, component, peaks, output, style)
        }
        OutputFormat::Csv => export::spectrum_to_csv(spectrum, output),
        OutputFormat::Xy => export::spectrum_to_xy(spectrum, component, method, output),
    }
}

/// 按格式写出时域信号
pub fn write_signal(
    signal: &Signal,
    output: &Path,
    format: OutputFormat,
    style: &plot::PlotStyle,
) -> Result<()> {
    match format {
        OutputFormat::Png | OutputFormat::Svg => plot::generate_signal_plot(signal, output, style),
        OutputFormat::Csv => export::signal_to_csv(signal, output),
        OutputFormat::Xy => export::signal_to_xy(signal, output),
    }
}

/// 打印峰位表格
pub fn print_peak_table(peaks: &[SpectralPeak], unit: FrequencyUnit, component: SpectrumComponent) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct PeakRow {
        #[tabled(rename = "#")]
        rank: usize,
        #[tabled(rename = "ω")]
        frequency: String,
        #[tabled(rename = "Intensity")]
        intensity: String,
    }

    let rows: Vec<PeakRow> = peaks
        .iter()
        .enumerate()
        .map(|(i, p)| PeakRow {
            rank: i + 1,
            frequency: format!("{:.5} {}", p.frequency, unit.label()),
            intensity: format!("{:.6e}", p.intensity),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Top {} Peaks ({} part)", rows.len(), component));
        println!("{}", Table::new(&rows));
    }
}

/// 打印批量处理统计
pub fn print_batch_summary(result: &BatchResult) {
    for msg in &result.messages {
        output::print_success(msg);
    }
    if !result.skips.is_empty() {
        output::print_warning(&format!(
            "{} outputs exist (pass --overwrite to rewrite), e.g. {}",
            result.skips.len(),
            result.skips[0]
        ));
    }

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} files, {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(MAX_LISTED_FAILURES) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > MAX_LISTED_FAILURES {
            output::print_warning(&format!(
                "  ... and {} more",
                result.failures.len() - MAX_LISTED_FAILURES
            ));
        }
    }
}
