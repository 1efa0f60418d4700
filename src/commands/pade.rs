//! # pade 子命令实现
//!
//! 用 Padé 近似计算时域信号的频域谱。相比直接 DFT，Padé 谱在较短的
//! 传播时间下也能给出平滑、分辨率不受 `2π/T` 限制的谱线。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - Toeplitz 或直接构造分母方程组
//! - 在指定频率范围内等距采样
//!
//! ## 依赖关系
//! - 使用 `cli/pade.rs` 定义的 PadeArgs
//! - 使用 `spectral/pade.rs` 求解近似
//! - 使用 `utils/progress.rs` 显示求解进度

use super::common;
use crate::batch::{BatchResult, BatchRunner, ProcessResult};
use crate::cli::common::{parse_frequency_range, OutputFormat};
use crate::cli::pade::PadeArgs;
use crate::error::{Result, RtspecError};
use crate::models::Spectrum;
use crate::spectral::pade::linspace;
use crate::spectral::{peaks, Pade, SpectralPeak};
use crate::utils::{output, progress};

use std::path::Path;

/// 执行 pade 命令
pub fn execute(args: PadeArgs) -> Result<()> {
    output::print_header("Padé-Approximant Spectrum");

    // 参数在进入计算前检查一次
    frequency_grid(&args)?;

    if args.input.input.is_file() {
        execute_single_file(&args)
    } else if args.input.input.is_dir() {
        execute_batch(&args).map(|_| ())
    } else {
        Err(common::missing_input(&args.input.input))
    }
}

/// 单文件模式
fn execute_single_file(args: &PadeArgs) -> Result<()> {
    let input = &args.input.input;
    output::print_info(&format!("Single file mode: '{}'", input.display()));

    let (spectrum, found) = compute(input, args, true)?;

    let format = args
        .format
        .unwrap_or_else(|| common::guess_format_from_extension(&args.output));
    write(&spectrum, &found, &args.output, format, args)?;

    common::print_peak_table(&found, args.spectrum.unit, args.spectrum.component);
    output::print_success(&format!("Spectrum saved to '{}'", args.output.display()));
    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &PadeArgs) -> Result<BatchResult> {
    let output_dir = common::batch_output_dir(&args.output);
    let files = common::collect_batch_inputs(&args.input, &output_dir)?;
    if files.is_empty() {
        return Ok(BatchResult::default());
    }

    let format = args
        .format
        .unwrap_or_else(|| common::guess_format_from_extension(&args.output));
    output::print_info(&format!(
        "Output format: {:?}, solver: {}",
        format, args.solver
    ));

    let runner = BatchRunner::new(args.input.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));
    let result = runner.run(files, |file| {
        let target = common::batch_output_path(&output_dir, file, "pade", format);
        if target.exists() && !args.input.overwrite {
            return ProcessResult::Skipped(format!(
                "Output exists, skipping: {}",
                target.display()
            ));
        }

        match compute(file, args, false).and_then(|(s, p)| write(&s, &p, &target, format, args)) {
            Ok(()) => ProcessResult::Success(format!("{} -> {}", file.display(), target.display())),
            Err(e) => ProcessResult::Failed(file.display().to_string(), e.to_string()),
        }
    })?;

    common::print_batch_summary(&result);
    Ok(result)
}

/// 采样角频率（原子单位）
///
/// `--range` 以输出单位给出，先换算回 Hartree。
fn frequency_grid(args: &PadeArgs) -> Result<Vec<f64>> {
    let (min, max) = parse_frequency_range(&args.range).map_err(RtspecError::InvalidRange)?;
    if args.samples < 2 {
        return Err(RtspecError::InvalidArgument(format!(
            "need at least 2 frequency samples, got {}",
            args.samples
        )));
    }

    let factor = args.spectrum.unit.factor();
    Ok(linspace(min / factor, max / factor, args.samples))
}

/// 读取、预处理并求单个信号的 Padé 谱
fn compute(input: &Path, args: &PadeArgs, verbose: bool) -> Result<(Spectrum, Vec<SpectralPeak>)> {
    let signal = common::load_signal(input, &args.input)?;
    let signal = common::preprocess(signal, &args.preprocess)?;

    let pade = Pade::new(&signal.values, signal.dt)?;
    if verbose {
        if pade.trimmed() {
            output::print_warning("Odd number of points required - removing last data point");
        }
        output::print_info(&format!(
            "Loaded '{}': {} points, dt = {}, T = {:.2}, approximant order {}",
            signal.name,
            signal.len(),
            signal.dt,
            signal.duration(),
            pade.order()
        ));
    }

    let approximant = if verbose {
        let spinner = progress::create_spinner(&format!(
            "Solving {0}x{0} {1} system",
            pade.order(),
            args.solver
        ));
        let result = pade.build(args.solver);
        spinner.finish_and_clear();
        result?
    } else {
        pade.build(args.solver)?
    };

    let omegas = frequency_grid(args)?;
    let mut spectrum = approximant
        .approx(&omegas, args.spectrum.norm)
        .to_unit(args.spectrum.unit);
    spectrum.name = signal.name.clone();

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
    args: &PadeArgs,
) -> Result<()> {
    let style = common::plot_style(&args.plot, &spectrum.name, format);
    let labels: &[SpectralPeak] = if args.spectrum.label_peaks { found } else { &[] };
    common::write_spectrum(
        spectrum,
        args.spectrum.component,
        labels,
        "Padé",
        target,
        format,
        &style,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::models::spectrum::HARTREE_TO_EV;
    use approx::assert_relative_eq;
    use clap::Parser;

    fn parse(extra: &[&str]) -> PadeArgs {
        let mut argv = vec!["rtspec", "pade", "mu.dat"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Pade(args) => args,
            _ => panic!("expected pade subcommand"),
        }
    }

    #[test]
    fn test_frequency_grid_in_hartree() {
        let args = parse(&["--range", "0-2", "--samples", "5"]);
        let grid = frequency_grid(&args).unwrap();
        assert_eq!(grid, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_frequency_grid_converts_ev() {
        let args = parse(&["--range", "0-10", "--samples", "3", "--unit", "ev"]);
        let grid = frequency_grid(&args).unwrap();
        assert_relative_eq!(grid[2], 10.0 / HARTREE_TO_EV, epsilon = 1e-12);
    }

    #[test]
    fn test_frequency_grid_rejects_bad_input() {
        assert!(frequency_grid(&parse(&["--range", "3-1"])).is_err());
        assert!(frequency_grid(&parse(&["--samples", "1"])).is_err());
    }

    #[test]
    fn test_batch_writes_then_skips() {
        let dir = crate::commands::common::test_support::signal_dir();
        let input = dir.path().join("in");
        let out = dir.path().join("pade.csv");
        let argv = [
            "rtspec",
            "pade",
            input.to_str().unwrap(),
            "--samples",
            "50",
            "--range",
            "0-2",
            "-o",
            out.to_str().unwrap(),
        ];
        let args = match Cli::try_parse_from(argv).unwrap().command {
            Commands::Pade(args) => args,
            _ => panic!("expected pade subcommand"),
        };

        let first = execute_batch(&args).unwrap();
        assert_eq!((first.success, first.skipped, first.failed), (2, 0, 1));
        let written = dir.path().join("pade").join("mu_x_pade.csv");
        assert!(written.is_file());
        assert_eq!(std::fs::read_to_string(&written).unwrap().lines().count(), 51);

        let second = execute_batch(&args).unwrap();
        assert_eq!((second.success, second.skipped, second.failed), (0, 2, 1));
    }
}
