//! # filter 子命令实现
//!
//! 对时域信号去噪和/或乘以指数衰减，写出处理后的信号。
//!
//! ## 依赖关系
//! - 使用 `cli/filter.rs` 定义的 FilterArgs
//! - 使用 `spectral/filter.rs`（经 `commands/common.rs`）
//! - 使用 `batch/` 模块进行批量处理

use super::common;
use crate::batch::{BatchResult, BatchRunner, ProcessResult};
use crate::cli::common::OutputFormat;
use crate::cli::filter::FilterArgs;
use crate::error::{Result, RtspecError};
use crate::models::Signal;
use crate::spectral::filter::power_spectrum;
use crate::utils::output;

use std::path::Path;

/// 执行 filter 命令
pub fn execute(args: FilterArgs) -> Result<()> {
    output::print_header("Signal Filtering");

    if args.preprocess.is_empty() {
        return Err(RtspecError::InvalidArgument(
            "nothing to do: pass --denoise and/or --damp".to_string(),
        ));
    }

    if args.input.input.is_file() {
        execute_single_file(&args)
    } else if args.input.input.is_dir() {
        execute_batch(&args).map(|_| ())
    } else {
        Err(common::missing_input(&args.input.input))
    }
}

/// 单文件模式
fn execute_single_file(args: &FilterArgs) -> Result<()> {
    let input = &args.input.input;
    output::print_info(&format!("Single file mode: '{}'", input.display()));

    let signal = common::load_signal(input, &args.input)?;
    if args.preprocess.denoise.is_some() {
        report_power(&signal);
    }

    let filtered = common::preprocess(signal, &args.preprocess)?;

    let format = args
        .format
        .unwrap_or_else(|| common::guess_format_from_extension(&args.output));
    write(&filtered, &args.output, format, args)?;

    output::print_written(&input.display().to_string(), &args.output.display().to_string());
    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &FilterArgs) -> Result<BatchResult> {
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
        let target = common::batch_output_path(&output_dir, file, "filtered", format);
        if target.exists() && !args.input.overwrite {
            return ProcessResult::Skipped(format!(
                "Output exists, skipping: {}",
                target.display()
            ));
        }

        let processed = common::load_signal(file, &args.input)
            .and_then(|s| common::preprocess(s, &args.preprocess))
            .and_then(|s| write(&s, &target, format, args));

        match processed {
            Ok(()) => ProcessResult::Success(format!("{} -> {}", file.display(), target.display())),
            Err(e) => ProcessResult::Failed(file.display().to_string(), e.to_string()),
        }
    })?;

    common::print_batch_summary(&result);
    Ok(result)
}

fn write(signal: &Signal, target: &Path, format: OutputFormat, args: &FilterArgs) -> Result<()> {
    let style = common::plot_style(&args.plot, &signal.name, format);
    common::write_signal(signal, target, format, &style)
}

/// 显示功率谱范围，便于选择去噪阈值
fn report_power(signal: &Signal) {
    let power = power_spectrum(&signal.values);
    let (min, max) = power
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    output::print_info(&format!(
        "Power spectrum |f̂|²/n spans {:.3e} .. {:.3e}",
        min, max
    ));
}
