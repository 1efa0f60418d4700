//! # fwhm 子命令实现
//!
//! 计算信号 Fourier 谱主峰的半高宽（FWHM），用于估计谱线展宽。
//!
//! ## 功能
//! - 单文件模式直接报告
//! - 目录模式并行计算，汇总为表格
//!
//! ## 依赖关系
//! - 使用 `cli/fwhm.rs` 定义的 FwhmArgs
//! - 使用 `spectral/transform.rs` 与 `spectral/peaks.rs`
//! - 使用 `rayon` 并行、`tabled` 输出表格

use super::common;
use crate::batch::FileCollector;
use crate::cli::fwhm::FwhmArgs;
use crate::error::{Result, RtspecError};
use crate::spectral::{peaks, transform};
use crate::utils::output;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 单个信号的测量结果
#[derive(Debug, Clone)]
struct Measurement {
    name: String,
    points: usize,
    dt: f64,
    width: f64,
}

/// 执行 fwhm 命令
pub fn execute(args: FwhmArgs) -> Result<()> {
    output::print_header("Spectral Line Width (FWHM)");

    if args.input.input.is_file() {
        let m = measure(&args.input.input, &args)?;
        output::print_info(&format!(
            "'{}': {} points, dt = {}, {} part",
            m.name, m.points, m.dt, args.component
        ));
        output::print_success(&format!(
            "FWHM = {:.6} {}",
            m.width,
            args.unit.label()
        ));
        Ok(())
    } else if args.input.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(common::missing_input(&args.input.input))
    }
}

/// 批量模式：并行测量，按文件名顺序汇总
fn execute_batch(args: &FwhmArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.input.display()));

    let files: Vec<PathBuf> = FileCollector::new(args.input.input.clone())
        .with_pattern(&args.input.pattern)?
        .recursive(args.input.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.input.pattern
        ));
        return Ok(());
    }

    let jobs = if args.input.jobs == 0 {
        num_cpus::get()
    } else {
        args.input.jobs
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| RtspecError::Other(format!("Failed to build thread pool: {}", e)))?;

    let results: Vec<(PathBuf, Result<Measurement>)> = pool.install(|| {
        files
            .par_iter()
            .map(|file| (file.clone(), measure(file, args)))
            .collect()
    });

    print_summary(&results, args);
    Ok(())
}

/// 读取、预处理、变换并测量单个信号
fn measure(input: &Path, args: &FwhmArgs) -> Result<Measurement> {
    let signal = common::load_signal(input, &args.input)?;
    let signal = common::preprocess(signal, &args.preprocess)?;

    let spectrum = transform::transform_signal(&signal, false, args.points)?;
    let width = peaks::fwhm(&spectrum.component(args.component), signal.dt)?;

    Ok(Measurement {
        name: signal.name.clone(),
        points: signal.len(),
        dt: signal.dt,
        width: width * args.unit.factor(),
    })
}

fn print_summary(results: &[(PathBuf, Result<Measurement>)], args: &FwhmArgs) {
    #[derive(Tabled)]
    struct WidthRow {
        #[tabled(rename = "Signal")]
        name: String,
        #[tabled(rename = "Points")]
        points: usize,
        #[tabled(rename = "dt")]
        dt: String,
        #[tabled(rename = "FWHM")]
        width: String,
    }

    let unit = args.unit.label();
    let rows: Vec<WidthRow> = results
        .iter()
        .filter_map(|(_, r)| r.as_ref().ok())
        .map(|m| WidthRow {
            name: m.name.clone(),
            points: m.points,
            dt: format!("{}", m.dt),
            width: format!("{:.6} {}", m.width, unit),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("FWHM of {} part", args.component));
        println!("{}", Table::new(&rows));
    }

    let failures: Vec<(&PathBuf, &RtspecError)> = results
        .iter()
        .filter_map(|(p, r)| r.as_ref().err().map(|e| (p, e)))
        .collect();

    output::print_separator();
    output::print_success(&format!(
        "Measured {} of {} signals",
        rows.len(),
        results.len()
    ));
    for (path, err) in failures {
        output::print_error(&format!("  {}: {}", path.display(), err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;

    fn parse(argv: &[&str]) -> FwhmArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Fwhm(args) => args,
            _ => panic!("expected fwhm subcommand"),
        }
    }

    #[test]
    fn test_measure_damped_cosine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mu.dat");

        // 衰减余弦的谱在 ω0 附近有一个 Lorentz 峰
        let dt = 0.1;
        let omega0 = 2.0;
        let tau = 20.0;
        let content: String = (0..2048)
            .map(|i| {
                let t = i as f64 * dt;
                format!("{:.6} {:.12e}\n", t, (omega0 * t).cos() * (-t / tau).exp())
            })
            .collect();
        fs::write(&path, content).unwrap();

        let path_str = path.to_str().unwrap();
        let args = parse(&["rtspec", "fwhm", path_str]);
        let m = measure(&path, &args).unwrap();

        assert_eq!(m.points, 2048);
        // |F| 的半高宽为 2√3/τ ≈ 0.17，离散网格下允许较宽容差
        assert!(m.width > 0.1 && m.width < 0.3, "width = {}", m.width);

        let ev = parse(&["rtspec", "fwhm", path_str, "--unit", "ev"]);
        let m_ev = measure(&path, &ev).unwrap();
        assert!((m_ev.width / m.width - crate::models::spectrum::HARTREE_TO_EV).abs() < 1e-9);
    }
}
