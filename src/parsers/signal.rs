//! # 时域信号文件解析器
//!
//! 读取实时传播输出的时间序列（如诱导偶极矩）。
//!
//! ## 格式说明
//! ```text
//! # dt = 0.05
//! # time      mu_x        mu_y        mu_z
//! 0.00    0.000000    0.000000    0.000000
//! 0.05    1.2e-05    -3.1e-07     4.4e-06
//! ...
//! ```
//! - 空白分隔文本（.dat/.txt/.xy/无扩展名）或 CSV（.csv）
//! - `#` 开头为注释行，非数值行（如表头）被跳过
//! - 单列：全部为信号值，时间步长来自命令行或注释
//! - 多列：第 0 列为时间，信号列按 1 起始的列号选择
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/signal.rs`
//! - 使用 `csv`, `regex`

use crate::error::{Result, RtspecError};
use crate::models::Signal;

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// 时间网格允许的最大偏差（相对于时间步长）
const UNIFORM_TOLERANCE: f64 = 1e-3;

/// `# dt = 0.05` / `# timestep: 0.05` 注释行
static DT_HEADER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*#\s*(?:dt|time_?step)\s*[=:]\s*([-+0-9.eE]+)").ok()
});

/// 信号读取选项
#[derive(Debug, Clone)]
pub struct SignalOptions {
    /// 信号所在列（多列文件，第 0 列为时间）
    pub column: usize,
    /// 强制指定时间步长
    pub dt: Option<f64>,
}

impl Default for SignalOptions {
    fn default() -> Self {
        SignalOptions {
            column: 1,
            dt: None,
        }
    }
}

/// 解析信号文件
pub fn parse_signal_file(path: &Path, options: &SignalOptions) -> Result<Signal> {
    let content = fs::read_to_string(path).map_err(|e| RtspecError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("signal");

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let rows = if is_csv {
        read_csv_rows(&content)
    } else {
        read_text_rows(&content)
    };

    build_signal(rows, header_dt(&content), name, options).map_err(|reason| {
        RtspecError::ParseError {
            format: if is_csv { "CSV" } else { "signal" }.to_string(),
            path: path.display().to_string(),
            reason,
        }
    })
}

/// 注释中的时间步长，如 `# dt = 0.05` 或 `# timestep: 0.05`
fn header_dt(content: &str) -> Option<f64> {
    DT_HEADER
        .as_ref()?
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// 把一行拆成数值，任一字段不是数值则返回 None
fn parse_numeric_row<'a>(fields: impl Iterator<Item = &'a str>) -> Option<Vec<f64>> {
    let row: Option<Vec<f64>> = fields
        .filter(|f| !f.is_empty())
        .map(|f| f.parse::<f64>().ok())
        .collect();
    row.filter(|r| !r.is_empty())
}

fn read_text_rows(content: &str) -> Vec<Vec<f64>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| parse_numeric_row(line.split(|c: char| c.is_whitespace() || c == ',')))
        .collect()
}

fn read_csv_rows(content: &str) -> Vec<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    reader
        .records()
        .filter_map(|r| r.ok())
        .filter_map(|record| parse_numeric_row(record.iter()))
        .collect()
}

fn build_signal(
    rows: Vec<Vec<f64>>,
    header_dt: Option<f64>,
    name: &str,
    options: &SignalOptions,
) -> std::result::Result<Signal, String> {
    let width = match rows.first() {
        Some(row) => row.len(),
        None => return Err("no numeric data rows".to_string()),
    };

    if let Some((line, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(format!(
            "data row {} has {} columns, expected {}",
            line + 1,
            row.len(),
            width
        ));
    }

    if width == 1 {
        let dt = options.dt.or(header_dt).unwrap_or(1.0);
        let values = rows.into_iter().map(|r| r[0]).collect();
        return Signal::new(name, dt, values).map_err(|e| e.to_string());
    }

    if options.column == 0 || options.column >= width {
        return Err(format!(
            "signal column {} out of range (file has value columns 1..={})",
            options.column,
            width - 1
        ));
    }

    let times: Vec<f64> = rows.iter().map(|r| r[0]).collect();
    let values: Vec<f64> = rows.iter().map(|r| r[options.column]).collect();
    let t0 = times[0];

    let dt = match options.dt {
        Some(dt) => dt,
        None if times.len() > 1 => infer_uniform_step(&times)?,
        None => header_dt.unwrap_or(1.0),
    };

    Signal::with_start(name, dt, t0, values).map_err(|e| e.to_string())
}

/// 由时间列推断等间隔步长
fn infer_uniform_step(times: &[f64]) -> std::result::Result<f64, String> {
    let n = times.len();
    let t0 = times[0];
    let dt = (times[n - 1] - t0) / (n - 1) as f64;

    if dt <= 0.0 || !dt.is_finite() {
        return Err("time column must be strictly increasing".to_string());
    }

    for (i, &t) in times.iter().enumerate() {
        let expected = t0 + i as f64 * dt;
        if (t - expected).abs() > UNIFORM_TOLERANCE * dt {
            return Err(format!(
                "non-uniform time grid at row {} (t = {}, expected {})",
                i + 1,
                t,
                expected
            ));
        }
    }

    Ok(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    /// 把文本写入临时 `<name>.dat` 后解析
    fn parse_content(content: &str, name: &str, options: &SignalOptions) -> Result<Signal> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("{}.dat", name));
        fs::write(&path, content).unwrap();
        parse_signal_file(&path, options)
    }

    #[test]
    fn test_header_dt_pattern() {
        assert_eq!(header_dt("# dt = 0.05\n1\n"), Some(0.05));
        assert_eq!(header_dt("  #TimeStep: 2e-2\n"), Some(0.02));
        assert_eq!(header_dt("# dipole\n0.0 1.0\n"), None);
    }

    #[test]
    fn test_parse_multicolumn_with_header() {
        let content = r#"
# RT-CCSD dipole
# time mu_x mu_y mu_z
0.00  0.0   1.0  -1.0
0.05  0.1   2.0  -2.0
0.10  0.2   3.0  -3.0
0.15  0.3   4.0  -4.0
"#;
        let options = SignalOptions {
            column: 3,
            dt: None,
        };
        let signal = parse_content(content, "dipole", &options).unwrap();
        assert_eq!(signal.name, "dipole");
        assert_eq!(signal.values, vec![-1.0, -2.0, -3.0, -4.0]);
        assert_relative_eq!(signal.dt, 0.05, epsilon = 1e-12);
        assert_relative_eq!(signal.times[0], 0.0);
    }

    #[test]
    fn test_parse_single_column_uses_header_dt() {
        let content = "# dt = 0.025\n1.0\n2.0\n3.0\n";
        let signal = parse_content(content, "x", &SignalOptions::default()).unwrap();
        assert_relative_eq!(signal.dt, 0.025);
        assert_eq!(signal.len(), 3);

        let content = "# timestep: 0.5\n1.0\n2.0\n";
        let signal = parse_content(content, "x", &SignalOptions::default()).unwrap();
        assert_relative_eq!(signal.dt, 0.5);
    }

    #[test]
    fn test_cli_dt_overrides() {
        let content = "# dt = 0.025\n0.0 1.0\n0.1 2.0\n0.2 3.0\n";
        let options = SignalOptions {
            column: 1,
            dt: Some(0.2),
        };
        let signal = parse_content(content, "x", &options).unwrap();
        assert_relative_eq!(signal.dt, 0.2);
    }

    #[test]
    fn test_single_column_defaults_to_unit_step() {
        let signal = parse_content("4\n5\n6\n", "x", &SignalOptions::default()).unwrap();
        assert_relative_eq!(signal.dt, 1.0);
    }

    #[test]
    fn test_non_uniform_time_rejected() {
        let content = "0.0 1.0\n0.1 2.0\n0.3 3.0\n0.4 4.0\n";
        let result = parse_content(content, "x", &SignalOptions::default());
        assert!(matches!(result, Err(RtspecError::ParseError { .. })));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let content = "0.0 1.0\n0.1 2.0 5.0\n";
        assert!(parse_content(content, "x", &SignalOptions::default()).is_err());
    }

    #[test]
    fn test_column_out_of_range() {
        let content = "0.0 1.0\n0.1 2.0\n";
        let options = SignalOptions {
            column: 2,
            dt: None,
        };
        assert!(parse_content(content, "x", &options).is_err());
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_content("# only comments\n", "x", &SignalOptions::default()).is_err());
    }

    #[test]
    fn test_parse_csv_file_skips_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mu.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "time,mu_x").unwrap();
        writeln!(file, "0.0,0.5").unwrap();
        writeln!(file, "0.2,0.25").unwrap();
        writeln!(file, "0.4,0.125").unwrap();
        drop(file);

        let signal = parse_signal_file(&path, &SignalOptions::default()).unwrap();
        assert_eq!(signal.name, "mu");
        assert_eq!(signal.values, vec![0.5, 0.25, 0.125]);
        assert_relative_eq!(signal.dt, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_file() {
        let result = parse_signal_file(Path::new("/nonexistent/mu.dat"), &SignalOptions::default());
        assert!(matches!(result, Err(RtspecError::FileReadError { .. })));
    }
}
