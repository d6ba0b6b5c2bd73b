use crate::common::OutputFormat;
use crate::error::AppError;
use crate::process::{RouteResult, VerdictSummary, summarize};
use crate::verify::Direction;
use chrono::Local;
use serde::Serialize;
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// JSON出力の形
#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: &'a str,
    direction: &'a str,
    summary: VerdictSummary,
    routes: &'a [RouteResult],
}

/// 汎用ヘッダー生成
pub fn make_header(now_str: &str, direction: Direction, summary: &VerdictSummary) -> String {
    format!(
        "# Generated at: {}\n# Direction: {}\n# Valid: {} Unknown: {} Unverifiable: {} Invalid: {}\n\n",
        now_str,
        direction.as_str(),
        summary.valid,
        summary.unknown,
        summary.unverifiable,
        summary.invalid
    )
}

/// 検証結果をレポート文字列にする
pub fn render_report(
    results: &[RouteResult],
    direction: Direction,
    output_format: OutputFormat,
    now_str: &str,
) -> Result<String, AppError> {
    let summary = summarize(results);

    match output_format {
        OutputFormat::Txt => {
            let body = results
                .iter()
                .map(|r| format!("{}|{}|{}|{}", r.prefix, r.neighbor_as, r.as_path, r.verdict))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(format!(
                "{}{}\n",
                make_header(now_str, direction, &summary),
                body
            ))
        }
        OutputFormat::Json => {
            let report = JsonReport {
                generated_at: now_str,
                direction: direction.as_str(),
                summary,
                routes: results,
            };
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// レポートをファイルに書き出す
pub async fn write_report<P: AsRef<Path>>(
    path: P,
    results: &[RouteResult],
    direction: Direction,
    output_format: OutputFormat,
    mode: &str,
) -> Result<(), AppError> {
    let now_str = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let content = render_report(results, direction, output_format, &now_str)?;

    match mode {
        "append" => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path.as_ref())
                .await?;
            file.write_all(content.as_bytes()).await?;
        }
        _ => {
            fs::write(path.as_ref(), &content).await?;
        }
    }

    log::info!("Report written: {}", path.as_ref().display());
    Ok(())
}
