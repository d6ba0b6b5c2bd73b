use aspa_scope::{
    aspa::{AspaRegistry, loader::load_aspa_file},
    cli::Cli,
    common::{Afi, OutputFormat},
    error::AppError,
    output::{render_report, write_report},
    path::{DisplayPath, parse_as_path},
    process::{parse_routes, summarize, verify_routes},
    verify::{Direction, verify},
};
use chrono::Local;
use clap::Parser;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// アプリケーションのメインロジック
async fn run(args: Cli) -> Result<(), AppError> {
    let direction: Direction = args
        .direction
        .parse()
        .map_err(|e: &str| AppError::InvalidInput(e.into()))?;
    let output_format = OutputFormat::from_str(&args.output_format);

    let registry = AspaRegistry::new(load_aspa_file(&args.aspa_file).await?);

    // --path オプション: 1経路だけ検証して表示
    if let Some(text) = &args.as_path {
        let neighbor = args
            .neighbor
            .ok_or_else(|| AppError::InvalidInput("--path requires --neighbor <asn>".into()))?;
        let afi: Afi = args
            .afi
            .parse()
            .map_err(|e: &str| AppError::InvalidInput(e.into()))?;
        let path = parse_as_path(text)?;

        let store = registry.snapshot().await;
        let verdict = verify(&store, &path, neighbor, afi, direction)?;
        println!(
            "{} [{} {} neighbor AS{}]",
            verdict,
            DisplayPath(&path),
            afi.as_str(),
            neighbor
        );
        return Ok(());
    }

    // --input オプション: 経路リストをまとめて検証
    if let Some(input) = &args.input {
        let text = tokio::fs::read_to_string(input).await?;
        let (routes, failed_lines) = parse_routes(&text);
        if !failed_lines.is_empty() {
            log::warn!("{} line(s) could not be parsed: {:?}", failed_lines.len(), failed_lines);
        }

        let store = registry.snapshot().await;
        let results = verify_routes(store, routes, direction, args.concurrency).await?;
        let summary = summarize(&results);
        log::info!(
            "Verified {} routes: Valid={} Unknown={} Unverifiable={} Invalid={}",
            summary.total(),
            summary.valid,
            summary.unknown,
            summary.unverifiable,
            summary.invalid
        );

        match &args.output {
            Some(out) => {
                write_report(out, &results, direction, output_format, &args.mode).await?;
            }
            None => {
                let now_str = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
                print!(
                    "{}",
                    render_report(&results, direction, output_format, &now_str)?
                );
            }
        }
        return Ok(());
    }

    // どちらも指定されなかった場合
    Err(AppError::InvalidInput(
        "Please specify --path or --input.\nUse --help for usage.".into(),
    ))
}
