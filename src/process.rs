use crate::aspa::AspaStore;
use crate::common::{Afi, parse_peer_asn};
use crate::constants::ROUTES_PER_TASK;
use crate::error::AppError;
use crate::path::{DisplayPath, Segment, parse_as_path};
use crate::verify::{Direction, Verdict, verify};
use futures::future::join_all;
use ipnet::IpNet;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// 検証対象の1経路
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInput {
    pub prefix: IpNet,
    pub neighbor_as: u32,
    pub path: Vec<Segment>,
}

impl RouteInput {
    pub fn afi(&self) -> Afi {
        Afi::of(&self.prefix)
    }
}

/// 1経路分の検証結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub prefix: String,
    pub afi: Afi,
    pub neighbor_as: u32,
    pub as_path: String,
    pub verdict: Verdict,
}

/// 判定ごとの件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerdictSummary {
    pub valid: usize,
    pub unknown: usize,
    pub unverifiable: usize,
    pub invalid: usize,
}

impl VerdictSummary {
    pub fn total(&self) -> usize {
        self.valid + self.unknown + self.unverifiable + self.invalid
    }
}

/// `prefix|neighbor_asn|as_path` 形式の1行をパースする。
/// 空行とコメント行は None。
pub fn parse_route_line(line: &str) -> Result<Option<RouteInput>, AppError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let params: Vec<&str> = line.split('|').collect();
    if params.len() != 3 {
        return Err(AppError::ParseError(format!(
            "Expected 'prefix|neighbor|as_path': {line}"
        )));
    }

    let prefix: IpNet = params[0].trim().parse()?;
    let neighbor_as = parse_peer_asn(params[1])?;
    let path = parse_as_path(params[2])?;

    Ok(Some(RouteInput {
        prefix,
        neighbor_as,
        path,
    }))
}

/// 入力テキスト全体をパースする。
/// 不正な行はログに出してスキップし、その行番号を返す。
pub fn parse_routes(text: &str) -> (Vec<RouteInput>, Vec<usize>) {
    let mut routes = Vec::new();
    let mut failed_lines = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        match parse_route_line(line) {
            Ok(Some(route)) => routes.push(route),
            Ok(None) => {}
            Err(e) => {
                log::warn!("Skipping line {}: {e}", idx + 1);
                failed_lines.push(idx + 1);
            }
        }
    }

    (routes, failed_lines)
}

/// 1経路を検証して結果にまとめる
pub fn verify_route(
    store: &AspaStore,
    route: &RouteInput,
    direction: Direction,
) -> Result<RouteResult, AppError> {
    let afi = route.afi();
    let verdict = verify(store, &route.path, route.neighbor_as, afi, direction)?;
    Ok(RouteResult {
        prefix: route.prefix.to_string(),
        afi,
        neighbor_as: route.neighbor_as,
        as_path: DisplayPath(&route.path).to_string(),
        verdict,
    })
}

/// 複数経路を同じスナップショットに対して並行検証する。
/// 結果は入力順。
pub async fn verify_routes(
    store: Arc<AspaStore>,
    routes: Vec<RouteInput>,
    direction: Direction,
    concurrency: usize,
) -> Result<Vec<RouteResult>, AppError> {
    let max_concurrent = if concurrency == 0 { 1 } else { concurrency };
    let semaphore = Arc::new(Semaphore::new(max_concurrent));

    let mut handles = Vec::with_capacity(routes.len().div_ceil(ROUTES_PER_TASK));
    for chunk in routes.chunks(ROUTES_PER_TASK) {
        let chunk_owned = chunk.to_vec();
        let store_clone = Arc::clone(&store);
        let sem_clone = semaphore.clone();

        handles.push(tokio::spawn(async move {
            let _permit = sem_clone.acquire_owned().await?;
            chunk_owned
                .iter()
                .map(|route| verify_route(&store_clone, route, direction))
                .collect::<Result<Vec<_>, AppError>>()
        }));
    }

    let mut results = Vec::with_capacity(routes.len());
    for res in join_all(handles).await {
        // JoinError は AppError に伝播
        results.extend(res??);
    }

    Ok(results)
}

/// 判定ごとに件数を集計
pub fn summarize(results: &[RouteResult]) -> VerdictSummary {
    results
        .iter()
        .fold(VerdictSummary::default(), |mut acc, r| {
            match r.verdict {
                Verdict::Valid => acc.valid += 1,
                Verdict::Unknown => acc.unknown += 1,
                Verdict::Unverifiable => acc.unverifiable += 1,
                Verdict::Invalid => acc.invalid += 1,
            }
            acc
        })
}
