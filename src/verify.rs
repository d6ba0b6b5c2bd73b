//! AS_PATH の ASPA 検証。
//!
//! パスは index 0 が起点側、末尾が隣接AS側の順で受け取る。
//! どの関数も1回の前方走査で終わり、ストアは読むだけ。

use crate::aspa::{AspaStore, Authorization};
use crate::common::Afi;
use crate::error::AppError;
use crate::path::Segment;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// パス全体の判定結果。
/// 宣言順がそのまま深刻度順 (Valid < Unknown < Unverifiable < Invalid)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Verdict {
    Valid,
    Unknown,
    Unverifiable,
    Invalid,
}

impl From<Authorization> for Verdict {
    fn from(auth: Authorization) -> Self {
        match auth {
            Authorization::Valid => Verdict::Valid,
            Authorization::Invalid => Verdict::Invalid,
            Authorization::Unknown => Verdict::Unknown,
        }
    }
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Valid => "Valid",
            Verdict::Unknown => "Unknown",
            Verdict::Unverifiable => "Unverifiable",
            Verdict::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// どの形のパスとして検証するか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// カスタマーから受信（上り一方向）
    Upstream,
    /// プロバイダ/ピアから受信（上り＋下り）
    Downstream,
    /// IX のルートサーバ経由
    Exchange,
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upstream" | "up" | "upflow" => Ok(Direction::Upstream),
            "downstream" | "down" | "downflow" => Ok(Direction::Downstream),
            "ix" | "exchange" => Ok(Direction::Exchange),
            _ => Err("Invalid direction. Must be 'upstream', 'downstream' or 'ix'"),
        }
    }
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Upstream => "upstream",
            Direction::Downstream => "downstream",
            Direction::Exchange => "ix",
        }
    }
}

/// 走査中の上り/下りの区間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fragment {
    Ascending,
    Descending,
}

/// 隣接ペアを取り出しながら深刻度を積み上げる走査状態
#[derive(Debug)]
struct Scan {
    prev: Option<u32>,
    severity: Verdict,
}

impl Scan {
    fn new() -> Self {
        Scan {
            prev: None,
            severity: Verdict::Valid,
        }
    }

    fn raise(&mut self, verdict: Verdict) {
        self.severity = self.severity.max(verdict);
    }

    /// セグメントを1つ進め、検査すべき (手前, 現在) のペアがあれば返す
    fn advance(&mut self, segment: &Segment) -> Option<(u32, u32)> {
        if !segment.is_sequence() {
            // SET/CONFED でつながりが途切れる
            self.prev = None;
            self.raise(Verdict::Unverifiable);
            return None;
        }

        match self.prev.replace(segment.asn) {
            None => None,
            // プリペンド
            Some(prev) if prev == segment.asn => None,
            Some(prev) => Some((prev, segment.asn)),
        }
    }
}

/// 上り一方向 (customer → provider) のパスを検証する
pub fn check_upflow(store: &AspaStore, path: &[Segment], neighbor_as: u32, afi: Afi) -> Verdict {
    let Some(last) = path.last() else {
        return Verdict::Invalid;
    };
    if last.is_sequence() && last.asn != neighbor_as {
        return Verdict::Invalid;
    }

    let mut scan = Scan::new();
    for segment in path {
        if let Some((customer, provider)) = scan.advance(segment) {
            match store.is_authorized_provider(customer, provider, afi) {
                Authorization::Invalid => return Verdict::Invalid,
                auth => scan.raise(auth.into()),
            }
        }
    }
    scan.severity
}

/// 上りの後に下りが続くパスを検証する。
///
/// 上り区間で最初に見つかった Invalid は頂点とみなして下り区間に切り替える。
/// 下り区間で逆向きの Invalid がもう一つ見つかった時点でリークと判定する。
/// `from_exchange` が真なら末尾ASと隣接ASの一致は要求しない。
pub fn check_downflow(
    store: &AspaStore,
    path: &[Segment],
    neighbor_as: u32,
    afi: Afi,
    from_exchange: bool,
) -> Verdict {
    let Some(last) = path.last() else {
        return Verdict::Invalid;
    };
    if last.is_sequence() && !from_exchange && last.asn != neighbor_as {
        return Verdict::Invalid;
    }

    let mut scan = Scan::new();
    let mut fragment = Fragment::Ascending;

    for segment in path {
        let Some((prev, current)) = scan.advance(segment) else {
            continue;
        };

        match fragment {
            Fragment::Ascending => match store.is_authorized_provider(prev, current, afi) {
                Authorization::Invalid => fragment = Fragment::Descending,
                auth => scan.raise(auth.into()),
            },
            // 下り区間では prev が current のプロバイダであるべき
            Fragment::Descending => match store.is_authorized_provider(current, prev, afi) {
                Authorization::Invalid => return Verdict::Invalid,
                auth => scan.raise(auth.into()),
            },
        }
    }
    scan.severity
}

/// IX 経由で受信したパスを検証する。
/// 末尾ASが宣言された隣接ASと違う場合は、末尾ASを隣接ASとみなして上り検証に回す。
pub fn check_at_exchange(
    store: &AspaStore,
    path: &[Segment],
    neighbor_as: u32,
    afi: Afi,
) -> Verdict {
    let Some(last) = path.last() else {
        return Verdict::Invalid;
    };

    if last.asn != neighbor_as {
        check_upflow(store, path, last.asn, afi)
    } else {
        check_downflow(store, path, neighbor_as, afi, true)
    }
}

/// 空パスをエラーとして扱う検証の入口
pub fn verify(
    store: &AspaStore,
    path: &[Segment],
    neighbor_as: u32,
    afi: Afi,
    direction: Direction,
) -> Result<Verdict, AppError> {
    if path.is_empty() {
        return Err(AppError::EmptyPath);
    }

    Ok(match direction {
        Direction::Upstream => check_upflow(store, path, neighbor_as, afi),
        Direction::Downstream => check_downflow(store, path, neighbor_as, afi, false),
        Direction::Exchange => check_at_exchange(store, path, neighbor_as, afi),
    })
}

/// 位置 `j` のASが位置 `i` のASの認可済みプロバイダかどうか。
/// セグメント種別は見ない。
pub fn classify_hop(
    store: &AspaStore,
    path: &[Segment],
    i: usize,
    j: usize,
    afi: Afi,
) -> Result<Authorization, AppError> {
    if path.is_empty() {
        return Err(AppError::EmptyPath);
    }
    let len = path.len();
    if i >= len || j >= len {
        return Err(AppError::PositionOutOfRange { i, j, len });
    }

    Ok(store.is_authorized_provider(path[i].asn, path[j].asn, afi))
}
