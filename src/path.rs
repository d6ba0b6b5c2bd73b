use crate::common::parse_peer_asn;
use crate::error::AppError;
use serde::Serialize;
use std::fmt;

/// AS_PATHセグメントの種別 (RFC 4271 / RFC 5065)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentKind {
    Sequence,
    Set,
    ConfederationSequence,
    ConfederationSet,
}

impl SegmentKind {
    /// プロバイダ/カスタマー判定に参加できるのは AS_SEQUENCE のみ
    pub fn is_sequence(self) -> bool {
        matches!(self, SegmentKind::Sequence)
    }
}

/// ASN 1つ分のセグメント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    pub asn: u32,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn new(asn: u32, kind: SegmentKind) -> Self {
        Segment { asn, kind }
    }

    pub fn sequence(asn: u32) -> Self {
        Segment::new(asn, SegmentKind::Sequence)
    }

    pub fn set(asn: u32) -> Self {
        Segment::new(asn, SegmentKind::Set)
    }

    pub fn confed_sequence(asn: u32) -> Self {
        Segment::new(asn, SegmentKind::ConfederationSequence)
    }

    pub fn confed_set(asn: u32) -> Self {
        Segment::new(asn, SegmentKind::ConfederationSet)
    }

    pub fn is_sequence(&self) -> bool {
        self.kind.is_sequence()
    }
}

/// ASNだけのリストを AS_SEQUENCE のパスにする（index 0 が起点側）
pub fn sequence_path(asns: &[u32]) -> Vec<Segment> {
    asns.iter().copied().map(Segment::sequence).collect()
}

/// 受信時の表記（左端が隣接AS、右端が起点AS）でパースする。
/// 戻り値は index 0 が起点側、末尾が隣接AS側。
///
/// 表記:
/// - `64500` / `AS64500` → AS_SEQUENCE
/// - `{64501,64502}` → AS_SET
/// - `(64503 64504)` → AS_CONFED_SEQUENCE
/// - `[64505 64506]` → AS_CONFED_SET
pub fn parse_as_path(text: &str) -> Result<Vec<Segment>, AppError> {
    let mut received = Vec::new();
    let mut group: Option<(SegmentKind, char)> = None;
    let mut token = String::new();

    for ch in text.chars() {
        match ch {
            '{' | '(' | '[' => {
                flush_token(&mut token, current_kind(group), &mut received)?;
                if group.is_some() {
                    return Err(AppError::ParseError(format!(
                        "Nested segment group in AS_PATH: {text}"
                    )));
                }
                group = Some(match ch {
                    '{' => (SegmentKind::Set, '}'),
                    '(' => (SegmentKind::ConfederationSequence, ')'),
                    _ => (SegmentKind::ConfederationSet, ']'),
                });
            }
            '}' | ')' | ']' => {
                match group {
                    Some((_, close)) if close == ch => {}
                    _ => {
                        return Err(AppError::ParseError(format!(
                            "Unbalanced '{ch}' in AS_PATH: {text}"
                        )));
                    }
                }
                flush_token(&mut token, current_kind(group), &mut received)?;
                group = None;
            }
            ',' => flush_token(&mut token, current_kind(group), &mut received)?,
            c if c.is_whitespace() => flush_token(&mut token, current_kind(group), &mut received)?,
            c => token.push(c),
        }
    }

    if group.is_some() {
        return Err(AppError::ParseError(format!(
            "Unterminated segment group in AS_PATH: {text}"
        )));
    }
    flush_token(&mut token, SegmentKind::Sequence, &mut received)?;

    if received.is_empty() {
        return Err(AppError::EmptyPath);
    }

    // 起点側を先頭にそろえる
    received.reverse();
    Ok(received)
}

fn current_kind(group: Option<(SegmentKind, char)>) -> SegmentKind {
    group.map_or(SegmentKind::Sequence, |(kind, _)| kind)
}

fn flush_token(
    token: &mut String,
    kind: SegmentKind,
    out: &mut Vec<Segment>,
) -> Result<(), AppError> {
    if token.is_empty() {
        return Ok(());
    }
    let asn = parse_peer_asn(token)?;
    out.push(Segment::new(asn, kind));
    token.clear();
    Ok(())
}

/// 受信時の表記に戻す（左端が隣接AS）。
/// セグメントはグループ境界を持たないため、同種の連続セグメントは1グループにまとめて表示する。
/// `{1} {2}` は `{1,2}` になるが、セグメント列（と判定）は変わらない。
pub struct DisplayPath<'a>(pub &'a [Segment]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut iter = self.0.iter().rev().peekable();
        while let Some(seg) = iter.next() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;

            let (open, close, sep) = match seg.kind {
                SegmentKind::Sequence => {
                    write!(f, "{}", seg.asn)?;
                    continue;
                }
                SegmentKind::Set => ('{', '}', ","),
                SegmentKind::ConfederationSequence => ('(', ')', " "),
                SegmentKind::ConfederationSet => ('[', ']', " "),
            };

            // 同種の連続セグメントは1グループにまとめる
            write!(f, "{open}{}", seg.asn)?;
            while let Some(next) = iter.next_if(|n| n.kind == seg.kind) {
                write!(f, "{sep}{}", next.asn)?;
            }
            write!(f, "{close}")?;
        }
        Ok(())
    }
}
