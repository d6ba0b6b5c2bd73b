use crate::constants::RESERVED_ASN;
use crate::error::AppError;
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ASPAレコードを分割するアドレスファミリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Afi {
    #[serde(rename = "ipv4")]
    V4,
    #[serde(rename = "ipv6")]
    V6,
}

impl FromStr for Afi {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ipv4" | "4" => Ok(Afi::V4),
            "ipv6" | "6" => Ok(Afi::V6),
            _ => Err("Invalid address family. Must be 'ipv4' or 'ipv6'"),
        }
    }
}

impl Afi {
    /// 両ファミリ（afi未指定のレコード展開用）
    pub const ALL: [Afi; 2] = [Afi::V4, Afi::V6];

    /// プレフィックスからファミリを判定
    pub fn of(net: &IpNet) -> Self {
        match net {
            IpNet::V4(_) => Afi::V4,
            IpNet::V6(_) => Afi::V6,
        }
    }

    /// ログやレポートで使うラベル用
    pub fn as_str(self) -> &'static str {
        match self {
            Afi::V4 => "IPv4",
            Afi::V6 => "IPv6",
        }
    }
}

/// 出力形式を管理するためのenum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Txt,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Txt, // デフォルトは Txt
        }
    }
}

/// "AS64500" -> 64500
/// AS0 かどうかは呼び出し側で判定する
pub fn parse_asn(s: &str) -> Result<u32, AppError> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("AS")
        .or_else(|| trimmed.strip_prefix("as"))
        .unwrap_or(trimmed);
    digits
        .parse::<u32>()
        .map_err(|e| AppError::ParseError(format!("ASN parse error ({s}): {e}")))
}

/// 経路入力の ASN。AS0 は受け付けない
pub fn parse_peer_asn(s: &str) -> Result<u32, AppError> {
    let asn = parse_asn(s)?;
    if asn == RESERVED_ASN {
        return Err(AppError::InvalidInput(format!("AS0 is reserved: {s}")));
    }
    Ok(asn)
}
