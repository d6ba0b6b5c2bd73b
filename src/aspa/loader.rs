/// RPKIバリデータ(Routinator等)が出力するASPA JSONからストアを構築する実装。
use super::store::{AspaStore, AspaStoreBuilder};
use crate::common::{Afi, parse_asn};
use crate::constants::RESERVED_ASN;
use crate::error::AppError;
use serde::Deserialize;
use std::path::Path;

/// ASPA JSON に含まれる最小限のフィールドだけ定義
#[derive(Debug, Deserialize)]
struct AspasJson {
    aspas: Vec<AspaEntry>,
}

#[derive(Debug, Deserialize)]
struct AspaEntry {
    customer: AsnValue, // 例: "AS64496"
    #[serde(default)]
    afi: Option<String>, // 例: "ipv4"。無ければ両ファミリ
    #[serde(default)]
    providers: Vec<AsnValue>, // 例: ["AS64497", 64498]
}

/// "AS64500" / "64500" / 64500 のいずれも受け付ける
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AsnValue {
    Num(u32),
    Text(String),
}

impl AsnValue {
    fn to_asn(&self) -> Result<u32, AppError> {
        match self {
            AsnValue::Num(n) => Ok(*n),
            AsnValue::Text(s) => parse_asn(s),
        }
    }
}

/// JSON文字列からストアを構築
pub fn parse_aspa_json(json_str: &str) -> Result<AspaStore, AppError> {
    let parsed: AspasJson = serde_json::from_str(json_str)?;

    let mut builder = AspaStoreBuilder::default();
    // 空ファイルでも両ファミリは「レコード0件」として存在させる
    for afi in Afi::ALL {
        builder.family(afi);
    }

    for entry in parsed.aspas {
        let customer = entry.customer.to_asn()?;
        if customer == RESERVED_ASN {
            return Err(AppError::InvalidInput(
                "AS0 cannot be an ASPA customer".into(),
            ));
        }

        let providers = entry
            .providers
            .iter()
            .map(AsnValue::to_asn)
            .collect::<Result<Vec<u32>, AppError>>()?;

        match entry.afi.as_deref() {
            Some(afi_str) => {
                let afi: Afi = afi_str
                    .parse()
                    .map_err(|e: &str| AppError::ParseError(format!("{e}: {afi_str}")))?;
                builder.insert(afi, customer, providers);
            }
            None => {
                for afi in Afi::ALL {
                    builder.insert(afi, customer, providers.iter().copied());
                }
            }
        }
    }

    Ok(builder.build())
}

/// ファイルから読み込み、ストアを返す
pub async fn load_aspa_file<P: AsRef<Path>>(path: P) -> Result<AspaStore, AppError> {
    let json_str = tokio::fs::read_to_string(path.as_ref()).await?;
    let store = parse_aspa_json(&json_str)?;
    log::debug!(
        "Loaded ASPA records from {}: IPv4={} IPv6={}",
        path.as_ref().display(),
        store.customer_count(Afi::V4),
        store.customer_count(Afi::V6)
    );
    Ok(store)
}
