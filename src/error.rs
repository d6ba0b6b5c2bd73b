use std::io;
use thiserror::Error;
use tokio::sync::AcquireError;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum AppError {
    // IOまわりのエラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ASPA JSON のデシリアライズ失敗
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // 汎用的なパースエラー
    #[error("Parse error: {0}")]
    ParseError(String),

    // 特定の入力が不正だった場合など
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // 境界セグメントが必要な処理に空のAS_PATHが渡された
    #[error("AS_PATH cannot have length zero")]
    EmptyPath,

    // ホップ位置がAS_PATHの範囲外
    #[error("Invalid AS_PATH position: i={i} j={j}, must be below length {len}")]
    PositionOutOfRange { i: usize, j: usize, len: usize },

    // acquire_owned().await? のエラー
    #[error("Semaphore acquire error: {0}")]
    SemaphoreError(#[from] AcquireError),

    // tokio::spawn(…).await? のエラー
    #[error("Task join error: {0}")]
    JoinError(#[from] JoinError),

    // プレフィックスのパース失敗
    #[error("Address parse error: {0}")]
    AddrParseError(#[from] ipnet::AddrParseError),
}
