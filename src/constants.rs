/// 定数の共通化

/// AS0 は予約済み。実在のASとしては扱わない (RFC 7607)
pub const RESERVED_ASN: u32 = 0;

/// バッチ検証の同時実行タスク数の既定値
pub const DEFAULT_CONCURRENCY: usize = 4;

/// 1タスクが受け持つ経路数
pub const ROUTES_PER_TASK: usize = 512;
