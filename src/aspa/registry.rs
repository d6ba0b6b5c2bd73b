use super::loader::load_aspa_file;
use super::store::AspaStore;
use crate::error::AppError;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// 検証で使うASPAストアの共有ハンドル。
/// リフレッシュは新しいストアを丸ごと差し替えるだけで、
/// 取得済みのスナップショットは差し替え後もそのまま使える。
#[derive(Debug, Default)]
pub struct AspaRegistry {
    current: RwLock<Arc<AspaStore>>,
    generation: AtomicU64,
}

impl AspaRegistry {
    pub fn new(store: AspaStore) -> Self {
        AspaRegistry {
            current: RwLock::new(Arc::new(store)),
            generation: AtomicU64::new(0),
        }
    }

    /// 現在のストアを取得
    pub async fn snapshot(&self) -> Arc<AspaStore> {
        self.current.read().await.clone()
    }

    /// 新しいストアを公開
    pub async fn publish(&self, store: AspaStore) {
        let fresh = Arc::new(store);
        *self.current.write().await = fresh;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Published ASPA store generation {generation}");
    }

    /// ファイルから再構築して公開する。
    /// 読み込みに失敗した場合は現在のストアを維持する。
    pub async fn reload_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AppError> {
        match load_aspa_file(path.as_ref()).await {
            Ok(store) => {
                self.publish(store).await;
                Ok(())
            }
            Err(e) => {
                log::warn!(
                    "Failed to reload ASPA records from {}: {e}",
                    path.as_ref().display()
                );
                Err(e)
            }
        }
    }

    /// これまでに公開した回数
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
