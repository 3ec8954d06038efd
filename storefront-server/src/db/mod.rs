//! Database Module
//!
//! In-memory record store for `shipping_zones` and `shipping_zone_rules`,
//! optionally backed by a JSON snapshot file that is loaded on open and
//! rewritten after every mutation.
//!
//! Repositories mutate under [`Database::lock_writes`] and undo the change
//! when [`Database::persist`] fails, so a refused write does not stay live.

pub mod repository;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storefront_shared::models::{ShippingZone, ShippingZoneRule};
use tokio::sync::{Mutex, MutexGuard};

use repository::{RepoError, RepoResult};

/// On-disk snapshot layout (one array per table)
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    shipping_zones: Vec<ShippingZone>,
    #[serde(default)]
    shipping_zone_rules: Vec<ShippingZoneRule>,
}

/// Record store shared by all repositories (cheap to clone)
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub(crate) zones: Arc<DashMap<String, ShippingZone>>,
    pub(crate) rules: Arc<DashMap<i64, ShippingZoneRule>>,
    snapshot_path: Option<Arc<PathBuf>>,
    write_lock: Arc<Mutex<()>>,
}

impl Database {
    /// Store with no snapshot file (tests, previews)
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store backed by `path`, loading it if the file exists
    pub async fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let db = Self {
            snapshot_path: Some(Arc::new(path.clone())),
            ..Default::default()
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes).map_err(|e| {
                    RepoError::Corrupted(format!("{}: {}", path.display(), e))
                })?;
                for zone in snapshot.shipping_zones {
                    db.zones.insert(zone.state_code.clone(), zone);
                }
                for rule in snapshot.shipping_zone_rules {
                    db.rules.insert(rule.id, rule);
                }
                tracing::info!(
                    path = %path.display(),
                    zones = db.zones.len(),
                    rules = db.rules.len(),
                    "Snapshot loaded"
                );
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No snapshot found, starting empty");
            }
            Err(e) => return Err(RepoError::Storage(e.to_string())),
        }

        Ok(db)
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref().map(PathBuf::as_path)
    }

    /// Serialize writers; hold the guard across the mutation and its persist
    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Persist the current contents to the snapshot file, if any
    ///
    /// Callers hold the write lock. Writes to a sibling temp file and renames it over the snapshot.
    pub(crate) async fn persist(&self, _writes: &MutexGuard<'_, ()>) -> RepoResult<()> {
        let Some(path) = self.snapshot_path.as_deref() else {
            return Ok(());
        };

        // Collect before awaiting; map guards must not live across .await
        let bytes = {
            let mut shipping_zones: Vec<ShippingZone> =
                self.zones.iter().map(|e| e.value().clone()).collect();
            shipping_zones.sort_by(|a, b| a.state_code.cmp(&b.state_code));
            let mut shipping_zone_rules: Vec<ShippingZoneRule> =
                self.rules.iter().map(|e| e.value().clone()).collect();
            shipping_zone_rules.sort_by_key(|r| r.id);

            serde_json::to_vec_pretty(&Snapshot {
                shipping_zones,
                shipping_zone_rules,
            })
            .map_err(|e| RepoError::Storage(e.to_string()))?
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepoError::Storage(e.to_string()))?;
        }

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| RepoError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| RepoError::Storage(e.to_string()))?;

        tracing::debug!(path = %path.display(), "Snapshot written");
        Ok(())
    }
}
