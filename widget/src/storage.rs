use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use web_sys::{window, Storage};
use wheel_core::{storage_key, Cadence, PersistenceAdapter, PersistenceError, SpinRecord};

pub const DEFAULT_KEY_BASE: &str = "prize-wheel";

/// The built-in fallback store: one JSON `SpinRecord` per
/// `"{base}:{userId}:{cadence}"` key in localStorage, overwritten on each
/// spin. Storage exceptions and unparsable values degrade to "no prior
/// record" / "write dropped".
#[derive(Debug, Clone)]
pub struct LocalStorageAdapter {
    key_base: String,
}

impl Default for LocalStorageAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_BASE)
    }
}

impl LocalStorageAdapter {
    pub fn new(key_base: impl Into<String>) -> Self {
        Self {
            key_base: key_base.into(),
        }
    }

    fn key(&self, user_id: &str, cadence: Cadence) -> String {
        storage_key(&self.key_base, user_id, cadence)
    }
}

fn local_storage() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

fn safe_get(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

fn safe_set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

fn safe_remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

impl PersistenceAdapter for LocalStorageAdapter {
    fn get_last_spin_at<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
    ) -> LocalBoxFuture<'a, Result<Option<DateTime<Utc>>, PersistenceError>> {
        async move {
            let Some(raw) = safe_get(&self.key(user_id, cadence)) else {
                return Ok(None);
            };
            match serde_json::from_str::<SpinRecord>(&raw) {
                Ok(record) => Ok(Some(record.at)),
                Err(err) => {
                    // Unparsable value is treated as absent.
                    log::warn!("ignoring unparsable spin record: {err}");
                    Ok(None)
                }
            }
        }
        .boxed_local()
    }

    fn set_spin_result<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
        record: &'a SpinRecord,
    ) -> LocalBoxFuture<'a, Result<(), PersistenceError>> {
        async move {
            let json = serde_json::to_string(record)
                .map_err(|err| PersistenceError(err.to_string()))?;
            safe_set(&self.key(user_id, cadence), &json);
            Ok(())
        }
        .boxed_local()
    }

    fn clear_spin_result<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
    ) -> LocalBoxFuture<'a, Result<(), PersistenceError>> {
        async move {
            safe_remove(&self.key(user_id, cadence));
            Ok(())
        }
        .boxed_local()
    }
}
