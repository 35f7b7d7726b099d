use crate::prize::{Cadence, SpinRecord};
use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// Storage key for the built-in adapters: `"{base}:{userId}:{cadence}"`.
pub fn storage_key(base: &str, user_id: &str, cadence: Cadence) -> String {
    format!("{}:{}:{}", base, user_id, cadence)
}

/// A failed adapter call. Persistence failures never block the spin flow;
/// callers log them and degrade to "never spun" / "write dropped".
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceError(pub String);

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "persistence error: {}", self.0)
    }
}

impl std::error::Error for PersistenceError {}

/// The pluggable eligibility store. The widget ships a localStorage-backed
/// implementation; hosts may inject anything that can read and overwrite
/// the latest record per `(user_id, cadence)` key.
///
/// `clear_spin_result` only matters for the administrative reset flow, so
/// adapters that never see a reset can keep the default no-op.
pub trait PersistenceAdapter {
    fn get_last_spin_at<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
    ) -> LocalBoxFuture<'a, Result<Option<DateTime<Utc>>, PersistenceError>>;

    fn set_spin_result<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
        record: &'a SpinRecord,
    ) -> LocalBoxFuture<'a, Result<(), PersistenceError>>;

    fn clear_spin_result<'a>(
        &'a self,
        _user_id: &'a str,
        _cadence: Cadence,
    ) -> LocalBoxFuture<'a, Result<(), PersistenceError>> {
        async { Ok(()) }.boxed_local()
    }
}

impl<T: PersistenceAdapter + ?Sized> PersistenceAdapter for &T {
    fn get_last_spin_at<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
    ) -> LocalBoxFuture<'a, Result<Option<DateTime<Utc>>, PersistenceError>> {
        (**self).get_last_spin_at(user_id, cadence)
    }

    fn set_spin_result<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
        record: &'a SpinRecord,
    ) -> LocalBoxFuture<'a, Result<(), PersistenceError>> {
        (**self).set_spin_result(user_id, cadence, record)
    }

    fn clear_spin_result<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
    ) -> LocalBoxFuture<'a, Result<(), PersistenceError>> {
        (**self).clear_spin_result(user_id, cadence)
    }
}

impl<T: PersistenceAdapter + ?Sized> PersistenceAdapter for std::rc::Rc<T> {
    fn get_last_spin_at<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
    ) -> LocalBoxFuture<'a, Result<Option<DateTime<Utc>>, PersistenceError>> {
        (**self).get_last_spin_at(user_id, cadence)
    }

    fn set_spin_result<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
        record: &'a SpinRecord,
    ) -> LocalBoxFuture<'a, Result<(), PersistenceError>> {
        (**self).set_spin_result(user_id, cadence, record)
    }

    fn clear_spin_result<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
    ) -> LocalBoxFuture<'a, Result<(), PersistenceError>> {
        (**self).clear_spin_result(user_id, cadence)
    }
}

/// In-memory adapter for tests and host embeddings without a browser.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    records: RefCell<HashMap<(String, Cadence), SpinRecord>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, user_id: &str, cadence: Cadence) -> Option<SpinRecord> {
        self.records
            .borrow()
            .get(&(user_id.to_string(), cadence))
            .cloned()
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn get_last_spin_at<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
    ) -> LocalBoxFuture<'a, Result<Option<DateTime<Utc>>, PersistenceError>> {
        async move { Ok(self.record(user_id, cadence).map(|r| r.at)) }.boxed_local()
    }

    fn set_spin_result<'a>(
        &'a self,
        user_id: &'a str,
        cadence: Cadence,
        record: &'a SpinRecord,
    ) -> LocalBoxFuture<'a, Result<(), PersistenceError>> {
        async move {
            self.records
                .borrow_mut()
                .insert((user_id.to_string(), cadence), record.clone());
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
            self.records
                .borrow_mut()
                .remove(&(user_id.to_string(), cadence));
            Ok(())
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use futures::executor::block_on;

    #[test]
    fn test_storage_key_format() {
        assert_eq!(
            storage_key("prize-wheel", "demo-user", Cadence::Daily),
            "prize-wheel:demo-user:daily"
        );
    }

    #[test]
    fn test_memory_adapter_overwrites_latest_record() {
        let adapter = MemoryAdapter::new();
        let first = SpinRecord {
            prize_id: "p1".into(),
            label: "A".into(),
            at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };
        let second = SpinRecord {
            prize_id: "p2".into(),
            label: "B".into(),
            at: Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap(),
        };

        block_on(adapter.set_spin_result("u", Cadence::Daily, &first)).unwrap();
        block_on(adapter.set_spin_result("u", Cadence::Daily, &second)).unwrap();

        let last = block_on(adapter.get_last_spin_at("u", Cadence::Daily)).unwrap();
        assert_eq!(last, Some(second.at));
        assert_eq!(adapter.record("u", Cadence::Daily), Some(second));

        // Different cadence is an independent key.
        let other = block_on(adapter.get_last_spin_at("u", Cadence::Hourly)).unwrap();
        assert_eq!(other, None);
    }

    #[test]
    fn test_memory_adapter_clear_removes_record() {
        let adapter = MemoryAdapter::new();
        let record = SpinRecord {
            prize_id: "p1".into(),
            label: "A".into(),
            at: Utc::now(),
        };
        block_on(adapter.set_spin_result("u", Cadence::Weekly, &record)).unwrap();
        block_on(adapter.clear_spin_result("u", Cadence::Weekly)).unwrap();
        assert_eq!(adapter.record("u", Cadence::Weekly), None);
    }
}
