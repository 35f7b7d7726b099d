use crate::eligibility;
use crate::persistence::PersistenceAdapter;
use crate::prize::{Cadence, Prize, SpinRecord};
use crate::weights::OutcomeSpace;
use chrono::{DateTime, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use std::cell::{Cell, RefCell};
use std::fmt;

/// Why a trigger attempt is currently refused. The engine itself stays
/// silent on refusal; the presentation layer renders these as hint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinBlock {
    HostDisabled,
    Locked,
    Busy,
    EmptyWheel,
}

impl fmt::Display for SpinBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SpinBlock::HostDisabled => "disabled prop is true",
            SpinBlock::Locked => "locked by cadence",
            SpinBlock::Busy => "wheel busy",
            SpinBlock::EmptyWheel => "no segments (check prizes/weights)",
        };
        f.write_str(reason)
    }
}

/// The outcome of a successful trigger: which slot the wheel must land on.
/// The selection is cached inside the engine for the duration of the spin
/// so the visual target and the reported result always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinPlan {
    pub index: usize,
    pub segment_count: usize,
}

struct PendingSpin {
    prize: Prize,
}

/// The spin eligibility and selection state machine.
///
/// Lifecycle: `hydrate` once on mount, then `trigger` -> animate ->
/// `complete` (reveal) + `persist`, with `expire_watchdog` as the fallback
/// path back to idle. All invalid triggers are silent no-ops.
pub struct SpinEngine<P, R = SmallRng> {
    adapter: P,
    rng: RefCell<R>,
    outcome: OutcomeSpace,
    user_id: String,
    cadence: Cadence,
    disabled: Cell<bool>,
    busy: Cell<bool>,
    last_spin_at: Cell<Option<DateTime<Utc>>>,
    pending: RefCell<Option<PendingSpin>>,
}

impl<P: PersistenceAdapter> SpinEngine<P, SmallRng> {
    pub fn new(prizes: &[Prize], cadence: Cadence, user_id: impl Into<String>, adapter: P) -> Self {
        Self::with_rng(prizes, cadence, user_id, adapter, SmallRng::from_entropy())
    }
}

impl<P: PersistenceAdapter, R: RngCore> SpinEngine<P, R> {
    /// Deterministic construction for tests and provable replays.
    pub fn with_rng(
        prizes: &[Prize],
        cadence: Cadence,
        user_id: impl Into<String>,
        adapter: P,
        rng: R,
    ) -> Self {
        Self {
            adapter,
            rng: RefCell::new(rng),
            outcome: OutcomeSpace::expand(prizes),
            user_id: user_id.into(),
            cadence,
            disabled: Cell::new(false),
            busy: Cell::new(false),
            last_spin_at: Cell::new(None),
            pending: RefCell::new(None),
        }
    }

    pub fn outcome(&self) -> &OutcomeSpace {
        &self.outcome
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn busy(&self) -> bool {
        self.busy.get()
    }

    pub fn last_spin_at(&self) -> Option<DateTime<Utc>> {
        self.last_spin_at.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        eligibility::is_locked(self.last_spin_at.get(), self.cadence, now)
    }

    pub fn next_eligible_at(&self) -> Option<DateTime<Utc>> {
        eligibility::next_eligible_at(self.last_spin_at.get(), self.cadence)
    }

    /// One awaited read on mount. Read failures degrade to "never spun".
    pub async fn hydrate(&self) {
        match self.adapter.get_last_spin_at(&self.user_id, self.cadence).await {
            Ok(last) => self.last_spin_at.set(last),
            Err(err) => {
                log::warn!("could not read last spin time, treating as never spun: {err}");
                self.last_spin_at.set(None);
            }
        }
    }

    /// First reason spinning is refused right now, if any.
    pub fn spin_block(&self, now: DateTime<Utc>) -> Option<SpinBlock> {
        if self.disabled.get() {
            Some(SpinBlock::HostDisabled)
        } else if self.is_locked(now) {
            Some(SpinBlock::Locked)
        } else if self.busy.get() {
            Some(SpinBlock::Busy)
        } else if self.outcome.is_empty() {
            Some(SpinBlock::EmptyWheel)
        } else {
            None
        }
    }

    /// Attempt a spin. On success the uniform pick over the outcome space is
    /// made once, cached, and the engine goes busy; any violated
    /// precondition is a no-op returning `None`.
    pub fn trigger(&self, now: DateTime<Utc>) -> Option<SpinPlan> {
        if self.spin_block(now).is_some() {
            return None;
        }
        let index = self.rng.borrow_mut().gen_range(0..self.outcome.len());
        let prize = self.outcome.get(index)?.clone();
        *self.pending.borrow_mut() = Some(PendingSpin { prize });
        self.busy.set(true);
        Some(SpinPlan {
            index,
            segment_count: self.outcome.len(),
        })
    }

    /// The animation-completion handler. Takes the cached selection, so a
    /// duplicate or late signal finds nothing and is a no-op; exactly one
    /// record exists per successful trigger. The caller notifies the host
    /// and spawns `persist` -- a slow write never blocks the reveal.
    pub fn complete(&self, now: DateTime<Utc>) -> Option<SpinRecord> {
        let pending = self.pending.borrow_mut().take()?;
        let record = SpinRecord {
            prize_id: pending.prize.id,
            label: pending.prize.label,
            at: now,
        };
        self.last_spin_at.set(Some(now));
        self.busy.set(false);
        Some(record)
    }

    /// One adapter write per completed spin. Failures are logged and the
    /// write is dropped; the user-visible result already went out.
    pub async fn persist(&self, record: &SpinRecord) {
        if let Err(err) = self
            .adapter
            .set_spin_result(&self.user_id, self.cadence, record)
            .await
        {
            log::warn!("spin result write dropped: {err}");
        }
    }

    /// Fallback path to idle when the completion signal is lost. Never
    /// fabricates a result. A watchdog arriving after a normal completion
    /// finds the engine idle and does nothing.
    pub fn expire_watchdog(&self) {
        if !self.busy.get() {
            return;
        }
        log::warn!("spin watchdog fired before the completion signal; forcing idle");
        self.pending.borrow_mut().take();
        self.busy.set(false);
    }

    /// Administrative reset (testing/support flows): clears the lock, the
    /// cached selection, and the persisted record for this key.
    pub async fn reset(&self) {
        self.pending.borrow_mut().take();
        self.busy.set(false);
        self.last_spin_at.set(None);
        if let Err(err) = self
            .adapter
            .clear_spin_result(&self.user_id, self.cadence)
            .await
        {
            log::warn!("could not clear persisted spin record: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryAdapter, PersistenceError};
    use chrono::{Duration, TimeZone};
    use futures::executor::block_on;
    use futures::future::LocalBoxFuture;
    use futures::FutureExt;

    fn prizes() -> Vec<Prize> {
        vec![
            Prize::new("p1", "10 Credits").with_weight(1.0),
            Prize::new("p2", "Try Again").with_weight(3.0),
        ]
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn engine(adapter: &MemoryAdapter) -> SpinEngine<&MemoryAdapter, SmallRng> {
        SpinEngine::with_rng(
            &prizes(),
            Cadence::Hourly,
            "demo-user",
            adapter,
            SmallRng::seed_from_u64(7),
        )
    }

    #[test]
    fn test_trigger_spins_when_never_spun() {
        let adapter = MemoryAdapter::new();
        let engine = engine(&adapter);
        assert!(!engine.is_locked(now()));

        let plan = engine.trigger(now()).expect("should spin");
        assert_eq!(plan.segment_count, 4);
        assert!(plan.index < 4);
        assert!(engine.busy());
    }

    #[test]
    fn test_second_trigger_while_spinning_is_a_no_op() {
        let adapter = MemoryAdapter::new();
        let engine = engine(&adapter);
        assert!(engine.trigger(now()).is_some());
        assert_eq!(engine.spin_block(now()), Some(SpinBlock::Busy));
        assert!(engine.trigger(now()).is_none());
    }

    #[test]
    fn test_trigger_refused_when_disabled_locked_or_empty() {
        let adapter = MemoryAdapter::new();
        let engine = engine(&adapter);
        engine.set_disabled(true);
        assert_eq!(engine.spin_block(now()), Some(SpinBlock::HostDisabled));
        assert!(engine.trigger(now()).is_none());
        engine.set_disabled(false);

        engine.last_spin_at.set(Some(now()));
        assert_eq!(engine.spin_block(now()), Some(SpinBlock::Locked));
        assert!(engine.trigger(now()).is_none());

        let empty: SpinEngine<&MemoryAdapter, SmallRng> = SpinEngine::with_rng(
            &[],
            Cadence::Hourly,
            "demo-user",
            &adapter,
            SmallRng::seed_from_u64(7),
        );
        assert_eq!(empty.spin_block(now()), Some(SpinBlock::EmptyWheel));
        assert!(empty.trigger(now()).is_none());
    }

    #[test]
    fn test_complete_delivers_exactly_once_and_matches_plan() {
        let adapter = MemoryAdapter::new();
        let engine = engine(&adapter);
        let plan = engine.trigger(now()).unwrap();
        let expected = engine.outcome().get(plan.index).unwrap().clone();

        let completion = now() + Duration::milliseconds(1300);
        let record = engine.complete(completion).expect("one record");
        assert_eq!(record.prize_id, expected.id);
        assert_eq!(record.label, expected.label);
        assert_eq!(record.at, completion);
        assert!(!engine.busy());
        assert_eq!(engine.last_spin_at(), Some(completion));

        // Duplicate completion signal finds nothing.
        assert!(engine.complete(completion).is_none());

        block_on(engine.persist(&record));
        assert_eq!(adapter.record("demo-user", Cadence::Hourly), Some(record));
    }

    #[test]
    fn test_lock_engages_after_completion() {
        let adapter = MemoryAdapter::new();
        let engine = engine(&adapter);
        engine.trigger(now()).unwrap();
        let completion = now() + Duration::milliseconds(1300);
        engine.complete(completion).unwrap();

        assert!(engine.is_locked(completion));
        assert_eq!(
            engine.next_eligible_at(),
            Some(completion + Duration::hours(1))
        );
        assert!(!engine.is_locked(completion + Duration::hours(1)));
    }

    #[test]
    fn test_watchdog_forces_idle_without_a_result() {
        let adapter = MemoryAdapter::new();
        let engine = engine(&adapter);
        engine.trigger(now()).unwrap();

        engine.expire_watchdog();
        assert!(!engine.busy());
        // The cached selection is gone; a late completion delivers nothing.
        assert!(engine.complete(now()).is_none());
        assert_eq!(engine.last_spin_at(), None);
    }

    #[test]
    fn test_watchdog_after_completion_is_a_no_op() {
        let adapter = MemoryAdapter::new();
        let engine = engine(&adapter);
        engine.trigger(now()).unwrap();
        let completion = now() + Duration::milliseconds(1300);
        engine.complete(completion).unwrap();

        engine.expire_watchdog();
        assert_eq!(engine.last_spin_at(), Some(completion));
        assert!(!engine.busy());
    }

    #[test]
    fn test_reset_clears_lock_and_persisted_record() {
        let adapter = MemoryAdapter::new();
        let engine = engine(&adapter);
        engine.trigger(now()).unwrap();
        let record = engine.complete(now()).unwrap();
        block_on(engine.persist(&record));
        assert!(engine.is_locked(now() + Duration::minutes(5)));

        block_on(engine.reset());
        assert!(!engine.is_locked(now() + Duration::minutes(5)));
        assert_eq!(adapter.record("demo-user", Cadence::Hourly), None);
    }

    #[test]
    fn test_hydrate_reads_adapter_state() {
        let adapter = MemoryAdapter::new();
        let record = SpinRecord {
            prize_id: "p1".into(),
            label: "10 Credits".into(),
            at: now(),
        };
        block_on(adapter.set_spin_result("demo-user", Cadence::Hourly, &record)).unwrap();

        let engine = engine(&adapter);
        block_on(engine.hydrate());
        assert_eq!(engine.last_spin_at(), Some(now()));
        assert!(engine.is_locked(now() + Duration::minutes(30)));
    }

    #[test]
    fn test_rebuilt_engine_spins_again_until_rehydrated() {
        let adapter = MemoryAdapter::new();
        let first = engine(&adapter);
        first.trigger(now()).unwrap();
        let record = first.complete(now()).unwrap();
        block_on(first.persist(&record));

        // A replacement engine over the same adapter knows nothing of the
        // persisted record; callers must hydrate every engine they build.
        let rebuilt = engine(&adapter);
        assert_eq!(rebuilt.spin_block(now() + Duration::minutes(5)), None);

        block_on(rebuilt.hydrate());
        assert_eq!(
            rebuilt.spin_block(now() + Duration::minutes(5)),
            Some(SpinBlock::Locked)
        );
    }

    struct FailingAdapter;

    impl PersistenceAdapter for FailingAdapter {
        fn get_last_spin_at<'a>(
            &'a self,
            _user_id: &'a str,
            _cadence: Cadence,
        ) -> LocalBoxFuture<'a, Result<Option<DateTime<Utc>>, PersistenceError>> {
            async { Err(PersistenceError("read failed".into())) }.boxed_local()
        }

        fn set_spin_result<'a>(
            &'a self,
            _user_id: &'a str,
            _cadence: Cadence,
            _record: &'a SpinRecord,
        ) -> LocalBoxFuture<'a, Result<(), PersistenceError>> {
            async { Err(PersistenceError("write failed".into())) }.boxed_local()
        }
    }

    #[test]
    fn test_persistence_failures_never_block_the_spin_flow() {
        let engine = SpinEngine::with_rng(
            &prizes(),
            Cadence::Daily,
            "demo-user",
            FailingAdapter,
            SmallRng::seed_from_u64(7),
        );
        block_on(engine.hydrate());
        assert_eq!(engine.last_spin_at(), None);

        engine.trigger(now()).unwrap();
        let record = engine.complete(now()).expect("reveal still happens");
        block_on(engine.persist(&record));
        assert!(!engine.busy());
    }

    #[test]
    fn test_seeded_rng_makes_selection_deterministic() {
        let adapter = MemoryAdapter::new();
        let first = engine(&adapter).trigger(now()).unwrap();
        let second = engine(&adapter).trigger(now()).unwrap();
        assert_eq!(first, second);
    }
}
