pub mod animation;
pub mod eligibility;
pub mod engine;
pub mod persistence;
pub mod prize;
pub mod scheduler;
pub mod weights;

pub use crate::animation::{
    compute_target, ease_out_cubic, watchdog_ms, AnimationConfig, AnimationDriver, SpinAnimation,
    SpinTarget,
};
pub use crate::eligibility::{
    format_countdown, format_countdown_compact, is_locked, next_eligible_at,
};
pub use crate::engine::{SpinBlock, SpinEngine, SpinPlan};
pub use crate::persistence::{storage_key, MemoryAdapter, PersistenceAdapter, PersistenceError};
pub use crate::prize::{validate_prizes, Cadence, Prize, SpinRecord};
pub use crate::scheduler::Scheduler;
pub use crate::weights::{coerce_weight, OutcomeSpace};
