use crate::scheduler::Scheduler;

/// Safety margin added on top of the animation total for the watchdog that
/// force-clears the busy flag if the completion timer is lost.
pub const WATCHDOG_MARGIN_MS: u32 = 1500;

/// Timing knobs for the spin animation: an acceleration phase, a
/// deceleration phase, and the number of extra full rotations added for
/// flair so the wheel always appears to spin forward.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub spin_up_ms: u32,
    pub spin_down_ms: u32,
    pub extra_spins: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spin_up_ms: 200,
            spin_down_ms: 1100,
            extra_spins: 5,
        }
    }
}

impl AnimationConfig {
    pub fn duration_ms(&self) -> u32 {
        self.spin_up_ms + self.spin_down_ms
    }
}

/// Where the wheel should stop and how long it takes to get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTarget {
    pub rotation_degrees: f64,
    pub duration_ms: u32,
}

/// Rotation that parks the selected segment's angular center under the
/// pointer at 0 degrees, plus the configured full extra rotations.
pub fn compute_target(
    selected_index: usize,
    segment_count: usize,
    config: &AnimationConfig,
) -> SpinTarget {
    let total = segment_count.max(1);
    let slice = 360.0 / total as f64;
    let target_center = selected_index as f64 * slice + slice / 2.0;
    let rotation_degrees = f64::from(config.extra_spins) * 360.0 + (360.0 - target_center);
    SpinTarget {
        rotation_degrees,
        duration_ms: config.duration_ms(),
    }
}

/// The one authoritative busy auto-clear duration.
pub fn watchdog_ms(config: &AnimationConfig) -> u32 {
    config.duration_ms() + WATCHDOG_MARGIN_MS
}

/// Visual easing applied by the presentation layer: 1 - (1-t)^4.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Maps a selected outcome index to a rotation target and schedules exactly
/// one completion signal at animation end. The signal is side-effect-free;
/// the engine performs the stateful reveal/persist/notify sequence.
pub struct AnimationDriver<S: Scheduler> {
    scheduler: S,
    config: AnimationConfig,
}

/// A running animation. Dropping it cancels the completion signal.
pub struct SpinAnimation<H> {
    pub target: SpinTarget,
    _completion: H,
}

impl<S: Scheduler> AnimationDriver<S> {
    pub fn new(scheduler: S, config: AnimationConfig) -> Self {
        Self { scheduler, config }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn begin(
        &self,
        selected_index: usize,
        segment_count: usize,
        on_complete: Box<dyn FnOnce()>,
    ) -> SpinAnimation<S::Handle> {
        let target = compute_target(selected_index, segment_count, &self.config);
        let completion = self.scheduler.schedule(target.duration_ms, on_complete);
        SpinAnimation {
            target,
            _completion: completion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::ManualScheduler;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_compute_target_aligns_segment_center_with_pointer() {
        let config = AnimationConfig::default();
        // 4 segments, 90 degree slices. Index 0 centers at 45 degrees.
        let target = compute_target(0, 4, &config);
        assert_eq!(target.rotation_degrees, 5.0 * 360.0 + 315.0);
        assert_eq!(target.duration_ms, 1300);

        let target = compute_target(2, 4, &config);
        assert_eq!(target.rotation_degrees, 5.0 * 360.0 + (360.0 - 225.0));
    }

    #[test]
    fn test_watchdog_is_animation_total_plus_margin() {
        let config = AnimationConfig {
            spin_up_ms: 100,
            spin_down_ms: 800,
            extra_spins: 5,
        };
        assert_eq!(watchdog_ms(&config), 900 + WATCHDOG_MARGIN_MS);
    }

    #[test]
    fn test_ease_out_cubic_is_monotonic_and_bounded() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        let mut previous = 0.0;
        for step in 1..=100 {
            let eased = ease_out_cubic(step as f64 / 100.0);
            assert!(eased >= previous);
            previous = eased;
        }
    }

    #[test]
    fn test_begin_schedules_exactly_one_completion() {
        let scheduler = Rc::new(ManualScheduler::new());
        let driver = AnimationDriver::new(scheduler.clone(), AnimationConfig::default());
        let fired = Rc::new(Cell::new(0u32));

        let fired_clone = fired.clone();
        let animation = driver.begin(1, 6, Box::new(move || fired_clone.set(fired_clone.get() + 1)));
        assert_eq!(scheduler.scheduled(), 1);

        scheduler.fire_all();
        assert_eq!(fired.get(), 1);
        drop(animation);
    }

    #[test]
    fn test_dropping_animation_cancels_completion() {
        let scheduler = Rc::new(ManualScheduler::new());
        let driver = AnimationDriver::new(scheduler.clone(), AnimationConfig::default());
        let fired = Rc::new(Cell::new(false));

        let fired_clone = fired.clone();
        let animation = driver.begin(0, 4, Box::new(move || fired_clone.set(true)));
        drop(animation);

        scheduler.fire_all();
        assert!(!fired.get());
    }
}
