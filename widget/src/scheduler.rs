use gloo_timers::callback::Timeout;
use wheel_core::Scheduler;

/// Browser scheduler over `gloo_timers::callback::Timeout`. Dropping the
/// handle cancels the callback, which is exactly the seam contract: widget
/// teardown drops its handles and nothing fires after unmount.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}
