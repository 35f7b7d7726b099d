/// One-shot timer seam owned by the widget instance. Handles cancel their
/// callback when dropped, so tearing down a widget drops every outstanding
/// handle and nothing fires after unmount.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

impl<S: Scheduler + ?Sized> Scheduler for std::rc::Rc<S> {
    type Handle = S::Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle {
        (**self).schedule(delay_ms, callback)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Scheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Pending = Rc<RefCell<Option<Box<dyn FnOnce()>>>>;

    /// Test scheduler that holds callbacks until the test fires them.
    #[derive(Default)]
    pub struct ManualScheduler {
        pending: RefCell<Vec<(u32, Pending)>>,
    }

    pub struct ManualHandle {
        slot: Pending,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            // Cancel: the callback can no longer fire.
            self.slot.borrow_mut().take();
        }
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn scheduled(&self) -> usize {
            self.pending.borrow().len()
        }

        /// Fire every callback that is still alive, in schedule order.
        pub fn fire_all(&self) {
            let entries: Vec<(u32, Pending)> = self.pending.borrow_mut().drain(..).collect();
            for (_, slot) in entries {
                if let Some(callback) = slot.borrow_mut().take() {
                    callback();
                }
            }
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle {
            let slot: Pending = Rc::new(RefCell::new(Some(callback)));
            self.pending.borrow_mut().push((delay_ms, slot.clone()));
            ManualHandle { slot }
        }
    }
}
