use crate::frame::{FrameHandle, FrameScheduler};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Wrap a callback so it runs at most once per frame.
pub trait FrameThrottleable<S>
where
    Self: std::marker::Sized,
    S: FrameScheduler,
{
    fn frame_throttled(self, scheduler: S) -> FrameThrottled<Self, S>;
}

impl<F, S> FrameThrottleable<S> for F
where
    S: FrameScheduler,
{
    fn frame_throttled(self, scheduler: S) -> FrameThrottled<Self, S> {
        Throttled::new(Arc::new(self), FrameSlot::new(scheduler))
    }
}

pub struct Throttled<T, P> {
    inner: T,
    pending: Arc<P>,
}

impl<T, P> Throttled<T, P> {
    pub fn new(inner: T, pending: P) -> Self {
        Self { inner, pending: Arc::new(pending) }
    }
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

/// A callback throttled to the frame boundaries of `S`.
pub type FrameThrottled<F, S> = Throttled<Arc<F>, FrameSlot<S>>;

/// The pending invocation of a [`FrameThrottled`] callback.
///
/// Holds the handle of the scheduled frame callback, if any. Dropping the slot
/// cancels that callback.
pub struct FrameSlot<S>
where
    S: FrameScheduler,
{
    scheduler: S,
    state: Mutex<SlotState>,
}

#[derive(Default)]
struct SlotState {
    generation: u64,
    pending: Option<Pending>,
}

// Each scheduled callback only acts while the slot still holds its generation.
#[derive(Clone, Copy)]
struct Pending {
    generation: u64,
    handle: FrameHandle,
}

impl<S> FrameSlot<S>
where
    S: FrameScheduler,
{
    fn new(scheduler: S) -> Self {
        Self { scheduler, state: Mutex::new(SlotState::default()) }
    }
    fn state(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn holds(&self, generation: u64) -> bool {
        self.state().pending.is_some_and(|pending| pending.generation == generation)
    }
}

impl<S> Drop for FrameSlot<S>
where
    S: FrameScheduler,
{
    fn drop(&mut self) {
        let pending = self.state().pending.take();
        if let Some(pending) = pending {
            self.scheduler.cancel_frame(pending.handle);
        }
    }
}

// Clears the slot once the callback has returned or unwound, unless it was
// re-armed in the meantime.
struct ClearOnDrop<S>
where
    S: FrameScheduler,
{
    slot: Arc<FrameSlot<S>>,
    generation: u64,
}

impl<S> Drop for ClearOnDrop<S>
where
    S: FrameScheduler,
{
    fn drop(&mut self) {
        let mut state = self.slot.state();
        if state.pending.is_some_and(|pending| pending.generation == self.generation) {
            state.pending = None;
        }
    }
}

impl<F, S> Throttled<Arc<F>, FrameSlot<S>>
where
    S: FrameScheduler + Send + Sync + 'static,
{
    /// Schedule `f(args)` for the next frame unless an invocation is already scheduled.
    ///
    /// Returns `false` when the call was dropped.
    pub fn call<A>(&self, args: A) -> bool
    where
        F: Fn(A) + Send + Sync + 'static,
        A: Send + 'static,
    {
        let mut state = self.pending.state();
        if state.pending.is_some() {
            return false;
        }
        state.generation += 1;
        let generation = state.generation;
        let f = Arc::clone(&self.inner);
        let slot = Arc::downgrade(&self.pending);
        let handle = self.pending.scheduler.request_frame(Box::new(move || {
            let Some(slot) = Weak::upgrade(&slot) else {
                return;
            };
            if !slot.holds(generation) {
                return;
            }
            let _clear = ClearOnDrop { slot, generation };
            f(args);
        }));
        state.pending = Some(Pending { generation, handle });
        true
    }
    /// Whether an invocation is scheduled for the next frame.
    pub fn is_pending(&self) -> bool {
        self.pending.state().pending.is_some()
    }
    /// Cancel the scheduled invocation, returning whether there was one.
    pub fn cancel(&self) -> bool {
        let pending = self.pending.state().pending.take();
        match pending {
            Some(pending) => {
                self.pending.scheduler.cancel_frame(pending.handle);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameCallback, FrameQueue};
    use std::panic::{self, AssertUnwindSafe};

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);
        (calls, move |value| recorded.lock().expect("lock").push(value))
    }

    #[test]
    fn runs_once_per_frame_with_first_arguments() {
        let queue = FrameQueue::new();
        let (calls, f) = recorder();
        let throttled = f.frame_throttled(queue.clone());

        assert!(throttled.call(1));
        for value in 2..=5 {
            assert!(!throttled.call(value));
        }
        assert!(throttled.is_pending());
        assert!(calls.lock().expect("lock").is_empty());

        queue.run_frame();
        assert_eq!(*calls.lock().expect("lock"), vec![1]);
        assert!(!throttled.is_pending());
    }

    #[test]
    fn rearms_after_each_frame() {
        let queue = FrameQueue::new();
        let (calls, f) = recorder();
        let throttled = f.frame_throttled(queue.clone());

        throttled.call(1);
        throttled.call(2);
        queue.run_frame();
        throttled.call(3);
        throttled.call(4);
        queue.run_frame();
        assert_eq!(*calls.lock().expect("lock"), vec![1, 3]);
    }

    #[test]
    fn idle_frames_do_nothing() {
        let queue = FrameQueue::new();
        let (calls, f) = recorder();
        let throttled = f.frame_throttled(queue.clone());

        queue.run_frame();
        queue.run_frame();
        assert!(calls.lock().expect("lock").is_empty());
        assert!(!throttled.is_pending());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn cancel() {
        let queue = FrameQueue::new();
        let (calls, f) = recorder();
        let throttled = f.frame_throttled(queue.clone());

        assert!(!throttled.cancel());
        throttled.call(1);
        assert!(throttled.cancel());
        assert_eq!(queue.pending(), 0);
        queue.run_frame();
        assert!(calls.lock().expect("lock").is_empty());

        assert!(throttled.call(2));
        queue.run_frame();
        assert_eq!(*calls.lock().expect("lock"), vec![2]);
    }

    #[test]
    fn drop_cancels_scheduled_invocation() {
        let queue = FrameQueue::new();
        let (calls, f) = recorder();
        let throttled = f.frame_throttled(queue.clone());

        throttled.call(1);
        assert_eq!(queue.pending(), 1);
        drop(throttled);
        assert_eq!(queue.pending(), 0);
        queue.run_frame();
        assert!(calls.lock().expect("lock").is_empty());
    }

    #[test]
    fn reentrant_calls_are_dropped() {
        let queue = FrameQueue::new();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let slot: Arc<Mutex<Option<Arc<FrameThrottled<Box<dyn Fn(u32) + Send + Sync>, FrameQueue>>>>> =
            Arc::new(Mutex::new(None));
        let f: Box<dyn Fn(u32) + Send + Sync> = {
            let calls = Arc::clone(&calls);
            let slot = Arc::clone(&slot);
            Box::new(move |value| {
                calls.lock().expect("lock").push(value);
                if let Some(throttled) = slot.lock().expect("lock").as_ref() {
                    assert!(!throttled.call(value + 1));
                }
            })
        };
        let throttled = Arc::new(f.frame_throttled(queue.clone()));
        *slot.lock().expect("lock") = Some(Arc::clone(&throttled));

        throttled.call(1);
        queue.run_frame();
        queue.run_frame();
        assert_eq!(*calls.lock().expect("lock"), vec![1]);
        assert!(!throttled.is_pending());
        slot.lock().expect("lock").take();
    }

    // A frame callback that runs `cancel(); call(2)` ahead of the pending `f(1)`.
    fn cancel_and_rearm<S>(
        scheduler: S,
        throttled: &Arc<FrameThrottled<impl Fn(u32) + Send + Sync + 'static, S>>,
    ) where
        S: FrameScheduler + Send + Sync + 'static,
    {
        let throttled = Arc::clone(throttled);
        scheduler.request_frame(Box::new(move || {
            assert!(throttled.cancel());
            assert!(throttled.call(2));
        }));
    }

    #[test]
    fn cancel_and_call_within_a_frame() {
        let queue = FrameQueue::new();
        let (calls, f) = recorder();
        let throttled = Arc::new(f.frame_throttled(queue.clone()));

        cancel_and_rearm(queue.clone(), &throttled);
        assert!(throttled.call(1));
        queue.run_frame();
        assert!(calls.lock().expect("lock").is_empty());
        assert!(throttled.is_pending());

        assert!(!throttled.call(3));
        queue.run_frame();
        assert_eq!(*calls.lock().expect("lock"), vec![2]);
        assert!(!throttled.is_pending());
    }

    // Delivers every requested callback, cancelled or not.
    #[derive(Clone)]
    struct Uncancellable(FrameQueue);

    impl FrameScheduler for Uncancellable {
        fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
            self.0.request_frame(callback)
        }
        fn cancel_frame(&self, _handle: FrameHandle) {}
    }

    #[test]
    fn stale_callback_neither_runs_nor_clears() {
        let queue = FrameQueue::new();
        let scheduler = Uncancellable(queue.clone());
        let (calls, f) = recorder();
        let throttled = Arc::new(f.frame_throttled(scheduler.clone()));

        throttled.call(0);
        assert!(throttled.cancel());
        assert!(throttled.call(1));
        // both callbacks fire, only the current one calls `f`
        queue.run_frame();
        assert_eq!(*calls.lock().expect("lock"), vec![1]);
        assert!(!throttled.is_pending());

        cancel_and_rearm(scheduler, &throttled);
        throttled.call(3);
        queue.run_frame();
        assert_eq!(*calls.lock().expect("lock"), vec![1]);
        assert!(throttled.is_pending());
        assert!(!throttled.call(4));
        queue.run_frame();
        assert_eq!(*calls.lock().expect("lock"), vec![1, 2]);
    }

    #[test]
    fn panicking_callback_clears_pending_flag() {
        let queue = FrameQueue::new();
        let throttled = (|value: u32| {
            if value == 0 {
                panic!("boom");
            }
        })
        .frame_throttled(queue.clone());

        throttled.call(0);
        let result = panic::catch_unwind(AssertUnwindSafe(|| queue.run_frame()));
        assert!(result.is_err());
        assert!(!throttled.is_pending());
        assert!(throttled.call(1));
    }
}
