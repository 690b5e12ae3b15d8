//! Frame boundaries as a scheduling primitive.
//!
//! A [`FrameScheduler`] is whatever tells us the host is about to paint the
//! next frame: `requestAnimationFrame` in a browser, a vsync signal in a
//! native renderer, or the in-process [`FrameQueue`] below.
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// A single-shot callback to run at the next frame boundary.
pub type FrameCallback = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one scheduled [`FrameCallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// The host's "request animation frame" seam.
pub trait FrameScheduler {
    /// Schedule `callback` for the next frame boundary.
    ///
    /// Implementations must not run the callback before returning.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;
    /// Cancel a callback that has not fired yet.
    ///
    /// Unknown or already fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

impl<S> FrameScheduler for Arc<S>
where
    S: FrameScheduler + ?Sized,
{
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        self.as_ref().request_frame(callback)
    }
    fn cancel_frame(&self, handle: FrameHandle) {
        self.as_ref().cancel_frame(handle)
    }
}

impl<S> FrameScheduler for &S
where
    S: FrameScheduler + ?Sized,
{
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        (*self).request_frame(callback)
    }
    fn cancel_frame(&self, handle: FrameHandle) {
        (*self).cancel_frame(handle)
    }
}

#[derive(Default)]
struct QueueState {
    next_id: u64,
    frames: u64,
    callbacks: Vec<(FrameHandle, FrameCallback)>,
    // The frame being run. Still cancellable until popped.
    running: VecDeque<(FrameHandle, FrameCallback)>,
}

/// An in-process [`FrameScheduler`].
///
/// Frame boundaries happen when [`run_frame()`](FrameQueue::run_frame) is called,
/// or periodically while [`drive()`](FrameQueue::drive) is awaited.
/// Callbacks requested while a frame is running are deferred to the next one.
#[derive(Clone, Default)]
pub struct FrameQueue {
    state: Arc<Mutex<QueueState>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // A panicking frame callback never runs under the lock.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        let state = self.lock();
        state.callbacks.len() + state.running.len()
    }
    /// Number of frame boundaries run so far.
    pub fn frames(&self) -> u64 {
        self.lock().frames
    }
    /// Run one frame boundary, returning the number of callbacks executed.
    ///
    /// A callback cancelled by an earlier callback of the same frame does not
    /// run. Callbacks left behind by a panicking one run at the next frame.
    pub fn run_frame(&self) -> usize {
        let frame = {
            let mut state = self.lock();
            state.frames += 1;
            let callbacks = mem::take(&mut state.callbacks);
            state.running.extend(callbacks);
            state.frames
        };
        tracing::trace!(frame, "running frame");
        let mut count = 0;
        loop {
            let Some((_, callback)) = self.lock().running.pop_front() else {
                break;
            };
            callback();
            count += 1;
        }
        tracing::trace!(frame, callbacks = count, "frame done");
        count
    }
    /// Run a frame boundary every `period` until the future is dropped.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn drive(&self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            self.run_frame();
        }
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut state = self.lock();
        state.next_id += 1;
        let handle = FrameHandle(state.next_id);
        state.callbacks.push((handle, callback));
        handle
    }
    fn cancel_frame(&self, handle: FrameHandle) {
        // dropped outside the lock, the callback may own a throttle
        let _cancelled = {
            let mut state = self.lock();
            let queued = state.callbacks.iter().position(|(h, _)| *h == handle);
            let running = state.running.iter().position(|(h, _)| *h == handle);
            match (queued, running) {
                (Some(index), _) => Some(state.callbacks.remove(index)),
                (None, Some(index)) => state.running.remove(index),
                (None, None) => None,
            }
        };
    }
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("FrameQueue")
            .field("frames", &state.frames)
            .field("pending", &(state.callbacks.len() + state.running.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>) -> FrameCallback {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn run_frame_executes_requested_callbacks_once() {
        let queue = FrameQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));
        queue.request_frame(counting(&counter));
        queue.request_frame(counting(&counter));
        assert_eq!(queue.pending(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert_eq!(queue.run_frame(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(queue.run_frame(), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(queue.frames(), 2);
    }

    #[test]
    fn cancel_frame() {
        let queue = FrameQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let first = queue.request_frame(counting(&counter));
        let second = queue.request_frame(counting(&counter));
        assert_ne!(first, second);

        queue.cancel_frame(first);
        // unknown handles are ignored
        queue.cancel_frame(FrameHandle::new(42));
        assert_eq!(queue.run_frame(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        // already fired
        queue.cancel_frame(second);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn callbacks_requested_during_a_frame_wait_for_the_next_one() {
        let queue = FrameQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let queue_in_frame = queue.clone();
            let counter = Arc::clone(&counter);
            queue.request_frame(Box::new(move || {
                queue_in_frame.request_frame(counting(&counter));
            }));
        }
        assert_eq!(queue.run_frame(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.run_frame(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_frame_during_the_same_frame() {
        let queue = FrameQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let later = Arc::new(Mutex::new(None));
        {
            let queue_in_frame = queue.clone();
            let later = Arc::clone(&later);
            queue.request_frame(Box::new(move || {
                if let Some(handle) = later.lock().expect("lock").take() {
                    queue_in_frame.cancel_frame(handle);
                }
            }));
        }
        *later.lock().expect("lock") = Some(queue.request_frame(counting(&counter)));
        queue.request_frame(counting(&counter));

        assert_eq!(queue.run_frame(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn callbacks_after_a_panic_run_next_frame() {
        let queue = FrameQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));
        queue.request_frame(Box::new(|| panic!("boom")));
        queue.request_frame(counting(&counter));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| queue.run_frame()));
        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.run_frame(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test(start_paused = true)]
    async fn drive_runs_frames_periodically() {
        let queue = FrameQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));
        queue.request_frame(counting(&counter));

        let driver = queue.clone();
        let handle = tokio::spawn(async move { driver.drive(Duration::from_millis(16)).await });
        tokio::time::sleep(Duration::from_millis(40)).await;
        handle.abort();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(queue.frames() >= 2, "frames: {}", queue.frames());
    }
}
