//! One-shot result slot shared across dispatch calls.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use futures_timer::Delay;
use futures_util::future::{Either, select};
use serde_json::Value;

use crate::dispatch::DispatchError;

/// What the slot eventually holds: the captured value or the failure that
/// ended the exchange.
pub type SlotResult = Result<Value, DispatchError>;

#[derive(Debug, Default)]
struct SlotState {
    result: Option<SlotResult>,
    wakers: Vec<Waker>,
}

/// A write-once cell with compare-and-set-once semantics.
///
/// States: pending, then resolved with a value or rejected with an error,
/// terminal either way. The first writer wins; `resolve` and `reject`
/// report whether they did. Offers a poll accessor, a blocking wait, and
/// an awaitable view.
#[derive(Debug, Default)]
pub struct ResultSlot {
    state: Mutex<SlotState>,
    ready: Condvar,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the captured value. Returns `false` if the slot was already
    /// settled, in which case the existing result is untouched.
    pub fn resolve(&self, value: Value) -> bool {
        self.complete(Ok(value))
    }

    /// Stores a failure. Returns `false` if the slot was already settled.
    pub fn reject(&self, error: DispatchError) -> bool {
        self.complete(Err(error))
    }

    fn complete(&self, result: SlotResult) -> bool {
        let mut state = self.lock();
        if state.result.is_some() {
            return false;
        }
        state.result = Some(result);
        let wakers = std::mem::take(&mut state.wakers);
        drop(state);

        self.ready.notify_all();
        for waker in wakers {
            waker.wake();
        }
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.lock().result.is_some()
    }

    /// Non-blocking poll accessor.
    pub fn peek(&self) -> Option<SlotResult> {
        self.lock().result.clone()
    }

    /// Blocks the calling thread until the slot settles.
    pub fn wait(&self) -> SlotResult {
        let mut state = self.lock();
        loop {
            if let Some(result) = &state.result {
                return result.clone();
            }
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until the slot settles or the timeout elapses.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<SlotResult> {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock();
        loop {
            if let Some(result) = &state.result {
                return Some(result.clone());
            }
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let (guard, _) = self
                .ready
                .wait_timeout(state, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
    }

    /// Awaitable view of the slot.
    pub fn resolved(&self) -> Resolved<'_> {
        Resolved { slot: self }
    }

    /// Awaits the slot with a deadline. Returns `None` if the deadline
    /// passes first.
    pub async fn wait_for(&self, timeout: Duration) -> Option<SlotResult> {
        match select(self.resolved(), Delay::new(timeout)).await {
            Either::Left((result, _)) => Some(result),
            Either::Right(((), _)) => self.peek(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Future that completes when the owning slot settles.
#[derive(Debug)]
pub struct Resolved<'a> {
    slot: &'a ResultSlot,
}

impl Future for Resolved<'_> {
    type Output = SlotResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.slot.lock();
        if let Some(result) = &state.result {
            return Poll::Ready(result.clone());
        }
        if !state.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
            state.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}
