use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use ttools::{CallOutcome, DispatchError, DispatchHooks, ToolInvocation};

/// Panic-isolating wrapper: a misbehaving hook must not poison dispatch.
pub struct SafeDispatchHooks<H> {
    inner: H,
}

impl<H> SafeDispatchHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> DispatchHooks for SafeDispatchHooks<H>
where
    H: DispatchHooks,
{
    fn on_dispatch_start(&self, call: &ToolInvocation) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_dispatch_start(call)));
    }

    fn on_dispatch_success(&self, call: &ToolInvocation, outcome: &CallOutcome, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_dispatch_success(call, outcome, elapsed)
        }));
    }

    fn on_dispatch_failure(&self, call: &ToolInvocation, error: &DispatchError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_dispatch_failure(call, error, elapsed)
        }));
    }
}
