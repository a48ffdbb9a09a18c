//! Observation hooks for the dispatch lifecycle.
//!
//! ```rust
//! use ttools::{DispatchHooks, NoopDispatchHooks};
//!
//! fn accepts_hooks(_hooks: &dyn DispatchHooks) {}
//!
//! let hooks = NoopDispatchHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use crate::dispatch::{CallOutcome, DispatchError, ToolInvocation};

pub trait DispatchHooks: Send + Sync {
    fn on_dispatch_start(&self, _call: &ToolInvocation) {}

    fn on_dispatch_success(
        &self,
        _call: &ToolInvocation,
        _outcome: &CallOutcome,
        _elapsed: Duration,
    ) {
    }

    fn on_dispatch_failure(
        &self,
        _call: &ToolInvocation,
        _error: &DispatchError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDispatchHooks;

impl DispatchHooks for NoopDispatchHooks {}
