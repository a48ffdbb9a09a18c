//! Tracing-based dispatch hooks.
//!
//! ```rust
//! use tobserve::TracingDispatchHooks;
//! use ttools::DispatchHooks;
//!
//! fn accepts_hooks(_hooks: &dyn DispatchHooks) {}
//!
//! let hooks = TracingDispatchHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use ttools::{CallOutcome, DispatchError, DispatchHooks, ToolInvocation};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatchHooks;

impl DispatchHooks for TracingDispatchHooks {
    fn on_dispatch_start(&self, call: &ToolInvocation) {
        tracing::info!(
            phase = "dispatch",
            event = "start",
            tool_name = call.name,
            tool_call_id = call.id
        );
    }

    fn on_dispatch_success(&self, call: &ToolInvocation, outcome: &CallOutcome, elapsed: Duration) {
        tracing::info!(
            phase = "dispatch",
            event = "success",
            tool_name = call.name,
            tool_call_id = call.id,
            captured = matches!(outcome, CallOutcome::Captured),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_dispatch_failure(&self, call: &ToolInvocation, error: &DispatchError, elapsed: Duration) {
        tracing::error!(
            phase = "dispatch",
            event = "failure",
            tool_name = call.name,
            tool_call_id = call.id,
            not_found = error.is_not_found(),
            elapsed_ms = elapsed.as_millis() as u64,
            error = %error
        );
    }
}
