//! Metrics-based dispatch hooks.
//!
//! ```rust
//! use tobserve::MetricsDispatchHooks;
//! use ttools::DispatchHooks;
//!
//! fn accepts_hooks(_hooks: &dyn DispatchHooks) {}
//!
//! let hooks = MetricsDispatchHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use ttools::{CallOutcome, DispatchError, DispatchHooks, ToolInvocation};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsDispatchHooks;

impl DispatchHooks for MetricsDispatchHooks {
    fn on_dispatch_start(&self, call: &ToolInvocation) {
        metrics::counter!(
            "tiddlywinks_dispatch_start_total",
            "tool_name" => call.name.clone()
        )
        .increment(1);
    }

    fn on_dispatch_success(&self, call: &ToolInvocation, outcome: &CallOutcome, elapsed: Duration) {
        metrics::counter!(
            "tiddlywinks_dispatch_success_total",
            "tool_name" => call.name.clone(),
            "captured" => if matches!(outcome, CallOutcome::Captured) { "true" } else { "false" }
        )
        .increment(1);
        metrics::histogram!(
            "tiddlywinks_dispatch_duration_seconds",
            "tool_name" => call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_dispatch_failure(&self, call: &ToolInvocation, error: &DispatchError, elapsed: Duration) {
        metrics::counter!(
            "tiddlywinks_dispatch_failure_total",
            "tool_name" => call.name.clone(),
            "not_found" => if error.is_not_found() { "true" } else { "false" }
        )
        .increment(1);
        metrics::histogram!(
            "tiddlywinks_dispatch_duration_seconds",
            "tool_name" => call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
