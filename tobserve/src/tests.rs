use std::time::Duration;

use serde_json::json;
use ttools::{CallOutcome, DispatchError, DispatchHooks, ToolInvocation};

use crate::{MetricsDispatchHooks, SafeDispatchHooks, TracingDispatchHooks};

fn sample_call() -> ToolInvocation {
    ToolInvocation::new("call_1", "echo", json!({"text": "hi"}))
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    let hooks = TracingDispatchHooks;
    let call = sample_call();

    hooks.on_dispatch_start(&call);
    hooks.on_dispatch_success(
        &call,
        &CallOutcome::Completed(json!("hi")),
        Duration::from_millis(5),
    );
    hooks.on_dispatch_success(&call, &CallOutcome::Captured, Duration::from_millis(5));
    hooks.on_dispatch_failure(
        &call,
        &DispatchError::not_found("echo"),
        Duration::from_millis(5),
    );
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    let hooks = MetricsDispatchHooks;
    let call = sample_call();

    hooks.on_dispatch_start(&call);
    hooks.on_dispatch_success(
        &call,
        &CallOutcome::Completed(json!("hi")),
        Duration::from_millis(5),
    );
    hooks.on_dispatch_failure(
        &call,
        &DispatchError::invalid_arguments("echo", "bad bag"),
        Duration::from_millis(5),
    );
}

#[test]
fn safe_hooks_swallow_panics_from_the_inner_hooks() {
    struct PanickyHooks;

    impl DispatchHooks for PanickyHooks {
        fn on_dispatch_start(&self, _call: &ToolInvocation) {
            panic!("hook exploded");
        }
    }

    let hooks = SafeDispatchHooks::new(PanickyHooks);
    hooks.on_dispatch_start(&sample_call());
    hooks.on_dispatch_success(
        &sample_call(),
        &CallOutcome::Captured,
        Duration::from_millis(1),
    );
}
