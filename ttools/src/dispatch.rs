//! Dispatch core shared by every provider adapter.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

use serde_json::Value;
use tfunction::{ArgMap, InvokeError};

use crate::hooks::{DispatchHooks, NoopDispatchHooks};
use crate::toolbox::{CAPTURE_TOOL_NAME, ToolEntry, Toolbox};

/// One opaque tool call: name plus argument bag, tagged with the caller's
/// correlation id. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

impl ToolInvocation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Why a single dispatch failed. A lookup miss is distinct from a
/// validation failure; handler failures arrive wrapped in
/// [`InvokeError`] untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    NotFound { name: String },
    InvalidArguments { name: String, reason: String },
    Invoke { name: String, error: InvokeError },
}

impl DispatchError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn invalid_arguments(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invoke(name: impl Into<String>, error: InvokeError) -> Self {
        Self::Invoke {
            name: name.into(),
            error,
        }
    }

    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { name }
            | Self::InvalidArguments { name, .. }
            | Self::Invoke { name, .. } => name,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn invoke_error(&self) -> Option<&InvokeError> {
        match self {
            Self::Invoke { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "tool '{name}' not found"),
            Self::InvalidArguments { name, reason } => {
                write!(f, "invalid arguments for tool '{name}': {reason}")
            }
            Self::Invoke { name, error } => write!(f, "tool '{name}' failed: {error}"),
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invoke { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// The result of dispatching one call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// The tool ran and produced a value through the normal channel.
    Completed(Value),
    /// The capture tool resolved the shared slot; nothing flows through
    /// the normal channel.
    Captured,
    Failed(DispatchError),
}

impl CallOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }
}

impl Toolbox {
    /// Dispatches one call without observation hooks.
    pub async fn dispatch(&self, call: &ToolInvocation) -> CallOutcome {
        self.dispatch_with_hooks(call, &NoopDispatchHooks).await
    }

    /// Dispatches one call: look the tool up by name, validate and run
    /// it, and report the outcome to `hooks`.
    ///
    /// Any failure is additionally routed into the shared slot (when
    /// present) so an orchestrating loop awaiting it observes the
    /// failure; the first settlement wins. Failures never escape as
    /// panics or errors from this entry point.
    pub async fn dispatch_with_hooks(
        &self,
        call: &ToolInvocation,
        hooks: &dyn DispatchHooks,
    ) -> CallOutcome {
        hooks.on_dispatch_start(call);
        let started = Instant::now();

        let outcome = self.dispatch_inner(call).await;
        match &outcome {
            CallOutcome::Failed(error) => {
                if let Some(slot) = self.slot() {
                    slot.reject(error.clone());
                }
                hooks.on_dispatch_failure(call, error, started.elapsed());
            }
            other => hooks.on_dispatch_success(call, other, started.elapsed()),
        }

        outcome
    }

    /// Dispatches a batch in order, continuing past failed calls; each
    /// failure still settles the slot (first one wins) and yields its own
    /// outcome.
    pub async fn dispatch_batch(
        &self,
        calls: &[ToolInvocation],
        hooks: &dyn DispatchHooks,
    ) -> Vec<CallOutcome> {
        let mut outcomes = Vec::with_capacity(calls.len());
        for call in calls {
            outcomes.push(self.dispatch_with_hooks(call, hooks).await);
        }
        outcomes
    }

    async fn dispatch_inner(&self, call: &ToolInvocation) -> CallOutcome {
        let Some(entry) = self.lookup(&call.name) else {
            return CallOutcome::Failed(DispatchError::not_found(&call.name));
        };

        let args = match &call.arguments {
            Value::Object(map) => map.clone(),
            Value::Null => ArgMap::new(),
            _ => {
                return CallOutcome::Failed(DispatchError::invalid_arguments(
                    &call.name,
                    "arguments must be a JSON object",
                ));
            }
        };

        match entry {
            ToolEntry::User(function) => match function.invoke(args).await {
                Ok(value) => CallOutcome::Completed(value),
                Err(error) => CallOutcome::Failed(DispatchError::invoke(&call.name, error)),
            },
            ToolEntry::Capture(capture) => match capture.input().validate(&args) {
                Ok(validated) => {
                    let value = validated.get("value").cloned().unwrap_or(Value::Null);
                    if let Some(slot) = self.slot()
                        && !slot.resolve(value)
                    {
                        tracing::warn!(
                            tool = CAPTURE_TOOL_NAME,
                            "result slot already settled; capture ignored"
                        );
                    }
                    CallOutcome::Captured
                }
                Err(error) => CallOutcome::Failed(DispatchError::invoke(
                    CAPTURE_TOOL_NAME,
                    InvokeError::InvalidInput(error),
                )),
            },
        }
    }
}
