//! Tool registry, capture protocol, and the dispatch core shared by the
//! provider adapters.
//!
//! ```rust
//! use serde_json::Value;
//! use tfunction::Function;
//! use tschema::ValueType;
//! use ttools::{CAPTURE_TOOL_NAME, Toolbox};
//!
//! let add = Function::builder("add")
//!     .description("Adds two numbers")
//!     .sync_handler(|_| Ok(Value::Null))
//!     .build()
//!     .expect("descriptor should build");
//!
//! let toolbox = Toolbox::with_result_type([add], ValueType::Boolean)
//!     .expect("toolbox should build");
//!
//! assert_eq!(toolbox.len(), 2);
//! assert!(toolbox.lookup(CAPTURE_TOOL_NAME).is_some());
//! assert!(!toolbox.slot().expect("slot should exist").is_resolved());
//! ```

mod dispatch;
mod error;
mod hooks;
mod slot;
mod toolbox;

pub mod prelude {
    pub use crate::{
        CAPTURE_TOOL_NAME, CallOutcome, CaptureTool, DispatchError, DispatchHooks,
        NoopDispatchHooks, ResultSlot, SlotResult, ToolEntry, ToolInvocation, Toolbox,
        ToolboxError, ToolboxErrorKind,
    };
}

pub use dispatch::{CallOutcome, DispatchError, ToolInvocation};
pub use error::{ToolboxError, ToolboxErrorKind};
pub use hooks::{DispatchHooks, NoopDispatchHooks};
pub use slot::{Resolved, ResultSlot, SlotResult};
pub use toolbox::{
    CAPTURE_TOOL_DESCRIPTION, CAPTURE_TOOL_NAME, CaptureTool, ToolEntry, Toolbox,
};
