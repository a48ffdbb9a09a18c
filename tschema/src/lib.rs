//! Record types, coercing validation, and doc comment parsing.
//!
//! ```rust
//! use serde_json::json;
//! use tschema::{Field, RecordType, ValueType};
//!
//! let record = RecordType::builder("add_Input")
//!     .field(Field::new("x", ValueType::Integer).description("The first number"))
//!     .field(Field::new("y", ValueType::Integer).default_value(json!(2)))
//!     .build()
//!     .expect("record should build");
//!
//! let schema = record.json_schema();
//! assert_eq!(schema["required"], json!(["x"]));
//! ```

mod docparse;
mod error;
mod output;
mod record;
mod value;

pub mod prelude {
    pub use crate::{
        DocParam, Field, OutputShape, ParsedDoc, RecordType, SchemaError, SchemaErrorKind,
        ValidationError, ValidationIssue, ValueType, parse_doc,
    };
}

pub use docparse::{DocParam, ParsedDoc, parse_doc};
pub use error::{SchemaError, SchemaErrorKind, ValidationError, ValidationIssue};
pub use output::OutputShape;
pub use record::{Field, RecordType, RecordTypeBuilder};
pub use value::ValueType;
