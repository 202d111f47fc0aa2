
//! Error types for boltconv conversions and result handling.

use thiserror::Error;

/// Unified error type for conversions and query-result adapters.
///
/// Derive macros wrap conversion errors with [`Context`](ConvertError::Context)
/// via [`with_context`](ConvertError::with_context), producing chained messages like:
///
/// ```text
/// UserRow::age: type mismatch: expected Integer, got String (i64)
/// ```
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A general mapping error with a freeform message.
    #[error("mapping error: {0}")]
    Mapping(String),

    /// A required property was not found on a node.
    #[error("missing property '{property}' on {label}")]
    MissingProperty { property: String, label: String },

    /// A required column was not found in a row.
    #[error("missing field '{field}' on {struct_name}")]
    MissingField { field: String, struct_name: String },

    /// A `BoltType` variant did not match the expected Rust type.
    #[error("type mismatch: expected {expected}, got {got} ({context})")]
    TypeMismatch {
        expected: String,
        got: String,
        context: String,
    },

    /// Wraps an inner error with additional context (struct name, field, property).
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<ConvertError>,
    },

    /// No default conversion is registered for the requested row/target pair.
    #[error("no converter registered from {from} to {to}")]
    NoConverter { from: &'static str, to: &'static str },

    /// Single-column extraction was applied to a row with another column count.
    #[error("expected a single column, got {columns}")]
    NotSingleColumn { columns: usize },

    /// `single()` was called on an empty result.
    #[error("expected exactly one result, got none")]
    EmptyResult,

    /// `single()` or `single_or_none()` found more than one result.
    #[error("expected at most one result, got more")]
    NotSingle,

    /// The single-pass row source was already consumed by an earlier call.
    #[error("query result already consumed")]
    Exhausted,

    /// A `neo4rs::Error` from the underlying driver.
    #[error("neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),
}

impl ConvertError {
    /// Create a [`TypeMismatch`](ConvertError::TypeMismatch) error.
    pub fn type_mismatch(expected: &str, got: &str, context: &str) -> Self {
        ConvertError::TypeMismatch {
            expected: expected.to_owned(),
            got: got.to_owned(),
            context: context.to_owned(),
        }
    }

    /// Create a [`MissingProperty`](ConvertError::MissingProperty) error.
    pub fn missing_property(property: &str, label: &str) -> Self {
        ConvertError::MissingProperty {
            property: property.to_owned(),
            label: label.to_owned(),
        }
    }

    /// Create a [`MissingField`](ConvertError::MissingField) error.
    pub fn missing_field(field: &str, struct_name: &str) -> Self {
        ConvertError::MissingField {
            field: field.to_owned(),
            struct_name: struct_name.to_owned(),
        }
    }

    /// Create a [`NoConverter`](ConvertError::NoConverter) error for the row type `T`
    /// and target type `R`.
    pub fn no_converter<T, R>() -> Self {
        ConvertError::NoConverter {
            from: std::any::type_name::<T>(),
            to: std::any::type_name::<R>(),
        }
    }

    /// Wrap this error with additional context, producing a [`Context`](ConvertError::Context) variant.
    ///
    /// ```rust
    /// # use boltconv_core::ConvertError;
    /// let err = ConvertError::type_mismatch("Integer", "String", "i64");
    /// let wrapped = err.with_context("UserRow::age");
    /// assert!(wrapped.to_string().contains("UserRow::age"));
    /// ```
    pub fn with_context(self, ctx: impl Into<String>) -> Self {
        ConvertError::Context {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error came from converting a row or value, as opposed to
    /// the state of the result or the driver.
    pub fn is_conversion(&self) -> bool {
        matches!(
            self,
            ConvertError::Mapping(_)
                | ConvertError::MissingProperty { .. }
                | ConvertError::MissingField { .. }
                | ConvertError::TypeMismatch { .. }
                | ConvertError::Context { .. }
                | ConvertError::NoConverter { .. }
                | ConvertError::NotSingleColumn { .. }
        )
    }
}
