
//! Core traits for mapping Neo4j bolt values and rows into Rust types, and
//! for driving query results through converters and handlers.

use neo4rs::{BoltType as Value, Row as Record};
use crate::error::ConvertError;

/// Maps a Neo4j node to a Rust struct.
///
/// Automatically implemented by `#[derive(NodeEntity)]`. The derive also
/// generates a [`FromBolt`] impl so the struct can be converted directly
/// from `BoltType::Node`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(NodeEntity)]
/// #[boltconv(label = "Person")]
/// struct Person {
///     id: i64,
///     name: String,
/// }
///
/// assert_eq!(Person::LABEL, "Person");
/// ```
pub trait NodeEntity: Sized {
    /// The Neo4j label (e.g. `"Person"`).
    const LABEL: &'static str;

    /// Deserialize a [`BoltNode`](neo4rs::BoltNode) into `Self`.
    fn from_node(node: &neo4rs::BoltNode) -> Result<Self, ConvertError>;
}

/// Maps a `neo4rs::Row` into a Rust struct by column name.
///
/// Automatically implemented by `#[derive(FromRow)]`.
///
/// # Field attributes
///
/// - **`Option<T>`** fields tolerate missing columns (become `None`).
/// - **`#[boltconv(flatten)]`** delegates to the inner type's `FromRow` impl,
///   passing the same row.
/// - **`#[boltconv(column = "...")]`** reads a differently named column.
pub trait FromRow: Sized {
    /// Deserialize a [`Row`](neo4rs::Row) into `Self`.
    fn from_row(row: &Record) -> Result<Self, ConvertError>;
}

/// Converts a single `neo4rs::BoltType` value into a Rust type.
///
/// This is the conversion primitive behind both the derive macros and the
/// default strategies of the [`ConversionRegistry`](crate::ConversionRegistry).
pub trait FromBolt: Sized {
    /// Convert a [`BoltType`](neo4rs::BoltType) into `Self`.
    fn from_bolt(value: Value) -> Result<Self, ConvertError>;
}

/// Maps one row of type `T` into one value of type `R`.
///
/// Any `Fn(T) -> Result<R, ConvertError>` is a converter, so closures and
/// plain functions can be passed to
/// [`QueryResult::to_with`](crate::QueryResult::to_with) directly. Converters
/// must not rely on shared mutable state.
///
/// ```rust
/// # use boltconv_core::{ConvertError, QueryResult};
/// let doubled = QueryResult::from_rows(vec![1_i64, 2, 3])
///     .to_with(|n: i64| Ok::<_, ConvertError>(n * 2))?
///     .collect_into::<Vec<_>>()?;
/// assert_eq!(doubled, vec![2, 4, 6]);
/// # Ok::<(), ConvertError>(())
/// ```
pub trait ResultConverter<T, R> {
    /// Convert one row.
    fn convert(&self, value: T) -> Result<R, ConvertError>;
}

impl<T, R, F> ResultConverter<T, R> for F
where
    F: Fn(T) -> Result<R, ConvertError>,
{
    fn convert(&self, value: T) -> Result<R, ConvertError> {
        self(value)
    }
}

/// Receives each element of a result in order.
///
/// Returning an error stops iteration; the error reaches the caller of
/// `handle` unchanged. Any `FnMut(T) -> Result<(), E>` is a handler.
pub trait Handler<T> {
    /// The error a handler may stop iteration with.
    type Error;

    /// Handle one element.
    fn handle(&mut self, value: T) -> Result<(), Self::Error>;
}

impl<T, E, F> Handler<T> for F
where
    F: FnMut(T) -> Result<(), E>,
{
    type Error = E;

    fn handle(&mut self, value: T) -> Result<(), E> {
        self(value)
    }
}
