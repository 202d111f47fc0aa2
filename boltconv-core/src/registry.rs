
//! Type-directed conversion strategies.
//!
//! [`QueryResult::to`](crate::QueryResult::to) resolves its conversion here,
//! keyed by the row type and the requested target type. Nothing is resolved
//! reflectively: a pair that was never registered has no default strategy.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use neo4rs::{BoltType as Value, Row as Record};
use once_cell::sync::Lazy;

use crate::error::ConvertError;
use crate::record;
use crate::traits::{FromBolt, FromRow, NodeEntity};
use crate::value::bolt_type_name;

/// A shared conversion from one row of type `T` into `R`.
pub type Converter<T, R> = Arc<dyn Fn(T) -> Result<R, ConvertError> + Send + Sync>;

/// Column maps, the shape of rows produced outside the driver.
type ColumnMap = HashMap<String, Value>;

static SHARED: Lazy<Arc<ConversionRegistry>> = Lazy::new(|| Arc::new(ConversionRegistry::standard()));

/// Lookup table of `(row type, target type) -> converter`.
///
/// Build one with the `register*` methods and attach it to a result with
/// [`QueryResult::with_registry`](crate::QueryResult::with_registry).
///
/// ```rust
/// # use boltconv_core::{ConversionRegistry, ConvertError, QueryResult};
/// # use std::sync::Arc;
/// let registry = ConversionRegistry::standard()
///     .register(|n: i64| Ok::<_, ConvertError>(format!("#{n}")));
///
/// let labels: Vec<String> = QueryResult::from_rows(vec![1_i64, 2])
///     .with_registry(Arc::new(registry))
///     .to::<String>()?
///     .collect_into()?;
/// assert_eq!(labels, vec!["#1", "#2"]);
/// # Ok::<(), ConvertError>(())
/// ```
#[derive(Default)]
pub struct ConversionRegistry {
    table: HashMap<(TypeId, TypeId), Box<dyn Any + Send + Sync>>,
}

/// Scalars reachable both from a bolt value and from a one-column row.
macro_rules! register_scalars {
    ($registry:expr, $($t:ty),* $(,)?) => {
        $registry$(.register_value::<$t>().register_column::<$t>())*
    };
}

impl ConversionRegistry {
    /// An empty registry: every `to::<R>()` fails with
    /// [`ConvertError::NoConverter`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The default strategies.
    ///
    /// - `Row` to its column map,
    /// - one-column `Row`s and column maps to scalars, chrono types and raw
    ///   bolt values,
    /// - `BoltType` rows to the same scalars.
    pub fn standard() -> Self {
        let registry = Self::new()
            .register(|row: Record| record::columns(&row))
            .register_column::<Value>()
            .register_value::<Vec<Value>>()
            .register_column::<Vec<Value>>();
        register_scalars!(
            registry,
            String,
            bool,
            i64,
            i32,
            u64,
            u32,
            f64,
            f32,
            chrono::NaiveDate,
            chrono::NaiveDateTime,
            chrono::DateTime<chrono::FixedOffset>,
        )
    }

    /// The process-wide standard registry used by results that were not given
    /// one explicitly.
    pub fn shared() -> Arc<ConversionRegistry> {
        Arc::clone(&SHARED)
    }

    /// Register `f` as the conversion from `T` rows to `R`, replacing any
    /// earlier one for the same pair.
    pub fn register<T, R, F>(mut self, f: F) -> Self
    where
        T: 'static,
        R: 'static,
        F: Fn(T) -> Result<R, ConvertError> + Send + Sync + 'static,
    {
        let converter: Converter<T, R> = Arc::new(f);
        let key = (TypeId::of::<T>(), TypeId::of::<R>());
        if self.table.insert(key, Box::new(converter)).is_some() {
            log::debug!("replaced converter {} -> {}", type_name::<T>(), type_name::<R>());
        }
        self
    }

    /// `BoltType` rows to `R` via [`FromBolt`].
    pub fn register_value<R: FromBolt + 'static>(self) -> Self {
        self.register(R::from_bolt)
    }

    /// One-column `Row`s and column maps to `R` via [`FromBolt`].
    pub fn register_column<R: FromBolt + 'static>(self) -> Self {
        self.register(|row: Record| R::from_bolt(record::single_column(record::columns(&row)?)?))
            .register(|columns: ColumnMap| R::from_bolt(record::single_column(columns)?))
    }

    /// `Row`s to `R` via [`FromRow`].
    pub fn register_row<R: FromRow + 'static>(self) -> Self {
        self.register(|row: Record| R::from_row(&row))
    }

    /// Rows holding a single node column, and node values, to the entity `R`.
    pub fn register_node<R: NodeEntity + 'static>(self) -> Self {
        self.register(|row: Record| node_entity::<R>(record::single_column(record::columns(&row)?)?))
            .register(node_entity::<R>)
    }

    /// The conversion from `T` to `R`.
    ///
    /// A registered converter wins; otherwise rows convert to their own type
    /// unchanged, and any other pair has no conversion.
    pub fn get<T: 'static, R: 'static>(&self) -> Option<Converter<T, R>> {
        self.table
            .get(&(TypeId::of::<T>(), TypeId::of::<R>()))
            .and_then(|entry| entry.downcast_ref::<Converter<T, R>>())
            .cloned()
            .or_else(identity::<T, R>)
    }

    /// Whether [`get`](Self::get) would find a conversion from `T` to `R`.
    pub fn contains<T: 'static, R: 'static>(&self) -> bool {
        self.get::<T, R>().is_some()
    }

    /// Number of registered converters; the built-in identity is not counted.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn identity<T: 'static, R: 'static>() -> Option<Converter<T, R>> {
    if TypeId::of::<T>() != TypeId::of::<R>() {
        return None;
    }
    let converter: Converter<T, R> = Arc::new(|row: T| {
        let row: Box<dyn Any> = Box::new(row);
        row.downcast::<R>()
            .map(|row| *row)
            .map_err(|_| ConvertError::no_converter::<T, R>())
    });
    Some(converter)
}

fn node_entity<R: NodeEntity>(value: Value) -> Result<R, ConvertError> {
    match value {
        Value::Node(node) => R::from_node(&node),
        other => Err(ConvertError::type_mismatch("Node", bolt_type_name(&other), R::LABEL)),
    }
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRegistry")
            .field("converters", &self.table.len())
            .finish()
    }
}
