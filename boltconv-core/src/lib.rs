
//! Core traits, error types, value conversions, and the query-result adapter
//! for boltconv.
//!
//! This crate is not meant to be used directly. Use the [`boltconv`] facade
//! crate instead, which re-exports everything you need.

pub mod traits;
pub mod error;

pub mod value;
pub mod record;
pub mod registry;
pub mod result;

pub use error::ConvertError;
pub use value::RawBytes;
pub use registry::{ConversionRegistry, Converter};
pub use result::{ConvertedResult, QueryResult, Rows};
pub use traits::{Handler, ResultConverter};
