//! Convenience re-exports for common boltconv usage.
//!
//! ```rust
//! use boltconv::prelude::*;
//! ```

pub use crate::{FromRow, NodeEntity};
pub use boltconv_core::traits::{
    FromBolt, FromRow as FromRowTrait, Handler, NodeEntity as NodeEntityTrait, ResultConverter,
};
pub use boltconv_core::{ConversionRegistry, ConvertError, ConvertedResult, QueryResult, RawBytes};
pub use crate::query::BoltQuery;
pub use crate::stream::RowStream;
