
//! Procedural macros for boltconv.
//!
//! This crate is not meant to be used directly. Use the [`boltconv`] facade
//! crate which re-exports all macros.

extern crate proc_macro;

use proc_macro::TokenStream;

mod attrs;
mod from_row;
mod node;

/// Derive [`NodeEntity`](boltconv_core::traits::NodeEntity) and [`FromBolt`](boltconv_core::traits::FromBolt) for a struct.
///
/// Each struct field is read from a node property via `FromBolt`. `Option<T>`
/// fields tolerate a missing property.
///
/// # Attributes
///
/// **Struct-level:**
/// - `#[boltconv(label = "...")]` sets the Neo4j label. Defaults to the struct name.
///
/// **Field-level:**
/// - `#[boltconv(prop = "...")]` overrides the property name (default: field name).
///
/// # Example
///
/// ```rust,ignore
/// use boltconv::prelude::*;
///
/// #[derive(Debug, NodeEntity)]
/// #[boltconv(label = "Person")]
/// struct Person {
///     id: i64,
///     name: String,
///     #[boltconv(prop = "email_address")]
///     email: Option<String>,
/// }
/// ```
#[proc_macro_derive(NodeEntity, attributes(boltconv))]
pub fn node_entity(input: TokenStream) -> TokenStream {
    node::expand(input)
}

/// Derive [`FromRow`](boltconv_core::traits::FromRow) for a struct.
///
/// Maps a `neo4rs::Row` to a Rust struct, one column per field (the Cypher
/// alias).
///
/// # Attributes
///
/// **Field-level:**
/// - `#[boltconv(column = "...")]` reads a differently named column.
/// - `#[boltconv(flatten)]` delegates to the field type's `FromRow` with the
///   same row.
///
/// `Option<T>` fields become `None` when the column is missing or `null`.
///
/// # Example
///
/// ```rust,ignore
/// use boltconv::prelude::*;
///
/// #[derive(FromRow)]
/// struct Audit {
///     created: String,
/// }
///
/// #[derive(FromRow)]
/// struct PersonRow {
///     #[boltconv(column = "p")]
///     person: Person,
///     score: Option<f64>,
///     #[boltconv(flatten)]
///     audit: Audit,
/// }
/// ```
#[proc_macro_derive(FromRow, attributes(boltconv))]
pub fn from_row(input: TokenStream) -> TokenStream {
    from_row::expand(input)
}
