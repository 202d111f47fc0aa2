#![doc = r#"
Typed, single-pass query results for Neo4j in Rust.

`boltconv` hands out the rows of a Cypher query as a [`QueryResult`]: a
wrapper over a row source that can be consumed exactly once, either by
converting every row into a Rust type or by pushing every row to a handler.
Built on [`neo4rs`] 0.8.

# Quick start

## Convert with the default strategy

[`QueryResult::to`] looks the conversion up in a [`ConversionRegistry`]. The
standard registry already knows how to read one-column rows into scalars:

```rust,no_run
use boltconv::prelude::*;

# async fn example(graph: &neo4rs::Graph) -> Result<(), ConvertError> {
let names: Vec<String> = BoltQuery::new("MATCH (p:Person) RETURN p.name")
    .fetch(graph)
    .await?
    .to::<String>()?
    .collect_into()?;
# Ok(())
# }
```

## Convert with your own converter

```rust
use boltconv::prelude::*;

# fn main() -> Result<(), ConvertError> {
let rows = vec![("Alice", 31_i64), ("Bob", 27)];
let labels: Vec<String> = QueryResult::from_rows(rows)
    .to_with(|(name, age): (&str, i64)| Ok::<_, ConvertError>(format!("{name} ({age})")))?
    .collect_into()?;
assert_eq!(labels, vec!["Alice (31)", "Bob (27)"]);
# Ok(())
# }
```

## Push rows to a handler

```rust
use boltconv::prelude::*;

# fn main() -> Result<(), ConvertError> {
let mut total = 0;
QueryResult::from_rows(vec![1_i64, 2, 3]).handle(|n: i64| {
    total += n;
    Ok::<_, ConvertError>(())
})?;
assert_eq!(total, 6);
# Ok(())
# }
```

## Map rows and nodes to structs

```rust
use boltconv::prelude::*;

#[derive(Debug, NodeEntity)]
#[boltconv(label = "Person")]
struct Person {
    name: String,
}

#[derive(FromRow)]
struct PersonRow {
    #[boltconv(column = "p")]
    person: Person,
    score: Option<f64>,
}
```

Register them to make them reachable from [`QueryResult::to`]:

```rust,ignore
let registry = ConversionRegistry::standard()
    .register_row::<PersonRow>()
    .register_node::<Person>();
let people = result.with_registry(Arc::new(registry)).to::<Person>()?;
```

# Single pass

Every consuming call takes the rows. Calling a second one fails with
[`ConvertError::Exhausted`]. Conversion is lazy: a [`ConvertedResult`]
yields the rows converted so far and ends after the first error.

[`neo4rs`]: https://docs.rs/neo4rs
"#]

pub mod prelude;
pub mod query;
pub mod stream;

pub use boltconv_core as core;
pub use boltconv_macros::{FromRow, NodeEntity};

pub use boltconv_core::traits::{FromRow as FromRowTrait, NodeEntity as NodeEntityTrait};
pub use boltconv_core::{ConversionRegistry, ConvertError, ConvertedResult, QueryResult};
