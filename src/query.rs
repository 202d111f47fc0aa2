
use neo4rs::{BoltType as Value, Graph, Query, Row, Txn};
use boltconv_core::error::ConvertError;
use boltconv_core::result::QueryResult;
use crate::stream::RowStream;

/// A Cypher query whose rows are handed out as a [`QueryResult`].
///
/// ```rust,no_run
/// # use boltconv::query::BoltQuery;
/// # async fn example(graph: &neo4rs::Graph) -> Result<(), boltconv::ConvertError> {
/// let names: Vec<String> = BoltQuery::new("MATCH (p:Person) WHERE p.age > $age RETURN p.name")
///     .param("age", 30_i64)
///     .fetch(graph)
///     .await?
///     .to::<String>()?
///     .collect_into()?;
/// # Ok(())
/// # }
/// ```
pub struct BoltQuery {
    inner: Query,
}

impl BoltQuery {
    /// Create a new query from a Cypher string.
    pub fn new(query: impl Into<String>) -> Self {
        let q: String = query.into();
        Self { inner: neo4rs::query(&q) }
    }

    /// Bind a named parameter. Accepts any type that converts to `BoltType`.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let k: String = key.into();
        self.inner = self.inner.param(&k, value.into());
        self
    }

    /// Execute against a [`Graph`] and buffer the rows into a [`QueryResult`].
    ///
    /// Rows are read to the end (or to the first driver error, which is kept
    /// as the last element) before this returns.
    pub async fn fetch(self, graph: &Graph) -> Result<QueryResult<Row>, ConvertError> {
        Ok(self.fetch_stream(graph).await?.into_result().await)
    }

    /// Execute within a [`Txn`] and buffer the rows into a [`QueryResult`].
    ///
    /// The stream is driven through `txn.handle()`.
    pub async fn fetch_in(self, txn: &mut Txn) -> Result<QueryResult<Row>, ConvertError> {
        let mut stream = txn.execute(self.inner).await?;
        let mut rows = Vec::new();
        loop {
            match stream.next(txn.handle()).await {
                Ok(Some(row)) => rows.push(Ok(row)),
                Ok(None) => break,
                Err(e) => {
                    rows.push(Err(ConvertError::Neo4j(e)));
                    break;
                }
            }
        }
        log::debug!("buffered {} rows in transaction", rows.len());
        Ok(QueryResult::new(rows))
    }

    /// Execute against a [`Graph`] without buffering.
    ///
    /// Only available for [`Graph`] connections; use
    /// [`fetch_in`](Self::fetch_in) inside a transaction.
    pub async fn fetch_stream(self, graph: &Graph) -> Result<RowStream, ConvertError> {
        use futures::TryStreamExt;
        let detached = graph.execute(self.inner).await?;
        Ok(RowStream::new(detached.into_stream().into_stream()))
    }
}

/// Convenience constructor, equivalent to [`BoltQuery::new`].
pub fn query(q: impl Into<String>) -> BoltQuery {
    BoltQuery::new(q)
}
