
//! Unbuffered query rows from the driver.

use std::pin::Pin;
use futures::stream::{Stream, StreamExt};
use neo4rs::Row;
use boltconv_core::error::ConvertError;
use boltconv_core::result::QueryResult;
use boltconv_core::traits::Handler;

/// Rows of one query as they arrive from the server.
///
/// Created by [`BoltQuery::fetch_stream`](crate::query::BoltQuery::fetch_stream).
/// Like [`QueryResult`], a `RowStream` ends after the first driver error.
///
/// # Example
///
/// ```rust,no_run
/// # use boltconv::query::BoltQuery;
/// # use boltconv::ConvertError;
/// # async fn example(graph: &neo4rs::Graph) -> Result<(), ConvertError> {
/// let mut names = Vec::new();
/// BoltQuery::new("MATCH (p:Person) RETURN p.name AS name")
///     .fetch_stream(graph)
///     .await?
///     .handle(|row: neo4rs::Row| {
///         names.push(row.get::<String>("name").map_err(|e| ConvertError::Mapping(e.to_string()))?);
///         Ok::<_, ConvertError>(())
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct RowStream {
    inner: Pin<Box<dyn Stream<Item = Result<Row, neo4rs::Error>> + Send>>,
    failed: bool,
}

impl RowStream {
    /// Wrap a stream of driver rows.
    pub fn new<S>(inner: S) -> Self
    where
        S: Stream<Item = Result<Row, neo4rs::Error>> + Send + 'static,
    {
        Self { inner: Box::pin(inner), failed: false }
    }

    /// Pull the next row; `None` once the stream is exhausted or has failed.
    pub async fn next(&mut self) -> Option<Result<Row, ConvertError>> {
        if self.failed {
            return None;
        }
        match self.inner.next().await {
            None => None,
            Some(Ok(row)) => Some(Ok(row)),
            Some(Err(e)) => {
                self.failed = true;
                Some(Err(ConvertError::Neo4j(e)))
            }
        }
    }

    /// Push every row, in order, to `handler`, stopping at the first error.
    ///
    /// A handler error is returned unchanged; driver errors are converted
    /// into the handler's error type.
    pub async fn handle<H>(mut self, mut handler: H) -> Result<(), H::Error>
    where
        H: Handler<Row>,
        H::Error: From<ConvertError>,
    {
        let mut handled = 0usize;
        while let Some(row) = self.next().await {
            if let Err(e) = handler.handle(row?) {
                log::debug!("row handler stopped after {handled} rows");
                return Err(e);
            }
            handled += 1;
        }
        log::trace!("streamed {handled} rows to handler");
        Ok(())
    }

    /// Drain the stream into a single-pass [`QueryResult`].
    ///
    /// A driver error is kept in place: the result yields the rows read
    /// before it, then the error.
    pub async fn into_result(mut self) -> QueryResult<Row> {
        let mut rows = Vec::new();
        while let Some(row) = self.next().await {
            rows.push(row);
        }
        log::debug!("buffered {} rows", rows.len());
        QueryResult::new(rows)
    }
}
