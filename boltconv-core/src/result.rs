
//! The query-result adapter and its converted view.
//!
//! A [`QueryResult`] wraps a single-pass row source, such as the rows of one
//! Neo4j query. Each consuming call ([`to`](QueryResult::to),
//! [`to_with`](QueryResult::to_with), [`handle`](QueryResult::handle),
//! [`rows`](QueryResult::rows)) takes the source; any later call fails with
//! [`ConvertError::Exhausted`].
//!
//! Conversion is lazy. A [`ConvertedResult`] converts one row per `next()`
//! and stops after the first error, so rows before a failing row are still
//! delivered and nothing after it is read from the source.

use std::any::type_name;
use std::fmt;
use std::iter;
use std::sync::Arc;

use crate::error::ConvertError;
use crate::registry::ConversionRegistry;
use crate::traits::{Handler, ResultConverter};

type Source<T> = Box<dyn Iterator<Item = Result<T, ConvertError>> + Send>;

/// A single-pass sequence of rows of type `T`.
///
/// A result can be moved to another thread or held across an `.await`, but
/// it is consumed by one caller.
///
/// # Example
///
/// ```rust
/// # use boltconv_core::{ConvertError, QueryResult};
/// let mut result = QueryResult::from_rows(vec![1_i64, 2, 3]);
///
/// let mut seen = Vec::new();
/// result.handle(|n: i64| {
///     seen.push(n);
///     Ok::<_, ConvertError>(())
/// })?;
/// assert_eq!(seen, vec![1, 2, 3]);
///
/// // The rows are gone now.
/// assert!(matches!(result.to::<i64>(), Err(ConvertError::Exhausted)));
/// # Ok::<(), ConvertError>(())
/// ```
pub struct QueryResult<T> {
    source: Option<Source<T>>,
    registry: Arc<ConversionRegistry>,
}

impl<T: Send + 'static> QueryResult<T> {
    /// Wrap a fallible row source, e.g. a driver cursor.
    pub fn new<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Result<T, ConvertError>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            source: Some(Box::new(rows.into_iter())),
            registry: ConversionRegistry::shared(),
        }
    }

    /// Wrap rows that are already in memory.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::new(rows.into_iter().map(Ok))
    }

    /// Use `registry` instead of the shared standard one for [`to`](Self::to).
    pub fn with_registry(mut self, registry: Arc<ConversionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// The registry [`to`](Self::to) resolves its conversions in.
    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    /// Whether a consuming call has already taken the rows.
    pub fn is_consumed(&self) -> bool {
        self.source.is_none()
    }

    fn take_source(&mut self) -> Result<Source<T>, ConvertError> {
        match self.source.take() {
            Some(source) => Ok(source),
            None => {
                log::debug!("QueryResult<{}> consumed twice", type_name::<T>());
                Err(ConvertError::Exhausted)
            }
        }
    }

    /// Take the raw rows.
    pub fn rows(&mut self) -> Result<Rows<T>, ConvertError> {
        self.take_source().map(Rows::new)
    }

    /// Convert every row to `R` with the registered default strategy.
    ///
    /// The strategy is resolved now: if the registry has none for `(T, R)`
    /// this fails with [`ConvertError::NoConverter`] and the rows stay
    /// available. Conversion itself happens as the returned result is
    /// iterated.
    pub fn to<R: Send + 'static>(&mut self) -> Result<ConvertedResult<R>, ConvertError> {
        if self.is_consumed() {
            return Err(ConvertError::Exhausted);
        }
        let converter = self
            .registry
            .get::<T, R>()
            .ok_or_else(ConvertError::no_converter::<T, R>)?;
        self.to_with(move |row: T| converter(row))
    }

    /// Convert every row to `R` with `converter`.
    ///
    /// Errors returned by the converter are yielded unchanged.
    pub fn to_with<R, C>(&mut self, converter: C) -> Result<ConvertedResult<R>, ConvertError>
    where
        R: Send + 'static,
        C: ResultConverter<T, R> + Send + 'static,
    {
        let rows = self.rows()?;
        log::trace!("converting {} rows to {}", type_name::<T>(), type_name::<R>());
        Ok(ConvertedResult::new(
            rows.map(move |row| row.and_then(|row| converter.convert(row))),
        ))
    }

    /// Push every row, in order, to `handler`.
    ///
    /// Stops at the first error. A handler error is returned as is; a source
    /// error, or [`ConvertError::Exhausted`], is converted into the handler's
    /// error type.
    pub fn handle<H>(&mut self, handler: H) -> Result<(), H::Error>
    where
        H: Handler<T>,
        H::Error: From<ConvertError>,
    {
        let rows = self.rows()?;
        drive(rows, handler)
    }
}

fn drive<T, H>(rows: impl Iterator<Item = Result<T, ConvertError>>, mut handler: H) -> Result<(), H::Error>
where
    H: Handler<T>,
    H::Error: From<ConvertError>,
{
    let mut handled = 0usize;
    for row in rows {
        if let Err(e) = handler.handle(row?) {
            log::debug!("handler stopped after {handled} rows");
            return Err(e);
        }
        handled += 1;
    }
    log::trace!("handled {handled} rows");
    Ok(())
}

impl<T: Send + 'static> IntoIterator for QueryResult<T> {
    type Item = Result<T, ConvertError>;
    type IntoIter = Rows<T>;

    /// The raw rows, or a single [`ConvertError::Exhausted`] if they were
    /// already taken.
    fn into_iter(mut self) -> Rows<T> {
        match self.rows() {
            Ok(rows) => rows,
            Err(e) => Rows::new(Box::new(iter::once(Err(e)))),
        }
    }
}

impl<T> fmt::Debug for QueryResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResult")
            .field("row_type", &type_name::<T>())
            .field("consumed", &self.source.is_none())
            .finish()
    }
}

/// Raw rows taken from a [`QueryResult`].
///
/// Ends after the first source error.
pub struct Rows<T> {
    inner: Source<T>,
    failed: bool,
}

impl<T> Rows<T> {
    fn new(inner: Source<T>) -> Self {
        Self { inner, failed: false }
    }
}

impl<T> Iterator for Rows<T> {
    type Item = Result<T, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.inner.next();
        self.failed = matches!(next, Some(Err(_)));
        next
    }
}

/// A lazily converted view over the rows of a [`QueryResult`].
///
/// Yields `Ok` for each row converted so far and ends after the first
/// `Err`. The eager helpers ([`single`](Self::single),
/// [`collect_into`](Self::collect_into)) return that first error instead of
/// any partial output.
pub struct ConvertedResult<R> {
    inner: Box<dyn Iterator<Item = Result<R, ConvertError>> + Send>,
    failed: bool,
}

impl<R: Send + 'static> ConvertedResult<R> {
    pub(crate) fn new<I>(inner: I) -> Self
    where
        I: Iterator<Item = Result<R, ConvertError>> + Send + 'static,
    {
        Self { inner: Box::new(inner), failed: false }
    }

    /// Exactly one value.
    ///
    /// Fails with [`ConvertError::EmptyResult`] for no rows and
    /// [`ConvertError::NotSingle`] for more than one.
    pub fn single(mut self) -> Result<R, ConvertError> {
        let first = self.next().ok_or(ConvertError::EmptyResult)??;
        match self.next() {
            None => Ok(first),
            Some(Err(e)) => Err(e),
            Some(Ok(_)) => Err(ConvertError::NotSingle),
        }
    }

    /// Zero or one value; more than one is [`ConvertError::NotSingle`].
    pub fn single_or_none(mut self) -> Result<Option<R>, ConvertError> {
        let first = match self.next() {
            None => return Ok(None),
            Some(first) => first?,
        };
        match self.next() {
            None => Ok(Some(first)),
            Some(Err(e)) => Err(e),
            Some(Ok(_)) => Err(ConvertError::NotSingle),
        }
    }

    /// Materialize every value into `C`, or return the first error.
    pub fn collect_into<C: FromIterator<R>>(self) -> Result<C, ConvertError> {
        self.collect()
    }

    /// Push every converted value, in order, to `handler`. Same stopping
    /// rules as [`QueryResult::handle`].
    pub fn handle<H>(self, handler: H) -> Result<(), H::Error>
    where
        H: Handler<R>,
        H::Error: From<ConvertError>,
    {
        drive(self, handler)
    }

    /// Chain a further conversion, still lazily.
    pub fn map_with<S, C>(self, converter: C) -> ConvertedResult<S>
    where
        S: Send + 'static,
        C: ResultConverter<R, S> + Send + 'static,
    {
        ConvertedResult::new(self.map(move |value| value.and_then(|value| converter.convert(value))))
    }
}

impl<R> Iterator for ConvertedResult<R> {
    type Item = Result<R, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.inner.next();
        if let Some(Err(e)) = &next {
            log::debug!("conversion to {} failed: {e}", type_name::<R>());
            self.failed = true;
        }
        next
    }
}

impl<R> fmt::Debug for ConvertedResult<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertedResult")
            .field("target", &type_name::<R>())
            .field("failed", &self.failed)
            .finish()
    }
}
