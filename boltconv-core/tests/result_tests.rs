use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use boltconv_core::{ConvertError, QueryResult};
use neo4rs::BoltType;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn name_row(name: &str) -> HashMap<String, BoltType> {
    HashMap::from([("name".to_string(), BoltType::from(name))])
}

fn extract_name(row: HashMap<String, BoltType>) -> Result<String, ConvertError> {
    match row.get("name") {
        Some(BoltType::String(s)) => Ok(s.value.clone()),
        Some(other) => Err(ConvertError::type_mismatch("String", "other", &format!("{other:?}"))),
        None => Err(ConvertError::missing_field("name", "row")),
    }
}

/// A row source that records how many rows were pulled from it.
fn counted(rows: Vec<i64>, pulled: Arc<AtomicUsize>) -> QueryResult<i64> {
    QueryResult::from_rows(rows.into_iter().inspect(move |_| {
        pulled.fetch_add(1, Ordering::SeqCst);
    }))
}

fn assert_send<T: Send>(_: &T) {}

#[test]
fn test_handle_visits_rows_in_order() {
    init_logging();
    let mut result = QueryResult::from_rows(vec![1_i64, 2, 3]);
    let mut seen = Vec::new();
    result
        .handle(|n: i64| {
            seen.push(n);
            Ok::<_, ConvertError>(())
        })
        .unwrap();
    assert_eq!(seen, vec![1, 2, 3]);
    assert!(result.is_consumed());
}

#[test]
fn test_to_with_extracts_names() {
    init_logging();
    let mut result = QueryResult::from_rows(vec![name_row("Alice"), name_row("Bob")]);
    let names: Vec<String> = result.to_with(extract_name).unwrap().collect_into().unwrap();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[test]
fn test_to_uses_default_single_column_strategy() {
    let mut result = QueryResult::from_rows(vec![name_row("Alice"), name_row("Bob")]);
    let names: Vec<String> = result.to::<String>().unwrap().collect_into().unwrap();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[test]
fn test_to_with_preserves_order_and_count() {
    let rows: Vec<i64> = (1..=50).collect();
    let mut result = QueryResult::from_rows(rows.clone());
    let squared: Vec<i64> = result
        .to_with(|n: i64| Ok::<_, ConvertError>(n * n))
        .unwrap()
        .collect_into()
        .unwrap();
    assert_eq!(squared, rows.iter().map(|n| n * n).collect::<Vec<_>>());
}

#[test]
fn test_second_call_is_exhausted() {
    let mut result = QueryResult::from_rows(vec![1_i64]);
    let _ = result.to_with(|n: i64| Ok::<_, ConvertError>(n)).unwrap();

    assert!(matches!(result.to::<i64>(), Err(ConvertError::Exhausted)));
    assert!(matches!(
        result.to_with(|n: i64| Ok::<_, ConvertError>(n)),
        Err(ConvertError::Exhausted)
    ));
    assert!(matches!(result.rows(), Err(ConvertError::Exhausted)));
    let err = result.handle(|_: i64| Ok::<_, ConvertError>(())).unwrap_err();
    assert!(matches!(err, ConvertError::Exhausted));
}

#[test]
fn test_into_iter_after_consumption_yields_exhausted() {
    let mut result = QueryResult::from_rows(vec![1_i64]);
    result.handle(|_: i64| Ok::<_, ConvertError>(())).unwrap();
    let items: Vec<_> = result.into_iter().collect();
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(ConvertError::Exhausted)));
}

#[test]
fn test_into_iter_yields_raw_rows() {
    let rows: Result<Vec<i64>, _> = QueryResult::from_rows(vec![4_i64, 5]).into_iter().collect();
    assert_eq!(rows.unwrap(), vec![4, 5]);
}

#[test]
fn test_missing_default_strategy_keeps_rows() {
    let mut result = QueryResult::from_rows(vec![1_i64, 2]);
    let err = result.to::<Vec<String>>().unwrap_err();
    assert!(matches!(err, ConvertError::NoConverter { .. }));
    assert!(!result.is_consumed());

    let total: i64 = result
        .to::<i64>()
        .unwrap()
        .map(|n| n.unwrap())
        .sum();
    assert_eq!(total, 3);
}

#[test]
fn test_converter_error_is_partial_and_lazy() {
    init_logging();
    let pulled = Arc::new(AtomicUsize::new(0));
    let mut result = counted(vec![1, 2, 3, 4, 5], Arc::clone(&pulled));
    let converted = result
        .to_with(|n: i64| {
            if n == 3 {
                Err(ConvertError::Mapping(format!("row {n} rejected")))
            } else {
                Ok(n * 10)
            }
        })
        .unwrap();
    assert_eq!(pulled.load(Ordering::SeqCst), 0);

    let items: Vec<_> = converted.collect();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_ref().unwrap(), &10);
    assert_eq!(items[1].as_ref().unwrap(), &20);
    match &items[2] {
        Err(ConvertError::Mapping(msg)) => assert!(msg.contains("row 3")),
        other => panic!("expected Mapping error, got: {other:?}"),
    }
    // Nothing is read past the failing row.
    assert_eq!(pulled.load(Ordering::SeqCst), 3);
}

#[test]
fn test_collect_into_returns_only_the_error() {
    let mut result = QueryResult::from_rows(vec![1_i64, 2, 3]);
    let err = result
        .to_with(|n: i64| {
            if n == 2 {
                Err(ConvertError::missing_field("n", "row"))
            } else {
                Ok(n)
            }
        })
        .unwrap()
        .collect_into::<Vec<i64>>()
        .unwrap_err();
    assert!(matches!(err, ConvertError::MissingField { .. }));
}

#[derive(Debug, PartialEq)]
enum AppError {
    Stop(i64),
    Convert(String),
}

impl From<ConvertError> for AppError {
    fn from(e: ConvertError) -> Self {
        AppError::Convert(e.to_string())
    }
}

#[test]
fn test_handler_error_propagates_unchanged() {
    let pulled = Arc::new(AtomicUsize::new(0));
    let mut result = counted(vec![1, 2, 3, 4], Arc::clone(&pulled));
    let mut seen = Vec::new();
    let err = result
        .handle(|n: i64| {
            if n == 2 {
                return Err(AppError::Stop(n));
            }
            seen.push(n);
            Ok(())
        })
        .unwrap_err();
    assert_eq!(err, AppError::Stop(2));
    assert_eq!(seen, vec![1]);
    assert_eq!(pulled.load(Ordering::SeqCst), 2);
}

#[test]
fn test_source_error_stops_handle() {
    let rows = vec![Ok(1_i64), Err(ConvertError::Mapping("cursor broke".into())), Ok(3)];
    let mut result = QueryResult::new(rows);
    let mut seen = Vec::new();
    let err = result
        .handle(|n: i64| {
            seen.push(n);
            Ok::<_, AppError>(())
        })
        .unwrap_err();
    assert_eq!(seen, vec![1]);
    assert!(matches!(err, AppError::Convert(ref msg) if msg.contains("cursor broke")));
}

#[test]
fn test_rows_end_after_source_error() {
    let rows = vec![Ok(1_i64), Err(ConvertError::Mapping("boom".into())), Ok(3)];
    let mut result = QueryResult::new(rows);
    let items: Vec<_> = result.rows().unwrap().collect();
    assert_eq!(items.len(), 2);
    assert!(items[1].is_err());
}

#[test]
fn test_single() {
    let one = QueryResult::from_rows(vec![7_i64]).to::<i64>().unwrap().single().unwrap();
    assert_eq!(one, 7);

    let none = QueryResult::from_rows(Vec::<i64>::new()).to::<i64>().unwrap().single();
    assert!(matches!(none, Err(ConvertError::EmptyResult)));

    let many = QueryResult::from_rows(vec![1_i64, 2]).to::<i64>().unwrap().single();
    assert!(matches!(many, Err(ConvertError::NotSingle)));
}

#[test]
fn test_single_or_none() {
    let none = QueryResult::from_rows(Vec::<i64>::new())
        .to::<i64>()
        .unwrap()
        .single_or_none()
        .unwrap();
    assert_eq!(none, None);

    let one = QueryResult::from_rows(vec![9_i64]).to::<i64>().unwrap().single_or_none().unwrap();
    assert_eq!(one, Some(9));

    let many = QueryResult::from_rows(vec![1_i64, 2]).to::<i64>().unwrap().single_or_none();
    assert!(matches!(many, Err(ConvertError::NotSingle)));
}

#[test]
fn test_converted_handle_and_map_with() {
    let mut out = Vec::new();
    QueryResult::from_rows(vec![name_row("Alice"), name_row("Bob")])
        .to_with(extract_name)
        .unwrap()
        .map_with(|name: String| Ok::<_, ConvertError>(name.len()))
        .handle(|len: usize| {
            out.push(len);
            Ok::<_, ConvertError>(())
        })
        .unwrap();
    assert_eq!(out, vec![5, 3]);
}

#[test]
fn test_debug_reports_state() {
    let mut result = QueryResult::from_rows(vec![1_i64]);
    assert!(format!("{result:?}").contains("consumed: false"));
    let _ = result.rows().unwrap();
    assert!(format!("{result:?}").contains("consumed: true"));
}

#[test]
fn test_results_move_across_threads() {
    let mut result = QueryResult::from_rows(vec![1_i64, 2, 3]);
    assert_send(&result);
    assert!(result.registry().contains::<i64, i64>());

    let converted = result.to_with(|n: i64| Ok::<_, ConvertError>(n + 1)).unwrap();
    assert_send(&converted);
    let collected = std::thread::spawn(move || converted.collect_into::<Vec<i64>>())
        .join()
        .unwrap()
        .unwrap();
    assert_eq!(collected, vec![2, 3, 4]);

    let fresh = QueryResult::from_rows(vec![name_row("Alice")]);
    let names = std::thread::spawn(move || {
        let mut fresh = fresh;
        fresh.to::<String>().and_then(|c| c.collect_into::<Vec<_>>())
    })
    .join()
    .unwrap()
    .unwrap();
    assert_eq!(names, vec!["Alice"]);
}
