mod common;

use censrs::{CensRSError, ColumnData, DataFrame, Field, Schema, SemanticType, Series, NA};

#[test]
fn test_dataframe_creation() {
    let df = common::sample_frame();

    assert_eq!(df.row_count(), 6);
    assert_eq!(df.column_count(), 3);
    assert_eq!(df.column_names(), vec!["REGION", "FES", "INCOME"]);
    assert!(df.contains_column("INCOME"));
    assert!(!df.contains_column("AGE"));
}

#[test]
fn test_dataframe_typed_access() {
    let df = common::sample_frame();

    let income = df.numeric("INCOME").unwrap();
    assert_eq!(income.len(), 6);
    assert_eq!(income.na_count(), 1);

    let region = df.categorical("REGION").unwrap();
    assert_eq!(region.na_count(), 1);

    // 存在しない列はエラー
    assert!(matches!(
        df.numeric("AGE"),
        Err(CensRSError::ColumnNotFound(_))
    ));

    // 型が合わない場合はエラー
    assert!(matches!(
        df.numeric("REGION"),
        Err(CensRSError::ColumnTypeMismatch { .. })
    ));
    assert!(matches!(
        df.categorical("INCOME"),
        Err(CensRSError::ColumnTypeMismatch { .. })
    ));
}

#[test]
fn test_dataframe_length_mismatch() {
    // 列の長さが一致しない場合はエラー
    let schema = Schema::new(vec![
        Field::new("A", SemanticType::Numeric),
        Field::new("B", SemanticType::Numeric),
    ])
    .unwrap();

    let result = DataFrame::new(
        schema,
        vec![
            ColumnData::Numeric(Series::from_vec(vec![1.0, 2.0], None)),
            ColumnData::Numeric(Series::from_vec(vec![1.0, 2.0, 3.0], None)),
        ],
    );

    assert!(matches!(
        result,
        Err(CensRSError::InconsistentRowCount { .. })
    ));
}

#[test]
fn test_dataframe_type_mismatch() {
    // スキーマと列データの型が一致しない場合はエラー
    let schema = Schema::new(vec![Field::new("A", SemanticType::Numeric)]).unwrap();

    let result = DataFrame::new(
        schema,
        vec![ColumnData::Categorical(Series::from_vec(vec![1, 2], None))],
    );

    assert!(matches!(
        result,
        Err(CensRSError::ColumnTypeMismatch { .. })
    ));
}

#[test]
fn test_dataframe_non_nullable_violation() {
    // 非null列に欠損値があればエラー
    let schema =
        Schema::new(vec![Field::new("A", SemanticType::Numeric).with_nullable(false)]).unwrap();

    let result = DataFrame::new(
        schema,
        vec![ColumnData::Numeric(Series::new(
            vec![NA::Value(1.0), NA::NA],
            None,
        ))],
    );

    assert!(matches!(result, Err(CensRSError::Consistency(_))));
}

#[test]
fn test_missingness_report() {
    // [1, NA, 2, NA] の欠損率は0.5
    let schema = Schema::new(vec![
        Field::new("A", SemanticType::Numeric),
        Field::new("B", SemanticType::Numeric),
    ])
    .unwrap();

    let df = DataFrame::new(
        schema,
        vec![
            ColumnData::Numeric(Series::new(
                vec![NA::Value(1.0), NA::NA, NA::Value(2.0), NA::NA],
                None,
            )),
            ColumnData::Numeric(Series::from_vec(vec![1.0, 2.0, 3.0, 4.0], None)),
        ],
    )
    .unwrap();

    let report = df.missingness_report();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0], ("A".to_string(), 0.5));
    assert_eq!(report[1], ("B".to_string(), 0.0));
}

#[test]
fn test_missingness_report_ordering() {
    // レポートはスキーマの列順に従う
    let df = common::sample_frame();
    let report = df.missingness_report();

    let names: Vec<&str> = report.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["REGION", "FES", "INCOME"]);

    // REGION: 1/6, FES: 1/6, INCOME: 1/6
    for (_, ratio) in &report {
        assert!((ratio - 1.0 / 6.0).abs() < 1e-10);
    }
}

#[test]
fn test_missingness_report_empty_frame() {
    // 行がない場合の欠損率は0.0
    let schema = Schema::new(vec![Field::new("A", SemanticType::Numeric)]).unwrap();
    let df = DataFrame::new(
        schema,
        vec![ColumnData::Numeric(Series::new(vec![], None))],
    )
    .unwrap();

    assert_eq!(df.row_count(), 0);
    let report = df.missingness_report();
    assert_eq!(report, vec![("A".to_string(), 0.0)]);
}
