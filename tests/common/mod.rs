//! テスト用の共通ユーティリティ

use censrs::{ColumnData, DataFrame, Field, Schema, SemanticType, Series, NA};

/// 地域×世帯区分×所得のサンプルDataFrameを構築する
///
/// REGION: 1, 1, 2, 2, 2, NA
/// FES:    1, 2, 1, 1, NA, 1
/// INCOME: 100, 200, 300, NA, 500, 600
#[allow(dead_code)]
pub fn sample_frame() -> DataFrame {
    let schema = Schema::new(vec![
        Field::new("REGION", SemanticType::Categorical),
        Field::new("FES", SemanticType::Categorical),
        Field::new("INCOME", SemanticType::Numeric),
    ])
    .unwrap();

    let region = Series::new(
        vec![
            NA::Value(1),
            NA::Value(1),
            NA::Value(2),
            NA::Value(2),
            NA::Value(2),
            NA::NA,
        ],
        Some("REGION".to_string()),
    );
    let fes = Series::new(
        vec![
            NA::Value(1),
            NA::Value(2),
            NA::Value(1),
            NA::Value(1),
            NA::NA,
            NA::Value(1),
        ],
        Some("FES".to_string()),
    );
    let income = Series::new(
        vec![
            NA::Value(100.0),
            NA::Value(200.0),
            NA::Value(300.0),
            NA::NA,
            NA::Value(500.0),
            NA::Value(600.0),
        ],
        Some("INCOME".to_string()),
    );

    DataFrame::new(
        schema,
        vec![
            ColumnData::Categorical(region),
            ColumnData::Categorical(fes),
            ColumnData::Numeric(income),
        ],
    )
    .unwrap()
}
