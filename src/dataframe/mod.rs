use crate::error::{CensRSError, Result};
use crate::schema::{Schema, SemanticType};
use crate::series::Series;

/// 列データ: スキーマの意味型に対応する実体
#[derive(Debug, Clone)]
pub enum ColumnData {
    /// 数値列
    Numeric(Series<f64>),
    /// カテゴリ列（整数コード）
    Categorical(Series<i64>),
    /// 識別子列
    Identifier(Series<String>),
}

impl ColumnData {
    /// 列の長さを取得
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(s) => s.len(),
            ColumnData::Categorical(s) => s.len(),
            ColumnData::Identifier(s) => s.len(),
        }
    }

    /// 列が空かどうか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 列の意味型を取得
    pub fn dtype(&self) -> SemanticType {
        match self {
            ColumnData::Numeric(_) => SemanticType::Numeric,
            ColumnData::Categorical(_) => SemanticType::Categorical,
            ColumnData::Identifier(_) => SemanticType::Identifier,
        }
    }

    /// NAの個数を取得
    pub fn na_count(&self) -> usize {
        match self {
            ColumnData::Numeric(s) => s.na_count(),
            ColumnData::Categorical(s) => s.na_count(),
            ColumnData::Identifier(s) => s.na_count(),
        }
    }

    /// セルを文字列に変換（欠損は空文字列）
    pub fn cell_string(&self, row: usize) -> String {
        match self {
            ColumnData::Numeric(s) => s
                .get(row)
                .and_then(|v| v.value())
                .map(|v| v.to_string())
                .unwrap_or_default(),
            ColumnData::Categorical(s) => s
                .get(row)
                .and_then(|v| v.value())
                .map(|v| v.to_string())
                .unwrap_or_default(),
            ColumnData::Identifier(s) => s
                .get(row)
                .and_then(|v| v.value())
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// DataFrame: スキーマに適合した列の順序付きコレクション
///
/// 全ての列は同じ行数を持ち、各列の型は構築時に一度だけ
/// スキーマと照合されます。以降の操作は読み取り専用です。
#[derive(Debug, Clone)]
pub struct DataFrame {
    /// スキーマ
    schema: Schema,

    /// 列データ（スキーマと同じ順序）
    columns: Vec<ColumnData>,

    /// 行数
    row_count: usize,
}

impl DataFrame {
    /// スキーマと列データからDataFrameを作成
    ///
    /// 列数・各列の型・各列の長さ・null許容制約を検証する
    pub fn new(schema: Schema, columns: Vec<ColumnData>) -> Result<Self> {
        if columns.len() != schema.len() {
            return Err(CensRSError::LengthMismatch {
                expected: schema.len(),
                actual: columns.len(),
            });
        }

        let row_count = columns.first().map(|c| c.len()).unwrap_or(0);

        for (field, column) in schema.fields().iter().zip(&columns) {
            if column.dtype() != field.dtype {
                return Err(CensRSError::ColumnTypeMismatch {
                    name: field.name.clone(),
                    expected: field.dtype,
                    found: column.dtype(),
                });
            }

            if column.len() != row_count {
                return Err(CensRSError::InconsistentRowCount {
                    expected: row_count,
                    found: column.len(),
                });
            }

            if !field.nullable && column.na_count() > 0 {
                return Err(CensRSError::Consistency(format!(
                    "非null列 '{}' に欠損値が含まれています",
                    field.name
                )));
            }
        }

        Ok(DataFrame {
            schema,
            columns,
            row_count,
        })
    }

    /// スキーマを取得
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 列名の一覧を取得
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    /// 列名が存在するかどうか
    pub fn contains_column(&self, name: &str) -> bool {
        self.schema.contains(name)
    }

    /// 列データを取得
    pub fn column(&self, name: &str) -> Result<&ColumnData> {
        let pos = self
            .schema
            .position(name)
            .ok_or_else(|| CensRSError::ColumnNotFound(name.to_string()))?;
        Ok(&self.columns[pos])
    }

    /// 数値列を取得
    pub fn numeric(&self, name: &str) -> Result<&Series<f64>> {
        match self.column(name)? {
            ColumnData::Numeric(s) => Ok(s),
            other => Err(CensRSError::ColumnTypeMismatch {
                name: name.to_string(),
                expected: SemanticType::Numeric,
                found: other.dtype(),
            }),
        }
    }

    /// カテゴリ列を取得
    pub fn categorical(&self, name: &str) -> Result<&Series<i64>> {
        match self.column(name)? {
            ColumnData::Categorical(s) => Ok(s),
            other => Err(CensRSError::ColumnTypeMismatch {
                name: name.to_string(),
                expected: SemanticType::Categorical,
                found: other.dtype(),
            }),
        }
    }

    /// 識別子列を取得
    pub fn identifier(&self, name: &str) -> Result<&Series<String>> {
        match self.column(name)? {
            ColumnData::Identifier(s) => Ok(s),
            other => Err(CensRSError::ColumnTypeMismatch {
                name: name.to_string(),
                expected: SemanticType::Identifier,
                found: other.dtype(),
            }),
        }
    }

    /// 列ごとの欠損率レポート
    ///
    /// スキーマの列順で (列名, 欠損率) の組を返す。
    /// 行がない場合の欠損率は0.0とする
    pub fn missingness_report(&self) -> Vec<(String, f64)> {
        self.schema
            .fields()
            .iter()
            .zip(&self.columns)
            .map(|(field, column)| {
                let ratio = if self.row_count == 0 {
                    0.0
                } else {
                    column.na_count() as f64 / self.row_count as f64
                };
                (field.name.clone(), ratio)
            })
            .collect()
    }
}
