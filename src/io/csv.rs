use csv::{ReaderBuilder, Writer};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::dataframe::{ColumnData, DataFrame};
use crate::error::{CensRSError, Result};
use crate::na::NA;
use crate::schema::{Field, Schema, SemanticType};
use crate::series::Series;

/// 欠損値として解釈する表記
const NA_MARKERS: &[&str] = &["", "NA", "na", "NaN", "nan"];

/// セルが欠損表記かどうか
fn is_na_marker(raw: &str) -> bool {
    NA_MARKERS.contains(&raw)
}

/// 型ごとの列ビルダー
enum ColumnBuilder {
    Numeric(Vec<NA<f64>>),
    Categorical(Vec<NA<i64>>),
    Identifier(Vec<NA<String>>),
}

impl ColumnBuilder {
    fn for_field(field: &Field) -> Self {
        match field.dtype {
            SemanticType::Numeric => ColumnBuilder::Numeric(Vec::new()),
            SemanticType::Categorical => ColumnBuilder::Categorical(Vec::new()),
            SemanticType::Identifier => ColumnBuilder::Identifier(Vec::new()),
        }
    }

    /// セルを解析して追加する
    fn push(&mut self, raw: &str, field: &Field) -> Result<()> {
        if is_na_marker(raw) {
            match self {
                ColumnBuilder::Numeric(v) => v.push(NA::NA),
                ColumnBuilder::Categorical(v) => v.push(NA::NA),
                ColumnBuilder::Identifier(v) => v.push(NA::NA),
            }
            return Ok(());
        }

        match self {
            ColumnBuilder::Numeric(v) => {
                let parsed = raw.parse::<f64>().map_err(|_| {
                    CensRSError::Cast(format!(
                        "列 '{}' の値 '{}' を数値に変換できません",
                        field.name, raw
                    ))
                })?;
                v.push(NA::Value(parsed));
            }
            ColumnBuilder::Categorical(v) => {
                let parsed = raw.parse::<i64>().map_err(|_| {
                    CensRSError::Cast(format!(
                        "列 '{}' の値 '{}' をカテゴリコードに変換できません",
                        field.name, raw
                    ))
                })?;
                v.push(NA::Value(parsed));
            }
            ColumnBuilder::Identifier(v) => {
                v.push(NA::Value(raw.to_string()));
            }
        }

        Ok(())
    }

    fn into_column(self, name: &str) -> ColumnData {
        let name = Some(name.to_string());
        match self {
            ColumnBuilder::Numeric(v) => ColumnData::Numeric(Series::new(v, name)),
            ColumnBuilder::Categorical(v) => ColumnData::Categorical(Series::new(v, name)),
            ColumnBuilder::Identifier(v) => ColumnData::Identifier(Series::new(v, name)),
        }
    }
}

/// CSVファイルからスキーマに従ってDataFrameを読み込む
///
/// 拡張子が .gz のファイルはgzip解凍しながら読む。
/// スキーマの全列がヘッダーに存在する必要があるが、ファイル側の
/// 余分な列は無視する（抽出ファイルは分析対象より広いことが多い）
pub fn read_csv<P: AsRef<Path>>(path: P, schema: &Schema) -> Result<DataFrame> {
    let path = path.as_ref();
    let file = File::open(path).map_err(CensRSError::Io)?;

    // 拡張子でgzip圧縮を判定する
    let reader: Box<dyn Read> = if path.extension().map(|e| e == "gz").unwrap_or(false) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    // CSVリーダーを設定
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // ヘッダーを取得し、スキーマの各列の位置を解決する
    let headers: Vec<String> = rdr
        .headers()
        .map_err(CensRSError::Csv)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut positions = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        let pos = headers
            .iter()
            .position(|h| h == &field.name)
            .ok_or_else(|| CensRSError::ColumnNotFound(field.name.clone()))?;
        positions.push(pos);
    }

    // 列ごとのビルダー
    let mut builders: Vec<ColumnBuilder> = schema
        .fields()
        .iter()
        .map(ColumnBuilder::for_field)
        .collect();

    // 各行を処理
    let mut row_count = 0usize;
    for result in rdr.records() {
        let record = result.map_err(CensRSError::Csv)?;
        for (i, field) in schema.fields().iter().enumerate() {
            // 行の長さが足りない場合は欠損として扱う
            let raw = record.get(positions[i]).unwrap_or("");
            builders[i].push(raw, field)?;
        }
        row_count += 1;
    }

    log::debug!(
        "CSV読み込み完了: {:?} ({}行 x {}列)",
        path,
        row_count,
        schema.len()
    );

    let columns: Vec<ColumnData> = builders
        .into_iter()
        .zip(schema.fields())
        .map(|(b, f)| b.into_column(&f.name))
        .collect();

    DataFrame::new(schema.clone(), columns)
}

/// DataFrameをCSVファイルに書き込む（欠損は空フィールド）
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(CensRSError::Io)?;
    let mut wtr = Writer::from_writer(file);

    // ヘッダー行を書き込む
    wtr.write_record(df.column_names())
        .map_err(CensRSError::Csv)?;

    // 各行のデータを書き込む
    for i in 0..df.row_count() {
        let mut row = Vec::with_capacity(df.column_count());

        for col_name in df.column_names() {
            let column = df.column(col_name)?;
            row.push(column.cell_string(i));
        }

        wtr.write_record(&row).map_err(CensRSError::Csv)?;
    }

    wtr.flush().map_err(CensRSError::Io)?;
    Ok(())
}
