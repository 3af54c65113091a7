use std::fs::File;
use std::io::{BufWriter, Write as IoWrite};
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::dataframe::{ColumnData, DataFrame};
use crate::error::{CensRSError, Result};
use crate::groupby::{GroupKey, GroupedSummaries, SummaryRecord};
use crate::na::NA;

/// f64をJSON値に変換（欠損と非有限値はnull）
fn number_value(v: &NA<f64>) -> Value {
    match v {
        NA::Value(x) => Number::from_f64(*x).map(Value::Number).unwrap_or(Value::Null),
        NA::NA => Value::Null,
    }
}

/// DataFrameを列指向JSONファイルに書き出す
///
/// 列名をキー、セル値の配列を値とするオブジェクトを出力する。
/// 欠損セルはnullになる
pub fn write_json<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let mut object = Map::with_capacity(df.column_count());

    for name in df.column_names() {
        let cells: Vec<Value> = match df.column(name)? {
            ColumnData::Numeric(s) => s.values().iter().map(number_value).collect(),
            ColumnData::Categorical(s) => s
                .values()
                .iter()
                .map(|v| match v {
                    NA::Value(code) => Value::Number(Number::from(*code)),
                    NA::NA => Value::Null,
                })
                .collect(),
            ColumnData::Identifier(s) => s
                .values()
                .iter()
                .map(|v| match v {
                    NA::Value(id) => Value::String(id.clone()),
                    NA::NA => Value::Null,
                })
                .collect(),
        };
        object.insert(name.to_string(), Value::Array(cells));
    }

    let file = File::create(path.as_ref()).map_err(CensRSError::Io)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &Value::Object(object))
        .map_err(CensRSError::Json)?;
    writer.flush().map_err(CensRSError::Io)?;

    Ok(())
}

/// JSON出力用の層別集計エントリ
#[derive(Serialize)]
struct SummaryEntry<'a> {
    key: &'a GroupKey,
    summary: &'a SummaryRecord,
}

/// 層別の要約統計量をJSONファイルに書き出す
///
/// キーの辞書順に並べた配列を出力し、出力を決定的にする
pub fn write_summaries_json<P: AsRef<Path>>(
    summaries: &GroupedSummaries,
    path: P,
) -> Result<()> {
    let mut pairs: Vec<(&GroupKey, &SummaryRecord)> = summaries.iter().collect();
    pairs.sort_by(|(a, _), (b, _)| a.cmp(b));

    let entries: Vec<SummaryEntry> = pairs
        .into_iter()
        .map(|(key, summary)| SummaryEntry { key, summary })
        .collect();

    let file = File::create(path.as_ref()).map_err(CensRSError::Io)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &entries).map_err(CensRSError::Json)?;
    writer.flush().map_err(CensRSError::Io)?;

    Ok(())
}
