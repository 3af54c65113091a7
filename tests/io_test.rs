mod common;

use std::fs::File;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::tempdir;

use censrs::groupby::group_summaries;
use censrs::io::csv::{read_csv, write_csv};
use censrs::io::json::{write_json, write_summaries_json};
use censrs::{CensRSError, Field, Schema, SemanticType, NA};

fn extract_schema() -> Schema {
    Schema::new(vec![
        Field::new("HOUSEHOLD_ID", SemanticType::Identifier),
        Field::new("REGION", SemanticType::Categorical),
        Field::new("INCOME", SemanticType::Numeric),
    ])
    .unwrap()
}

const SAMPLE_CSV: &str = "HOUSEHOLD_ID,REGION,INCOME\n\
h001,1,1500.5\n\
h002,1,\n\
h003,2,2300.0\n\
h004,NA,800.25\n";

#[test]
fn test_read_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("extract.csv");
    File::create(&path)
        .unwrap()
        .write_all(SAMPLE_CSV.as_bytes())
        .unwrap();

    let df = read_csv(&path, &extract_schema()).unwrap();

    assert_eq!(df.row_count(), 4);
    assert_eq!(df.column_count(), 3);

    // 空セルと"NA"は欠損として読む
    let income = df.numeric("INCOME").unwrap();
    assert_eq!(income.get(0), Some(&NA::Value(1500.5)));
    assert!(income.get(1).unwrap().is_na());

    let region = df.categorical("REGION").unwrap();
    assert!(region.get(3).unwrap().is_na());

    let ids = df.identifier("HOUSEHOLD_ID").unwrap();
    assert_eq!(ids.get(2), Some(&NA::Value("h003".to_string())));
}

#[test]
fn test_read_csv_gzip() {
    // .gz 拡張子のファイルは解凍しながら読む
    let dir = tempdir().unwrap();
    let path = dir.path().join("extract.csv.gz");

    let file = File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(SAMPLE_CSV.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let df = read_csv(&path, &extract_schema()).unwrap();
    assert_eq!(df.row_count(), 4);
    assert_eq!(
        df.numeric("INCOME").unwrap().get(2),
        Some(&NA::Value(2300.0))
    );
}

#[test]
fn test_read_csv_ignores_extra_columns() {
    // ファイル側の余分な列は無視する
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.csv");
    File::create(&path)
        .unwrap()
        .write_all(b"AGE,HOUSEHOLD_ID,REGION,INCOME,WEIGHT\n30,h001,1,100.0,1.5\n")
        .unwrap();

    let df = read_csv(&path, &extract_schema()).unwrap();
    assert_eq!(df.row_count(), 1);
    assert_eq!(df.column_count(), 3);
    assert!(!df.contains_column("AGE"));
}

#[test]
fn test_read_csv_missing_schema_column() {
    // スキーマの列がヘッダーにない場合はエラー
    let dir = tempdir().unwrap();
    let path = dir.path().join("narrow.csv");
    File::create(&path)
        .unwrap()
        .write_all(b"HOUSEHOLD_ID,REGION\nh001,1\n")
        .unwrap();

    let result = read_csv(&path, &extract_schema());
    assert!(matches!(result, Err(CensRSError::ColumnNotFound(_))));
}

#[test]
fn test_read_csv_bad_numeric_cell() {
    // 数値に変換できないセルはエラー
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    File::create(&path)
        .unwrap()
        .write_all(b"HOUSEHOLD_ID,REGION,INCOME\nh001,1,abc\n")
        .unwrap();

    let result = read_csv(&path, &extract_schema());
    assert!(matches!(result, Err(CensRSError::Cast(_))));
}

#[test]
fn test_read_csv_non_nullable_violation() {
    // 非null列に欠損セルがあればエラー
    let schema = Schema::new(vec![
        Field::new("HOUSEHOLD_ID", SemanticType::Identifier),
        Field::new("REGION", SemanticType::Categorical),
        Field::new("INCOME", SemanticType::Numeric).with_nullable(false),
    ])
    .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("extract.csv");
    File::create(&path)
        .unwrap()
        .write_all(SAMPLE_CSV.as_bytes())
        .unwrap();

    let result = read_csv(&path, &schema);
    assert!(matches!(result, Err(CensRSError::Consistency(_))));
}

#[test]
fn test_csv_round_trip() {
    // 書き込んだDataFrameを読み戻すと同じ内容になる
    let dir = tempdir().unwrap();
    let src_path = dir.path().join("src.csv");
    File::create(&src_path)
        .unwrap()
        .write_all(SAMPLE_CSV.as_bytes())
        .unwrap();

    let schema = extract_schema();
    let df = read_csv(&src_path, &schema).unwrap();

    let out_path = dir.path().join("out.csv");
    write_csv(&df, &out_path).unwrap();

    let df2 = read_csv(&out_path, &schema).unwrap();
    assert_eq!(df2.row_count(), df.row_count());
    assert_eq!(
        df2.numeric("INCOME").unwrap().values(),
        df.numeric("INCOME").unwrap().values()
    );
    assert_eq!(
        df2.categorical("REGION").unwrap().values(),
        df.categorical("REGION").unwrap().values()
    );
}

#[test]
fn test_write_json() {
    // 列指向JSONとして書き出し、欠損はnullになる
    let dir = tempdir().unwrap();
    let path = dir.path().join("frame.json");

    let df = common::sample_frame();
    write_json(&df, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    let income = value.get("INCOME").unwrap().as_array().unwrap();
    assert_eq!(income.len(), 6);
    assert!(income[3].is_null());
    assert_eq!(income[0].as_f64(), Some(100.0));

    let region = value.get("REGION").unwrap().as_array().unwrap();
    assert!(region[5].is_null());
    assert_eq!(region[0].as_i64(), Some(1));
}

#[test]
fn test_write_summaries_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("summaries.json");

    let df = common::sample_frame();
    let summaries = group_summaries(&df, &["REGION"], "INCOME").unwrap();
    write_summaries_json(&summaries, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entries = value.as_array().unwrap();

    // キーの辞書順: REGION=1, REGION=2, REGION=NA
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["key"][0].as_i64(), Some(1));
    assert_eq!(entries[1]["key"][0].as_i64(), Some(2));
    assert!(entries[2]["key"][0].is_null());

    // REGION=1 の層: income 100, 200
    assert_eq!(entries[0]["summary"]["count"].as_u64(), Some(2));
    assert_eq!(entries[0]["summary"]["median"].as_f64(), Some(150.0));

    // 全フィールドが欠損ならnull
    assert!(entries[2]["summary"]["count"].as_u64() == Some(1));
}
