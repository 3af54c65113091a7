// censrs デモCLI
//
// ミクロデータ抽出ファイルに対する探索的分析を一通り実行する:
// 欠損率レポート、対象列の記述統計とヒストグラム、層別の要約統計量、
// および2因子の場合のピボットテーブル。

use std::env;
use std::process;

use censrs::groupby::group_summaries;
use censrs::io::csv::read_csv;
use censrs::stats;
use censrs::vis::{BarChart, BoxPlot, Chart, ChartConfig, Histogram};
use censrs::{Field, Result, Schema, SemanticType, Statistic};

/// コマンドライン引数
struct Args {
    path: String,
    schema: Schema,
    grouping: Vec<String>,
    target: String,
    bins: usize,
}

fn print_usage() {
    eprintln!(
        "使い方: censrs <data.csv[.gz]> --schema NAME:TYPE,... --group COL,... --target COL [--bins N]"
    );
    eprintln!("  TYPE は num / cat / id のいずれか");
    eprintln!();
    eprintln!("例: censrs extract.csv.gz --schema REGION:cat,FES:cat,INCOME:num \\");
    eprintln!("        --group REGION,FES --target INCOME");
}

/// "NAME:TYPE,..." の形式からスキーマを構築する
fn parse_schema(spec: &str) -> Result<Schema> {
    let mut fields = Vec::new();

    for part in spec.split(',') {
        let mut it = part.splitn(2, ':');
        let name = it.next().unwrap_or("").trim();
        let dtype = it.next().unwrap_or("").trim();

        let dtype = SemanticType::parse(dtype).ok_or_else(|| {
            censrs::CensRSError::InvalidInput(format!("不明な列型です: '{}'", part))
        })?;
        if name.is_empty() {
            return Err(censrs::CensRSError::InvalidInput(format!(
                "列名がありません: '{}'",
                part
            )));
        }

        fields.push(Field::new(name, dtype));
    }

    Schema::new(fields)
}

fn parse_args(argv: &[String]) -> Option<Args> {
    let mut path = None;
    let mut schema = None;
    let mut grouping = Vec::new();
    let mut target = None;
    let mut bins = 10usize;

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "--schema" => {
                schema = argv.get(i + 1).cloned();
                i += 2;
            }
            "--group" => {
                grouping = argv
                    .get(i + 1)?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect();
                i += 2;
            }
            "--target" => {
                target = argv.get(i + 1).cloned();
                i += 2;
            }
            "--bins" => {
                bins = argv.get(i + 1)?.parse().ok()?;
                i += 2;
            }
            other if path.is_none() && !other.starts_with("--") => {
                path = Some(other.to_string());
                i += 1;
            }
            _ => return None,
        }
    }

    let schema = match parse_schema(&schema?) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("スキーマの解析に失敗しました: {}", e);
            return None;
        }
    };

    Some(Args {
        path: path?,
        schema,
        grouping,
        target: target?,
        bins,
    })
}

fn run(args: &Args) -> Result<()> {
    let df = read_csv(&args.path, &args.schema)?;
    println!(
        "読み込み完了: {}行 x {}列 ({})",
        df.row_count(),
        df.column_count(),
        args.path
    );

    // 欠損率レポート
    println!();
    println!("=== 欠損率 ===");
    for (column, ratio) in df.missingness_report() {
        println!("{:>12}  {:>6.1}%", column, ratio * 100.0);
    }

    // 対象列の記述統計
    let series = df.numeric(&args.target)?;
    let summary = series.describe()?;
    println!();
    println!("=== {} の記述統計 ===", args.target);
    println!("件数: {}", summary.count);
    println!("平均: {:.2}", summary.mean);
    println!("標準偏差: {:.2}", summary.std);
    println!(
        "最小値: {:.2} / 25%: {:.2} / 中央値: {:.2} / 75%: {:.2} / 最大値: {:.2}",
        summary.min, summary.q1, summary.median, summary.q3, summary.max
    );
    match stats::skewness(series.present()) {
        Ok(s) if s.is_finite() => println!("歪度: {:.3}", s),
        _ => println!("歪度: NA"),
    }

    // 分布のヒストグラム
    println!();
    let config = ChartConfig {
        title: Some(format!("{} の分布", args.target)),
        ..Default::default()
    };
    let histogram = Histogram::with_config(&series.present(), args.bins, config);
    histogram.display();

    // 五数要約の箱ひげ図
    println!();
    BoxPlot::new(summary.clone()).display();

    if args.grouping.is_empty() {
        return Ok(());
    }

    // 層別の要約統計量（中央値の降順）
    let grouping: Vec<&str> = args.grouping.iter().map(|s| s.as_str()).collect();
    let summaries = group_summaries(&df, &grouping, &args.target)?;

    println!(
        "=== {} ごとの {} ===",
        args.grouping.join(" x "),
        args.target
    );
    let sorted = summaries.sort_by_statistic(Statistic::Median, false);
    for (key, record) in &sorted {
        println!(
            "{:>12}  件数 {:>6}  中央値 {:>10}  平均 {:>10}",
            key.to_string(),
            record.count,
            record.median.map(|v| format!("{:.2}", v)),
            record.mean.map(|v| format!("{:.2}", v)),
        );
    }

    // 中央値の棒グラフ
    let labels: Vec<String> = sorted.iter().map(|(k, _)| k.to_string()).collect();
    let values: Vec<f64> = sorted
        .iter()
        .map(|(_, r)| r.median.value().copied().unwrap_or(0.0))
        .collect();
    println!();
    let config = ChartConfig {
        title: Some(format!("中央値 {} ({})", args.target, args.grouping.join("/"))),
        ..Default::default()
    };
    BarChart::with_config(labels, values, config).display();

    // 2因子の場合はピボットテーブルも表示する
    if args.grouping.len() == 2 {
        let table = summaries.pivot(&args.grouping[0], &args.grouping[1], Statistic::Median)?;
        println!("=== ピボットテーブル (中央値) ===");
        println!("{}", table);
    }

    Ok(())
}

fn main() {
    let argv: Vec<String> = env::args().skip(1).collect();

    let args = match parse_args(&argv) {
        Some(args) => args,
        None => {
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("エラー: {}", e);
        process::exit(1);
    }
}
