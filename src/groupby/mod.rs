//! 層別集計モジュール
//!
//! カテゴリ列の値の組み合わせごとに行を層（stratum）へ分割し、
//! 対象の数値列について要約統計量を計算します。
//! 欠損したカテゴリ値も独立した有効なキー成分として扱い、
//! 行が黙って除外されることはありません。

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Display};

use serde::Serialize;

use crate::dataframe::DataFrame;
use crate::error::{CensRSError, Result};
use crate::na::NA;
use crate::pivot::PivotTable;
use crate::stats;

/// グループ化キー: 層を識別するカテゴリ値の順序付きタプル
///
/// 成分の順序はグループ化列の順序に従う。欠損も有効なキー成分
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey(pub Vec<NA<i64>>);

impl GroupKey {
    /// キーの成分数を取得
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// 指定位置の成分を取得
    pub fn component(&self, pos: usize) -> Option<&NA<i64>> {
        self.0.get(pos)
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("/"))
    }
}

/// 要約統計量のフィールド名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    /// 非欠損値の件数
    Count,
    /// 平均
    Mean,
    /// 標準偏差
    Std,
    /// 最小値
    Min,
    /// 25%分位点
    Q1,
    /// 中央値
    Median,
    /// 75%分位点
    Q3,
    /// 最大値
    Max,
}

impl Statistic {
    /// 統計量名を文字列で取得
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Count => "count",
            Statistic::Mean => "mean",
            Statistic::Std => "std",
            Statistic::Min => "min",
            Statistic::Q1 => "q1",
            Statistic::Median => "median",
            Statistic::Q3 => "q3",
            Statistic::Max => "max",
        }
    }

    /// 文字列から統計量を解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "count" => Some(Statistic::Count),
            "mean" | "avg" | "average" => Some(Statistic::Mean),
            "std" | "stddev" => Some(Statistic::Std),
            "min" | "minimum" => Some(Statistic::Min),
            "q1" | "p25" => Some(Statistic::Q1),
            "median" | "q2" | "p50" => Some(Statistic::Median),
            "q3" | "p75" => Some(Statistic::Q3),
            "max" | "maximum" => Some(Statistic::Max),
            _ => None,
        }
    }
}

/// 層の要約統計量
///
/// 対象列の非欠損値のみから計算する。層内の値が全て欠損の場合は
/// countが0になり、他のフィールドは全てNAとなる
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord {
    /// 非欠損値の件数
    pub count: usize,
    /// 平均値
    pub mean: NA<f64>,
    /// 標準偏差（不偏推定量）
    pub std: NA<f64>,
    /// 最小値
    pub min: NA<f64>,
    /// 25%分位点
    pub q1: NA<f64>,
    /// 中央値
    pub median: NA<f64>,
    /// 75%分位点
    pub q3: NA<f64>,
    /// 最大値
    pub max: NA<f64>,
}

impl SummaryRecord {
    /// 非欠損値のベクトルから要約統計量を計算
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return SummaryRecord {
                count: 0,
                mean: NA::NA,
                std: NA::NA,
                min: NA::NA,
                q1: NA::NA,
                median: NA::NA,
                q3: NA::NA,
                max: NA::NA,
            };
        }

        // 空でないことは確認済みなので、describeが失敗することはない
        match stats::describe(values) {
            Ok(d) => SummaryRecord {
                count: d.count,
                mean: NA::Value(d.mean),
                std: NA::Value(d.std),
                min: NA::Value(d.min),
                q1: NA::Value(d.q1),
                median: NA::Value(d.median),
                q3: NA::Value(d.q3),
                max: NA::Value(d.max),
            },
            Err(_) => SummaryRecord::from_values(&[]),
        }
    }

    /// 指定フィールドの値を取得（countはf64として返す）
    pub fn statistic(&self, stat: Statistic) -> NA<f64> {
        match stat {
            Statistic::Count => NA::Value(self.count as f64),
            Statistic::Mean => self.mean,
            Statistic::Std => self.std,
            Statistic::Min => self.min,
            Statistic::Q1 => self.q1,
            Statistic::Median => self.median,
            Statistic::Q3 => self.q3,
            Statistic::Max => self.max,
        }
    }
}

/// グループ化した結果を表す構造体
///
/// 層は元のDataFrameへの行インデックスのビューであり、
/// データ自体はコピーしない
#[derive(Debug)]
pub struct GroupBy<'a> {
    /// 元のDataFrame
    df: &'a DataFrame,

    /// グループ化に使用した列名
    grouping_columns: Vec<String>,

    /// グループ化キーから行インデックスへのマッピング
    groups: HashMap<GroupKey, Vec<usize>>,
}

impl<'a> GroupBy<'a> {
    /// DataFrameをカテゴリ列でグループ化する
    pub fn new(df: &'a DataFrame, grouping_columns: &[&str]) -> Result<Self> {
        if grouping_columns.is_empty() {
            return Err(CensRSError::InvalidInput(
                "グループ化列が指定されていません".to_string(),
            ));
        }

        if df.row_count() == 0 {
            return Err(CensRSError::Empty(
                "グループ化の対象となる行がありません".to_string(),
            ));
        }

        // 各グループ化列の存在と型を検証する
        let mut key_series = Vec::with_capacity(grouping_columns.len());
        for name in grouping_columns {
            key_series.push(df.categorical(name)?);
        }

        // 観測された値の組み合わせごとに行インデックスを収集
        let mut groups: HashMap<GroupKey, Vec<usize>> = HashMap::new();
        for row in 0..df.row_count() {
            let components: Vec<NA<i64>> = key_series
                .iter()
                .map(|s| s.get(row).copied().unwrap_or(NA::NA))
                .collect();
            groups
                .entry(GroupKey(components))
                .or_insert_with(Vec::new)
                .push(row);
        }

        log::debug!(
            "グループ化完了: {}列, {}層",
            grouping_columns.len(),
            groups.len()
        );

        Ok(GroupBy {
            df,
            grouping_columns: grouping_columns.iter().map(|s| s.to_string()).collect(),
            groups,
        })
    }

    /// グループ数を取得
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// グループ化に使用した列名を取得
    pub fn grouping_columns(&self) -> &[String] {
        &self.grouping_columns
    }

    /// 各グループのサイズを返す（欠損対象行も含めた行数）
    pub fn size(&self) -> HashMap<GroupKey, usize> {
        self.groups
            .iter()
            .map(|(k, indices)| (k.clone(), indices.len()))
            .collect()
    }

    /// グループ化キーから行インデックスへのマッピングを取得
    pub fn groups(&self) -> &HashMap<GroupKey, Vec<usize>> {
        &self.groups
    }

    /// 対象の数値列について層ごとの要約統計量を計算
    ///
    /// 対象列が欠損している行は統計量から除外する（行自体は層に属する）
    pub fn summaries(&self, target: &str) -> Result<GroupedSummaries> {
        let series = self.df.numeric(target)?;

        let mut summaries = HashMap::with_capacity(self.groups.len());
        for (key, indices) in &self.groups {
            let values: Vec<f64> = indices
                .iter()
                .filter_map(|&i| series.get(i).and_then(|v| v.value()).copied())
                .collect();
            summaries.insert(key.clone(), SummaryRecord::from_values(&values));
        }

        Ok(GroupedSummaries {
            grouping_columns: self.grouping_columns.clone(),
            target: target.to_string(),
            summaries,
        })
    }
}

/// 層別の要約統計量の集まり
#[derive(Debug, Clone)]
pub struct GroupedSummaries {
    /// グループ化に使用した列名
    grouping_columns: Vec<String>,

    /// 対象の数値列名
    target: String,

    /// グループ化キーから要約統計量へのマッピング
    summaries: HashMap<GroupKey, SummaryRecord>,
}

impl GroupedSummaries {
    /// グループ化に使用した列名を取得
    pub fn grouping_columns(&self) -> &[String] {
        &self.grouping_columns
    }

    /// 対象の数値列名を取得
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 層の数を取得
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// 層がないかどうか
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// 指定キーの要約統計量を取得
    pub fn get(&self, key: &GroupKey) -> Option<&SummaryRecord> {
        self.summaries.get(key)
    }

    /// (キー, 要約統計量) のイテレータを取得（順序は不定）
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &SummaryRecord)> {
        self.summaries.iter()
    }

    /// 指定統計量でソートした (キー, 要約統計量) の列を返す
    ///
    /// 欠損の統計量を持つ層は方向によらず末尾に並ぶ。
    /// 同値の場合はグループ化キーの辞書順で順序を確定する
    pub fn sort_by_statistic(
        &self,
        stat: Statistic,
        ascending: bool,
    ) -> Vec<(GroupKey, SummaryRecord)> {
        let mut pairs: Vec<(GroupKey, SummaryRecord)> = self
            .summaries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        pairs.sort_by(|(key_a, rec_a), (key_b, rec_b)| {
            let stat_a = rec_a.statistic(stat);
            let stat_b = rec_b.statistic(stat);

            let ord = match (stat_a, stat_b) {
                (NA::Value(a), NA::Value(b)) => {
                    let o = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                    if ascending {
                        o
                    } else {
                        o.reverse()
                    }
                }
                // 欠損は方向によらず末尾
                (NA::Value(_), NA::NA) => Ordering::Less,
                (NA::NA, NA::Value(_)) => Ordering::Greater,
                (NA::NA, NA::NA) => Ordering::Equal,
            };

            ord.then_with(|| key_a.cmp(key_b))
        });

        pairs
    }

    /// 2因子の要約をピボットテーブルに再構成する
    pub fn pivot(
        &self,
        row_factor: &str,
        column_factor: &str,
        statistic: Statistic,
    ) -> Result<PivotTable> {
        PivotTable::from_summaries(self, row_factor, column_factor, statistic)
    }
}

/// 層別集計のエントリポイント
///
/// グループ化列の観測された値の組み合わせごとに行を層へ分割し、
/// 各層について対象列の要約統計量を計算する
pub fn group_summaries(
    df: &DataFrame,
    grouping_columns: &[&str],
    target: &str,
) -> Result<GroupedSummaries> {
    GroupBy::new(df, grouping_columns)?.summaries(target)
}
