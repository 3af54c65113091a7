// censrs 統計モジュール
//
// このモジュールは、探索的データ分析のための記述統計機能を提供します。
// 平均、標準偏差、分散、分位数、歪度など、単一の数値配列に対する
// 基本的な統計量が実装されています。

pub mod descriptive;

use serde::Serialize;

use crate::error::Result;

/// データの基本統計量を計算
///
/// # 説明
/// この関数は、数値データに対する基本的な記述統計量
/// （件数、平均、標準偏差、最小値、四分位点、最大値）を計算します。
///
/// # 例
/// ```rust
/// use censrs::stats;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let stats = stats::describe(&data).unwrap();
/// assert_eq!(stats.count, 5);
/// assert_eq!(stats.mean, 3.0);
/// assert_eq!(stats.median, 3.0);
/// ```
pub fn describe<T: AsRef<[f64]>>(data: T) -> Result<DescriptiveStats> {
    descriptive::describe_impl(data.as_ref())
}

/// 記述統計量の結果を保持する構造体
#[derive(Debug, Clone, Serialize)]
pub struct DescriptiveStats {
    /// データの件数
    pub count: usize,
    /// 平均値
    pub mean: f64,
    /// 標準偏差（不偏推定量）
    pub std: f64,
    /// 最小値
    pub min: f64,
    /// 25%分位点
    pub q1: f64,
    /// 中央値（50%分位点）
    pub median: f64,
    /// 75%分位点
    pub q3: f64,
    /// 最大値
    pub max: f64,
}

/// 分散を計算（標本分散、不偏推定量）
pub fn variance<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    descriptive::variance_impl(data.as_ref())
}

/// 標準偏差を計算（不偏推定量）
pub fn std_dev<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    Ok(variance(data)?.sqrt())
}

/// 分位数を計算（線形補間）
///
/// pは0.0から1.0の範囲で指定する
pub fn quantile<T: AsRef<[f64]>>(data: T, p: f64) -> Result<f64> {
    descriptive::quantile_impl(data.as_ref(), p)
}

/// 中央値を計算
pub fn median<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    descriptive::quantile_impl(data.as_ref(), 0.5)
}

/// 歪度を計算（Fisher補正付きの標本歪度）
///
/// 観測数が3未満、またはばらつきがゼロの場合はNaNを返す
pub fn skewness<T: AsRef<[f64]>>(data: T) -> Result<f64> {
    descriptive::skewness_impl(data.as_ref())
}
