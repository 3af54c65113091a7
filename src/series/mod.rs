use num_traits::NumCast;
use std::cmp::PartialOrd;
use std::fmt::Debug;
use std::iter::Sum;
use std::ops::Div;

use crate::error::{CensRSError, Result};
use crate::na::NA;
use crate::stats;

/// Series構造体: 欠損値を許容する一次元の値の配列
///
/// ミクロデータの列はどれも欠損を含みうるため、
/// 全ての要素をNA型でラップして保持します。
#[derive(Debug, Clone)]
pub struct Series<T>
where
    T: Debug + Clone,
{
    /// Seriesのデータ値（NA型でラップ）
    values: Vec<NA<T>>,

    /// 名前（オプション）
    name: Option<String>,
}

// 基本実装
impl<T> Series<T>
where
    T: Debug + Clone,
{
    /// 新しいSeriesをベクトルから作成
    pub fn new(values: Vec<NA<T>>, name: Option<String>) -> Self {
        Series { values, name }
    }

    /// 通常のベクトルから作成（NAを含まない）
    pub fn from_vec(values: Vec<T>, name: Option<String>) -> Self {
        let na_values = values.into_iter().map(NA::Value).collect();
        Self::new(na_values, name)
    }

    /// Optionベクトルから作成（Noneを含む可能性あり）
    pub fn from_options(values: Vec<Option<T>>, name: Option<String>) -> Self {
        let na_values = values.into_iter().map(NA::from).collect();
        Self::new(na_values, name)
    }

    /// Seriesの長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Seriesが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置から値を取得
    pub fn get(&self, pos: usize) -> Option<&NA<T>> {
        self.values.get(pos)
    }

    /// 値の配列を取得
    pub fn values(&self) -> &[NA<T>] {
        &self.values
    }

    /// 名前を取得
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// 名前を設定
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// NAの個数を取得
    pub fn na_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_na()).count()
    }

    /// 値が存在する個数を取得
    pub fn value_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_value()).count()
    }

    /// NAを含むかどうか
    pub fn has_na(&self) -> bool {
        self.values.iter().any(|v| v.is_na())
    }

    /// 各要素がNAかどうかのブール配列を取得
    pub fn is_na(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.is_na()).collect()
    }

    /// 欠損を除いた値のベクトルを取得
    pub fn present(&self) -> Vec<T> {
        self.values
            .iter()
            .filter_map(|v| v.value().cloned())
            .collect()
    }

    /// NAを除去したSeriesを返す
    pub fn dropna(&self) -> Self {
        let filtered_values: Vec<NA<T>> = self
            .values
            .iter()
            .filter(|v| v.is_value())
            .cloned()
            .collect();

        Self::new(filtered_values, self.name.clone())
    }

    /// NAを指定した値で埋める
    pub fn fillna(&self, fill_value: T) -> Self {
        let filled_values: Vec<NA<T>> = self
            .values
            .iter()
            .map(|v| match v {
                NA::Value(_) => v.clone(),
                NA::NA => NA::Value(fill_value.clone()),
            })
            .collect();

        Self::new(filled_values, self.name.clone())
    }
}

// 数値型のSeriesに対する特化実装
impl<T> Series<T>
where
    T: Debug + Clone + Copy + Sum<T> + PartialOrd + Div<Output = T> + NumCast,
{
    /// 合計を計算（NAは無視）
    pub fn sum(&self) -> NA<T> {
        let values = self.present();

        if values.is_empty() {
            NA::NA
        } else {
            NA::Value(values.into_iter().sum())
        }
    }

    /// 平均を計算（NAは無視）
    pub fn mean(&self) -> NA<T> {
        let values = self.present();

        if values.is_empty() {
            return NA::NA;
        }

        let count: T = match num_traits::cast(values.len()) {
            Some(n) => n,
            None => return NA::NA,
        };
        let sum: T = values.into_iter().sum();

        NA::Value(sum / count)
    }

    /// 最小値を計算（NAは無視）
    pub fn min(&self) -> NA<T> {
        let values = self.present();

        values
            .into_iter()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .into()
    }

    /// 最大値を計算（NAは無視）
    pub fn max(&self) -> NA<T> {
        let values = self.present();

        values
            .into_iter()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .into()
    }
}

// f64のSeriesに対する記述統計
impl Series<f64> {
    /// 分散を計算（標本分散、NAは無視）
    pub fn var(&self) -> NA<f64> {
        let values = self.present();
        stats::variance(&values).map(NA::Value).unwrap_or(NA::NA)
    }

    /// 標準偏差を計算（不偏推定量、NAは無視）
    pub fn std(&self) -> NA<f64> {
        let values = self.present();
        stats::std_dev(&values).map(NA::Value).unwrap_or(NA::NA)
    }

    /// 分位数を計算（NAは無視、線形補間）
    ///
    /// pは0.0から1.0の範囲で指定する
    pub fn quantile(&self, p: f64) -> Result<NA<f64>> {
        if !(0.0..=1.0).contains(&p) {
            return Err(CensRSError::InvalidInput(format!(
                "分位点は0.0から1.0の範囲で指定してください: {}",
                p
            )));
        }

        let values = self.present();
        if values.is_empty() {
            return Ok(NA::NA);
        }

        Ok(NA::Value(stats::quantile(&values, p)?))
    }

    /// 中央値を計算（NAは無視）
    pub fn median(&self) -> NA<f64> {
        let values = self.present();
        stats::median(&values).map(NA::Value).unwrap_or(NA::NA)
    }

    /// 歪度を計算（標本歪度、NAは無視）
    ///
    /// 定義できない場合（観測数3未満、またはばらつきゼロ）はNAを返す
    pub fn skew(&self) -> NA<f64> {
        let values = self.present();
        match stats::skewness(&values) {
            Ok(s) if s.is_finite() => NA::Value(s),
            _ => NA::NA,
        }
    }

    /// 基本統計量をまとめて計算（NAは無視）
    pub fn describe(&self) -> Result<stats::DescriptiveStats> {
        let values = self.present();
        stats::describe(&values)
    }
}
