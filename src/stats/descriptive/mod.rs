// 記述統計モジュール

use crate::error::{CensRSError, Result};
use crate::stats::DescriptiveStats;

/// 記述統計量を計算する内部実装
pub(crate) fn describe_impl(data: &[f64]) -> Result<DescriptiveStats> {
    if data.is_empty() {
        return Err(CensRSError::Empty(
            "記述統計量の計算には少なくとも1つのデータが必要です".into(),
        ));
    }

    let count = data.len();

    // 平均値の計算
    let mean = data.iter().sum::<f64>() / count as f64;

    // 標準偏差の計算（不偏推定量）
    let std = variance_impl(data)?.sqrt();

    // データをソートして分位数を計算
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min = sorted[0];
    let max = sorted[count - 1];

    let q1 = percentile(&sorted, 0.25);
    let median = percentile(&sorted, 0.5);
    let q3 = percentile(&sorted, 0.75);

    Ok(DescriptiveStats {
        count,
        mean,
        std,
        min,
        q1,
        median,
        q3,
        max,
    })
}

/// 標本分散を計算する内部実装
pub(crate) fn variance_impl(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(CensRSError::Empty(
            "分散の計算には少なくとも1つのデータが必要です".into(),
        ));
    }

    let count = data.len();
    if count == 1 {
        return Ok(0.0);
    }

    let mean = data.iter().sum::<f64>() / count as f64;
    let sum_squared_diff = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();

    Ok(sum_squared_diff / (count - 1) as f64)
}

/// 分位数を計算する内部実装
pub(crate) fn quantile_impl(data: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(CensRSError::InvalidInput(format!(
            "分位点は0.0から1.0の範囲で指定してください: {}",
            p
        )));
    }

    if data.is_empty() {
        return Err(CensRSError::Empty(
            "分位数の計算には少なくとも1つのデータが必要です".into(),
        ));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(percentile(&sorted, p))
}

/// ソート済みデータからパーセンタイルを計算（線形補間）
pub(crate) fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let n = sorted_data.len();
    let idx = p * (n - 1) as f64;
    let idx_floor = idx.floor() as usize;
    let idx_ceil = idx.ceil() as usize;

    if idx_floor == idx_ceil {
        return sorted_data[idx_floor];
    }

    let weight_ceil = idx - idx_floor as f64;
    let weight_floor = 1.0 - weight_ceil;

    sorted_data[idx_floor] * weight_floor + sorted_data[idx_ceil] * weight_ceil
}

/// 標本歪度を計算する内部実装（Fisher補正）
pub(crate) fn skewness_impl(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(CensRSError::Empty(
            "歪度の計算には少なくとも1つのデータが必要です".into(),
        ));
    }

    if data.len() < 3 {
        return Ok(f64::NAN);
    }

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        return Ok(f64::NAN);
    }

    let m3 = data.iter().map(|x| (x - mean).powi(3)).sum::<f64>() / n;
    let skewness = m3 / std_dev.powi(3);

    // 標本バイアスの補正（Fisherの公式）
    let adjustment = (n * (n - 1.0)).sqrt() / (n - 2.0);
    Ok(skewness * adjustment)
}
