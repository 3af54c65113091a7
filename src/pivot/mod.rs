//! ピボットテーブル機能を提供するモジュール
//!
//! 2因子の層別集計結果を、行ラベル×列ラベルの長方形の格子に
//! 再構成します。観測されなかった組み合わせのセルは欠損のまま
//! 残し、格子が欠けることはありません。

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{CensRSError, Result};
use crate::groupby::{GroupKey, GroupedSummaries, Statistic};
use crate::na::NA;

/// ピボットテーブル
///
/// 行ラベルは行因子の観測された値の昇順、列ラベルは列因子の
/// 観測された値の昇順。欠損ラベルは末尾に並ぶ
#[derive(Debug, Clone)]
pub struct PivotTable {
    /// 行ラベルとなる因子の列名
    row_factor: String,

    /// 列ラベルとなる因子の列名
    column_factor: String,

    /// セルに配置した統計量
    statistic: Statistic,

    /// 行ラベル（昇順）
    row_labels: Vec<NA<i64>>,

    /// 列ラベル（昇順）
    column_labels: Vec<NA<i64>>,

    /// セル値（行×列の完全な格子、未観測の組み合わせはNA）
    cells: Vec<Vec<NA<f64>>>,
}

impl PivotTable {
    /// 2成分キーの層別集計からピボットテーブルを構築
    pub fn from_summaries(
        summaries: &GroupedSummaries,
        row_factor: &str,
        column_factor: &str,
        statistic: Statistic,
    ) -> Result<Self> {
        let grouping = summaries.grouping_columns();

        // ピボットには2成分のグループ化キーが必要
        if grouping.len() != 2 {
            return Err(CensRSError::AmbiguousFactor(format!(
                "ピボットには2成分のグループ化キーが必要です: 実際 {}成分",
                grouping.len()
            )));
        }

        // 因子名をキー成分の位置に解決する
        let row_pos = grouping
            .iter()
            .position(|c| c == row_factor)
            .ok_or_else(|| CensRSError::ColumnNotFound(row_factor.to_string()))?;
        let column_pos = grouping
            .iter()
            .position(|c| c == column_factor)
            .ok_or_else(|| CensRSError::ColumnNotFound(column_factor.to_string()))?;

        if row_pos == column_pos {
            return Err(CensRSError::InvalidInput(format!(
                "行因子と列因子には異なる列を指定してください: '{}'",
                row_factor
            )));
        }

        // 観測されたキーから一意のラベルを収集（BTreeSetで昇順、欠損は末尾）
        let mut row_set: BTreeSet<NA<i64>> = BTreeSet::new();
        let mut column_set: BTreeSet<NA<i64>> = BTreeSet::new();
        for (key, _) in summaries.iter() {
            if let (Some(r), Some(c)) = (key.component(row_pos), key.component(column_pos)) {
                row_set.insert(*r);
                column_set.insert(*c);
            }
        }

        let row_labels: Vec<NA<i64>> = row_set.into_iter().collect();
        let column_labels: Vec<NA<i64>> = column_set.into_iter().collect();

        // 完全な長方形の格子を構築。未観測の組み合わせはNAで埋める
        let mut cells = Vec::with_capacity(row_labels.len());
        for row_label in &row_labels {
            let mut row_cells = Vec::with_capacity(column_labels.len());
            for column_label in &column_labels {
                let mut components = vec![NA::NA; 2];
                components[row_pos] = *row_label;
                components[column_pos] = *column_label;

                let cell = summaries
                    .get(&GroupKey(components))
                    .map(|record| record.statistic(statistic))
                    .unwrap_or(NA::NA);
                row_cells.push(cell);
            }
            cells.push(row_cells);
        }

        log::debug!(
            "ピボット格子を構築: {}x{} ({}層から)",
            row_labels.len(),
            column_labels.len(),
            summaries.len()
        );

        Ok(PivotTable {
            row_factor: row_factor.to_string(),
            column_factor: column_factor.to_string(),
            statistic,
            row_labels,
            column_labels,
            cells,
        })
    }

    /// 行因子の列名を取得
    pub fn row_factor(&self) -> &str {
        &self.row_factor
    }

    /// 列因子の列名を取得
    pub fn column_factor(&self) -> &str {
        &self.column_factor
    }

    /// セルに配置した統計量を取得
    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    /// 格子の形状 (行数, 列数) を取得
    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.column_labels.len())
    }

    /// 行ラベルを取得
    pub fn row_labels(&self) -> &[NA<i64>] {
        &self.row_labels
    }

    /// 列ラベルを取得
    pub fn column_labels(&self) -> &[NA<i64>] {
        &self.column_labels
    }

    /// 位置からセル値を取得
    pub fn get(&self, row: usize, column: usize) -> Option<&NA<f64>> {
        self.cells.get(row).and_then(|r| r.get(column))
    }

    /// 指定行のセル値を取得
    pub fn row(&self, row: usize) -> Option<&[NA<f64>]> {
        self.cells.get(row).map(|r| r.as_slice())
    }
}

// テキストテーブルとしての表示
impl fmt::Display for PivotTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corner = format!("{}\\{}", self.row_factor, self.column_factor);

        // 各列の表示幅を計算する
        let mut widths = vec![corner.len()];
        for label in &self.row_labels {
            widths[0] = widths[0].max(label.to_string().len());
        }
        for (j, label) in self.column_labels.iter().enumerate() {
            let mut w = label.to_string().len();
            for row in &self.cells {
                w = w.max(format_cell(&row[j]).len());
            }
            widths.push(w);
        }

        // ヘッダー行
        write!(f, "{:>width$}", corner, width = widths[0])?;
        for (j, label) in self.column_labels.iter().enumerate() {
            write!(f, "  {:>width$}", label.to_string(), width = widths[j + 1])?;
        }
        writeln!(f)?;

        // データ行
        for (i, label) in self.row_labels.iter().enumerate() {
            write!(f, "{:>width$}", label.to_string(), width = widths[0])?;
            for (j, cell) in self.cells[i].iter().enumerate() {
                write!(f, "  {:>width$}", format_cell(cell), width = widths[j + 1])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// セル値を表示用の文字列に変換
fn format_cell(cell: &NA<f64>) -> String {
    match cell {
        NA::Value(v) => format!("{:.2}", v),
        NA::NA => "NA".to_string(),
    }
}
