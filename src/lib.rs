// 特定の警告を無効化
#![allow(clippy::needless_range_loop)]
#![allow(clippy::redundant_closure)]

pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod io;
pub mod na;
pub mod pivot;
pub mod schema;
pub mod series;
pub mod stats;
pub mod vis;

// Re-export commonly used types
pub use dataframe::{ColumnData, DataFrame};
pub use error::{CensRSError, Result};
pub use groupby::{GroupBy, GroupKey, GroupedSummaries, Statistic, SummaryRecord};
pub use na::NA;
pub use pivot::PivotTable;
pub use schema::{Field, Schema, SemanticType};
pub use series::Series;
pub use stats::DescriptiveStats;
pub use vis::{BarChart, BoxPlot, Chart, ChartConfig, Histogram};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
