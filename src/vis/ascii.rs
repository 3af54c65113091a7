//! Chart implementations for text-based visualization

use crate::stats::DescriptiveStats;

use super::{Chart, ChartConfig};

// ============================================================================
// Histogram
// ============================================================================

/// Histogram chart for distribution visualization
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Bin edges
    bin_edges: Vec<f64>,
    /// Bin counts
    counts: Vec<usize>,
    /// Configuration
    config: ChartConfig,
}

impl Histogram {
    /// Create a new histogram from data
    pub fn new(data: &[f64], bins: usize) -> Self {
        Self::with_config(data, bins, ChartConfig::default())
    }

    /// Create a histogram with custom configuration
    pub fn with_config(data: &[f64], bins: usize, config: ChartConfig) -> Self {
        let (bin_edges, counts) = Self::compute_bins(data, bins);
        Self {
            bin_edges,
            counts,
            config,
        }
    }

    /// Bin edges computed from the data
    pub fn bin_edges(&self) -> &[f64] {
        &self.bin_edges
    }

    /// Per-bin counts
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    fn compute_bins(data: &[f64], bins: usize) -> (Vec<f64>, Vec<usize>) {
        if data.is_empty() || bins == 0 {
            return (vec![], vec![]);
        }

        let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        if (max - min).abs() < f64::EPSILON {
            return (vec![min, max], vec![data.len()]);
        }

        let bin_width = (max - min) / bins as f64;
        let mut edges = Vec::with_capacity(bins + 1);
        let mut counts = vec![0; bins];

        for i in 0..=bins {
            edges.push(min + i as f64 * bin_width);
        }

        for &value in data {
            let bin_idx = ((value - min) / bin_width).floor() as usize;
            let bin_idx = bin_idx.min(bins - 1);
            counts[bin_idx] += 1;
        }

        (edges, counts)
    }
}

impl Chart for Histogram {
    fn render(&self) -> String {
        if self.counts.is_empty() {
            return String::from("No data to display");
        }

        let mut output = String::new();
        let max_count = *self.counts.iter().max().unwrap_or(&1);
        let bar_width = self.config.width.saturating_sub(24).max(1);
        let bar_char = self.config.style.bar_char();

        if let Some(ref title) = self.config.title {
            output.push_str(title);
            output.push('\n');
        }

        for (i, &count) in self.counts.iter().enumerate() {
            let lo = self.bin_edges[i];
            let hi = self.bin_edges[(i + 1).min(self.bin_edges.len() - 1)];
            let bar_len = if max_count == 0 {
                0
            } else {
                (count as f64 / max_count as f64 * bar_width as f64).round() as usize
            };

            let bar: String = std::iter::repeat(bar_char).take(bar_len).collect();
            output.push_str(&format!(
                "[{:>8.1}, {:>8.1})  {} {}\n",
                lo, hi, bar, count
            ));
        }

        output
    }
}

// ============================================================================
// Bar chart
// ============================================================================

/// Horizontal bar chart for labelled values (e.g. a statistic per stratum)
#[derive(Debug, Clone)]
pub struct BarChart {
    /// Bar labels
    labels: Vec<String>,
    /// Bar values
    values: Vec<f64>,
    /// Configuration
    config: ChartConfig,
}

impl BarChart {
    /// Create a new bar chart from labels and values
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self::with_config(labels, values, ChartConfig::default())
    }

    /// Create a bar chart with custom configuration
    pub fn with_config(labels: Vec<String>, values: Vec<f64>, config: ChartConfig) -> Self {
        Self {
            labels,
            values,
            config,
        }
    }
}

impl Chart for BarChart {
    fn render(&self) -> String {
        if self.values.is_empty() {
            return String::from("No data to display");
        }

        let mut output = String::new();
        if let Some(ref title) = self.config.title {
            output.push_str(title);
            output.push('\n');
        }

        let label_width = self.labels.iter().map(|l| l.len()).max().unwrap_or(0);
        let max_value = self.values.iter().cloned().fold(0.0_f64, f64::max);
        let bar_width = self
            .config
            .width
            .saturating_sub(label_width + 14)
            .max(1);
        let bar_char = self.config.style.bar_char();

        for (label, &value) in self.labels.iter().zip(&self.values) {
            let bar_len = if max_value <= 0.0 {
                0
            } else {
                (value.max(0.0) / max_value * bar_width as f64).round() as usize
            };

            let bar: String = std::iter::repeat(bar_char).take(bar_len).collect();
            output.push_str(&format!(
                "{:>label_width$}  {} {:.2}\n",
                label,
                bar,
                value,
                label_width = label_width
            ));
        }

        output
    }
}

// ============================================================================
// Box plot
// ============================================================================

/// Box-and-whisker strip rendered from a five-number summary
#[derive(Debug, Clone)]
pub struct BoxPlot {
    /// Five-number summary (min, q1, median, q3, max)
    summary: DescriptiveStats,
    /// Configuration
    config: ChartConfig,
}

impl BoxPlot {
    /// Create a new box plot from descriptive statistics
    pub fn new(summary: DescriptiveStats) -> Self {
        Self::with_config(summary, ChartConfig::default())
    }

    /// Create a box plot with custom configuration
    pub fn with_config(summary: DescriptiveStats, config: ChartConfig) -> Self {
        Self { summary, config }
    }

    /// Map a value onto a column position within the strip
    fn position(&self, value: f64, width: usize) -> usize {
        let span = self.summary.max - self.summary.min;
        if span <= 0.0 {
            return 0;
        }
        let frac = (value - self.summary.min) / span;
        ((frac * (width - 1) as f64).round() as usize).min(width - 1)
    }
}

impl Chart for BoxPlot {
    fn render(&self) -> String {
        let mut output = String::new();
        if let Some(ref title) = self.config.title {
            output.push_str(title);
            output.push('\n');
        }

        let width = self.config.width.max(10);
        let mut strip: Vec<char> = vec![' '; width];

        let min_pos = self.position(self.summary.min, width);
        let q1_pos = self.position(self.summary.q1, width);
        let med_pos = self.position(self.summary.median, width);
        let q3_pos = self.position(self.summary.q3, width);
        let max_pos = self.position(self.summary.max, width);

        // Whiskers, box, median marker (drawn in that order so the
        // median stays visible inside a narrow box)
        for cell in strip.iter_mut().take(q1_pos).skip(min_pos) {
            *cell = '-';
        }
        for cell in strip.iter_mut().take(max_pos + 1).skip(q3_pos) {
            *cell = '-';
        }
        for cell in strip.iter_mut().take(q3_pos + 1).skip(q1_pos) {
            *cell = '=';
        }
        strip[min_pos] = '|';
        strip[max_pos] = '|';
        strip[q1_pos] = '[';
        strip[q3_pos] = ']';
        strip[med_pos] = ':';

        let strip: String = strip.into_iter().collect();
        output.push_str(&strip);
        output.push('\n');
        output.push_str(&format!(
            "min={:.2}  q1={:.2}  median={:.2}  q3={:.2}  max={:.2}\n",
            self.summary.min, self.summary.q1, self.summary.median, self.summary.q3, self.summary.max
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;

    #[test]
    fn histogram_counts_cover_all_values() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 5.0];
        let hist = Histogram::new(&data, 4);
        assert_eq!(hist.counts().iter().sum::<usize>(), data.len());
        assert_eq!(hist.bin_edges().len(), 5);
    }

    #[test]
    fn histogram_constant_data_uses_single_bin() {
        let data = vec![7.0; 10];
        let hist = Histogram::new(&data, 4);
        assert_eq!(hist.counts(), &[10]);
    }

    #[test]
    fn histogram_renders_every_bin() {
        let data = vec![1.0, 2.0, 10.0];
        let hist = Histogram::new(&data, 3);
        let rendered = hist.render();
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn bar_chart_scales_to_longest_bar() {
        let chart = BarChart::new(
            vec!["north".to_string(), "south".to_string()],
            vec![10.0, 5.0],
        );
        let rendered = chart.render();
        assert!(rendered.contains("north"));
        assert!(rendered.contains("10.00"));
    }

    #[test]
    fn box_plot_marks_all_five_numbers() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 100.0];
        let plot = BoxPlot::new(stats::describe(&data).unwrap());
        let rendered = plot.render();
        assert!(rendered.contains('['));
        assert!(rendered.contains(']'));
        assert!(rendered.contains(':'));
        assert!(rendered.contains("median=3.00"));
    }
}
