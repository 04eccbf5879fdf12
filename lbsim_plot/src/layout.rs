use lbsim::ResultSet;

/// Width of each bar. Bars of the same server are placed next to each other,
/// so they're also shifted by this amount.
pub const BAR_WIDTH: f64 = 0.3;

pub const TITLE: &str = "Servers Performance Metrics";
pub const XLABEL: &str = "Server ID";
pub const YLABEL: &str = "Metrics";

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub x: Vec<f64>,
    pub heights: Vec<f64>,
}

/// Geometry of a bar chart with one group of three bars (average delay,
/// average waiting time and average queue length) per server.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBars {
    pub series: Vec<Series>,
    pub xticks: Vec<f64>,
    pub xtick_labels: Vec<String>,
    pub title: &'static str,
    pub xlabel: &'static str,
    pub ylabel: &'static str,
}

impl GroupedBars {
    /// Lays out `results` in iteration order: server `i` has its bars at `i`,
    /// `i + BAR_WIDTH` and `i + 2 * BAR_WIDTH`, and its tick (labeled with the
    /// server identifier) under the middle bar.
    pub fn from_results(results: &ResultSet) -> Self {
        // compute x: one per server
        let x: Vec<_> = (0..results.len()).map(|i| i as f64).collect();

        let queue_lengths: Vec<f64> = results
            .avg_queue_lengths()
            .into_iter()
            .map(|length| length as f64)
            .collect();
        let heights = vec![
            ("Avg Delay", results.avg_delays()),
            ("Avg Waiting", results.avg_waitings()),
            ("Avg Queue Length", queue_lengths),
        ];

        let series = heights
            .into_iter()
            .enumerate()
            .map(|(index, (label, heights))| {
                // compute x: shift all values by `shift`
                let shift = index as f64 * BAR_WIDTH;
                let x = x.iter().map(|x| x + shift).collect();
                Series { label, x, heights }
            })
            .collect();

        // center ticks on the middle bar
        let xticks = x.iter().map(|x| x + BAR_WIDTH).collect();
        let xtick_labels = results
            .server_ids()
            .into_iter()
            .map(|server_id| server_id.to_string())
            .collect();

        Self {
            series,
            xticks,
            xtick_labels,
            title: TITLE,
            xlabel: XLABEL,
            ylabel: YLABEL,
        }
    }

    /// Number of bars in the chart.
    pub fn bar_count(&self) -> usize {
        self.series.iter().map(|series| series.heights.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbsim::ServerMetricRecord;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(a, b)| (a - b).abs() < 1e-9)
    }

    #[test]
    fn three_bars_per_server() {
        let results: ResultSet = vec![
            ServerMetricRecord::new(4, 1.5, 0.5, 2),
            ServerMetricRecord::new(2, 2.5, 1.0, 3),
        ]
        .into_iter()
        .collect();
        let bars = GroupedBars::from_results(&results);

        assert_eq!(bars.series.len(), 3);
        assert_eq!(bars.bar_count(), 6);

        let labels: Vec<_> = bars.series.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec!["Avg Delay", "Avg Waiting", "Avg Queue Length"]
        );

        let delay = &bars.series[0];
        assert!(close(&delay.x, &[0.0, 1.0]));
        assert_eq!(delay.heights, vec![1.5, 2.5]);

        let waiting = &bars.series[1];
        assert!(close(&waiting.x, &[0.3, 1.3]));
        assert_eq!(waiting.heights, vec![0.5, 1.0]);

        let queue = &bars.series[2];
        assert!(close(&queue.x, &[0.6, 1.6]));
        assert_eq!(queue.heights, vec![2.0, 3.0]);

        // ticks are under the middle bar and labeled in file order
        assert!(close(&bars.xticks, &[0.3, 1.3]));
        assert_eq!(bars.xtick_labels, vec!["4", "2"]);

        assert_eq!(bars.title, "Servers Performance Metrics");
        assert_eq!(bars.xlabel, "Server ID");
        assert_eq!(bars.ylabel, "Metrics");
    }

    #[test]
    fn bars_do_not_overlap() {
        let results: ResultSet = (1..=5)
            .map(|id| ServerMetricRecord::new(id, 1.0, 1.0, 1))
            .collect();
        let bars = GroupedBars::from_results(&results);

        // gather all bar starts and check consecutive ones are at least one
        // bar width apart
        let mut starts: Vec<_> = bars
            .series
            .iter()
            .flat_map(|series| series.x.iter().copied())
            .collect();
        starts.sort_by(|a, b| a.partial_cmp(b).expect("no NaN"));
        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= BAR_WIDTH - 1e-9);
        }
    }

    #[test]
    fn empty_results() {
        let bars = GroupedBars::from_results(&ResultSet::new());
        assert_eq!(bars.series.len(), 3);
        assert_eq!(bars.bar_count(), 0);
        assert!(bars.xticks.is_empty());
        assert!(bars.xtick_labels.is_empty());
    }
}
