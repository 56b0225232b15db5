//! Composition of a figure from loaded results.
//!
//! A `Figure` is a backend-independent description of what gets drawn: the
//! grid, one subplot per algorithm slot, one series per alphabet size, which
//! series carry a legend entry, and the axis ranges of every subplot.

use crate::{
    config::PlotConfig,
    tasks::results::{BenchmarkRecord, ResultSet},
};
use anyhow::Result;
use log::{debug, error};
use std::{fmt, ops::Range};

pub const Y_AXIS_TITLE: &str = "Average time (ms)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XAxis {
    AlphabetSize,
    WordLength,
}

impl fmt::Display for XAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XAxis::AlphabetSize => write!(f, "alphabet-size"),
            XAxis::WordLength => write!(f, "word-length"),
        }
    }
}

impl XAxis {
    pub fn iter_variants() -> std::slice::Iter<'static, XAxis> {
        static VARIANTS: [XAxis; 2] = [XAxis::AlphabetSize, XAxis::WordLength];
        VARIANTS.iter()
    }

    pub fn title(&self) -> &'static str {
        match self {
            XAxis::AlphabetSize => "Alphabet size",
            XAxis::WordLength => "Word length",
        }
    }

    pub fn file_stem(&self) -> String {
        format!("time-vs-{self}")
    }

    fn value(&self, record: &BenchmarkRecord) -> f64 {
        match self {
            XAxis::AlphabetSize => record.alphabet_size as f64,
            XAxis::WordLength => record.word_length as f64,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub legend_group: String,
    pub show_legend: bool,
    /// Position of the alphabet size in the configuration, used to pick the
    /// same colour in every subplot.
    pub color_idx: usize,
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subplot {
    /// 1-based algorithm index.
    pub slot: usize,
    pub row: usize,
    pub col: usize,
    pub title: Option<String>,
    pub series: Vec<Series>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub y_clamped: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub axis: XAxis,
    pub title: String,
    pub legend_title: String,
    pub x_title: String,
    pub y_title: String,
    pub rows: usize,
    pub cols: usize,
    pub subplots: Vec<Subplot>,
}

impl Figure {
    pub fn subplot_at(&self, row: usize, col: usize) -> Option<&Subplot> {
        self.subplots
            .iter()
            .find(|subplot| subplot.row == row && subplot.col == col)
    }

    pub fn num_empty_cells(&self) -> usize {
        self.rows * self.cols - self.subplots.len()
    }

    /// Series that carry a legend entry, in drawing order.
    pub fn legend_entries(&self) -> Vec<&Series> {
        self.subplots
            .iter()
            .flat_map(|subplot| subplot.series.iter())
            .filter(|series| series.show_legend)
            .collect()
    }
}

/// Row-major grid position of a 1-based slot.
pub fn grid_position(slot: usize, cols: usize) -> (usize, usize) {
    ((slot - 1) / cols, (slot - 1) % cols)
}

/// Data extent padded by 5%, or by one unit around a single value.
fn fit_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if max - min <= f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }

    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Time axis starts at zero unless the data is negative.
fn fit_time_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let range = fit_range(values);
    range.start.min(0.0)..range.end.max(f64::EPSILON)
}

pub fn compose(config: &PlotConfig, results: &ResultSet, axis: XAxis) -> Result<Figure> {
    config.validate()?;

    let algorithm_count = config.algorithm_count_for(axis);
    let mut subplots = Vec::with_capacity(algorithm_count);

    for slot in 1..=algorithm_count {
        let (row, col) = grid_position(slot, config.grid_cols);

        let mut series = Vec::with_capacity(config.alphabet_sizes.len());
        for (color_idx, &alphabet_size) in config.alphabet_sizes.iter().enumerate() {
            let records = results.get(slot, alphabet_size).ok_or_else(|| {
                let reason = format!(
                    "missing results (algorithm={slot}, alphabet_size={alphabet_size})"
                );
                error!("{reason}");
                anyhow::anyhow!(reason)
            })?;

            let name = format!("size={alphabet_size}");
            series.push(Series {
                legend_group: name.clone(),
                name,
                // Only the first subplot advertises each alphabet size.
                show_legend: slot == 1,
                color_idx,
                points: records
                    .iter()
                    .map(|record| (axis.value(record), record.average_time))
                    .collect(),
            });
        }

        let x_range = fit_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
        let clamp = config
            .y_axis_clamp
            .as_ref()
            .filter(|clamp| clamp.applies_to(slot));
        let (y_range, y_clamped) = match clamp {
            Some(clamp) => (clamp.min..clamp.max, true),
            None => (
                fit_time_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.1))),
                false,
            ),
        };

        debug!("{axis}: subplot {slot} at ({row}, {col}) with {} series", series.len());
        subplots.push(Subplot {
            slot,
            row,
            col,
            title: config.title_for(slot).map(str::to_string),
            series,
            x_range,
            y_range,
            y_clamped,
        });
    }

    Ok(Figure {
        axis,
        title: config.title.clone(),
        legend_title: config.legend_title.clone(),
        x_title: axis.title().to_string(),
        y_title: Y_AXIS_TITLE.to_string(),
        rows: config.grid_rows,
        cols: config.grid_cols,
        subplots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Preset, YAxisClamp};

    fn synthetic_results(config: &PlotConfig, scale: f64) -> ResultSet {
        let mut results = ResultSet::default();
        for slot in 1..=config.algorithm_count() {
            for &alphabet_size in &config.alphabet_sizes {
                let records = [4, 8, 16]
                    .iter()
                    .map(|&word_length| BenchmarkRecord {
                        alphabet_size,
                        word_length,
                        average_time: scale * (slot * word_length) as f64,
                    })
                    .collect();
                results.insert(slot, alphabet_size, records);
            }
        }
        results
    }

    #[test]
    fn test_grid_position() {
        assert_eq!(grid_position(1, 3), (0, 0));
        assert_eq!(grid_position(3, 3), (0, 2));
        assert_eq!(grid_position(4, 3), (1, 0));
        assert_eq!(grid_position(7, 3), (2, 0));
    }

    #[test]
    fn test_compose_naive_preset() {
        let config = PlotConfig::preset(Preset::Naive);
        let results = synthetic_results(&config, 0.001);

        let figure = compose(&config, &results, XAxis::AlphabetSize).unwrap();
        assert_eq!(figure.subplots.len(), 7);
        assert_eq!(figure.num_empty_cells(), 2);
        assert!(figure.subplot_at(2, 0).is_some());
        assert!(figure.subplot_at(2, 1).is_none());
        assert!(figure.subplot_at(2, 2).is_none());
        for subplot in &figure.subplots {
            assert_eq!(subplot.series.len(), 4);
        }
        assert_eq!(figure.subplots[6].title, None);
        assert_eq!(figure.subplots[0].title.as_deref(), Some("Naive"));
        assert_eq!(figure.x_title, "Alphabet size");
    }

    #[test]
    fn test_x_values_follow_axis() {
        let config = PlotConfig::preset(Preset::Naive);
        let results = synthetic_results(&config, 0.001);

        let by_size = compose(&config, &results, XAxis::AlphabetSize).unwrap();
        let xs: Vec<f64> = by_size.subplots[0].series[2].points.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![20.0, 20.0, 20.0]);

        let by_length = compose(&config, &results, XAxis::WordLength).unwrap();
        let xs: Vec<f64> = by_length.subplots[0].series[2].points.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![4.0, 8.0, 16.0]);
        assert_eq!(by_length.x_title, "Word length");
    }

    #[test]
    fn test_legend_entries_are_unique() {
        let config = PlotConfig::preset(Preset::All);
        let results = synthetic_results(&config, 0.001);
        let figure = compose(&config, &results, XAxis::WordLength).unwrap();

        let entries = figure.legend_entries();
        let names: Vec<&str> = entries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["size=2", "size=4", "size=20", "size=70"]);
        for subplot in &figure.subplots[1..] {
            assert!(subplot.series.iter().all(|s| !s.show_legend));
        }
    }

    #[test]
    fn test_clamp_applies_regardless_of_data() {
        let config = PlotConfig::preset(Preset::Naive);
        // Data far above the clamp.
        let results = synthetic_results(&config, 10.0);
        let figure = compose(&config, &results, XAxis::WordLength).unwrap();

        for subplot in &figure.subplots {
            assert!(subplot.y_clamped);
            assert_eq!(subplot.y_range, 0.0..0.7);
        }
    }

    #[test]
    fn test_partial_clamp() {
        let config = PlotConfig::preset(Preset::All);
        let results = synthetic_results(&config, 1.0);
        let figure = compose(&config, &results, XAxis::AlphabetSize).unwrap();

        for subplot in &figure.subplots {
            if subplot.slot <= 6 {
                assert_eq!(subplot.y_range, 0.0..0.7);
            } else {
                assert!(!subplot.y_clamped);
                assert_eq!(subplot.y_range.start, 0.0);
                let y_max = 16.0 * subplot.slot as f64;
                assert!(subplot.y_range.end > y_max);
            }
        }
    }

    #[test]
    fn test_unclamped_config() {
        let config = PlotConfig {
            y_axis_clamp: None,
            ..PlotConfig::preset(Preset::Naive)
        };
        let results = synthetic_results(&config, 1.0);
        let figure = compose(&config, &results, XAxis::WordLength).unwrap();
        assert!(figure.subplots.iter().all(|s| !s.y_clamped));

        // Clamp restricted to a slot that is not drawn.
        let config = PlotConfig {
            y_axis_clamp: Some(YAxisClamp {
                min: 0.0,
                max: 0.7,
                up_to: Some(0),
            }),
            ..config
        };
        let figure = compose(&config, &results, XAxis::WordLength).unwrap();
        assert!(figure.subplots.iter().all(|s| !s.y_clamped));
    }

    #[test]
    fn test_legacy_word_length_bound() {
        let config = PlotConfig::preset(Preset::AllLegacy);
        let results = synthetic_results(&config, 0.001);

        let by_size = compose(&config, &results, XAxis::AlphabetSize).unwrap();
        assert_eq!(by_size.subplots.len(), 10);

        let by_length = compose(&config, &results, XAxis::WordLength).unwrap();
        assert_eq!(by_length.subplots.len(), 9);
        assert_eq!(by_length.num_empty_cells(), 3);
    }

    #[test]
    fn test_repeated_alphabet_size_is_rejected() {
        let config = PlotConfig {
            alphabet_sizes: vec![4, 4],
            ..PlotConfig::preset(Preset::Naive)
        };
        let mut results = ResultSet::default();
        for slot in 1..=config.algorithm_count() {
            results.insert(
                slot,
                4,
                vec![BenchmarkRecord {
                    alphabet_size: 4,
                    word_length: 8,
                    average_time: 0.1,
                }],
            );
        }

        assert!(compose(&config, &results, XAxis::WordLength).is_err());
    }

    #[test]
    fn test_missing_results() {
        let config = PlotConfig::preset(Preset::Naive);
        let results = ResultSet::default();
        assert!(compose(&config, &results, XAxis::AlphabetSize).is_err());
    }

    #[test]
    fn test_fit_range() {
        assert_eq!(fit_range([2.0, 2.0].into_iter()), 1.0..3.0);
        assert_eq!(fit_range(std::iter::empty()), 0.0..1.0);

        let range = fit_range([0.0, 10.0].into_iter());
        assert_eq!(range, -0.5..10.5);
        assert_eq!(fit_time_range([0.0, 10.0].into_iter()), -0.5..10.5);
        assert_eq!(fit_time_range([5.0, 10.0].into_iter()).start, 0.0);
    }
}
