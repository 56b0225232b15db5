//! Plot configuration.
//!
//! A `PlotConfig` is either one of the built-in presets, which reproduce the
//! successive revisions of the benchmark plots, or a YAML file:
//!
//! ```yaml
//! input-dir: output
//! algorithm-titles: [Naive, "Naive, fast loop"]
//! alphabet-sizes: [2, 4, 20, 70]
//! grid-rows: 1
//! grid-cols: 2
//! y-axis-clamp:
//!   min: 0.0
//!   max: 0.7
//! ```

use crate::{env::Env, search::SearchAlgorithm, tasks::figure::XAxis};
use anyhow::Result;
use clap::ValueEnum;
use log::{error, warn};
use serde::Deserialize;
use std::{collections::HashSet, fmt, fs, path::Path, path::PathBuf};

pub const DEFAULT_ALPHABET_SIZES: &[usize] = &[2, 4, 20, 70];
const DEFAULT_TITLE: &str = "Average search time per word";
const DEFAULT_LEGEND_TITLE: &str = "Alphabet size";

/// Fixed y-axis range, applied to every subplot or only to the first
/// `up_to` algorithm slots.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct YAxisClamp {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub up_to: Option<usize>,
}

impl YAxisClamp {
    pub fn applies_to(&self, slot: usize) -> bool {
        self.up_to.is_none_or(|up_to| slot <= up_to)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PlotConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,
    /// Subplot titles, in algorithm-index order. Slots past the end of the
    /// list are drawn untitled.
    pub algorithm_titles: Vec<String>,
    /// Number of algorithm slots. Defaults to the number of titles.
    #[serde(default)]
    pub algorithm_count: Option<usize>,
    /// Number of algorithm slots drawn in the word-length figure, when it
    /// differs from `algorithm_count`.
    #[serde(default)]
    pub word_length_algorithm_count: Option<usize>,
    pub alphabet_sizes: Vec<usize>,
    pub grid_rows: usize,
    pub grid_cols: usize,
    #[serde(default)]
    pub y_axis_clamp: Option<YAxisClamp>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_legend_title")]
    pub legend_title: String,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_plots_dir() -> PathBuf {
    PathBuf::from("plots")
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_legend_title() -> String {
    DEFAULT_LEGEND_TITLE.to_string()
}

/// Built-in configurations.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum Preset {
    /// Naive variants only: 7 slots (6 titled) on a 3x3 grid, every subplot
    /// clamped to [0, 0.7]
    Naive,
    /// All ten algorithms on a 4x3 grid, only the naive variants clamped
    All,
    /// As `all`, but the word-length figure stops at the ninth algorithm
    AllLegacy,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Naive => write!(f, "naive"),
            Preset::All => write!(f, "all"),
            Preset::AllLegacy => write!(f, "all-legacy"),
        }
    }
}

fn algorithm_titles(count: usize) -> Vec<String> {
    SearchAlgorithm::iter_variants()
        .take(count)
        .map(|algorithm| algorithm.title().to_string())
        .collect()
}

impl PlotConfig {
    pub fn preset(preset: Preset) -> Self {
        let naive = PlotConfig {
            input_dir: default_input_dir(),
            plots_dir: default_plots_dir(),
            algorithm_titles: algorithm_titles(6),
            algorithm_count: Some(7),
            word_length_algorithm_count: None,
            alphabet_sizes: DEFAULT_ALPHABET_SIZES.to_vec(),
            grid_rows: 3,
            grid_cols: 3,
            y_axis_clamp: Some(YAxisClamp {
                min: 0.0,
                max: 0.7,
                up_to: None,
            }),
            title: default_title(),
            legend_title: default_legend_title(),
        };

        match preset {
            Preset::Naive => naive,
            Preset::All => PlotConfig {
                algorithm_titles: algorithm_titles(10),
                algorithm_count: None,
                grid_rows: 4,
                grid_cols: 3,
                y_axis_clamp: Some(YAxisClamp {
                    min: 0.0,
                    max: 0.7,
                    up_to: Some(6),
                }),
                ..naive
            },
            Preset::AllLegacy => PlotConfig {
                word_length_algorithm_count: Some(9),
                ..Self::preset(Preset::All)
            },
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PlotConfig = serde_yaml::from_str(yaml).map_err(|e| {
            let reason = format!("error parsing plot config (error={e})");
            error!("{reason}");
            anyhow::anyhow!(reason)
        })?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path).map_err(|e| {
            let reason = format!(
                "error reading plot config (path={}, error={e:?})",
                path.display()
            );
            error!("{reason}");
            anyhow::anyhow!(reason)
        })?;

        Self::from_yaml(&yaml)
    }

    pub fn algorithm_count(&self) -> usize {
        self.algorithm_count
            .unwrap_or(self.algorithm_titles.len())
    }

    /// Number of algorithm slots drawn in the figure for `axis`.
    pub fn algorithm_count_for(&self, axis: XAxis) -> usize {
        match axis {
            XAxis::AlphabetSize => self.algorithm_count(),
            XAxis::WordLength => self
                .word_length_algorithm_count
                .unwrap_or(self.algorithm_count()),
        }
    }

    pub fn title_for(&self, slot: usize) -> Option<&str> {
        slot.checked_sub(1)
            .and_then(|pos| self.algorithm_titles.get(pos))
            .map(String::as_str)
    }

    /// Anchors the directories at the project root and expands `~`.
    pub fn resolve_paths(&mut self) {
        self.input_dir = Env::resolve_path(&self.input_dir);
        self.plots_dir = Env::resolve_path(&self.plots_dir);
    }

    pub fn validate(&self) -> Result<()> {
        let algorithm_count = self.algorithm_count();
        let num_cells = self
            .grid_rows
            .checked_mul(self.grid_cols)
            .ok_or_else(|| {
                let reason = format!(
                    "grid size overflows (grid={}x{})",
                    self.grid_rows, self.grid_cols
                );
                error!("{reason}");
                anyhow::anyhow!(reason)
            })?;

        if algorithm_count == 0 {
            error!("plot config has no algorithms");
            anyhow::bail!("plot config has no algorithms");
        }
        if self.alphabet_sizes.is_empty() {
            error!("plot config has no alphabet sizes");
            anyhow::bail!("plot config has no alphabet sizes");
        }
        let mut seen = HashSet::new();
        if let Some(size) = self.alphabet_sizes.iter().find(|&&size| !seen.insert(size)) {
            let reason = format!("repeated alphabet size in plot config (alphabet_size={size})");
            error!("{reason}");
            anyhow::bail!(reason);
        }
        if algorithm_count > num_cells {
            let reason = format!(
                "grid too small for algorithms (algorithms={algorithm_count}, grid={}x{})",
                self.grid_rows, self.grid_cols
            );
            error!("{reason}");
            anyhow::bail!(reason);
        }
        if let Some(count) = self.word_length_algorithm_count {
            if count == 0 || count > algorithm_count {
                let reason = format!(
                    "word-length algorithm count out of range (count={count}, algorithms={algorithm_count})"
                );
                error!("{reason}");
                anyhow::bail!(reason);
            }
            if count < algorithm_count {
                warn!(
                    "word-length figure only draws algorithms 1..={count} of {algorithm_count}"
                );
            }
        }
        if let Some(clamp) = &self.y_axis_clamp {
            if clamp.min >= clamp.max {
                let reason = format!(
                    "empty y-axis range (min={}, max={})",
                    clamp.min, clamp.max
                );
                error!("{reason}");
                anyhow::bail!(reason);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_preset() {
        let config = PlotConfig::preset(Preset::Naive);
        assert!(config.validate().is_ok());
        assert_eq!(config.algorithm_count(), 7);
        assert_eq!(config.algorithm_titles.len(), 6);
        assert_eq!(config.title_for(1), Some("Naive"));
        assert_eq!(config.title_for(7), None);
        assert_eq!(config.alphabet_sizes, vec![2, 4, 20, 70]);
        assert_eq!(config.algorithm_count_for(XAxis::WordLength), 7);
    }

    #[test]
    fn test_all_presets() {
        let all = PlotConfig::preset(Preset::All);
        assert!(all.validate().is_ok());
        assert_eq!(all.algorithm_count(), 10);
        assert_eq!(all.title_for(10), Some("Horspool"));
        assert_eq!(all.algorithm_count_for(XAxis::WordLength), 10);

        let clamp = all.y_axis_clamp.as_ref().unwrap();
        assert!(clamp.applies_to(6));
        assert!(!clamp.applies_to(7));

        let legacy = PlotConfig::preset(Preset::AllLegacy);
        assert!(legacy.validate().is_ok());
        assert_eq!(legacy.algorithm_count_for(XAxis::AlphabetSize), 10);
        assert_eq!(legacy.algorithm_count_for(XAxis::WordLength), 9);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
input-dir: ~/bench/output
algorithm-titles:
  - Naive
  - Morris-Pratt
alphabet-sizes: [2, 4]
grid-rows: 1
grid-cols: 2
y-axis-clamp:
  min: 0.0
  max: 1.5
  up-to: 1
"#;

        let config = PlotConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("~/bench/output"));
        assert_eq!(config.plots_dir, PathBuf::from("plots"));
        assert_eq!(config.algorithm_count(), 2);
        assert_eq!(config.alphabet_sizes, vec![2, 4]);
        assert_eq!(
            config.y_axis_clamp,
            Some(YAxisClamp {
                min: 0.0,
                max: 1.5,
                up_to: Some(1),
            })
        );
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        let yaml = r#"
algorithm-titles: [Naive]
alphabet-sizes: [2]
grid-rows: 1
grid-cols: 1
grid-depth: 3
"#;
        assert!(PlotConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_grid_too_small() {
        let config = PlotConfig {
            grid_rows: 3,
            grid_cols: 3,
            ..PlotConfig::preset(Preset::All)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_repeated_alphabet_sizes() {
        let yaml = r#"
algorithm-titles: [Naive]
alphabet-sizes: [2, 4, 4]
grid-rows: 1
grid-cols: 1
"#;
        assert!(PlotConfig::from_yaml(yaml).is_err());

        let config = PlotConfig {
            alphabet_sizes: vec![70, 2, 70],
            ..PlotConfig::preset(Preset::All)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_grid_size_overflow() {
        let config = PlotConfig {
            grid_rows: usize::MAX,
            grid_cols: 2,
            ..PlotConfig::preset(Preset::Naive)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_word_length_count() {
        let config = PlotConfig {
            word_length_algorithm_count: Some(11),
            ..PlotConfig::preset(Preset::All)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_clamp_range() {
        let config = PlotConfig {
            y_axis_clamp: Some(YAxisClamp {
                min: 1.0,
                max: 1.0,
                up_to: None,
            }),
            ..PlotConfig::preset(Preset::Naive)
        };
        assert!(config.validate().is_err());
    }
}
