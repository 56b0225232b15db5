use crate::{
    config::{PlotConfig, Preset},
    env::Env,
    tasks::{
        color::{
            CAPTION_FONT_SIZE, FONT_SIZE, LABEL_FONT_SIZE, MARKER_SIZE, STROKE_WIDTH,
            get_color_for_series,
        },
        figure::{self, Figure, Subplot, XAxis},
        results,
    },
};
use anyhow::Result;
use clap::Args;
use log::{error, info};
use plotters::{coord::Shift, prelude::*};
use std::{
    fs,
    path::{Path, PathBuf},
};

const LEGEND_WIDTH_PX: i32 = 140;
const MIN_WIDTH_PX: u32 = 2 * LEGEND_WIDTH_PX as u32;
const MIN_HEIGHT_PX: u32 = 200;

#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Built-in configuration to plot with
    #[arg(long, value_enum, default_value_t = Preset::Naive)]
    pub preset: Preset,
    /// YAML plot configuration (takes precedence over --preset)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory holding the averageTimes-*.csv files
    #[arg(long)]
    pub input_dir: Option<PathBuf>,
    /// Directory to write the figures to
    #[arg(long)]
    pub plots_dir: Option<PathBuf>,
    #[arg(long, default_value = "1000")]
    pub width: u32,
    #[arg(long, default_value = "1000")]
    pub height: u32,
}

/// The grid needs room next to the legend strip.
pub fn check_figure_size((width, height): (u32, u32)) -> Result<()> {
    if width < MIN_WIDTH_PX || height < MIN_HEIGHT_PX {
        let reason = format!(
            "figure too small (size={width}x{height}, min={MIN_WIDTH_PX}x{MIN_HEIGHT_PX})"
        );
        error!("{reason}");
        anyhow::bail!(reason);
    }

    Ok(())
}

/// Builds the plot configuration from the preset or config file, then
/// applies the command-line overrides.
pub fn resolve_config(args: &PlotArgs) -> Result<PlotConfig> {
    check_figure_size((args.width, args.height))?;

    let mut config = match &args.config {
        Some(path) => {
            info!("loading plot config from {}", path.display());
            PlotConfig::from_file(&Env::resolve_path(path))?
        }
        None => {
            info!("using plot preset: {}", args.preset);
            PlotConfig::preset(args.preset)
        }
    };

    if let Some(input_dir) = &args.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(plots_dir) = &args.plots_dir {
        config.plots_dir = plots_dir.clone();
    }
    config.resolve_paths();
    config.validate()?;

    Ok(config)
}

fn draw_subplot(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    figure: &Figure,
    subplot: &Subplot,
) -> Result<()> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50);
    if let Some(title) = &subplot.title {
        builder.caption(title, ("sans-serif", CAPTION_FONT_SIZE));
    }
    let mut chart =
        builder.build_cartesian_2d(subplot.x_range.clone(), subplot.y_range.clone())?;

    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .x_labels(6)
        .y_labels(8)
        .label_style(("sans-serif", LABEL_FONT_SIZE).into_font())
        .x_desc(figure.x_title.as_str())
        .y_desc(figure.y_title.as_str())
        .draw()?;

    for series in &subplot.series {
        let color = get_color_for_series(series.color_idx);

        chart.draw_series(LineSeries::new(
            series.points.iter().copied(),
            color.stroke_width(STROKE_WIDTH),
        ))?;

        // Markers outside a clamped range are not drawn.
        let y_range = subplot.y_range.clone();
        chart.draw_series(
            series
                .points
                .iter()
                .filter(|(_, y)| y_range.contains(y) || *y == y_range.end)
                .map(|&point| Circle::new(point, MARKER_SIZE, color.filled())),
        )?;
    }

    Ok(())
}

/// Draws one colour box and label per legend entry, stacked vertically.
fn draw_legend(area: &DrawingArea<SVGBackend<'_>, Shift>, figure: &Figure) -> Result<()> {
    let x_pos = 10;
    let mut y_pos = 40;
    let square_side = 20;

    area.draw(&Text::new(
        figure.legend_title.clone(),
        (x_pos, 10),
        ("sans-serif", LABEL_FONT_SIZE).into_font().color(&BLACK),
    ))?;

    for entry in figure.legend_entries() {
        let color = get_color_for_series(entry.color_idx);
        area.draw(&Rectangle::new(
            [(x_pos, y_pos), (x_pos + square_side, y_pos + square_side)],
            color.filled(),
        ))?;
        area.draw(&Rectangle::new(
            [(x_pos, y_pos), (x_pos + square_side, y_pos + square_side)],
            BLACK.stroke_width(1),
        ))?;
        area.draw(&Text::new(
            entry.name.clone(),
            (x_pos + square_side + 10, y_pos + 2),
            ("sans-serif", LABEL_FONT_SIZE).into_font(),
        ))?;
        y_pos += square_side + 10;
    }

    Ok(())
}

/// Renders a composed figure to an SVG file.
pub fn render(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<()> {
    check_figure_size(size)?;

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let body = root.titled(&figure.title, ("sans-serif", FONT_SIZE))?;
    let (width, _) = body.dim_in_pixel();
    let (grid, legend) = body.split_horizontally(width as i32 - LEGEND_WIDTH_PX);

    let cells = grid.split_evenly((figure.rows, figure.cols));
    for subplot in &figure.subplots {
        let cell = &cells[subplot.row * figure.cols + subplot.col];
        draw_subplot(cell, figure, subplot)?;
    }
    draw_legend(&legend, figure)?;

    root.present()?;
    info!("generated plot at: {}", path.display());

    Ok(())
}

/// Loads the results, then composes and renders both figures. Returns the
/// paths of the generated files.
pub fn plot(config: &PlotConfig, size: (u32, u32)) -> Result<Vec<PathBuf>> {
    let results = results::load_all(config)?;

    fs::create_dir_all(&config.plots_dir).map_err(|e| {
        let reason = format!(
            "error creating directory (path={}, error={e:?})",
            config.plots_dir.display()
        );
        error!("{reason}");
        anyhow::anyhow!(reason)
    })?;

    let mut plot_paths = Vec::new();
    for axis in XAxis::iter_variants() {
        let figure = figure::compose(config, &results, *axis)?;
        let plot_path = config.plots_dir.join(format!("{}.svg", axis.file_stem()));
        render(&figure, &plot_path, size)?;
        plot_paths.push(plot_path);
    }

    Ok(plot_paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args() -> PlotArgs {
        PlotArgs {
            preset: Preset::Naive,
            config: None,
            input_dir: None,
            plots_dir: None,
            width: 1000,
            height: 1000,
        }
    }

    #[test]
    fn test_resolve_config_from_preset() {
        let config = resolve_config(&PlotArgs {
            preset: Preset::All,
            input_dir: Some(PathBuf::from("/tmp/results")),
            ..args()
        })
        .unwrap();

        assert_eq!(config.algorithm_count(), 10);
        assert_eq!(config.input_dir, PathBuf::from("/tmp/results"));
        assert_eq!(config.plots_dir, Env::proj_root().join("plots"));
    }

    #[test]
    fn test_resolve_config_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("plot.yaml");
        fs::write(
            &config_path,
            "algorithm-titles: [Horspool]\nalphabet-sizes: [4]\ngrid-rows: 1\ngrid-cols: 1\n",
        )
        .unwrap();

        let config = resolve_config(&PlotArgs {
            config: Some(config_path),
            plots_dir: Some(temp_dir.path().to_path_buf()),
            ..args()
        })
        .unwrap();

        assert_eq!(config.algorithm_titles, vec!["Horspool".to_string()]);
        assert_eq!(config.plots_dir, temp_dir.path());
        assert_eq!(config.input_dir, Env::proj_root().join("output"));
    }

    #[test]
    fn test_figure_size_must_fit_legend() {
        assert!(check_figure_size((1000, 1000)).is_ok());
        assert!(check_figure_size((MIN_WIDTH_PX, MIN_HEIGHT_PX)).is_ok());
        assert!(check_figure_size((100, 1000)).is_err());
        assert!(check_figure_size((1000, 0)).is_err());

        let result = resolve_config(&PlotArgs {
            width: 139,
            ..args()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_plot_fails_fast_on_missing_results() {
        let temp_dir = tempdir().unwrap();
        let config = PlotConfig {
            input_dir: temp_dir.path().join("output"),
            plots_dir: temp_dir.path().join("plots"),
            ..PlotConfig::preset(Preset::Naive)
        };

        assert!(plot(&config, (1000, 1000)).is_err());
        // Nothing is rendered when loading fails.
        assert!(!config.plots_dir.exists());
    }
}
