//! Resolves the plot area and the text rows around it before any pass draws.

use super::config::ChartConfig;
use super::scale::PlotArea;
use super::series::ChartSeries;
use super::text::{estimate_width, metrics, FontWeight};

/// Smallest plot height kept when the label band would swallow the canvas.
const MIN_PLOT_HEIGHT: f64 = 40.0;
const LABEL_GAP: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub plot: PlotArea,
    pub title_baseline: f64,
    /// Where rotated category labels start hanging from.
    pub tick_label_top: f64,
    /// Longest a category label may run before it is shortened.
    pub tick_label_room: f64,
    pub group_label_baseline: f64,
    /// Lower end of the group separators.
    pub separator_bottom: f64,
}

impl Layout {
    pub fn resolve(config: &ChartConfig, series: &ChartSeries) -> Self {
        let canvas_width = f64::from(config.width);
        let canvas_height = f64::from(config.height);

        let widest_label = series
            .labels
            .iter()
            .map(|label| estimate_width(label, FontWeight::Regular, config.tick_size))
            .fold(0.0_f64, f64::max);
        let tick_label_room = widest_label.min(config.max_label_band);
        let label_band = tick_label_room + LABEL_GAP;

        let group_metrics = metrics(config.group_label_size);
        let group_row = group_metrics.line_h + LABEL_GAP * 2.0;

        let top = config.padding_top;
        let bottom = (canvas_height - label_band - group_row).max(top + MIN_PLOT_HEIGHT);
        let plot = PlotArea {
            left: config.padding_left,
            top,
            right: (canvas_width - config.padding_right).max(config.padding_left + 1.0),
            bottom,
        };

        let title_metrics = metrics(config.title_size);
        let title_baseline = ((top - title_metrics.line_h) / 2.0).max(0.0) + title_metrics.asc;

        let group_label_baseline = bottom + label_band + LABEL_GAP + group_metrics.asc;

        Self {
            canvas_width,
            canvas_height,
            plot,
            title_baseline,
            tick_label_top: bottom + LABEL_GAP,
            tick_label_room,
            group_label_baseline,
            separator_bottom: group_label_baseline + group_metrics.desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::ResultMapping;

    #[test]
    fn longer_labels_shrink_the_plot() {
        let config = ChartConfig::default();
        let short = ChartSeries::from_mapping(&ResultMapping::new().with_function("F", [("QI", 50.0)]));
        let long = ChartSeries::from_mapping(&ResultMapping::new().with_function(
            "F",
            [("Wisconsin Nombre d’essais pour compléter la première catégorie", 50.0)],
        ));

        let short_layout = Layout::resolve(&config, &short);
        let long_layout = Layout::resolve(&config, &long);
        assert!(long_layout.plot.bottom < short_layout.plot.bottom);
        assert!(long_layout.plot.bottom >= config.height as f64 - config.max_label_band - 80.0);
    }

    #[test]
    fn label_room_is_capped_by_config() {
        let config = ChartConfig::default();
        let long = ChartSeries::from_mapping(&ResultMapping::new().with_function(
            "F",
            [("Wisconsin Nombre d’essais pour compléter la première catégorie", 50.0)],
        ));
        let layout = Layout::resolve(&config, &long);
        assert_eq!(layout.tick_label_room, config.max_label_band);
        let group_top = layout.group_label_baseline - metrics(config.group_label_size).asc;
        assert!(layout.tick_label_top + layout.tick_label_room <= group_top);
    }

    #[test]
    fn rows_stack_below_the_plot() {
        let config = ChartConfig::default();
        let series = ChartSeries::from_mapping(&ResultMapping::new());
        let layout = Layout::resolve(&config, &series);
        assert!(layout.title_baseline < layout.plot.top);
        assert!(layout.tick_label_top > layout.plot.bottom);
        assert!(layout.group_label_baseline > layout.tick_label_top);
        assert!(layout.separator_bottom <= layout.canvas_height);
    }

    #[test]
    fn tiny_canvas_keeps_a_positive_plot() {
        let config = ChartConfig {
            width: 50,
            height: 60,
            ..ChartConfig::default()
        };
        let series = ChartSeries::from_mapping(&ResultMapping::new());
        let layout = Layout::resolve(&config, &series);
        assert!(layout.plot.width() > 0.0);
        assert!(layout.plot.height() >= MIN_PLOT_HEIGHT);
    }
}
