//! Draw passes, run in order by [`ProfileRenderer`](super::renderer::ProfileRenderer).
//!
//! Every pass sees the resolved layout and the coordinate transform, so the
//! ones placing separators and group labels never run before scaling is known.

use std::borrow::Cow;
use std::f64::consts::PI;

use crate::core::bands::{classify, gradient_stops, BandScheme, SEVERITY_BANDS};
use crate::core::format::format_percentile;

use super::config::ChartConfig;
use super::layout::Layout;
use super::scale::CoordinateTransform;
use super::series::ChartSeries;
use super::surface::{Anchor, DrawSurface, Point, Rect, Stroke, TextStyle};
use super::text::{fit_width, FontWeight};

pub struct PassContext<'a> {
    pub config: &'a ChartConfig,
    pub layout: &'a Layout,
    pub scale: &'a dyn CoordinateTransform,
    pub series: &'a ChartSeries,
    pub title: &'a str,
}

pub trait DrawPass {
    fn name(&self) -> &'static str;
    fn draw(&self, ctx: &PassContext<'_>, surface: &mut dyn DrawSurface);
}

/// Title, bands, reference curve, axes, line, separators, group labels.
pub fn default_passes() -> Vec<Box<dyn DrawPass>> {
    vec![
        Box::new(TitlePass),
        Box::new(BackgroundPass),
        Box::new(GaussianPass),
        Box::new(AxesPass),
        Box::new(DataLinePass),
        Box::new(SeparatorPass),
        Box::new(GroupLabelPass),
    ]
}

pub struct TitlePass;

impl DrawPass for TitlePass {
    fn name(&self) -> &'static str {
        "title"
    }

    fn draw(&self, ctx: &PassContext<'_>, surface: &mut dyn DrawSurface) {
        let style = TextStyle {
            family: &ctx.config.font_family,
            size: ctx.config.title_size,
            weight: FontWeight::Bold,
            color: &ctx.config.text_color,
            anchor: Anchor::Middle,
            rotate: None,
            middle_baseline: false,
        };
        let at = Point::new(ctx.layout.canvas_width / 2.0, ctx.layout.title_baseline);
        surface.text(at, ctx.title, &style, "title");
    }
}

/// Severity bands over the plot area. Independent of the data.
pub struct BackgroundPass;

impl DrawPass for BackgroundPass {
    fn name(&self) -> &'static str {
        "background"
    }

    fn draw(&self, ctx: &PassContext<'_>, surface: &mut dyn DrawSurface) {
        let area = ctx.scale.plot_area();
        let opacity = ctx.config.band_opacity;

        match ctx.config.band_scheme {
            BandScheme::Solid => {
                for band in &SEVERITY_BANDS {
                    let top = ctx.scale.value_to_pixel_y(band.upper);
                    let bottom = ctx.scale.value_to_pixel_y(band.lower);
                    let rect = Rect {
                        x: area.left,
                        y: top,
                        width: area.width(),
                        height: bottom - top,
                    };
                    surface.fill_rect(rect, band.color, opacity, "band");
                }
            }
            BandScheme::Gradient => {
                let stops: Vec<(f64, &str)> = gradient_stops()
                    .into_iter()
                    .map(|(percentile, color)| (percentile / 100.0, color))
                    .collect();
                let rect = Rect {
                    x: area.left,
                    y: area.top,
                    width: area.width(),
                    height: area.height(),
                };
                surface.fill_rect_gradient(rect, &stops, opacity, "band");
            }
        }
    }
}

const REFERENCE_MEAN: f64 = 50.0;
const REFERENCE_SD: f64 = 15.0;

fn normal_density(x: f64) -> f64 {
    let z = (x - REFERENCE_MEAN) / REFERENCE_SD;
    (-0.5 * z * z).exp() / (REFERENCE_SD * (2.0 * PI).sqrt())
}

/// Normal curve (mean 50, sd 15) laid along the left edge of the plot against
/// the percentile axis, peaking `reference_curve_extent` pixels in.
pub struct GaussianPass;

impl DrawPass for GaussianPass {
    fn name(&self) -> &'static str {
        "reference-curve"
    }

    fn draw(&self, ctx: &PassContext<'_>, surface: &mut dyn DrawSurface) {
        let area = ctx.scale.plot_area();
        let scale = ctx.config.reference_curve_extent / normal_density(REFERENCE_MEAN);
        let points: Vec<Point> = (0..=100)
            .map(|step| {
                let value = f64::from(step);
                Point::new(
                    area.left + normal_density(value) * scale,
                    ctx.scale.value_to_pixel_y(value),
                )
            })
            .collect();
        let stroke = Stroke {
            color: &ctx.config.reference_curve_color,
            width: ctx.config.reference_curve_width,
            opacity: 1.0,
        };
        surface.polyline(&points, &stroke, "reference-curve");
    }
}

/// Frame, percentile grid every 10 points, and rotated index labels.
pub struct AxesPass;

impl DrawPass for AxesPass {
    fn name(&self) -> &'static str {
        "axes"
    }

    fn draw(&self, ctx: &PassContext<'_>, surface: &mut dyn DrawSurface) {
        let config = ctx.config;
        let area = ctx.scale.plot_area();

        let grid = Stroke {
            color: &config.grid_color,
            width: 1.0,
            opacity: config.grid_opacity,
        };
        let tick_style = TextStyle {
            family: &config.font_family,
            size: config.tick_size,
            weight: FontWeight::Regular,
            color: &config.text_color,
            anchor: Anchor::End,
            rotate: None,
            middle_baseline: true,
        };

        for step in 0..=10 {
            let value = f64::from(step) * 10.0;
            let y = ctx.scale.value_to_pixel_y(value);
            surface.line(Point::new(area.left, y), Point::new(area.right, y), &grid, "grid");
            surface.text(
                Point::new(area.left - 8.0, y),
                &format_percentile(value),
                &tick_style,
                "y-tick",
            );
        }

        let frame = Stroke {
            color: &config.text_color,
            width: 1.0,
            opacity: 1.0,
        };
        surface.line(
            Point::new(area.left, area.top),
            Point::new(area.left, area.bottom),
            &frame,
            "axis",
        );
        surface.line(
            Point::new(area.left, area.bottom),
            Point::new(area.right, area.bottom),
            &frame,
            "axis",
        );

        let label_style = TextStyle {
            rotate: Some(-90.0),
            ..tick_style
        };
        for (i, label) in ctx.series.labels.iter().enumerate() {
            let at = Point::new(ctx.scale.value_to_pixel_x(i as f64), ctx.layout.tick_label_top);
            match fit_width(label, FontWeight::Regular, config.tick_size, ctx.layout.tick_label_room) {
                Cow::Borrowed(_) => surface.text(at, label, &label_style, "x-tick"),
                Cow::Owned(short) => surface.text_titled(at, &short, label, &label_style, "x-tick"),
            }
        }
    }
}

/// The single percentile series, with one marker per index.
pub struct DataLinePass;

impl DrawPass for DataLinePass {
    fn name(&self) -> &'static str {
        "data-line"
    }

    fn draw(&self, ctx: &PassContext<'_>, surface: &mut dyn DrawSurface) {
        let config = ctx.config;
        let points: Vec<(usize, Point)> = ctx
            .series
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let at = Point::new(
                    ctx.scale.value_to_pixel_x(i as f64),
                    ctx.scale.value_to_pixel_y(*value),
                );
                (i, at)
            })
            .filter(|(_, at)| at.is_finite())
            .collect();

        let stroke = Stroke {
            color: &config.line_color,
            width: config.line_width,
            opacity: 1.0,
        };
        let path: Vec<Point> = points.iter().map(|(_, at)| *at).collect();
        surface.polyline(&path, &stroke, "data-line");

        for (i, at) in points {
            let value = ctx.series.values[i];
            let tip = format!(
                "{} : {} ({})",
                ctx.series.labels[i],
                format_percentile(value),
                classify(value).name
            );
            surface.circle(
                at,
                config.point_radius,
                &config.line_color,
                Some(tip.as_str()),
                "data-point",
            );
        }
    }
}

/// Vertical lines between cognitive-function groups.
pub struct SeparatorPass;

impl DrawPass for SeparatorPass {
    fn name(&self) -> &'static str {
        "separators"
    }

    fn draw(&self, ctx: &PassContext<'_>, surface: &mut dyn DrawSurface) {
        let area = ctx.scale.plot_area();
        let stroke = Stroke {
            color: &ctx.config.separator_color,
            width: ctx.config.separator_width,
            opacity: 1.0,
        };
        for boundary in &ctx.series.group_boundaries {
            let x = ctx.scale.value_to_pixel_x(*boundary);
            surface.line(
                Point::new(x, area.top),
                Point::new(x, ctx.layout.separator_bottom),
                &stroke,
                "separator",
            );
        }
    }
}

/// Each function name centred under its first and last index.
pub struct GroupLabelPass;

impl DrawPass for GroupLabelPass {
    fn name(&self) -> &'static str {
        "group-labels"
    }

    fn draw(&self, ctx: &PassContext<'_>, surface: &mut dyn DrawSurface) {
        let style = TextStyle {
            family: &ctx.config.font_family,
            size: ctx.config.group_label_size,
            weight: FontWeight::Bold,
            color: &ctx.config.text_color,
            anchor: Anchor::Middle,
            rotate: None,
            middle_baseline: false,
        };
        for span in &ctx.series.groups {
            let start = ctx.scale.value_to_pixel_x(span.first as f64);
            let end = ctx.scale.value_to_pixel_x(span.last as f64);
            let at = Point::new((start + end) / 2.0, ctx.layout.group_label_baseline);
            surface.text(at, &span.name, &style, "group-label");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::scale::{CategoryScale, PlotArea};
    use crate::core::profile::ResultMapping;

    /// Records calls instead of producing markup.
    #[derive(Default)]
    struct Recorder {
        lines: Vec<(Point, Point, String)>,
        texts: Vec<(Point, String, String)>,
        rects: Vec<(Rect, String)>,
        gradients: usize,
        circles: Vec<Option<String>>,
        polylines: Vec<(Vec<Point>, String)>,
        titles: Vec<String>,
    }

    impl DrawSurface for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: &str, _opacity: f64, _class: &str) {
            self.rects.push((rect, color.to_string()));
        }
        fn fill_rect_gradient(&mut self, _: Rect, _: &[(f64, &str)], _: f64, _: &str) {
            self.gradients += 1;
        }
        fn line(&mut self, from: Point, to: Point, _: &Stroke<'_>, class: &str) {
            self.lines.push((from, to, class.to_string()));
        }
        fn polyline(&mut self, points: &[Point], _: &Stroke<'_>, class: &str) {
            self.polylines.push((points.to_vec(), class.to_string()));
        }
        fn circle(&mut self, _: Point, _: f64, _: &str, tooltip: Option<&str>, _: &str) {
            self.circles.push(tooltip.map(str::to_string));
        }
        fn text(&mut self, at: Point, content: &str, _: &TextStyle<'_>, class: &str) {
            self.texts.push((at, content.to_string(), class.to_string()));
        }
        fn text_titled(&mut self, at: Point, content: &str, title: &str, style: &TextStyle<'_>, class: &str) {
            self.titles.push(title.to_string());
            self.text(at, content, style, class);
        }
    }

    fn run(pass: &dyn DrawPass, mapping: &ResultMapping, config: &ChartConfig) -> Recorder {
        let series = ChartSeries::from_mapping(mapping);
        let layout = Layout::resolve(config, &series);
        let scale = CategoryScale::new(layout.plot, series.len());
        let ctx = PassContext {
            config,
            layout: &layout,
            scale: &scale,
            series: &series,
            title: "Profil cognitif #1",
        };
        let mut recorder = Recorder::default();
        pass.draw(&ctx, &mut recorder);
        recorder
    }

    fn sample() -> ResultMapping {
        ResultMapping::new()
            .with_function("F1", [("i1", 10.0), ("i2", 20.0)])
            .with_function("F2", [("i3", 30.0)])
    }

    #[test]
    fn separators_sit_between_groups() {
        let config = ChartConfig::default();
        let recorder = run(&SeparatorPass, &sample(), &config);
        assert_eq!(recorder.lines.len(), 1);

        let series = ChartSeries::from_mapping(&sample());
        let layout = Layout::resolve(&config, &series);
        let scale = CategoryScale::new(layout.plot, 3);
        let (from, to, _) = &recorder.lines[0];
        assert_eq!(from.x, scale.value_to_pixel_x(1.5));
        assert_eq!(from.x, to.x);
        assert_eq!(from.y, layout.plot.top);
        assert!(to.y > layout.plot.bottom);
    }

    #[test]
    fn group_labels_are_centred_on_their_span() {
        let config = ChartConfig::default();
        let recorder = run(&GroupLabelPass, &sample(), &config);
        let series = ChartSeries::from_mapping(&sample());
        let layout = Layout::resolve(&config, &series);
        let scale = CategoryScale::new(layout.plot, 3);

        let names: Vec<_> = recorder.texts.iter().map(|(_, n, _)| n.as_str()).collect();
        assert_eq!(names, ["F1", "F2"]);
        let expected = (scale.value_to_pixel_x(0.0) + scale.value_to_pixel_x(1.0)) / 2.0;
        assert_eq!(recorder.texts[0].0.x, expected);
        assert_eq!(recorder.texts[1].0.x, scale.value_to_pixel_x(2.0));
    }

    #[test]
    fn single_index_draws_one_centred_label_and_no_separator() {
        let config = ChartConfig::default();
        let mapping = ResultMapping::new().with_function("Attention", [("CPT-3 HRT", 40.0)]);
        assert!(run(&SeparatorPass, &mapping, &config).lines.is_empty());

        let labels = run(&GroupLabelPass, &mapping, &config);
        assert_eq!(labels.texts.len(), 1);
        let series = ChartSeries::from_mapping(&mapping);
        let layout = Layout::resolve(&config, &series);
        assert!((labels.texts[0].0.x - layout.plot.center_x()).abs() < 1e-9);
    }

    #[test]
    fn solid_background_covers_the_plot_height() {
        let config = ChartConfig::default();
        let recorder = run(&BackgroundPass, &ResultMapping::new(), &config);
        assert_eq!(recorder.rects.len(), SEVERITY_BANDS.len());

        let series = ChartSeries::from_mapping(&ResultMapping::new());
        let plot: PlotArea = Layout::resolve(&config, &series).plot;
        let covered: f64 = recorder.rects.iter().map(|(rect, _)| rect.height).sum();
        assert!((covered - plot.height()).abs() < 1e-9);
        assert_eq!(recorder.rects[0].1, SEVERITY_BANDS[0].color);
    }

    #[test]
    fn gradient_background_is_a_single_fill() {
        let config = ChartConfig {
            band_scheme: BandScheme::Gradient,
            ..ChartConfig::default()
        };
        let recorder = run(&BackgroundPass, &sample(), &config);
        assert_eq!(recorder.gradients, 1);
        assert!(recorder.rects.is_empty());
    }

    #[test]
    fn data_points_carry_band_tooltips() {
        let recorder = run(&DataLinePass, &sample(), &ChartConfig::default());
        assert_eq!(recorder.circles.len(), 3);
        assert_eq!(recorder.circles[0].as_deref(), Some("i1 : 10 (Moyen faible)"));
    }

    #[test]
    fn non_finite_values_are_skipped_not_fatal() {
        let mapping = ResultMapping::new().with_function("F", [("a", f64::NAN), ("b", 150.0)]);
        let recorder = run(&DataLinePass, &mapping, &ChartConfig::default());
        assert_eq!(recorder.circles.len(), 1);
    }

    #[test]
    fn axes_label_every_index() {
        let recorder = run(&AxesPass, &sample(), &ChartConfig::default());
        let ticks: Vec<_> = recorder
            .texts
            .iter()
            .filter(|(_, _, class)| class == "x-tick")
            .map(|(_, text, _)| text.as_str())
            .collect();
        assert_eq!(ticks, ["i1", "i2", "i3"]);
        let grid = recorder.lines.iter().filter(|(_, _, c)| c == "grid").count();
        assert_eq!(grid, 11);
    }

    #[test]
    fn long_tick_labels_are_shortened_and_titled() {
        let long = "Wisconsin Nombre d’essais pour compléter la première catégorie";
        let mapping = ResultMapping::new().with_function("Fonctions exécutives", [(long, 40.0), ("QI", 50.0)]);
        let config = ChartConfig::default();
        let recorder = run(&AxesPass, &mapping, &config);

        let ticks: Vec<_> = recorder
            .texts
            .iter()
            .filter(|(_, _, class)| class == "x-tick")
            .map(|(_, text, _)| text.as_str())
            .collect();
        assert_eq!(ticks.len(), 2);
        assert!(ticks[0].ends_with('…'));
        assert!(crate::chart::text::estimate_width(ticks[0], FontWeight::Regular, config.tick_size) <= config.max_label_band + 1e-9);
        assert_eq!(ticks[1], "QI");
        assert_eq!(recorder.titles, [long]);
    }

    #[test]
    fn reference_curve_spans_the_percentile_axis() {
        let config = ChartConfig::default();
        let recorder = run(&GaussianPass, &sample(), &config);
        assert_eq!(recorder.polylines.len(), 1);

        let (points, class) = &recorder.polylines[0];
        assert_eq!(class, "reference-curve");
        assert_eq!(points.len(), 101);

        let series = ChartSeries::from_mapping(&sample());
        let layout = Layout::resolve(&config, &series);
        let scale = CategoryScale::new(layout.plot, series.len());
        assert!((points[0].y - layout.plot.bottom).abs() < 1e-9);
        assert!((points[100].y - layout.plot.top).abs() < 1e-9);
        assert!((points[50].x - (layout.plot.left + config.reference_curve_extent)).abs() < 1e-9);
        assert!(points.iter().all(|p| p.x >= scale.plot_area().left && p.x <= points[50].x));
        // Symmetric around the mean.
        assert!((points[20].x - points[80].x).abs() < 1e-9);
    }
}
