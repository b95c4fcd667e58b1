use crate::core::{Color, LinearScale, MarginalHistogram, Point, Viewport};
use crate::interaction::{HoverOverlay, LegendHighlight, UiEffect};
use crate::render::{
    ChartLayer, CirclePrimitive, LayeredRenderFrame, LinePrimitive, PathPrimitive,
    RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::ChartModel;
use super::format::{format_date, format_tick};

const AXIS_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);
const GUIDE_COLOR: Color = Color::rgba(0.36, 0.36, 0.36, 0.8);
const HISTOGRAM_FILL: Color = Color::rgba(0.8, 0.8, 0.8, 1.0);
const HIGHLIGHT_FILL: Color = Color::rgba(1.0, 1.0, 1.0, 0.45);
const TEXT_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);

const AXIS_STROKE_PX: f64 = 1.0;
const GUIDE_STROKE_PX: f64 = 1.0;
const TICK_LENGTH_PX: f64 = 6.0;
const TICK_LABEL_FONT_PX: f64 = 11.0;
const AXIS_LABEL_FONT_PX: f64 = 14.0;
const LEGEND_FONT_PX: f64 = 10.0;
const TOOLTIP_FONT_PX: f64 = 12.0;
const TOOLTIP_LINE_HEIGHT_PX: f64 = 16.0;

// Legend sits inside the plot's lower-right corner.
const LEGEND_INSET_RIGHT_PX: f64 = 9.0;
const LEGEND_INSET_BOTTOM_PX: f64 = 37.0;

impl ChartModel {
    /// Outer chart size, margins included.
    #[must_use]
    pub fn outer_viewport(&self) -> Viewport {
        let dims = self.config().dimensions;
        Viewport::new(dims.width, dims.height)
    }

    /// Top-left corner of the plot area in outer coordinates.
    #[must_use]
    pub fn plot_origin(&self) -> Point {
        let margin = self.config().dimensions.margin;
        Point::new(margin.left, margin.top)
    }

    /// Top-left corner of the legend strip in outer coordinates.
    ///
    /// Legend pointer events are expected relative to this point.
    #[must_use]
    pub fn legend_origin(&self) -> Point {
        let origin = self.plot_origin();
        let bounds = self.bounds();
        Point::new(
            origin.x + bounds.width - self.config().legend.width - LEGEND_INSET_RIGHT_PX,
            origin.y + bounds.height - LEGEND_INSET_BOTTOM_PX,
        )
    }

    /// Static scene split by layer: histograms, dots, axes and legend.
    /// The overlay layer starts empty.
    #[must_use]
    pub fn build_layered_frame(&self) -> LayeredRenderFrame {
        let mut layered = LayeredRenderFrame::new(self.outer_viewport());

        let histograms = layered.layer_mut(ChartLayer::Histograms);
        for histogram in [self.top_histogram(), self.right_histogram()]
            .into_iter()
            .flatten()
        {
            histograms.paths.push(self.histogram_path(histogram));
        }

        self.append_points(layered.layer_mut(ChartLayer::Points));
        self.append_axes(layered.layer_mut(ChartLayer::Axes));
        self.append_legend(layered.layer_mut(ChartLayer::Legend));

        layered
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        self.build_layered_frame().flatten()
    }

    /// Transient primitives for one effect. Hide/clear effects yield an
    /// empty frame, meaning "draw nothing on the overlay layer".
    #[must_use]
    pub fn overlay_for_effect(&self, effect: &UiEffect) -> RenderFrame {
        let mut frame = RenderFrame::new(self.outer_viewport());
        match effect {
            UiEffect::ShowTooltip(overlay) => self.append_hover_overlay(&mut frame, overlay),
            UiEffect::SetLegendHighlight(highlight) => {
                self.append_legend_highlight(&mut frame, highlight);
            }
            UiEffect::HideTooltip | UiEffect::ClearLegendHighlight => {}
        }
        frame
    }

    fn to_outer(&self, plot: Point) -> Point {
        let origin = self.plot_origin();
        Point::new(plot.x + origin.x, plot.y + origin.y)
    }

    fn histogram_path(&self, histogram: &MarginalHistogram) -> PathPrimitive {
        let offset = self.to_outer(histogram.placement.offset);
        PathPrimitive::new(histogram.silhouette(), HISTOGRAM_FILL)
            .placed(offset, histogram.placement.rotation_degrees)
    }

    fn append_points(&self, frame: &mut RenderFrame) {
        let color = self.scales().color;
        let radius = self.config().point_radius;
        for (index, point) in self.points().iter().enumerate() {
            let Some(site) = self.projected(index).filter(|site| site.is_finite()) else {
                continue;
            };
            let center = self.to_outer(site);
            frame.circles.push(
                CirclePrimitive::new(center.x, center.y, radius, color.color(point.date))
                    .for_point(index),
            );
        }
    }

    fn append_axes(&self, frame: &mut RenderFrame) {
        let origin = self.plot_origin();
        let bounds = self.bounds();
        let config = self.config();
        let bottom = origin.y + bounds.height;

        frame.lines.push(LinePrimitive::new(
            origin.x,
            bottom,
            origin.x + bounds.width,
            bottom,
            AXIS_STROKE_PX,
            AXIS_COLOR,
        ));
        frame.lines.push(LinePrimitive::new(
            origin.x,
            origin.y,
            origin.x,
            bottom,
            AXIS_STROKE_PX,
            AXIS_COLOR,
        ));

        for (value, x) in axis_ticks(self.x_scale(), config.axis_tick_count) {
            let x = origin.x + x;
            frame.lines.push(LinePrimitive::new(
                x,
                bottom,
                x,
                bottom + TICK_LENGTH_PX,
                AXIS_STROKE_PX,
                AXIS_COLOR,
            ));
            frame.texts.push(TextPrimitive::new(
                format_tick(value),
                x,
                bottom + TICK_LENGTH_PX + TICK_LABEL_FONT_PX,
                TICK_LABEL_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            ));
        }

        for (value, y) in axis_ticks(self.y_scale(), config.axis_tick_count) {
            let y = origin.y + y;
            frame.lines.push(LinePrimitive::new(
                origin.x - TICK_LENGTH_PX,
                y,
                origin.x,
                y,
                AXIS_STROKE_PX,
                AXIS_COLOR,
            ));
            frame.texts.push(TextPrimitive::new(
                format_tick(value),
                origin.x - TICK_LENGTH_PX - 2.0,
                y,
                TICK_LABEL_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Right,
            ));
        }

        frame.texts.push(TextPrimitive::new(
            config.x_accessor.label(),
            origin.x + bounds.width / 2.0,
            bottom + config.dimensions.margin.bottom - 10.0,
            AXIS_LABEL_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Center,
        ));
        frame.texts.push(TextPrimitive::new(
            config.y_accessor.label(),
            (origin.x - 40.0).max(AXIS_LABEL_FONT_PX),
            origin.y + bounds.height / 2.0,
            AXIS_LABEL_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Center,
        ));
    }

    fn append_legend(&self, frame: &mut RenderFrame) {
        let config = self.config();
        let origin = self.legend_origin();
        let legend = config.legend;

        let stops = self.scales().color.gradient_stops(config.legend_gradient_stops);
        if let [(_, only)] = stops.as_slice() {
            frame.rects.push(RectPrimitive::new(
                origin.x,
                origin.y,
                legend.width,
                legend.height,
                *only,
            ));
        }
        for pair in stops.windows(2) {
            let (start, color) = pair[0];
            let (end, _) = pair[1];
            frame.rects.push(RectPrimitive::new(
                origin.x + start * legend.width,
                origin.y,
                (end - start) * legend.width,
                legend.height,
                color,
            ));
        }

        let (first, last) = self.legend_scale().domain();
        let label_y = origin.y + legend.height + LEGEND_FONT_PX + 2.0;
        frame.texts.push(TextPrimitive::new(
            format_date(first, &config.legend_date_format),
            origin.x,
            label_y,
            LEGEND_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Left,
        ));
        frame.texts.push(TextPrimitive::new(
            format_date(last, &config.legend_date_format),
            origin.x + legend.width,
            label_y,
            LEGEND_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Right,
        ));
    }

    fn append_hover_overlay(&self, frame: &mut RenderFrame, overlay: &HoverOverlay) {
        for guide in [overlay.horizontal_guide, overlay.vertical_guide] {
            let from = self.to_outer(guide.from);
            let to = self.to_outer(guide.to);
            frame.lines.push(LinePrimitive::new(
                from.x,
                from.y,
                to.x,
                to.y,
                GUIDE_STROKE_PX,
                GUIDE_COLOR,
            ));
        }

        let center = self.to_outer(overlay.anchor);
        frame.circles.push(
            CirclePrimitive::new(
                center.x,
                center.y,
                overlay.marker_radius,
                overlay.marker_color,
            )
            .for_point(overlay.index),
        );

        let tooltip = &overlay.tooltip;
        let lines = [
            tooltip.date.clone(),
            format!("{}: {}", tooltip.x_label, tooltip.x_value),
            format!("{}: {}", tooltip.y_label, tooltip.y_value),
        ];
        let top = overlay.tooltip_anchor.y - TOOLTIP_LINE_HEIGHT_PX * (lines.len() as f64 + 0.5);
        for (row, text) in lines.into_iter().enumerate() {
            frame.texts.push(TextPrimitive::new(
                text,
                overlay.tooltip_anchor.x,
                top + TOOLTIP_LINE_HEIGHT_PX * (row as f64 + 1.0),
                TOOLTIP_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            ));
        }
    }

    fn append_legend_highlight(&self, frame: &mut RenderFrame, highlight: &LegendHighlight) {
        let state = &highlight.state;
        let origin = self.legend_origin();
        let legend = self.config().legend;
        let bar_x = origin.x + state.clamped_bar_x;

        frame.rects.push(RectPrimitive::new(
            bar_x,
            origin.y,
            state.bar_width,
            legend.height,
            HIGHLIGHT_FILL,
        ));

        let label_y = origin.y - 4.0;
        frame.texts.push(TextPrimitive::new(
            state.min_label.clone(),
            bar_x,
            label_y,
            LEGEND_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Right,
        ));
        frame.texts.push(TextPrimitive::new(
            state.max_label.clone(),
            bar_x + state.bar_width,
            label_y,
            LEGEND_FONT_PX,
            TEXT_COLOR,
            TextHAlign::Left,
        ));

        let color = self.scales().color;
        let radius = self.config().point_radius;
        for &index in &highlight.highlighted_points {
            let (Some(point), Some(site)) = (self.points().get(index), self.projected(index))
            else {
                continue;
            };
            if !site.is_finite() {
                continue;
            }
            let center = self.to_outer(site);
            frame.circles.push(
                CirclePrimitive::new(center.x, center.y, radius, color.color(point.date))
                    .for_point(index),
            );
        }
    }
}

/// Tick values paired with their pixel offset along the scale's range.
fn axis_ticks(scale: LinearScale, count: usize) -> Vec<(f64, f64)> {
    if scale.is_degenerate() {
        return Vec::new();
    }
    scale
        .ticks(count)
        .into_iter()
        .map(|value| (value, scale.map(value)))
        .filter(|(_, pixel)| pixel.is_finite())
        .collect()
}
