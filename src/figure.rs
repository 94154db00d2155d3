//! Chart description and PNG rendering
//!
//! A [Figure] holds everything needed to draw a chart (title, axes ranges and labels, curves)
//! so the chart content can be checked without writing any image.

use crate::{error::plot_error, Result};
use colorous::Color as Rgb;
use plotters::prelude::*;
use std::{path::Path, time::Instant};

/// Curve line style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// A labelled curve
#[derive(Debug, Clone)]
pub struct Curve {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub style: LineStyle,
}
impl Curve {
    pub fn new<S: Into<String>>(label: S, points: Vec<(f64, f64)>, color: Rgb) -> Self {
        Self {
            label: Some(label.into()),
            points,
            color,
            style: LineStyle::Solid,
        }
    }
    pub fn style(self, style: LineStyle) -> Self {
        Self { style, ..self }
    }
    /// Horizontal line at `y` from `x.0` to `x.1`
    pub fn hline<S: Into<String>>(label: S, y: f64, x: (f64, f64), color: Rgb) -> Self {
        Self::new(label, vec![(x.0, y), (x.1, y)], color)
    }
}

/// Chart description
#[derive(Debug, Clone)]
pub struct Figure {
    /// title lines
    pub title: Vec<String>,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub legend_title: Option<String>,
    pub curves: Vec<Curve>,
    /// image size in pixels
    pub size: (u32, u32),
}
impl Default for Figure {
    fn default() -> Self {
        Self {
            title: vec![],
            x_label: String::from("Time [s]"),
            y_label: String::from("Temperature [˚C]"),
            x_range: (0., 1.),
            y_range: (0., 1.),
            legend_title: None,
            curves: vec![],
            size: (768, 512),
        }
    }
}
/// Widens an empty axis range so it can be drawn
fn drawable(range: (f64, f64)) -> (f64, f64) {
    if range.1 > range.0 {
        range
    } else {
        (range.0, range.0 + 1.)
    }
}
impl Figure {
    /// Draws the figure into a PNG file
    pub fn render<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        log::info!("making figure: {:?}", path.as_ref());
        let now = Instant::now();
        let root = BitMapBackend::new(path.as_ref(), self.size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;
        let mut plot = root.clone();
        for line in &self.title {
            plot = plot.titled(line, ("sans-serif", 20)).map_err(plot_error)?;
        }

        let (x0, x1) = drawable(self.x_range);
        let (y0, y1) = drawable(self.y_range);
        let mut chart = ChartBuilder::on(&plot)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .margin(10)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(plot_error)?;
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(plot_error)?;

        if let Some(title) = &self.legend_title {
            chart
                .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
                .map_err(plot_error)?
                .label(title.as_str())
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x, y)], TRANSPARENT));
        }
        for curve in &self.curves {
            let rgb = RGBColor(curve.color.r, curve.color.g, curve.color.b);
            let style = rgb.stroke_width(2);
            let points = curve.points.clone();
            let annotation = match curve.style {
                LineStyle::Solid => chart.draw_series(LineSeries::new(points, style)),
                LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(points, 10, 6, style)),
                LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(points, 2, 4, style)),
            }
            .map_err(plot_error)?;
            if let Some(label) = &curve.label {
                annotation
                    .label(label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }
        }
        if self.legend_title.is_some() || self.curves.iter().any(|c| c.label.is_some()) {
            chart
                .configure_series_labels()
                .border_style(BLACK)
                .background_style(WHITE.mix(0.8))
                .position(SeriesLabelPosition::UpperRight)
                .draw()
                .map_err(plot_error)?;
        }
        root.present().map_err(plot_error)?;
        log::info!("... drawn in {:}ms", now.elapsed().as_millis());
        Ok(())
    }
}
