//! Measurement charts
//!
//!  - per file: module thermocouples or flow ports temperature time series
//!  - per orientation: average module temperature for each power level
//!  - comparison: average module temperature of both orientations

use crate::{
    figure::{Curve, Figure, LineStyle},
    measurement::{ChannelSet, Measurement, MeasurementLoader, FLOWPORT_CHANNELS, PEM_CHANNELS},
    naming::{wattage, Orientation},
    series::SeriesCollection,
    Result,
};
use itertools::{Itertools, MinMaxResult};
use std::{
    fs,
    path::{Path, PathBuf},
};
use strum::IntoEnumIterator;

/// Per file chart kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pem,
    Flowports,
}
impl ChartKind {
    pub fn channels(&self) -> ChannelSet {
        match self {
            ChartKind::Pem => PEM_CHANNELS,
            ChartKind::Flowports => FLOWPORT_CHANNELS,
        }
    }
    /// Temperature axis range [˚C]
    pub fn y_range(&self) -> (f64, f64) {
        match self {
            ChartKind::Pem => (20., 40.),
            ChartKind::Flowports => (20., 25.),
        }
    }
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Pem => "Temperature of Power Electronics Module at Different Locations",
            ChartKind::Flowports => "Temperature of Flow Inlet and Outlet",
        }
    }
    /// Suffix of the figure file name
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Pem => "PEM",
            ChartKind::Flowports => "Flowports",
        }
    }
    pub fn size(&self) -> (u32, u32) {
        match self {
            ChartKind::Pem => (900, 600),
            ChartKind::Flowports => (640, 480),
        }
    }
}

/// `<figures>/<orientation>/<wattage> Watts <kind>.png`
pub fn file_figure_path<P: AsRef<Path>>(
    figures: P,
    orientation: Orientation,
    wattage: &str,
    kind: ChartKind,
) -> PathBuf {
    figures
        .as_ref()
        .join(orientation.to_string())
        .join(format!("{} Watts {}.png", wattage, kind.name()))
}
/// `<figures>/<orientation>/Average_Temperature_by_Power_<Orientation>.png`
pub fn summary_figure_path<P: AsRef<Path>>(figures: P, orientation: Orientation) -> PathBuf {
    figures.as_ref().join(orientation.to_string()).join(format!(
        "Average_Temperature_by_Power_{}.png",
        orientation.to_pretty_string()
    ))
}
/// `<figures>/comparison/Average_Temperature_by_Power_Comparison.png`
pub fn comparison_figure_path<P: AsRef<Path>>(figures: P) -> PathBuf {
    figures
        .as_ref()
        .join("comparison")
        .join("Average_Temperature_by_Power_Comparison.png")
}

fn write(figure: &Figure, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    figure.render(path)
}

/// Chart of every channel of a measurement file
pub fn file_figure(kind: ChartKind, path: &Path, measurement: &Measurement) -> Figure {
    let orientation = Orientation::from_path(path);
    let curves = measurement
        .channels
        .iter()
        .zip(colorous::TABLEAU10.iter().cycle())
        .map(|((label, values), color)| {
            Curve::new(
                label.as_str(),
                measurement.time.iter().cloned().zip(values.iter().cloned()).collect(),
                *color,
            )
        })
        .collect();
    Figure {
        title: vec![
            kind.title().to_string(),
            format!(
                "P = {} Watts, Orientation: {}",
                wattage(path),
                orientation.to_pretty_string()
            ),
        ],
        x_range: (0., measurement.last_time().unwrap_or(0.)),
        y_range: kind.y_range(),
        curves,
        size: kind.size(),
        ..Default::default()
    }
}
/// Loads a measurement file and writes its chart into the orientation folder
pub fn plot_file<P: AsRef<Path>, Q: AsRef<Path>>(
    kind: ChartKind,
    path: P,
    figures: Q,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let measurement = MeasurementLoader::new(path)
        .channels(kind.channels())
        .load()?;
    let figure = file_figure(kind, path, &measurement);
    let output = file_figure_path(figures, Orientation::from_path(path), &wattage(path), kind);
    write(&figure, &output)?;
    Ok(output)
}
/// Module thermocouples chart
pub fn plot_pem<P: AsRef<Path>, Q: AsRef<Path>>(path: P, figures: Q) -> Result<PathBuf> {
    plot_file(ChartKind::Pem, path, figures)
}
/// Flow inlet and outlet chart
pub fn plot_flowports<P: AsRef<Path>, Q: AsRef<Path>>(path: P, figures: Q) -> Result<PathBuf> {
    plot_file(ChartKind::Flowports, path, figures)
}

/// Temperature range of all the curves, padded by 5%
fn padded_range(curves: &[Curve]) -> (f64, f64) {
    let values = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|(_, y)| *y))
        .filter(|y| y.is_finite());
    match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => (0., 1.),
        MinMaxResult::OneElement(y) => (y - 1., y + 1.),
        MinMaxResult::MinMax(lo, hi) => {
            let pad = if hi > lo { (hi - lo) * 5e-2 } else { 1. };
            (lo - pad, hi + pad)
        }
    }
}
fn time_span(collections: &[&SeriesCollection]) -> (f64, f64) {
    collections
        .iter()
        .flat_map(|c| c.iter())
        .filter_map(|s| s.time_range())
        .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
        .unwrap_or((0., 1.))
}

/// Average temperature chart of one orientation, `None` if there is no data
///
/// With `extended`, each power level also gets its steady state average
/// (dashed) and its maximum (dotted) as horizontal lines.
pub fn summary_figure(collection: &SeriesCollection, extended: bool) -> Option<Figure> {
    if collection.is_empty() {
        return None;
    }
    let mut curves = vec![];
    for (series, &color) in collection.iter().zip(colorous::TABLEAU10.iter().cycle()) {
        let label = series.label();
        curves.push(Curve::new(
            label.as_str(),
            series.time.iter().cloned().zip(series.temperature.iter().cloned()).collect(),
            color,
        ));
        if !extended {
            continue;
        }
        let Some(span) = series.time_range() else {
            continue;
        };
        let ss = series.steady_state();
        if let Some(mean) = ss.mean {
            curves.push(
                Curve::hline(
                    format!("{} steady avg: {:.2} ˚C", label, mean),
                    mean,
                    span,
                    color,
                )
                .style(LineStyle::Dashed),
            );
        }
        if let Some(max) = ss.max {
            curves.push(
                Curve::hline(format!("{} max: {:.2} ˚C", label, max), max, span, color)
                    .style(LineStyle::Dotted),
            );
        }
    }
    Some(Figure {
        title: vec![
            "Average Temperature of PEM Over Time".to_string(),
            format!("Orientation: {}", collection.orientation.to_pretty_string()),
        ],
        y_label: String::from("Average Temperature [˚C]"),
        x_range: time_span(&[collection]),
        y_range: padded_range(&curves),
        legend_title: Some(String::from("Power Level")),
        curves,
        size: (1000, 600),
        ..Default::default()
    })
}
/// Writes the average temperature chart of the files in `data_dir`
///
/// Returns `None`, writing nothing, if the directory holds no power rated file.
pub fn plot_avg_temp_by_power<P: AsRef<Path>, Q: AsRef<Path>>(
    data_dir: P,
    figures: Q,
    extended: bool,
) -> Result<Option<PathBuf>> {
    let collection = SeriesCollection::discover(data_dir)?;
    let Some(figure) = summary_figure(&collection, extended) else {
        return Ok(None);
    };
    collection.summary();
    let output = summary_figure_path(figures, collection.orientation);
    write(&figure, &output)?;
    Ok(Some(output))
}

/// Average temperature chart of several orientations, `None` if there is no data
///
/// Horizontal curves are solid and vertical ones dashed.
pub fn comparison_figure(collections: &[&SeriesCollection]) -> Option<Figure> {
    if collections.iter().all(|c| c.is_empty()) {
        return None;
    }
    let curves: Vec<Curve> = collections
        .iter()
        .flat_map(|c| c.iter().map(move |s| (c.orientation, s)))
        .zip(colorous::TABLEAU10.iter().cycle())
        .map(|((orientation, series), &color)| {
            Curve::new(
                format!("{} ({})", series.label(), orientation.to_pretty_string()),
                series.time.iter().cloned().zip(series.temperature.iter().cloned()).collect(),
                color,
            )
            .style(match orientation {
                Orientation::Horizontal => LineStyle::Solid,
                Orientation::Vertical => LineStyle::Dashed,
            })
        })
        .collect();
    Some(Figure {
        title: vec![
            "Average Temperature of PEM Over Time".to_string(),
            "Orientation Comparison".to_string(),
        ],
        y_label: String::from("Average Temperature [˚C]"),
        x_range: time_span(collections),
        y_range: padded_range(&curves),
        legend_title: Some(String::from("Power Level")),
        curves,
        size: (1000, 600),
        ..Default::default()
    })
}
/// Writes the chart overlaying the average temperature of every orientation folder of `data`
pub fn plot_comparison<P: AsRef<Path>, Q: AsRef<Path>>(
    data: P,
    figures: Q,
) -> Result<Option<PathBuf>> {
    let collections = Orientation::iter()
        .map(|orientation| SeriesCollection::discover(orientation.data_dir(&data)))
        .collect::<Result<Vec<SeriesCollection>>>()?;
    let Some(figure) = comparison_figure(&collections.iter().collect::<Vec<_>>()) else {
        return Ok(None);
    };
    let output = comparison_figure_path(figures);
    write(&figure, &output)?;
    Ok(Some(output))
}
