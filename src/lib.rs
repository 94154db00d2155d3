//! # PEM thermal test rig
//!
//! Spreadsheet measurements of the Power Electronics Module (PEM) thermal test rig:
//! loading of the thermocouples and flow ports temperature time series,
//! steady state statistics and PNG charts.
//!
//! The measurement files follow the `<power>W[_Vert]_<PEM|IO>.xlsx` naming convention
//! and are stored in `horizontal` or `vertical` folders, the rig mounting direction.

pub mod error;
pub mod figure;
pub mod measurement;
pub mod naming;
pub mod report;
pub mod series;
pub mod stats;

pub use error::{Error, Result};
pub use measurement::{Measurement, MeasurementLoader, FLOWPORT_CHANNELS, PEM_CHANNELS};
pub use naming::{power_rating, power_regex, wattage, Orientation};
pub use series::{PowerSeries, SeriesCollection};
pub use stats::SteadyState;

/// Test runs: module thermocouples and flow ports files, relative to the data root
pub const RUNS: [(&str, &str); 8] = [
    ("horizontal/19.8W_PEM.xlsx", "horizontal/19.8W_IO.xlsx"),
    ("horizontal/97.5W_PEM.xlsx", "horizontal/97.5W_IO.xlsx"),
    ("horizontal/148.66W_PEM.xlsx", "horizontal/148.66W_IO.xlsx"),
    ("horizontal/198.2W_PEM.xlsx", "horizontal/198.2W_IO.xlsx"),
    ("vertical/20W_Vert_PEM.xlsx", "vertical/20W_Vert_IO.xlsx"),
    ("vertical/100W_Vert_PEM.xlsx", "vertical/100W_Vert_IO.xlsx"),
    ("vertical/150W_Vert_PEM.xlsx", "vertical/150W_Vert_IO.xlsx"),
    ("vertical/200W_Vert_PEM.xlsx", "vertical/200W_Vert_IO.xlsx"),
];
