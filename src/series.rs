use crate::{
    measurement::{MeasurementLoader, PEM_CHANNELS},
    naming::{power_rating, power_regex, Orientation},
    stats::SteadyState,
    Result,
};
use glob::{glob, Pattern};
use std::{
    ops::Deref,
    path::{Path, PathBuf},
};

/// Glob pattern of the module temperature files in a data directory
pub const PEM_FILES: &str = "*PEM.xlsx";

/// Average module temperature time series at a given power level
#[derive(Debug, Clone)]
pub struct PowerSeries {
    /// power rating [W]
    pub power: f64,
    pub path: PathBuf,
    pub time: Vec<f64>,
    /// average temperature across the module thermocouples [˚C]
    pub temperature: Vec<f64>,
}
impl PowerSeries {
    pub fn new<P: AsRef<Path>>(
        power: f64,
        path: P,
        time: Vec<f64>,
        temperature: Vec<f64>,
    ) -> Self {
        Self {
            power,
            path: path.as_ref().to_path_buf(),
            time,
            temperature,
        }
    }
    /// Legend label, e.g. `19.8 W` or `20.0 W`
    pub fn label(&self) -> String {
        format!("{:?} W", self.power)
    }
    pub fn steady_state(&self) -> SteadyState {
        SteadyState::new(&self.time, &self.temperature)
    }
    /// Time span (first, last)
    pub fn time_range(&self) -> Option<(f64, f64)> {
        Some((*self.time.first()?, *self.time.last()?))
    }
}

/// Returns the power rated module temperature files of a directory, sorted by power
///
/// Files which name does not start with a power rating are skipped.
pub fn find_runs<P: AsRef<Path>>(data_dir: P) -> Result<Vec<(f64, PathBuf)>> {
    let dir = Pattern::escape(&data_dir.as_ref().to_string_lossy());
    let pattern = Path::new(&dir).join(PEM_FILES);
    let re = power_regex()?;
    let mut runs = vec![];
    for entry in glob(&pattern.to_string_lossy())? {
        let path = entry?;
        match power_rating(&re, &path) {
            Some(power) => runs.push((power, path)),
            None => log::debug!("skipping {:?}: no power rating in the file name", path),
        }
    }
    runs.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(runs)
}

/// Power series of one orientation, sorted by ascending power
#[derive(Debug, Clone)]
pub struct SeriesCollection {
    pub orientation: Orientation,
    series: Vec<PowerSeries>,
}
impl Deref for SeriesCollection {
    type Target = Vec<PowerSeries>;

    fn deref(&self) -> &Self::Target {
        &self.series
    }
}
impl SeriesCollection {
    pub fn new(orientation: Orientation, mut series: Vec<PowerSeries>) -> Self {
        series.sort_by(|a, b| a.power.total_cmp(&b.power));
        Self {
            orientation,
            series,
        }
    }
    /// Loads the average module temperature of every power rated file in `data_dir`
    ///
    /// An empty collection is returned if no file is found.
    pub fn discover<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let orientation =
            Orientation::from_path(data_dir.as_ref().to_string_lossy().to_lowercase());
        let runs = find_runs(&data_dir)?;
        if runs.is_empty() {
            log::warn!("No Excel files found in the directory: {:?}", data_dir.as_ref());
            return Ok(Self::new(orientation, vec![]));
        }
        let series = runs
            .into_iter()
            .map(|(power, path)| {
                let measurement = MeasurementLoader::new(&path).channels(PEM_CHANNELS).load()?;
                let temperature = measurement.row_mean();
                Ok(PowerSeries::new(power, path, measurement.time, temperature))
            })
            .collect::<Result<Vec<PowerSeries>>>()?;
        Ok(Self::new(orientation, series))
    }
    /// Prints the steady state temperature table
    pub fn summary(&self) {
        println!("SUMMARY ({}):", self.orientation.to_pretty_string());
        println!(
            " {:>10} {:>8} {:>20} {:>12} {:>12}",
            "POWER [W]", "SAMPLES", "TIME RANGE [s]", "STEADY [˚C]", "MAX [˚C]"
        );
        let fmt = |x: Option<f64>| x.map_or_else(|| "-".to_string(), |x| format!("{:.2}", x));
        for s in self.iter() {
            let ss = s.steady_state();
            let time_range = s
                .time_range()
                .map_or_else(|| "-".to_string(), |(a, b)| format!("[{:.1}-{:.1}]", a, b));
            println!(
                " {:>10} {:>8} {:>20} {:>12} {:>12}",
                s.power,
                s.time.len(),
                time_range,
                fmt(ss.mean),
                fmt(ss.max)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::fixtures::write_workbook;
    use std::fs::File;

    #[test]
    fn runs_sorted_by_power() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "150W_Vert_PEM.xlsx",
            "20W_Vert_PEM.xlsx",
            "200W_Vert_PEM.xlsx",
            "100W_Vert_PEM.xlsx",
            "notes_PEM.xlsx",
            "100W_Vert_IO.xlsx",
        ] {
            File::create(dir.path().join(name)).unwrap();
        }
        let runs = find_runs(dir.path()).unwrap();
        let powers: Vec<f64> = runs.iter().map(|(p, _)| *p).collect();
        assert_eq!(powers, vec![20., 100., 150., 200.]);
        assert!(runs[0].1.ends_with("20W_Vert_PEM.xlsx"));
    }
    #[test]
    fn empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let collection = SeriesCollection::discover(dir.path()).unwrap();
        assert!(collection.is_empty());
    }
    #[test]
    fn collection_order() {
        let series = [200., 20., 150., 100.]
            .into_iter()
            .map(|p| PowerSeries::new(p, format!("{p}W_PEM.xlsx"), vec![0.], vec![21.]))
            .collect();
        let collection = SeriesCollection::new(Orientation::Vertical, series);
        let labels: Vec<String> = collection.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["20.0 W", "100.0 W", "150.0 W", "200.0 W"]);
        let series = PowerSeries::new(148.66, "148.66W_PEM.xlsx", vec![], vec![]);
        assert_eq!(series.label(), "148.66 W");
    }
    #[test]
    fn discover_loads_sorted_series() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("vertical");
        std::fs::create_dir(&data).unwrap();
        for power in [150., 20., 200., 100.] {
            let temperature = 20. + power / 10.;
            let rows: Vec<(f64, Vec<Option<f64>>)> = [0., 100., 250., 300.]
                .into_iter()
                .map(|t| (t, vec![Some(temperature - 1.), Some(temperature + 1.)]))
                .collect();
            write_workbook(data.join(format!("{power}W_Vert_PEM.xlsx")), PEM_CHANNELS, &rows);
        }
        File::create(data.join("notes_PEM.xlsx")).unwrap();
        let collection = SeriesCollection::discover(&data).unwrap();
        assert_eq!(collection.orientation, Orientation::Vertical);
        let powers: Vec<f64> = collection.iter().map(|s| s.power).collect();
        assert_eq!(powers, vec![20., 100., 150., 200.]);
        for s in collection.iter() {
            let temperature = 20. + s.power / 10.;
            assert_eq!(s.time, vec![0., 100., 250., 300.]);
            assert_eq!(s.temperature, vec![temperature; 4]);
            assert_eq!(s.steady_state().mean, Some(temperature));
        }
    }
}
