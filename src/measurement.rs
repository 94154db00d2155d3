use crate::{stats, Error, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::{
    path::{Path, PathBuf},
    time::Instant,
};

/// A spreadsheet column and the instrument channel it holds
#[derive(Debug, Clone, Copy)]
pub struct Channel {
    pub column: &'static str,
    pub label: &'static str,
}
/// The time column and the channel columns to read from a measurement file
#[derive(Debug, Clone, Copy)]
pub struct ChannelSet {
    pub time: &'static str,
    pub channels: &'static [Channel],
}
impl ChannelSet {
    pub fn labels(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.label).collect()
    }
}
/// Power electronics module thermocouples
pub const PEM_CHANNELS: ChannelSet = ChannelSet {
    time: "A",
    channels: &[
        Channel { column: "B", label: "TC0" },
        Channel { column: "D", label: "TC1" },
        Channel { column: "F", label: "TC2" },
        Channel { column: "H", label: "TC3" },
        Channel { column: "J", label: "TC4" },
        Channel { column: "L", label: "TC12" },
        Channel { column: "N", label: "TC13" },
        Channel { column: "P", label: "TC14" },
    ],
};
/// Coolant flow inlet and outlet
pub const FLOWPORT_CHANNELS: ChannelSet = ChannelSet {
    time: "A",
    channels: &[
        Channel { column: "B", label: "Inlet" },
        Channel { column: "D", label: "Outlet" },
    ],
};

/// Converts spreadsheet column letters into a 0-based column index: `A` is 0, `AA` is 26
pub fn column_index(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::Column(letters.to_string()));
    }
    letters
        .chars()
        .try_fold(0u32, |index, c| {
            if c.is_ascii_alphabetic() {
                Ok(index * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1))
            } else {
                Err(Error::Column(letters.to_string()))
            }
        })
        .map(|index| index - 1)
}

/// Time series of a measurement file channels
#[derive(Debug, Default, Clone)]
pub struct Measurement {
    pub time: Vec<f64>,
    pub channels: Vec<(String, Vec<f64>)>,
}
impl Measurement {
    pub fn from_columns<S: Into<String>>(time: Vec<f64>, channels: Vec<(S, Vec<f64>)>) -> Self {
        Self {
            time,
            channels: channels
                .into_iter()
                .map(|(label, values)| (label.into(), values))
                .collect(),
        }
    }
    pub fn len(&self) -> usize {
        self.time.len()
    }
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
    /// Last timestamp
    pub fn last_time(&self) -> Option<f64> {
        self.time.last().cloned()
    }
    /// Average temperature across all channels at each timestamp
    pub fn row_mean(&self) -> Vec<f64> {
        let columns: Vec<&[f64]> = self.channels.iter().map(|(_, v)| v.as_slice()).collect();
        stats::row_mean(&columns)
    }
}

/// Converts a cell to a number, empty cells are NaN
pub(crate) fn cell_value(cell: Option<&Data>, row: u32, column: &str) -> Result<f64> {
    match cell {
        Some(Data::Float(value)) => Ok(*value),
        Some(Data::Int(value)) => Ok(*value as f64),
        Some(Data::Empty) | None => Ok(f64::NAN),
        Some(other) => Err(Error::Cell {
            row,
            column: column.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Measurement file loader
pub struct MeasurementLoader {
    path: PathBuf,
    channels: ChannelSet,
}
impl MeasurementLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            channels: PEM_CHANNELS,
        }
    }
    pub fn channels(self, channels: ChannelSet) -> Self {
        Self { channels, ..self }
    }
    pub fn load(self) -> Result<Measurement> {
        log::info!("Loading {:?}...", self.path);
        let now = Instant::now();
        let mut workbook = open_workbook_auto(&self.path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::NoWorksheet(self.path.clone()))??;
        let measurement = self.read_range(&range)?;
        log::info!(
            "... loaded {} samples in {:}ms",
            measurement.len(),
            now.elapsed().as_millis()
        );
        Ok(measurement)
    }
    /// Reads the selected columns of a worksheet, the first row being the header
    fn read_range(&self, range: &Range<Data>) -> Result<Measurement> {
        let (Some((first_row, _)), Some((last_row, _))) = (range.start(), range.end()) else {
            return Ok(Measurement::default());
        };
        let time_col = column_index(self.channels.time)?;
        let channel_cols = self
            .channels
            .channels
            .iter()
            .map(|c| column_index(c.column))
            .collect::<Result<Vec<u32>>>()?;

        let mut measurement = Measurement::from_columns(
            vec![],
            self.channels
                .channels
                .iter()
                .map(|c| (c.label, vec![]))
                .collect(),
        );
        for row in first_row + 1..=last_row {
            let time = match range.get_value((row, time_col)) {
                Some(Data::Empty) | None => break,
                cell => cell_value(cell, row, self.channels.time)?,
            };
            measurement.time.push(time);
            for ((col, channel), (_, values)) in channel_cols
                .iter()
                .zip(self.channels.channels.iter())
                .zip(measurement.channels.iter_mut())
            {
                values.push(cell_value(range.get_value((row, *col)), row, channel.column)?);
            }
        }
        Ok(measurement)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("B").unwrap(), 1);
        assert_eq!(column_index("p").unwrap(), 15);
        assert_eq!(column_index("Z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert!(column_index("").is_err());
        assert!(column_index("A1").is_err());
    }
    #[test]
    fn channel_sets() {
        assert_eq!(
            PEM_CHANNELS.labels(),
            vec!["TC0", "TC1", "TC2", "TC3", "TC4", "TC12", "TC13", "TC14"]
        );
        assert_eq!(FLOWPORT_CHANNELS.labels(), vec!["Inlet", "Outlet"]);
    }
    #[test]
    fn cells() {
        assert_eq!(cell_value(Some(&Data::Float(21.5)), 1, "B").unwrap(), 21.5);
        assert_eq!(cell_value(Some(&Data::Int(3)), 1, "B").unwrap(), 3.);
        assert!(cell_value(None, 1, "B").unwrap().is_nan());
        assert!(cell_value(Some(&Data::String("n/a".into())), 1, "B").is_err());
    }
    #[test]
    fn worksheet_columns() {
        let mut range = Range::new((0, 0), (3, 3));
        range.set_value((0, 0), Data::String("Time".into()));
        range.set_value((0, 1), Data::String("Inlet".into()));
        range.set_value((0, 3), Data::String("Outlet".into()));
        for (row, t) in [(1u32, 0f64), (2, 1.)] {
            range.set_value((row, 0), Data::Float(t));
            range.set_value((row, 1), Data::Float(20. + t));
            range.set_value((row, 2), Data::String("ignored".into()));
            range.set_value((row, 3), Data::Int(22));
        }
        let loader = MeasurementLoader::new("20W_IO.xlsx").channels(FLOWPORT_CHANNELS);
        let m = loader.read_range(&range).unwrap();
        assert_eq!(m.time, vec![0., 1.]);
        assert_eq!(m.channels[0], ("Inlet".to_string(), vec![20., 21.]));
        assert_eq!(m.channels[1], ("Outlet".to_string(), vec![22., 22.]));
        assert_eq!(m.row_mean(), vec![21., 21.5]);
        assert_eq!(m.last_time(), Some(1.));
    }
    #[test]
    fn load_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("20W_IO.xlsx");
        fixtures::write_workbook(
            &path,
            FLOWPORT_CHANNELS,
            &[(0., vec![Some(21.), Some(22.)]), (1.5, vec![Some(21.5), Some(23.)])],
        );
        let m = MeasurementLoader::new(&path)
            .channels(FLOWPORT_CHANNELS)
            .load()
            .unwrap();
        assert_eq!(m.time, vec![0., 1.5]);
        assert_eq!(m.channels[0], ("Inlet".to_string(), vec![21., 21.5]));
        assert_eq!(m.channels[1], ("Outlet".to_string(), vec![22., 23.]));
        assert_eq!(m.last_time(), Some(1.5));
    }
    #[test]
    fn empty_cell_left_out_of_average() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("20W_PEM.xlsx");
        let full = |v: f64| vec![Some(v); 8];
        let mut missing = full(24.);
        missing[0] = None;
        fixtures::write_workbook(
            &path,
            PEM_CHANNELS,
            &[(0., full(23.)), (250., missing), (300., full(23.))],
        );
        let m = MeasurementLoader::new(&path).load().unwrap();
        assert!(m.channels[0].1[1].is_nan());
        assert_eq!(m.row_mean(), vec![23., 24., 23.]);
    }
    #[test]
    fn missing_workbook() {
        assert!(MeasurementLoader::new("no/such/20W_PEM.xlsx").load().is_err());
    }
}
