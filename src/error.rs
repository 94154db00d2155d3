use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("failed to read the spreadsheet")]
    Spreadsheet(#[from] calamine::Error),
    #[error("no worksheet in {0:?}")]
    NoWorksheet(PathBuf),
    #[error("invalid column letter: {0:?}")]
    Column(String),
    #[error("non numeric cell at row {row}, column {column}: {value}")]
    Cell {
        row: u32,
        column: String,
        value: String,
    },
    #[error("invalid file name regular expression")]
    Regex(#[from] regex::Error),
    #[error("invalid file pattern")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to list a data directory entry")]
    Glob(#[from] glob::GlobError),
    #[error("failed to draw the figure: {0}")]
    Plot(String),
}
pub type Result<T> = std::result::Result<T, Error>;

/// Maps a plotters drawing error into [Error::Plot]
pub(crate) fn plot_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}
