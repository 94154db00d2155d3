use crate::Result;
use regex::Regex;
use std::{
    fmt,
    path::{Path, PathBuf},
};
use strum_macros::EnumIter;

/// Power rating at the start of a file name: digits, optional fraction, then `W` or `w`
pub const POWER_PATTERN: &str = r"^(\d+(?:\.\d+)?)[Ww]";

/// Test rig mounting direction
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}
impl Orientation {
    /// Any path containing `horizontal` is horizontal, everything else is vertical
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        if path.as_ref().to_string_lossy().contains("horizontal") {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
    /// Measurement folder of this orientation: `<root>/<orientation>`
    pub fn data_dir<P: AsRef<Path>>(&self, root: P) -> PathBuf {
        root.as_ref().join(self.to_string())
    }
    pub fn to_pretty_string(&self) -> String {
        match self {
            Orientation::Horizontal => "Horizontal".to_string(),
            Orientation::Vertical => "Vertical".to_string(),
        }
    }
}
impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Compiles [POWER_PATTERN]
pub fn power_regex() -> Result<Regex> {
    Ok(Regex::new(POWER_PATTERN)?)
}
/// Returns the power rating encoded at the start of the file base name
///
/// `None` flags a file that does not follow the naming convention and must be skipped.
pub fn power_rating<P: AsRef<Path>>(re: &Regex, path: P) -> Option<f64> {
    let base = base_name(path.as_ref());
    re.captures(&base)?.get(1)?.as_str().parse().ok()
}

/// Returns the file base name text before the first `W`, e.g. `19.8` for `19.8W_PEM.xlsx`
pub fn wattage<P: AsRef<Path>>(path: P) -> String {
    let base = base_name(path.as_ref());
    base.split('W').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn power_rating_from_file_name() {
        let re = power_regex().unwrap();
        assert_eq!(power_rating(&re, "19.8W_PEM.xlsx"), Some(19.8));
        assert_eq!(power_rating(&re, "148.66W_PEM.xlsx"), Some(148.66));
        assert_eq!(power_rating(&re, "data/vertical/200W_Vert_PEM.xlsx"), Some(200.));
        assert_eq!(power_rating(&re, "97.5w_PEM.xlsx"), Some(97.5));
    }
    #[test]
    fn power_rating_skips_other_names() {
        let re = power_regex().unwrap();
        assert_eq!(power_rating(&re, "notes_PEM.xlsx"), None);
        assert_eq!(power_rating(&re, "W20_PEM.xlsx"), None);
        assert_eq!(power_rating(&re, "20_PEM.xlsx"), None);
        // only the base name is matched
        assert_eq!(power_rating(&re, "data/20W/notes_PEM.xlsx"), None);
    }
    #[test]
    fn wattage_label() {
        assert_eq!(wattage("data/horizontal/19.8W_IO.xlsx"), "19.8");
        assert_eq!(wattage("data/vertical/100W_Vert_PEM.xlsx"), "100");
    }
    #[test]
    fn orientation_from_path() {
        assert_eq!(
            Orientation::from_path("data/horizontal/19.8W_PEM.xlsx"),
            Orientation::Horizontal
        );
        assert_eq!(
            Orientation::from_path("data/vertical/20W_Vert_PEM.xlsx"),
            Orientation::Vertical
        );
        assert_eq!(Orientation::from_path("elsewhere/20W_PEM.xlsx"), Orientation::Vertical);
        assert_eq!(Orientation::Horizontal.to_string(), "horizontal");
        assert_eq!(Orientation::Vertical.to_pretty_string(), "Vertical");
    }
    #[test]
    fn orientation_folders() {
        let dirs: Vec<PathBuf> = Orientation::iter().map(|o| o.data_dir("data")).collect();
        assert_eq!(
            dirs,
            vec![PathBuf::from("data/horizontal"), PathBuf::from("data/vertical")]
        );
        for (o, dir) in Orientation::iter().zip(dirs.iter()) {
            assert_eq!(Orientation::from_path(dir), o);
        }
    }
}
