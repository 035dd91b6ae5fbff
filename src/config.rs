use std::path::PathBuf;

pub const DATA_FILE_ZIP: &str = "FL_insurance.csv.zip";
pub const DATA_FILE: &str = "FL_insurance.csv";
pub const COUNT_FILE: &str = "count.txt";
pub const TIV2012_FILE: &str = "tiv2012.txt";
pub const MOST_VALUABLE_FILE: &str = "most_valuable.txt";

/// Where to read the dataset from and where to put the results. The program
/// itself only ever runs with `Config::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub archive: PathBuf,
    pub entry: String,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive: PathBuf::from(DATA_FILE_ZIP),
            entry: DATA_FILE.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Config rooted in `dir`: archive and outputs all live there.
    #[cfg(test)]
    pub fn in_dir(dir: &std::path::Path) -> Self {
        Self {
            archive: dir.join(DATA_FILE_ZIP),
            output_dir: dir.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}
