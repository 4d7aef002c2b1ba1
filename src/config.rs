use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_derive::Deserialize;

use crate::errors::PreprocessError;

/// Settings of a preprocessing run. The defaults reproduce the tripadvisor setup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Directory containing the raw input file.
    pub raw_data_dir: PathBuf,
    /// Name of the raw input file, a JSON array or JSON lines.
    pub input_file: String,
    /// Directory for the generated files, created if absent.
    pub processed_dir: PathBuf,
    /// Ratings up to and including this value become 0, higher ratings become 1.
    pub rating_threshold: f64,
    /// Minimum number of interactions per user.
    pub min_user_count: usize,
    /// Minimum number of interactions per item, zero disables the item filter. Only applied
    /// to the full data set, validation users are re-filtered on users alone.
    pub min_item_count: usize,
    /// Fraction of users assigned to each of the validation and test groups.
    pub heldout_fraction: f64,
    /// Fraction of each validation/test user's interactions which is held out.
    pub test_prop: f64,
    /// Seed for the user shuffle and for each per-user split phase.
    pub seed: u64,
    /// Print a progress line every that many users while splitting.
    pub progress_interval: usize,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        PreprocessingConfig {
            raw_data_dir: PathBuf::from("./raw_data/"),
            input_file: String::from("tripadvisor.json"),
            processed_dir: PathBuf::from("./pre_data/"),
            rating_threshold: 30.0,
            min_user_count: 2,
            min_item_count: 0,
            heldout_fraction: 0.1,
            test_prop: 0.2,
            seed: 98765,
            progress_interval: 1000,
        }
    }
}

impl PreprocessingConfig {

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PreprocessError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| PreprocessError::io(path, error))?;
        let config: PreprocessingConfig = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn input_path(&self) -> PathBuf {
        self.raw_data_dir.join(&self.input_file)
    }

    pub fn validate(&self) -> Result<(), PreprocessError> {
        if !(self.heldout_fraction >= 0.0 && self.heldout_fraction <= 0.5) {
            return Err(PreprocessError::InvalidConfig(
                format!("heldout_fraction must be within [0, 0.5], got {}", self.heldout_fraction)));
        }
        if !(self.test_prop >= 0.0 && self.test_prop < 1.0) {
            return Err(PreprocessError::InvalidConfig(
                format!("test_prop must be within [0, 1), got {}", self.test_prop)));
        }
        if self.progress_interval == 0 {
            return Err(PreprocessError::InvalidConfig(
                String::from("progress_interval must be positive")));
        }
        Ok(())
    }
}
