//! Run configuration.
//!
//! Every field has a default matching the survey extracts the workflows
//! were written for, so an empty (or absent) configuration file runs all
//! three workflows against the conventional file names. A TOML file only
//! needs the values it changes:
//!
//! ```toml
//! [extract]
//! inputs = ["data/2022.csv", "data/2023.csv"]
//! age_min = 15
//!
//! [neet]
//! period = "2023-2024"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use pnad_sidra::{SIDRA_API_URL, SidraQuery};

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid age band: minimum {min} is greater than maximum {max}")]
    AgeBand { min: i64, max: i64 },

    #[error("the extract workflow needs at least one input file")]
    NoInputs,
}

/// Configuration for all workflows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub neet: NeetConfig,
    pub label: LabelConfig,
    pub extract: ExtractConfig,
}

impl PipelineConfig {
    /// Loads a TOML configuration file. Absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.message().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extract.inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }
        if self.extract.age_min > self.extract.age_max {
            return Err(ConfigError::AgeBand {
                min: self.extract.age_min,
                max: self.extract.age_max,
            });
        }
        Ok(())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// NEET youth counts from SIDRA table 6407.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NeetConfig {
    pub api_url: String,
    pub table: String,
    pub period: String,
    pub territorial_level: String,
    pub territorial_code: String,
    pub variable: String,
    /// Factor applied to published values (the table is in thousands).
    pub scale: f64,
    pub output: PathBuf,
    /// Classification id to category list (`all` or comma-separated codes).
    pub classifications: BTreeMap<String, String>,
    /// Classification id to the record field its category code fills.
    pub classification_fields: BTreeMap<String, String>,
}

impl NeetConfig {
    pub fn query(&self) -> SidraQuery {
        SidraQuery {
            table: self.table.clone(),
            period: self.period.clone(),
            territorial_level: self.territorial_level.clone(),
            territorial_code: self.territorial_code.clone(),
            variable: self.variable.clone(),
            classifications: self.classifications.clone(),
            classification_fields: self.classification_fields.clone(),
        }
    }
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl Default for NeetConfig {
    fn default() -> Self {
        Self {
            api_url: SIDRA_API_URL.to_string(),
            table: "6407".to_string(),
            period: "2022-2024".to_string(),
            territorial_level: "1".to_string(),
            territorial_code: "all".to_string(),
            variable: "8370".to_string(),
            scale: 1000.0,
            output: PathBuf::from("neet_summary.csv"),
            classifications: string_map(&[
                ("C1", "all"),
                ("C2", "all"),
                // 15 to 17 and 18 to 24 years
                ("C12401", "106346,106347"),
                // not studying
                ("C12402", "106350"),
                // not occupied
                ("C12403", "106352"),
            ]),
            classification_fields: string_map(&[
                ("C1", "Sex_code"),
                ("C2", "Race_code"),
                ("C12401", "Age_group_code"),
                ("C12402", "Study_condition_code"),
                ("C12403", "Occupation_condition_code"),
            ]),
        }
    }
}

/// Labeling of a pre-renamed extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Write a `<measure>_suppressed` column after each measure.
    pub write_suppression_flags: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("dados_brutos_2023_2024.csv"),
            output: PathBuf::from("dados_rotulados.csv"),
            write_suppression_flags: false,
        }
    }
}

/// Age-band extract from raw microdata files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Read and concatenated in this order.
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub age_min: i64,
    pub age_max: i64,
    pub write_suppression_flags: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from("2023.csv"), PathBuf::from("2024.csv")],
            output: PathBuf::from("people_14_25_2023_2024_fullvars.csv"),
            age_min: 14,
            age_max: 25,
            write_suppression_flags: false,
        }
    }
}
