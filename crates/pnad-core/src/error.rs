//! Pipeline error types.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use pnad_ingest::IngestError;
use pnad_model::ModelError;
use pnad_output::OutputError;
use pnad_sidra::SidraError;
use pnad_transform::TransformError;

use crate::config::ConfigError;

/// Pipeline stage, used to name where a run failed.
///
/// Only stages that can fail are listed: normalizing, labeling and
/// aggregating in memory always succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Setup,
    Fetch,
    Load,
    Filter,
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Setup => "setup",
            Self::Fetch => "fetch",
            Self::Load => "load",
            Self::Filter => "filter",
            Self::Export => "export",
        };
        f.write_str(name)
    }
}

/// Underlying failure of a stage.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Fetch(#[from] SidraError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Fatal errors of a workflow run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input file is absent. Raised before anything is loaded.
    #[error("input file not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: StageError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// Builds a mapper for `map_err` that tags an error with its stage.
    pub(crate) fn at<E: Into<StageError>>(stage: Stage) -> impl FnOnce(E) -> Self {
        move |error| Self::Stage {
            stage,
            source: error.into(),
        }
    }

    /// Stage the run failed in, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            Self::MissingInput { .. } | Self::Config(_) => None,
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::FileNotFound { path } => Self::MissingInput { path },
            other => Self::at(Stage::Load)(other),
        }
    }
}

/// Result type for pipeline runs.
pub type Result<T> = std::result::Result<T, PipelineError>;
