//! Run reports.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use pnad_model::{AggregateTable, SchemaReport};
use pnad_normalization::NormalizeStats;
use pnad_transform::LabelStats;

/// The three workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Neet,
    Label,
    Extract,
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Neet => "neet",
            Self::Label => "label",
            Self::Extract => "extract",
        })
    }
}

/// One data source read by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    /// File path or SIDRA query.
    pub source: String,
    pub rows: usize,
    pub schema: SchemaReport,
}

/// What a workflow did, for the command-line summary.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub workflow: Workflow,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub sources: Vec<SourceReport>,
    pub rows_in: usize,
    /// Rows removed by the filter stage.
    pub excluded: usize,
    /// Rows (or groups, for aggregated output) written.
    pub rows_out: usize,
    pub normalize: NormalizeStats,
    pub label: LabelStats,
    pub output: PathBuf,
}

impl RunReport {
    pub(crate) fn new(workflow: Workflow, output: PathBuf) -> Self {
        Self {
            workflow,
            started_at: Utc::now(),
            duration: Duration::ZERO,
            sources: Vec::new(),
            rows_in: 0,
            excluded: 0,
            rows_out: 0,
            normalize: NormalizeStats::default(),
            label: LabelStats::default(),
            output,
        }
    }

    /// Expected source fields absent from at least one source.
    pub fn missing_fields(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .sources
            .iter()
            .flat_map(|s| s.schema.missing.iter().map(String::as_str))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Suppressed values seen while normalizing.
    pub fn suppressed(&self) -> usize {
        self.normalize.total_suppressed()
    }
}

/// Result of the NEET workflow: the run report plus both tables.
#[derive(Debug, Clone)]
pub struct NeetRun {
    pub report: RunReport,
    pub summary: AggregateTable,
    pub latest: AggregateTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_deduplicated() {
        let mut report = RunReport::new(Workflow::Extract, PathBuf::from("out.csv"));
        for missing in [vec!["V4032"], vec!["V4032", "VD4019"]] {
            report.sources.push(SourceReport {
                source: "x.csv".into(),
                rows: 0,
                schema: SchemaReport {
                    available: Vec::new(),
                    missing: missing.into_iter().map(String::from).collect(),
                    unexpected: Vec::new(),
                },
            });
        }
        assert_eq!(report.missing_fields(), vec!["V4032", "VD4019"]);
        assert_eq!(report.workflow.to_string(), "extract");
    }
}
