//! Labeling of a pre-renamed extract.

use std::time::Instant;

use tracing::{info, info_span};

use pnad_ingest::{load_csv, require_files};
use pnad_normalization::normalize_records;
use pnad_output::write_detail_csv;
use pnad_transform::label_records;

use crate::config::LabelConfig;
use crate::error::{PipelineError, Result, Stage};
use crate::layout::{label_columns, label_manifest, label_plan, present_columns, produced_fields};
use crate::report::{RunReport, SourceReport, Workflow};

use super::detail_options;

/// Labels every code column of one extract and writes it in the human
/// column order. Columns the input lacks are left out.
pub fn run_label(config: &LabelConfig) -> Result<RunReport> {
    let span = info_span!("workflow", name = "label", input = %config.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    require_files(&[&config.input])?;
    let mut report = RunReport::new(Workflow::Label, config.output.clone());
    let manifest = label_manifest().map_err(PipelineError::at(Stage::Setup))?;
    let plan = label_plan();

    let loaded = load_csv(&config.input, &manifest)?;
    report.rows_in = loaded.len();

    let normalized = normalize_records(&loaded.records, &manifest);
    let labeled = label_records(&normalized.records, &plan);

    let produced = produced_fields(&manifest, [&loaded.schema], &plan);
    let columns = present_columns(label_columns(), &produced);
    let options = detail_options(config.write_suppression_flags, &plan, &produced);
    report.rows_out = write_detail_csv(&config.output, &labeled.records, &columns, &options)
        .map_err(PipelineError::at(Stage::Export))?;

    report.sources.push(SourceReport {
        source: loaded.path.display().to_string(),
        rows: loaded.len(),
        schema: loaded.schema,
    });
    report.normalize = normalized.stats;
    report.label = labeled.stats;
    report.duration = start.elapsed();

    info!(
        rows = report.rows_out,
        columns = columns.len(),
        output = %config.output.display(),
        duration_ms = report.duration.as_millis(),
        "label workflow complete"
    );
    Ok(report)
}
