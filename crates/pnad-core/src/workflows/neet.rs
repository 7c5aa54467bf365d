//! NEET youth counts by year, sex and race.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{info, info_span, warn};

use pnad_normalization::normalize_records;
use pnad_output::write_aggregate_csv;
use pnad_sidra::{DataSource, VALUE_FIELD};
use pnad_transform::{aggregate, label_records, latest_year_slice};

use crate::config::NeetConfig;
use crate::error::{PipelineError, Result, Stage};
use crate::layout::{NEET_MEASURE, neet_keys, neet_manifest, neet_plan};
use crate::report::{NeetRun, RunReport, SourceReport, Workflow};

/// Fetches the configured SIDRA table, labels sex and race, sums the
/// scaled counts by (year, sex, race) and writes the summary.
///
/// The age groups and the "not studying"/"not occupied" conditions are
/// selected by the query itself; rows are not filtered again here.
pub fn run_neet(config: &NeetConfig, source: &dyn DataSource) -> Result<NeetRun> {
    let span = info_span!("workflow", name = "neet", table = %config.table);
    let _guard = span.enter();
    let start = Instant::now();

    let mut report = RunReport::new(Workflow::Neet, config.output.clone());
    let manifest = neet_manifest(config).map_err(PipelineError::at(Stage::Setup))?;

    let query = config.query();
    let raw = source.fetch(&query).map_err(PipelineError::at(Stage::Fetch))?;
    if raw.is_empty() {
        warn!(query = %query, "SIDRA returned no rows");
    }

    let headers: BTreeSet<&str> = raw
        .iter()
        .flat_map(|record| record.fields().map(|(name, _)| name))
        .collect();
    let headers: Vec<&str> = headers.into_iter().collect();
    let schema = manifest.negotiate(&headers);
    for field in &schema.missing {
        warn!(field = %field, "expected field not present in SIDRA rows");
    }
    report.sources.push(SourceReport {
        source: query.to_string(),
        rows: raw.len(),
        schema,
    });
    report.rows_in = raw.len();

    let normalized = normalize_records(&raw, &manifest);
    let labeled = label_records(&normalized.records, &neet_plan(config.scale));
    let summary = aggregate(&labeled.records, &neet_keys(), VALUE_FIELD, NEET_MEASURE);
    let latest = latest_year_slice(&summary, 0);

    report.rows_out =
        write_aggregate_csv(&config.output, &summary).map_err(PipelineError::at(Stage::Export))?;
    report.normalize = normalized.stats;
    report.label = labeled.stats;
    report.duration = start.elapsed();

    info!(
        rows_in = report.rows_in,
        groups = report.rows_out,
        output = %config.output.display(),
        duration_ms = report.duration.as_millis(),
        "neet workflow complete"
    );
    Ok(NeetRun {
        report,
        summary,
        latest,
    })
}
