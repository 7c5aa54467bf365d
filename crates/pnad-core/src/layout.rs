//! Field manifests, label plans and output layouts of each workflow.

use std::collections::BTreeSet;

use pnad_model::{FieldManifest, FieldSpec, Result, SchemaReport};
use pnad_output::OutputColumn;
use pnad_sidra::{VALUE_FIELD, YEAR_FIELD};
use pnad_standards::{
    AREA, CONTRIBUTOR, DISCOURAGED, EDUCATION_LEVEL, OCCUPATION, RACE, SCHOOL_ATTENDANCE, SEX,
    UF_ABBREVIATION, UF_NAME,
};
use pnad_transform::{GroupKey, LabelPlan};

use crate::config::NeetConfig;

// === NEET ===

pub const NEET_MEASURE: &str = "NEET_Count";

/// Fields of a SIDRA row: the year, one code per mapped classification and
/// the published value.
pub fn neet_manifest(config: &NeetConfig) -> Result<FieldManifest> {
    let mut fields = vec![FieldSpec::code(YEAR_FIELD, YEAR_FIELD)];
    fields.extend(
        config
            .classification_fields
            .values()
            .map(|field| FieldSpec::code(field.as_str(), field.as_str())),
    );
    fields.push(FieldSpec::measure(VALUE_FIELD, VALUE_FIELD));
    FieldManifest::new(fields)
}

pub fn neet_plan(scale: f64) -> LabelPlan {
    LabelPlan::new()
        .with_rule("Sex_code", "Sex_label", &SEX)
        .with_rule("Race_code", "Race_label", &RACE)
        .with_count(VALUE_FIELD, scale)
}

pub fn neet_keys() -> Vec<GroupKey> {
    vec![
        GroupKey::new(YEAR_FIELD, "Year"),
        GroupKey::new("Sex_label", "Sex"),
        GroupKey::new("Race_label", "Race"),
    ]
}

// === Label ===

/// Columns of the pre-renamed extract.
pub fn label_manifest() -> Result<FieldManifest> {
    FieldManifest::new(vec![
        FieldSpec::code("ano", "Year"),
        FieldSpec::code("trimestre", "Quarter"),
        FieldSpec::code("id_uf", "id_uf"),
        FieldSpec::code("area_code", "Area_code"),
        FieldSpec::code("sex_code", "Sex_code"),
        FieldSpec::code("age", "Age"),
        FieldSpec::code("race_code", "Race_code"),
        FieldSpec::code("school_code", "School_code"),
        FieldSpec::code("occupation_code", "Occupation_code"),
        FieldSpec::code("education_code", "Education_code"),
        FieldSpec::code("reason_code", "Reason_code"),
        FieldSpec::measure("weight", "Weight"),
    ])
}

pub fn label_plan() -> LabelPlan {
    LabelPlan::new()
        .with_rule("id_uf", "UF", &UF_ABBREVIATION)
        .with_rule("Area_code", "Area", &AREA)
        .with_rule("Sex_code", "Sex", &SEX)
        .with_rule("Race_code", "Race", &RACE)
        .with_rule("School_code", "In_school", &SCHOOL_ATTENDANCE)
        .with_rule("Occupation_code", "Occupation_status", &OCCUPATION)
        .with_rule("Education_code", "Education_level", &EDUCATION_LEVEL)
        .with_rule("Reason_code", "Discouraged", &DISCOURAGED)
        .with_measure("Weight", 1.0)
}

pub fn label_columns() -> Vec<OutputColumn> {
    [
        "Year",
        "Quarter",
        "id_uf",
        "UF",
        "Area",
        "Sex",
        "Age",
        "Race",
        "In_school",
        "Occupation_status",
        "Education_level",
        "Discouraged",
        "Weight",
    ]
    .into_iter()
    .map(OutputColumn::same)
    .collect()
}

// === Extract ===

/// Raw IBGE microdata variables.
pub fn extract_manifest() -> Result<FieldManifest> {
    FieldManifest::new(vec![
        FieldSpec::code("ano", "Year"),
        FieldSpec::code("trimestre", "Quarter"),
        FieldSpec::code("id_uf", "id_uf"),
        FieldSpec::code("V1022", "Area_code"),
        FieldSpec::code("V2007", "Sex_code"),
        FieldSpec::code("V2009", "Age"),
        FieldSpec::code("V2010", "Race_code"),
        FieldSpec::code("V3002", "School_code"),
        FieldSpec::code("VD4002", "Occupation_code"),
        FieldSpec::code("V4032", "Contributor_code"),
        FieldSpec::measure("VD4019", "Income_all_jobs"),
        FieldSpec::measure("V1028", "Weight_V1028"),
    ])
}

pub fn extract_plan() -> LabelPlan {
    LabelPlan::new()
        .with_rule("id_uf", "UF", &UF_ABBREVIATION)
        .with_rule("id_uf", "UF_name", &UF_NAME)
        .with_rule("Area_code", "Area_label", &AREA)
        .with_rule("Sex_code", "Sex_label", &SEX)
        .with_rule("Race_code", "Race_label", &RACE)
        .with_rule("School_code", "School_label", &SCHOOL_ATTENDANCE)
        .with_rule("Occupation_code", "Occupation_label", &OCCUPATION)
        .with_rule("Contributor_code", "Contributor_label", &CONTRIBUTOR)
        .with_measure("Income_all_jobs", 1.0)
        .with_measure("Weight_V1028", 1.0)
}

pub fn extract_columns() -> Vec<OutputColumn> {
    [
        "Year",
        "Quarter",
        "id_uf",
        "UF",
        "UF_name",
        "Area_code",
        "Area_label",
        "Sex_code",
        "Sex_label",
        "Age",
        "Race_code",
        "Race_label",
        "School_code",
        "School_label",
        "Occupation_code",
        "Occupation_label",
        "Contributor_code",
        "Contributor_label",
        "Income_all_jobs",
        "Weight_V1028",
    ]
    .into_iter()
    .map(OutputColumn::same)
    .collect()
}

// === Column presence ===

/// Canonical fields produced by a run: fields available in at least one
/// source, plus the labels derived from them.
pub fn produced_fields<'a>(
    manifest: &FieldManifest,
    schemas: impl IntoIterator<Item = &'a SchemaReport>,
    plan: &LabelPlan,
) -> BTreeSet<String> {
    let mut fields: BTreeSet<String> = schemas
        .into_iter()
        .flat_map(|schema| schema.available.iter())
        .filter_map(|source| manifest.by_source(source))
        .map(|spec| spec.canonical.clone())
        .collect();
    let labels: Vec<String> = plan
        .rules()
        .iter()
        .filter(|rule| fields.contains(&rule.code_field))
        .map(|rule| rule.label_field.clone())
        .collect();
    fields.extend(labels);
    fields
}

/// Keeps the columns whose field the run produced, in layout order.
pub fn present_columns(
    columns: Vec<OutputColumn>,
    produced: &BTreeSet<String>,
) -> Vec<OutputColumn> {
    columns
        .into_iter()
        .filter(|column| produced.contains(&column.field))
        .collect()
}
