//! Conversion of SIDRA response rows into raw records.

use std::collections::BTreeMap;

use serde_json::Value as Json;
use tracing::debug;

use pnad_model::{RawRecord, RawValue, RecordId};

use crate::error::{Result, SidraError};
use crate::query::SidraQuery;
use crate::translate::translate_category;

/// Record field holding the period code.
pub const YEAR_FIELD: &str = "Year";
/// Record field holding the published value.
pub const VALUE_FIELD: &str = "Valor";

/// Converts a values API response body into raw records.
///
/// Each row becomes one record with `Year`, `Valor` and one field per
/// entry of `query.classification_fields`. A leading header row (present
/// when the query did not suppress it) is skipped.
///
/// Dimensions are matched to classifications by position. Where the query
/// restricts a classification to explicit categories, every row must carry
/// one of them in that dimension, so a response laid out in another order
/// is rejected instead of silently swapping fields.
pub fn parse_rows(query: &SidraQuery, body: &Json) -> Result<Vec<RawRecord>> {
    let rows = body
        .as_array()
        .ok_or_else(|| SidraError::Payload("expected a JSON array of rows".to_string()))?;

    let layout = dimension_layout(query);
    let source = format!("sidra:{}", query.path());
    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let row = row
            .as_object()
            .ok_or_else(|| SidraError::Payload(format!("row {} is not an object", idx + 1)))?;
        if idx == 0 && is_header_row(row) {
            debug!("skipping SIDRA header row");
            continue;
        }

        let mut fields = BTreeMap::new();
        fields.insert(YEAR_FIELD.to_string(), cell(row, "D2C", idx)?);
        fields.insert(VALUE_FIELD.to_string(), cell(row, "V", idx)?);
        for dimension in &layout {
            let value = cell(row, &dimension.code_key(), idx)?;
            dimension.check(&value, idx)?;
            let value = match value {
                RawValue::Text(text) => category_value(dimension.field, text),
                other => other,
            };
            fields.insert(dimension.field.to_string(), value);
        }

        records.push(RawRecord::new(
            RecordId::derive(&source, idx as u64 + 1),
            fields,
        ));
    }
    Ok(records)
}

/// One classification dimension of the response rows.
#[derive(Debug)]
struct Dimension<'a> {
    number: usize,
    classification: &'a str,
    field: &'a str,
    /// Requested category codes; `None` when the query asked for all.
    categories: Option<Vec<&'a str>>,
}

impl Dimension<'_> {
    fn code_key(&self) -> String {
        format!("D{}C", self.number)
    }

    fn check(&self, value: &RawValue, idx: usize) -> Result<()> {
        let Some(categories) = &self.categories else {
            return Ok(());
        };
        let code = match value {
            RawValue::Text(text) => text.clone(),
            RawValue::Int(code) => code.to_string(),
            RawValue::Missing => return Ok(()),
        };
        if categories.contains(&code.as_str()) {
            return Ok(());
        }
        Err(SidraError::Payload(format!(
            "row {}: {} holds category {code}, which is not one of {} requested for {}",
            idx + 1,
            self.code_key(),
            categories.join(","),
            self.classification
        )))
    }
}

fn dimension_layout(query: &SidraQuery) -> Vec<Dimension<'_>> {
    let layout: Vec<Dimension<'_>> = query
        .classification_dimensions()
        .filter_map(|(number, id)| {
            let field = query.classification_fields.get(id)?;
            let categories = query
                .classifications
                .get(id)
                .map(String::as_str)
                .and_then(explicit_categories);
            Some(Dimension {
                number,
                classification: id,
                field,
                categories,
            })
        })
        .collect();
    for dimension in &layout {
        debug!(
            dimension = %dimension.code_key(),
            classification = dimension.classification,
            field = dimension.field,
            "SIDRA dimension layout"
        );
    }
    layout
}

/// `"106346,106347"` lists categories; `"all"` and similar selectors do not.
fn explicit_categories(selector: &str) -> Option<Vec<&str>> {
    let codes: Vec<&str> = selector.split(',').map(str::trim).collect();
    codes
        .iter()
        .all(|code| !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()))
        .then_some(codes)
}

fn is_header_row(row: &serde_json::Map<String, Json>) -> bool {
    row.get("V").and_then(Json::as_str) == Some("Valor")
}

fn cell(row: &serde_json::Map<String, Json>, key: &str, idx: usize) -> Result<RawValue> {
    match row.get(key) {
        Some(Json::String(text)) => Ok(RawValue::from_cell(text)),
        Some(Json::Number(n)) => Ok(n
            .as_i64()
            .map_or_else(|| RawValue::Text(n.to_string()), RawValue::Int)),
        Some(Json::Null) => Ok(RawValue::Missing),
        Some(other) => Err(SidraError::Payload(format!(
            "row {}: field {key} has unexpected value {other}",
            idx + 1
        ))),
        None => Err(SidraError::Payload(format!(
            "row {}: missing field {key}",
            idx + 1
        ))),
    }
}

fn category_value(field: &str, text: String) -> RawValue {
    match text.parse::<i64>() {
        Ok(category) => RawValue::Int(translate_category(field, category).unwrap_or(category)),
        Err(_) => RawValue::Text(text),
    }
}
