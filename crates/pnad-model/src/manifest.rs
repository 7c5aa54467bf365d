//! Expected-field manifests and schema negotiation.
//!
//! Source files differ across survey rounds, so a workflow never assumes a
//! fixed header. It declares the fields it expects in a [`FieldManifest`]
//! and intersects that manifest with each file's header, producing a
//! [`SchemaReport`] that the caller can log or surface.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// How a source field is coerced during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Small integer survey code (`V2007`, `id_uf`, ...).
    IntegerCode,
    /// Floating-point magnitude (income, survey weight, SIDRA value).
    FloatMeasure,
    /// Copied as trimmed text.
    Passthrough,
}

/// One expected source field and the canonical name it is renamed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub source: String,
    pub canonical: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(source: impl Into<String>, canonical: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            source: source.into(),
            canonical: canonical.into(),
            kind,
        }
    }

    pub fn code(source: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self::new(source, canonical, FieldKind::IntegerCode)
    }

    pub fn measure(source: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self::new(source, canonical, FieldKind::FloatMeasure)
    }

    pub fn passthrough(source: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self::new(source, canonical, FieldKind::Passthrough)
    }
}

/// Ordered set of expected fields for one workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldManifest {
    fields: Vec<FieldSpec>,
}

impl FieldManifest {
    /// Builds a manifest, rejecting empty names and duplicates on either side
    /// of the rename.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let mut sources = BTreeSet::new();
        let mut canonicals = BTreeSet::new();
        for field in &fields {
            if field.source.trim().is_empty() || field.canonical.trim().is_empty() {
                return Err(ModelError::EmptyFieldName);
            }
            if !sources.insert(field.source.as_str()) {
                return Err(ModelError::DuplicateSourceField(field.source.clone()));
            }
            if !canonicals.insert(field.canonical.as_str()) {
                return Err(ModelError::DuplicateCanonicalField(field.canonical.clone()));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn by_source(&self, source: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.source == source)
    }

    /// Intersects the manifest with a discovered header.
    ///
    /// `available` and `missing` follow manifest order; `unexpected` follows
    /// header order.
    pub fn negotiate<S: AsRef<str>>(&self, headers: &[S]) -> SchemaReport {
        let header_set: BTreeSet<&str> = headers.iter().map(AsRef::as_ref).collect();
        let mut available = Vec::new();
        let mut missing = Vec::new();
        for field in &self.fields {
            if header_set.contains(field.source.as_str()) {
                available.push(field.source.clone());
            } else {
                missing.push(field.source.clone());
            }
        }
        let unexpected = headers
            .iter()
            .map(AsRef::as_ref)
            .filter(|h| self.by_source(h).is_none())
            .map(str::to_string)
            .collect();
        SchemaReport {
            available,
            missing,
            unexpected,
        }
    }
}

/// Outcome of intersecting a manifest with one source header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReport {
    /// Expected source fields present in the header.
    pub available: Vec<String>,
    /// Expected source fields absent from the header.
    pub missing: Vec<String>,
    /// Header fields the manifest does not mention (ignored on load).
    pub unexpected: Vec<String>,
}

impl SchemaReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn is_available(&self, source: &str) -> bool {
        self.available.iter().any(|s| s == source)
    }
}
