//! Code dictionary model.
//!
//! A [`CodeDictionary`] maps the small integer codes of one survey variable
//! to canonical labels. Lookup is total: every input, including codes
//! outside the documented domain and missing values, resolves to a
//! [`LabelLookup`] without panicking.
//!
//! ## Missing input
//!
//! Most dictionaries resolve a missing code to their fallback label, the
//! same as an unmapped code. Dictionaries with [`MissingPolicy::Missing`]
//! keep missing input missing instead; the discouraged-worker flag uses this
//! because the question is only asked of part of the population, so "no
//! data" must not read as "No".

use serde::Serialize;

/// What a dictionary returns when the code itself is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Missing input resolves to the fallback label.
    Fallback,
    /// Missing input resolves to a missing label.
    Missing,
}

/// Result of a dictionary lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelLookup {
    /// The code is in the dictionary's domain.
    Mapped(&'static str),
    /// The code is outside the domain (or missing under
    /// [`MissingPolicy::Fallback`]).
    Fallback(&'static str),
    /// Missing input under [`MissingPolicy::Missing`].
    Missing,
}

impl LabelLookup {
    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            Self::Mapped(label) | Self::Fallback(label) => Some(label),
            Self::Missing => None,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

/// Immutable mapping from survey codes to labels for one variable.
#[derive(Debug, Serialize)]
pub struct CodeDictionary {
    /// Short identifier (`sex`, `race`, ...).
    pub name: &'static str,
    /// Survey variable the codes come from (`V2007`).
    pub source_variable: &'static str,
    pub description: &'static str,
    entries: &'static [(i64, &'static str)],
    fallback: &'static str,
    missing: MissingPolicy,
}

impl CodeDictionary {
    pub const fn new(
        name: &'static str,
        source_variable: &'static str,
        description: &'static str,
        entries: &'static [(i64, &'static str)],
        fallback: &'static str,
        missing: MissingPolicy,
    ) -> Self {
        Self {
            name,
            source_variable,
            description,
            entries,
            fallback,
            missing,
        }
    }

    /// Resolves a code to its label.
    pub fn label(&self, code: Option<i64>) -> LabelLookup {
        let Some(code) = code else {
            return match self.missing {
                MissingPolicy::Fallback => LabelLookup::Fallback(self.fallback),
                MissingPolicy::Missing => LabelLookup::Missing,
            };
        };
        match self.entries.iter().find(|(c, _)| *c == code) {
            Some((_, label)) => LabelLookup::Mapped(*label),
            None => LabelLookup::Fallback(self.fallback),
        }
    }

    /// Shorthand for `label(code).as_str()`.
    pub fn label_text(&self, code: Option<i64>) -> Option<&'static str> {
        self.label(code).as_str()
    }

    pub fn is_in_domain(&self, code: i64) -> bool {
        self.entries.iter().any(|(c, _)| *c == code)
    }

    /// Documented valid codes, in declaration order.
    pub fn domain(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    pub fn entries(&self) -> &'static [(i64, &'static str)] {
        self.entries
    }

    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing
    }
}
