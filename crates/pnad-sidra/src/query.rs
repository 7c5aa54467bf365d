//! SIDRA values API queries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One request against the SIDRA values API.
///
/// `classifications` maps a classification id (`C12401`) to a
/// comma-separated category list or `all`. `classification_fields` names
/// the record field each classification's category code is stored under;
/// classifications without an entry are fetched but not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidraQuery {
    pub table: String,
    pub period: String,
    pub territorial_level: String,
    pub territorial_code: String,
    pub variable: String,
    #[serde(default)]
    pub classifications: BTreeMap<String, String>,
    #[serde(default)]
    pub classification_fields: BTreeMap<String, String>,
}

impl SidraQuery {
    /// Renders the request path, e.g.
    /// `/t/6407/n1/all/v/8370/p/2022-2024/c1/all/h/n`.
    ///
    /// The header row is always suppressed.
    pub fn path(&self) -> String {
        let mut path = format!(
            "/t/{}/n{}/{}/v/{}/p/{}",
            self.table,
            self.territorial_level,
            self.territorial_code,
            self.variable,
            self.period
        );
        for (id, categories) in &self.classifications {
            let id = id.trim_start_matches(['C', 'c']);
            path.push_str(&format!("/c{id}/{}", categories.replace(' ', "")));
        }
        path.push_str("/h/n");
        path
    }

    /// Dimension layout of the response rows: `D1` territory, `D2` period,
    /// `D3` variable, then one dimension per classification in path order.
    pub fn classification_dimensions(&self) -> impl Iterator<Item = (usize, &str)> {
        self.classifications
            .keys()
            .enumerate()
            .map(|(idx, id)| (idx + 4, id.as_str()))
    }
}

impl fmt::Display for SidraQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table {} ({})", self.table, self.path())
    }
}
