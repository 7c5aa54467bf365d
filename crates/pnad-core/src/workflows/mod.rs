//! The three pipeline workflows.
//!
//! | Workflow  | Stages |
//! |-----------|--------|
//! | `neet`    | Fetch → Normalize → Label → Aggregate → Export |
//! | `label`   | Load → Normalize → Label → Reorder → Export |
//! | `extract` | Load (many) → Normalize → Label → Filter → Verify → Select → Export |

mod extract;
mod label;
mod neet;

use std::collections::BTreeSet;

use pnad_output::DetailOptions;
use pnad_transform::LabelPlan;

pub use extract::run_extract;
pub use label::run_label;
pub use neet::run_neet;

/// Suppression flag columns for the produced measures, when enabled.
fn detail_options(enabled: bool, plan: &LabelPlan, produced: &BTreeSet<String>) -> DetailOptions {
    if !enabled {
        return DetailOptions::default();
    }
    DetailOptions {
        suppression_flags: plan
            .measures()
            .iter()
            .filter(|m| produced.contains(&m.field))
            .map(|m| m.field.clone())
            .collect(),
    }
}
