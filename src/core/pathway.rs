use serde::{Deserialize, Serialize};

/// A curated pathway from the knowledge base.
///
/// Only the static totals live here; the entities and reactions found during
/// a run are tracked by the search accumulator, and the derived statistics by
/// the analysis result records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pathway {
    /// Stable identifier (e.g. `R-HSA-212436`)
    pub st_id: String,

    /// Human-readable display name
    pub display_name: String,

    /// Total number of participant entities annotated to this pathway
    pub num_entities_total: usize,

    /// Total number of reactions annotated to this pathway
    pub num_reactions_total: usize,
}

impl Pathway {
    pub fn new(
        st_id: impl Into<String>,
        display_name: impl Into<String>,
        num_entities_total: usize,
        num_reactions_total: usize,
    ) -> Self {
        Self {
            st_id: st_id.into(),
            display_name: display_name.into(),
            num_entities_total,
            num_reactions_total,
        }
    }
}
