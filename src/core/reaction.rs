use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::Role;

/// A curated reaction from the knowledge base.
///
/// Static data: loaded once from the catalog and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Stable identifier (e.g. `R-HSA-376419`)
    pub st_id: String,

    /// Human-readable display name
    pub display_name: String,

    /// Participant accession -> structural role within the reaction
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub participants: BTreeMap<String, Role>,
}

impl Reaction {
    pub fn new(st_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            st_id: st_id.into(),
            display_name: display_name.into(),
            participants: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_participant(mut self, accession: impl Into<String>, role: Role) -> Self {
        self.participants.insert(accession.into(), role);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participants_keep_latest_role() {
        let r = Reaction::new("R-HSA-376419", "Aldosterone binds NR3C2")
            .with_participant("P08235", Role::Input)
            .with_participant("P08235", Role::Output);
        assert_eq!(r.participants["P08235"], Role::Output);
    }

    #[test]
    fn test_serde_omits_empty_participants() {
        let bare = Reaction::new("R-HSA-1", "Bare");
        let json = serde_json::to_string(&bare).unwrap();
        assert!(!json.contains("participants"));

        let with = bare.with_participant("P08235", Role::CatalystActivity);
        let json = serde_json::to_string(&with).unwrap();
        assert!(json.contains("\"catalyst_activity\""));
        let back: Reaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.participants.len(), 1);
    }
}
