//! Search stage: expand matched reference entities through the static
//! relation chain (entity -> reaction -> pathway -> top-level pathway) into
//! a flattened result table, accumulating the hit sets the analysis stage
//! needs.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::catalog::store::MappingCatalog;
use crate::core::proteoform::Proteoform;
use crate::matching::engine::{MatchedEntities, MatchedEntity};

/// One (entity, reaction, pathway[, top-level pathway]) combination reached
/// during the search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRow {
    /// Identifier the user submitted, present for normalized runs (genes,
    /// ensembl, rsids) where it differs from the matched accession
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Protein accession of the matched entity
    pub accession: String,

    /// Proteoform notation, present for proteoform runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proteoform: Option<String>,

    pub reaction_st_id: String,
    pub reaction_name: String,
    pub pathway_st_id: String,
    pub pathway_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_level_st_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_level_name: Option<String>,
}

/// Run-scoped accumulator threaded through every search invocation.
///
/// Additive across batches: repeated calls union into the same sets, never
/// reset mid-run, so re-processing a batch is idempotent.
#[derive(Debug, Clone, Default)]
pub struct SearchAccumulator {
    /// Reference proteins reached by at least one accepted match
    pub hit_proteins: BTreeSet<String>,

    /// Reference proteoforms reached by at least one accepted match
    pub hit_proteoforms: BTreeSet<Proteoform>,

    /// Every pathway reached by any entity, deduplicated
    pub hit_pathways: BTreeSet<String>,

    /// Pathway st_id -> entity identifiers found in it
    pub entities_found: BTreeMap<String, BTreeSet<String>>,

    /// Pathway st_id -> reaction st_ids found in it
    pub reactions_found: BTreeMap<String, BTreeSet<String>>,
}

impl SearchAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct hit entities: the ORA sample size `n`
    #[must_use]
    pub fn hit_entity_count(&self) -> usize {
        self.hit_proteins.len() + self.hit_proteoforms.len()
    }
}

/// Expand the matched entities through the relation chain.
///
/// Every matched entity's reactions are looked up (absence means no known
/// association and is skipped, not an error), each reaction's pathways
/// likewise, and optionally each pathway's top-level pathways. Each
/// combination actually reached becomes one output row. Iteration follows
/// the ordered tables, so output is deterministic for fixed inputs.
pub fn search(
    matched: &MatchedEntities,
    catalog: &MappingCatalog,
    with_top_level: bool,
    accumulator: &mut SearchAccumulator,
) -> Vec<SearchRow> {
    let mut rows = Vec::new();

    for (entity, reactions) in &matched.entities {
        // Matched entities come from the reference tables, so they belong to
        // the universe regardless of how far the chain expands.
        match entity {
            MatchedEntity::Protein(acc) => {
                accumulator.hit_proteins.insert(acc.clone());
            }
            MatchedEntity::Proteoform(p) => {
                accumulator.hit_proteoforms.insert(p.clone());
            }
        }

        // Normalized runs fan each combination out per submitted identifier
        let entity_sources: Vec<Option<String>> = match matched.sources.get(entity.accession()) {
            Some(submitted) => submitted.iter().cloned().map(Some).collect(),
            None => vec![None],
        };

        for reaction_id in reactions {
            let Some(reaction) = catalog.reactions.get(reaction_id) else {
                tracing::debug!("Reaction {reaction_id} has no catalog entry, skipping");
                continue;
            };
            let Some(pathway_ids) = catalog.reactions_to_pathways.get(reaction_id) else {
                continue;
            };

            for pathway_id in pathway_ids {
                let Some(pathway) = catalog.pathways.get(pathway_id) else {
                    tracing::debug!("Pathway {pathway_id} has no catalog entry, skipping");
                    continue;
                };

                accumulator.hit_pathways.insert(pathway_id.clone());
                accumulator
                    .entities_found
                    .entry(pathway_id.clone())
                    .or_default()
                    .insert(entity.id());
                accumulator
                    .reactions_found
                    .entry(pathway_id.clone())
                    .or_default()
                    .insert(reaction_id.clone());

                for source in &entity_sources {
                    let base_row = SearchRow {
                        source: source.clone(),
                        accession: entity.accession().to_string(),
                        proteoform: match entity {
                            MatchedEntity::Proteoform(p) => Some(p.notation()),
                            MatchedEntity::Protein(_) => None,
                        },
                        reaction_st_id: reaction_id.clone(),
                        reaction_name: reaction.display_name.clone(),
                        pathway_st_id: pathway_id.clone(),
                        pathway_name: pathway.display_name.clone(),
                        top_level_st_id: None,
                        top_level_name: None,
                    };

                    let top_levels = if with_top_level {
                        catalog.pathways_to_top_level.get(pathway_id)
                    } else {
                        None
                    };

                    match top_levels {
                        Some(top_levels) if !top_levels.is_empty() => {
                            for top_level_id in top_levels {
                                let top_level_name = catalog
                                    .pathways
                                    .get(top_level_id)
                                    .map(|p| p.display_name.clone());
                                rows.push(SearchRow {
                                    top_level_st_id: Some(top_level_id.clone()),
                                    top_level_name,
                                    ..base_row.clone()
                                });
                            }
                        }
                        _ => rows.push(base_row),
                    }
                }
            }
        }
    }

    rows
}
