use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::store::MappingCatalog;
use crate::core::proteoform::Proteoform;
use crate::core::types::MatchPolicy;
use crate::matching::proteoform::matches;

/// Configuration for the matching engine, validated before the run starts
#[derive(Debug, Clone, Default)]
pub struct MatchingConfig {
    /// Equivalence policy for proteoform comparison
    pub policy: MatchPolicy,

    /// Maximum allowed distance between two PTM site coordinates
    pub margin: u64,

    /// Compare subsequence start/end coordinates under the tolerance rule;
    /// when disabled, ranges are ignored entirely
    pub use_subsequence_ranges: bool,
}

/// A reference entity confirmed to exist in the static data and to match at
/// least one input entity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchedEntity {
    Protein(String),
    Proteoform(Proteoform),
}

impl MatchedEntity {
    /// Protein accession of the entity (base accession for proteoforms)
    #[must_use]
    pub fn accession(&self) -> &str {
        match self {
            Self::Protein(acc) => acc,
            Self::Proteoform(p) => p.base_accession(),
        }
    }

    /// Identifier used in hit sets and analysis output: the accession for
    /// proteins, the full notation for proteoforms
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Protein(acc) => acc.clone(),
            Self::Proteoform(p) => p.notation(),
        }
    }
}

/// Result of the matching stage: every matched reference entity mapped to
/// its associated reaction identifiers. Deterministically ordered.
#[derive(Debug, Clone, Default)]
pub struct MatchedEntities {
    pub entities: BTreeMap<MatchedEntity, BTreeSet<String>>,

    /// Matched protein accession -> the submitted identifiers that mapped to
    /// it. Populated by the normalizing paths (genes, ensembl, rsids) so
    /// output rows can lead with the identifier the user actually submitted;
    /// empty for direct protein and proteoform runs.
    pub sources: BTreeMap<String, BTreeSet<String>>,
}

impl MatchedEntities {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Merge another result into this one by key union. Commutative and
    /// associative, so partial results can be combined in any order.
    pub fn merge(&mut self, other: MatchedEntities) {
        for (entity, reactions) in other.entities {
            self.entities.entry(entity).or_default().extend(reactions);
        }
        for (protein, submitted) in other.sources {
            self.sources.entry(protein).or_default().extend(submitted);
        }
    }
}

/// The matching engine: decides which reference entities are equivalent to
/// the input set.
///
/// Plain identifiers (proteins, and genes/ensembl/rsids after static-table
/// normalization) match by exact key equality; proteoforms go through the
/// policy-driven comparator, scanning only the reference proteoforms indexed
/// under the input's base accession.
pub struct MatchingEngine<'a> {
    catalog: &'a MappingCatalog,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create an engine with the default configuration (SUPERSET, margin 0)
    pub fn new(catalog: &'a MappingCatalog) -> Self {
        Self {
            catalog,
            config: MatchingConfig::default(),
        }
    }

    pub fn with_config(catalog: &'a MappingCatalog, config: MatchingConfig) -> Self {
        Self { catalog, config }
    }

    /// Match protein accessions by exact key equality against the
    /// protein-to-reactions table. Unmatched accessions are simply absent
    /// from the result.
    pub fn match_proteins<'i, I>(&self, inputs: I) -> MatchedEntities
    where
        I: IntoIterator<Item = &'i String>,
    {
        let mut result = MatchedEntities::default();
        for accession in inputs {
            if let Some(reactions) = self.catalog.proteins_to_reactions.get(accession) {
                result
                    .entities
                    .entry(MatchedEntity::Protein(accession.clone()))
                    .or_default()
                    .extend(reactions.iter().cloned());
            }
        }
        result
    }

    /// Match gene symbols: normalize to protein accessions through the
    /// gene-to-proteins table, then match the proteins exactly.
    pub fn match_genes<'i, I>(&self, inputs: I) -> MatchedEntities
    where
        I: IntoIterator<Item = &'i String>,
    {
        self.match_normalized(inputs, &self.catalog.genes_to_proteins)
    }

    /// Match Ensembl identifiers: normalize to protein accessions through
    /// the ensembl-to-proteins table, then match the proteins exactly.
    pub fn match_ensembl<'i, I>(&self, inputs: I) -> MatchedEntities
    where
        I: IntoIterator<Item = &'i String>,
    {
        self.match_normalized(inputs, &self.catalog.ensembl_to_proteins)
    }

    /// Match variant rsids: normalize to protein accessions through the
    /// rsid-to-proteins table, then match the proteins exactly.
    pub fn match_rsids<'i, I>(&self, inputs: I) -> MatchedEntities
    where
        I: IntoIterator<Item = &'i String>,
    {
        self.match_normalized(inputs, &self.catalog.rsids_to_proteins)
    }

    /// Match proteoforms under the configured policy and margin.
    ///
    /// For each input, only the reference proteoforms sharing its base
    /// accession are compared; every reference that matches at least one
    /// input lands in the result with its reaction identifiers.
    pub fn match_proteoforms<'i, I>(&self, inputs: I) -> MatchedEntities
    where
        I: IntoIterator<Item = &'i Proteoform>,
    {
        let mut result = MatchedEntities::default();
        for input in inputs {
            for reference in self.catalog.proteoforms_for_accession(input.base_accession()) {
                if !matches(input, reference, &self.config) {
                    continue;
                }
                if let Some(reactions) = self.catalog.proteoforms_to_reactions.get(reference) {
                    result
                        .entities
                        .entry(MatchedEntity::Proteoform(reference.clone()))
                        .or_default()
                        .extend(reactions.iter().cloned());
                }
            }
        }
        result
    }

    /// Shared normalizing path: map submitted identifiers to protein
    /// accessions, match the proteins exactly, and record which submitted
    /// identifiers reached each matched protein.
    fn match_normalized<'i, I>(
        &self,
        inputs: I,
        table: &BTreeMap<String, BTreeSet<String>>,
    ) -> MatchedEntities
    where
        I: IntoIterator<Item = &'i String>,
    {
        let mut sources: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for key in inputs {
            if let Some(mapped) = table.get(key) {
                for protein in mapped {
                    sources
                        .entry(protein.clone())
                        .or_default()
                        .insert(key.clone());
                }
            }
        }

        let proteins: BTreeSet<String> = sources.keys().cloned().collect();
        let mut result = self.match_proteins(&proteins);
        sources.retain(|protein, _| {
            result
                .entities
                .contains_key(&MatchedEntity::Protein(protein.clone()))
        });
        result.sources = sources;
        result
    }
}
