use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::pathway::Pathway;
use crate::core::proteoform::Proteoform;
use crate::core::reaction::Reaction;

/// Deterministic many-to-many relation table
pub type Multimap<K, V> = BTreeMap<K, BTreeSet<V>>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog format version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,

    pub reactions: Vec<Reaction>,
    pub pathways: Vec<Pathway>,

    /// Gene symbol -> protein accessions
    #[serde(default)]
    pub genes_to_proteins: Multimap<String, String>,

    /// Ensembl identifier -> protein accessions
    #[serde(default)]
    pub ensembl_to_proteins: Multimap<String, String>,

    /// Variant rsid -> protein accessions
    #[serde(default)]
    pub rsids_to_proteins: Multimap<String, String>,

    /// Protein accession -> reaction st_ids
    #[serde(default)]
    pub proteins_to_reactions: Multimap<String, String>,

    /// Reference proteoform (SIMPLE notation) -> reaction st_ids
    #[serde(default)]
    pub proteoforms_to_reactions: Multimap<Proteoform, String>,

    /// Reaction st_id -> pathway st_ids
    #[serde(default)]
    pub reactions_to_pathways: Multimap<String, String>,

    /// Pathway st_id -> top-level pathway st_ids
    #[serde(default)]
    pub pathways_to_top_level: Multimap<String, String>,
}

/// The static lookup tables for one run: reactions, pathways, and the
/// relation chain entity -> reaction -> pathway -> top-level pathway.
///
/// Loaded once before matching begins and read-only afterwards. All tables
/// are ordered maps so every traversal of the catalog is deterministic.
#[derive(Debug, Default)]
pub struct MappingCatalog {
    /// Reaction st_id -> reaction
    pub reactions: BTreeMap<String, Reaction>,

    /// Pathway st_id -> pathway
    pub pathways: BTreeMap<String, Pathway>,

    pub genes_to_proteins: Multimap<String, String>,
    pub ensembl_to_proteins: Multimap<String, String>,
    pub rsids_to_proteins: Multimap<String, String>,
    pub proteins_to_reactions: Multimap<String, String>,
    pub proteoforms_to_reactions: Multimap<Proteoform, String>,
    pub reactions_to_pathways: Multimap<String, String>,
    pub pathways_to_top_level: Multimap<String, String>,

    /// Index: base accession -> reference proteoforms carrying it.
    /// Rebuilt on load; lets the matcher scan only the relevant bucket
    /// instead of the whole proteoform table.
    proteoforms_by_accession: BTreeMap<String, Vec<Proteoform>>,
}

impl MappingCatalog {
    /// Load a catalog from a JSON file, gzip-compressed when the path ends
    /// in `.gz`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Read`] if the file cannot be read or
    /// decompressed, [`CatalogError::Parse`] if the content is not a valid
    /// catalog. Either failure aborts the run before matching begins.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = if path.extension().is_some_and(|e| e == "gz") {
            let file = std::fs::File::open(path)?;
            let mut decoder = GzDecoder::new(file);
            let mut s = String::new();
            decoder.read_to_string(&mut s)?;
            s
        } else {
            std::fs::read_to_string(path)?
        };
        Self::from_json(&content)
    }

    /// Parse a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        Ok(Self::from_data(data))
    }

    /// Build the indexed catalog from its serializable form
    #[must_use]
    pub fn from_data(data: CatalogData) -> Self {
        let mut catalog = Self {
            reactions: data
                .reactions
                .into_iter()
                .map(|r| (r.st_id.clone(), r))
                .collect(),
            pathways: data
                .pathways
                .into_iter()
                .map(|p| (p.st_id.clone(), p))
                .collect(),
            genes_to_proteins: data.genes_to_proteins,
            ensembl_to_proteins: data.ensembl_to_proteins,
            rsids_to_proteins: data.rsids_to_proteins,
            proteins_to_reactions: data.proteins_to_reactions,
            proteoforms_to_reactions: data.proteoforms_to_reactions,
            reactions_to_pathways: data.reactions_to_pathways,
            pathways_to_top_level: data.pathways_to_top_level,
            proteoforms_by_accession: BTreeMap::new(),
        };
        catalog.rebuild_indexes();
        catalog
    }

    /// Rebuild the derived indexes after modifying the relation tables
    pub fn rebuild_indexes(&mut self) {
        self.proteoforms_by_accession.clear();
        for proteoform in self.proteoforms_to_reactions.keys() {
            self.proteoforms_by_accession
                .entry(proteoform.base_accession().to_string())
                .or_default()
                .push(proteoform.clone());
        }
    }

    /// Reference proteoforms sharing the given base accession
    pub fn proteoforms_for_accession(&self, base_accession: &str) -> &[Proteoform] {
        self.proteoforms_by_accession
            .get(base_accession)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of distinct proteins in the reference universe
    #[must_use]
    pub fn protein_universe(&self) -> usize {
        self.proteins_to_reactions.len()
    }

    /// Number of distinct proteoforms in the reference universe
    #[must_use]
    pub fn proteoform_universe(&self) -> usize {
        self.proteoforms_to_reactions.len()
    }

    /// Export the catalog to pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            reactions: self.reactions.values().cloned().collect(),
            pathways: self.pathways.values().cloned().collect(),
            genes_to_proteins: self.genes_to_proteins.clone(),
            ensembl_to_proteins: self.ensembl_to_proteins.clone(),
            rsids_to_proteins: self.rsids_to_proteins.clone(),
            proteins_to_reactions: self.proteins_to_reactions.clone(),
            proteoforms_to_reactions: self.proteoforms_to_reactions.clone(),
            reactions_to_pathways: self.reactions_to_pathways.clone(),
            pathways_to_top_level: self.pathways_to_top_level.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}
