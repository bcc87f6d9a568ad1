use crate::catalog::store::MappingCatalog;
use crate::core::pathway::Pathway;
use crate::core::proteoform::Proteoform;
use crate::core::reaction::Reaction;

/// Programmatic construction of a [`MappingCatalog`].
///
/// Keeps the relation tables consistent as entries are added: mapping a
/// proteoform to a reaction also registers the proteoform under its base
/// accession, so the matcher's candidate index stays complete.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: MappingCatalog,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn reaction(mut self, reaction: Reaction) -> Self {
        self.catalog
            .reactions
            .insert(reaction.st_id.clone(), reaction);
        self
    }

    #[must_use]
    pub fn pathway(mut self, pathway: Pathway) -> Self {
        self.catalog.pathways.insert(pathway.st_id.clone(), pathway);
        self
    }

    #[must_use]
    pub fn gene_to_protein(mut self, gene: impl Into<String>, protein: impl Into<String>) -> Self {
        self.catalog
            .genes_to_proteins
            .entry(gene.into())
            .or_default()
            .insert(protein.into());
        self
    }

    #[must_use]
    pub fn ensembl_to_protein(
        mut self,
        ensembl: impl Into<String>,
        protein: impl Into<String>,
    ) -> Self {
        self.catalog
            .ensembl_to_proteins
            .entry(ensembl.into())
            .or_default()
            .insert(protein.into());
        self
    }

    #[must_use]
    pub fn rsid_to_protein(mut self, rsid: impl Into<String>, protein: impl Into<String>) -> Self {
        self.catalog
            .rsids_to_proteins
            .entry(rsid.into())
            .or_default()
            .insert(protein.into());
        self
    }

    #[must_use]
    pub fn protein_to_reaction(
        mut self,
        protein: impl Into<String>,
        reaction: impl Into<String>,
    ) -> Self {
        self.catalog
            .proteins_to_reactions
            .entry(protein.into())
            .or_default()
            .insert(reaction.into());
        self
    }

    #[must_use]
    pub fn proteoform_to_reaction(
        mut self,
        proteoform: Proteoform,
        reaction: impl Into<String>,
    ) -> Self {
        self.catalog
            .proteoforms_to_reactions
            .entry(proteoform)
            .or_default()
            .insert(reaction.into());
        self
    }

    #[must_use]
    pub fn reaction_to_pathway(
        mut self,
        reaction: impl Into<String>,
        pathway: impl Into<String>,
    ) -> Self {
        self.catalog
            .reactions_to_pathways
            .entry(reaction.into())
            .or_default()
            .insert(pathway.into());
        self
    }

    #[must_use]
    pub fn pathway_to_top_level(
        mut self,
        pathway: impl Into<String>,
        top_level: impl Into<String>,
    ) -> Self {
        self.catalog
            .pathways_to_top_level
            .entry(pathway.into())
            .or_default()
            .insert(top_level.into());
        self
    }

    #[must_use]
    pub fn build(mut self) -> MappingCatalog {
        self.catalog.rebuild_indexes();
        self.catalog
    }
}
