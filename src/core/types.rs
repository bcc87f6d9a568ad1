use serde::{Deserialize, Serialize};

/// Policy used to decide whether an input proteoform is equivalent to a
/// reference proteoform from the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Modification sets must be identical: same cardinality and a bijection
    /// between input and reference modifications within the margin.
    Exact,
    /// At least one input modification corresponds to a reference modification.
    One,
    /// Every reference modification has a corresponding input modification;
    /// the input may carry extras.
    #[default]
    Superset,
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "EXACT"),
            Self::One => write!(f, "ONE"),
            Self::Superset => write!(f, "SUPERSET"),
        }
    }
}

/// Kind of identifiers in an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Gene symbols, normalized to protein accessions via the catalog
    Gene,
    /// Ensembl gene/transcript/protein identifiers, normalized to protein
    /// accessions via the catalog
    Ensembl,
    /// UniProt protein accessions
    Uniprot,
    /// Proteoforms in SIMPLE notation (`ACC[-N];MOD:COORD,...`)
    Proteoform,
    /// Variant rsids, normalized to protein accessions via the catalog
    Rsid,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gene => write!(f, "GENE"),
            Self::Ensembl => write!(f, "ENSEMBL"),
            Self::Uniprot => write!(f, "UNIPROT"),
            Self::Proteoform => write!(f, "PROTEOFORM"),
            Self::Rsid => write!(f, "RSID"),
        }
    }
}

/// Structural role of a participant within a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Input,
    Output,
    CatalystActivity,
    RegulatedBy,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
            Self::CatalystActivity => write!(f, "catalystActivity"),
            Self::RegulatedBy => write!(f, "regulatedBy"),
        }
    }
}
