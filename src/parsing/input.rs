use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

use crate::core::proteoform::Proteoform;
use crate::core::types::InputKind;
use crate::utils::validation::{
    is_valid_accession, is_valid_ensembl, is_valid_gene_symbol, is_valid_rsid,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parsed and validated input entities, ready for the matching stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEntities {
    /// Plain identifiers: protein accessions, gene symbols, or rsids
    Identifiers(BTreeSet<String>),
    /// Proteoforms in SIMPLE notation
    Proteoforms(BTreeSet<Proteoform>),
}

impl InputEntities {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Identifiers(set) => set.len(),
            Self::Proteoforms(set) => set.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read and parse an identifier list file for the given input kind.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read. Malformed rows are
/// never an error: they are dropped with a warning carrying the 1-based row
/// number, and an input where every row was dropped is simply empty.
pub fn read_input_file(path: &Path, kind: InputKind) -> Result<InputEntities, ParseError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_input_text(&content, kind))
}

/// Parse identifier list text: one identifier per line, `#` comments and
/// blank lines skipped, invalid rows dropped with a warning.
#[must_use]
pub fn parse_input_text(text: &str, kind: InputKind) -> InputEntities {
    match kind {
        InputKind::Uniprot => InputEntities::Identifiers(parse_identifiers(
            text,
            is_valid_accession,
            "protein accession",
        )),
        InputKind::Gene => {
            InputEntities::Identifiers(parse_identifiers(text, is_valid_gene_symbol, "gene symbol"))
        }
        InputKind::Ensembl => InputEntities::Identifiers(parse_identifiers(
            text,
            is_valid_ensembl,
            "ensembl identifier",
        )),
        InputKind::Rsid => InputEntities::Identifiers(parse_identifiers(text, is_valid_rsid, "rsid")),
        InputKind::Proteoform => InputEntities::Proteoforms(parse_proteoforms(text)),
    }
}

fn parse_identifiers(
    text: &str,
    is_valid: fn(&str) -> bool,
    what: &str,
) -> BTreeSet<String> {
    let mut entities = BTreeSet::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Row numbers in warnings are 1-based for user friendliness
        if is_valid(line) {
            entities.insert(line.to_string());
        } else {
            tracing::warn!("Row {} is not a valid {what}, dropped: '{line}'", i + 1);
        }
    }
    entities
}

fn parse_proteoforms(text: &str) -> BTreeSet<Proteoform> {
    let mut entities = BTreeSet::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<Proteoform>() {
            Ok(proteoform) => {
                entities.insert(proteoform);
            }
            Err(err) => {
                tracing::warn!("Row {} is not a valid proteoform, dropped: {err}", i + 1);
            }
        }
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_protein_list_drops_invalid_rows() {
        let text = "P08235\n# a comment\n\nnot-valid\nQ9Y6K9\n";
        let InputEntities::Identifiers(set) = parse_input_text(text, InputKind::Uniprot) else {
            panic!("expected identifiers");
        };
        assert_eq!(set.len(), 2);
        assert!(set.contains("P08235"));
        assert!(set.contains("Q9Y6K9"));
    }

    #[test]
    fn test_parse_proteoform_list() {
        let text = "P08235-2;\nP02545;00046:395\nbroken;;;\n";
        let InputEntities::Proteoforms(set) = parse_input_text(text, InputKind::Proteoform) else {
            panic!("expected proteoforms");
        };
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parse_ensembl_list() {
        let text = "ENSG00000151623\nnot-ensembl\n";
        let InputEntities::Identifiers(set) = parse_input_text(text, InputKind::Ensembl) else {
            panic!("expected identifiers");
        };
        assert_eq!(set.len(), 1);
        assert!(set.contains("ENSG00000151623"));
    }

    #[test]
    fn test_parse_deduplicates() {
        let text = "P08235\nP08235\n";
        assert_eq!(parse_input_text(text, InputKind::Uniprot).len(), 1);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let parsed = parse_input_text("# only comments\n\n", InputKind::Rsid);
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_input_file(Path::new("/nonexistent/input.txt"), InputKind::Uniprot)
            .unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
