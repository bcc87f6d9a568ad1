//! Centralized validation helpers for identifier formats.

/// Validate a UniProt accession, optionally carrying an isoform suffix.
///
/// Accepts the 6- and 10-character accession forms (`P08235`, `A0A075B6H7`)
/// plus an optional numeric isoform suffix (`P08235-2`).
///
/// # Examples
///
/// ```
/// use pathway_solver::utils::validation::is_valid_accession;
///
/// assert!(is_valid_accession("P08235"));
/// assert!(is_valid_accession("P08235-2"));
/// assert!(is_valid_accession("A0A075B6H7"));
/// assert!(!is_valid_accession("p08235"));
/// assert!(!is_valid_accession("P08235-"));
/// ```
#[must_use]
pub fn is_valid_accession(s: &str) -> bool {
    let (base, isoform) = match s.split_once('-') {
        Some((base, iso)) => (base, Some(iso)),
        None => (s, None),
    };

    if let Some(iso) = isoform {
        if iso.is_empty() || !iso.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }

    if base.len() != 6 && base.len() != 10 {
        return false;
    }

    let mut chars = base.chars();
    // First character is a letter, second a digit, rest uppercase alphanumeric
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_uppercase());
    let second_ok = chars.next().is_some_and(|c| c.is_ascii_digit());
    first_ok && second_ok && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Validate a five-character PSI-MOD type code (e.g. `00046`)
#[must_use]
pub fn is_valid_psi_mod(s: &str) -> bool {
    s.len() == 5 && s.chars().all(|c| c.is_ascii_digit())
}

/// Validate an Ensembl identifier: an `ENS` prefix with an uppercase feature
/// code, followed by a numeric part (`ENSG00000151623`, `ENST00000358102`).
#[must_use]
pub fn is_valid_ensembl(s: &str) -> bool {
    let Some(rest) = s.strip_prefix("ENS") else {
        return false;
    };
    let numeric_start = rest.find(|c: char| c.is_ascii_digit());
    let Some(pos) = numeric_start else {
        return false;
    };
    rest[..pos].chars().all(|c| c.is_ascii_uppercase())
        && rest[pos..].chars().all(|c| c.is_ascii_digit())
        && !rest[pos..].is_empty()
}

/// Validate a variant rsid (`rs` followed by digits)
#[must_use]
pub fn is_valid_rsid(s: &str) -> bool {
    s.len() > 2 && s.starts_with("rs") && s[2..].chars().all(|c| c.is_ascii_digit())
}

/// Validate a gene symbol: uppercase alphanumeric with `-` or `_` allowed
/// after the first character.
#[must_use]
pub fn is_valid_gene_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    first_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accession_forms() {
        assert!(is_valid_accession("P08235"));
        assert!(is_valid_accession("Q9Y6K9"));
        assert!(is_valid_accession("A0A075B6H7"));
        assert!(is_valid_accession("P08235-11"));
        assert!(!is_valid_accession(""));
        assert!(!is_valid_accession("P0823"));
        assert!(!is_valid_accession("P08235-2a"));
        assert!(!is_valid_accession("08235P"));
    }

    #[test]
    fn test_psi_mod_codes() {
        assert!(is_valid_psi_mod("00046"));
        assert!(is_valid_psi_mod("00000"));
        assert!(!is_valid_psi_mod("0004"));
        assert!(!is_valid_psi_mod("0004a"));
    }

    #[test]
    fn test_ensembl_identifiers() {
        assert!(is_valid_ensembl("ENSG00000151623"));
        assert!(is_valid_ensembl("ENST00000358102"));
        assert!(is_valid_ensembl("ENSP00000350815"));
        assert!(!is_valid_ensembl("ENSG"));
        assert!(!is_valid_ensembl("ENS00000151623x"));
        assert!(!is_valid_ensembl("NSG00000151623"));
    }

    #[test]
    fn test_rsids() {
        assert!(is_valid_rsid("rs121918464"));
        assert!(!is_valid_rsid("rs"));
        assert!(!is_valid_rsid("121918464"));
    }

    #[test]
    fn test_gene_symbols() {
        assert!(is_valid_gene_symbol("NR3C2"));
        assert!(is_valid_gene_symbol("HLA-A"));
        assert!(!is_valid_gene_symbol(""));
        assert!(!is_valid_gene_symbol("-ABC"));
    }
}
