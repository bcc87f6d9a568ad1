//! Command-line interface tests
//!
//! These tests run the compiled binary against a small catalog written to a
//! temporary directory and verify the output tables and exit behavior.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pathway_solver::{CatalogBuilder, Pathway, Reaction};

/// Write a small catalog JSON file into `dir` and return its path.
fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let catalog = CatalogBuilder::new()
        .reaction(Reaction::new("R-RXN-1", "Phosphorylation of A"))
        .reaction(Reaction::new("R-RXN-2", "Degradation of B"))
        .pathway(Pathway::new("R-PWY-1", "Signaling", 2, 1))
        .pathway(Pathway::new("R-PWY-2", "Turnover", 1, 1))
        .protein_to_reaction("P11111", "R-RXN-1")
        .protein_to_reaction("P22222", "R-RXN-2")
        .proteoform_to_reaction("P11111;00046:100".parse().unwrap(), "R-RXN-1")
        .reaction_to_pathway("R-RXN-1", "R-PWY-1")
        .reaction_to_pathway("R-RXN-2", "R-PWY-2")
        .pathway_to_top_level("R-PWY-1", "R-TOP-1")
        .gene_to_protein("GENEA", "P11111")
        .ensembl_to_protein("ENSG00000151623", "P11111")
        .build();

    let path = dir.join("catalog.json");
    fs::write(&path, catalog.to_json().unwrap()).unwrap();
    path
}

fn cmd() -> Command {
    Command::cargo_bin("pathway-solver").unwrap()
}

#[test]
fn test_search_writes_output_tables() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = write_catalog(tmp.path());
    let input = tmp.path().join("proteins.txt");
    fs::write(&input, "P11111\nP99999\n").unwrap();
    let out = tmp.path().join("out");

    cmd()
        .args(["search", "-t", "uniprot"])
        .arg("-i")
        .arg(&input)
        .arg("-c")
        .arg(&catalog)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("search.tsv"));

    let search_tsv = fs::read_to_string(out.join("search.tsv")).unwrap();
    assert!(search_tsv.starts_with("UNIPROT\tREACTION_STID"));
    assert!(search_tsv.contains("P11111\tR-RXN-1\tPhosphorylation of A\tR-PWY-1\tSignaling"));
    assert!(
        !search_tsv.contains("P99999"),
        "unmatched accessions must not appear in the output"
    );

    let analysis_tsv = fs::read_to_string(out.join("analysis.tsv")).unwrap();
    assert!(analysis_tsv.starts_with("Pathway StId\tPathway Name"));
    assert!(analysis_tsv.contains("\tEntities Found\tReactions Found"));
    assert!(analysis_tsv.contains("R-PWY-1\t\"Signaling\"\t1\t2"));
    // Trailing list columns name the found identifiers
    assert!(analysis_tsv.contains("\tP11111\tR-RXN-1"));
    assert!(
        !analysis_tsv.contains("R-PWY-2"),
        "pathways with no hits are not scored"
    );
}

#[test]
fn test_search_top_level_flag_adds_columns() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = write_catalog(tmp.path());
    let input = tmp.path().join("proteins.txt");
    fs::write(&input, "P11111\n").unwrap();
    let out = tmp.path().join("out");

    cmd()
        .args(["search", "-t", "uniprot", "--top-level-pathways"])
        .arg("-i")
        .arg(&input)
        .arg("-c")
        .arg(&catalog)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let search_tsv = fs::read_to_string(out.join("search.tsv")).unwrap();
    assert!(search_tsv.contains("TOP_LEVEL_PATHWAY_STID"));
    assert!(search_tsv.contains("R-TOP-1"));
}

#[test]
fn test_search_proteoform_input_includes_proteoform_column() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = write_catalog(tmp.path());
    let input = tmp.path().join("proteoforms.txt");
    fs::write(&input, "P11111;00046:103\n").unwrap();
    let out = tmp.path().join("out");

    cmd()
        .args(["search", "-t", "proteoform", "--margin", "5"])
        .arg("-i")
        .arg(&input)
        .arg("-c")
        .arg(&catalog)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let search_tsv = fs::read_to_string(out.join("search.tsv")).unwrap();
    assert!(search_tsv.starts_with("UNIPROT\tPROTEOFORM\t"));
    assert!(search_tsv.contains("P11111\tP11111;00046:100\tR-RXN-1"));
}

#[test]
fn test_search_gene_input() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = write_catalog(tmp.path());
    let input = tmp.path().join("genes.txt");
    fs::write(&input, "GENEA\n").unwrap();
    let out = tmp.path().join("out");

    cmd()
        .args(["search", "-t", "gene"])
        .arg("-i")
        .arg(&input)
        .arg("-c")
        .arg(&catalog)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let search_tsv = fs::read_to_string(out.join("search.tsv")).unwrap();
    // Rows lead with the submitted gene symbol
    assert!(search_tsv.starts_with("GENE\tUNIPROT\t"));
    assert!(search_tsv.contains("GENEA\tP11111\tR-RXN-1"));
}

#[test]
fn test_search_ensembl_input() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = write_catalog(tmp.path());
    let input = tmp.path().join("ensembl.txt");
    fs::write(&input, "ENSG00000151623\n").unwrap();
    let out = tmp.path().join("out");

    cmd()
        .args(["search", "-t", "ensembl"])
        .arg("-i")
        .arg(&input)
        .arg("-c")
        .arg(&catalog)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let search_tsv = fs::read_to_string(out.join("search.tsv")).unwrap();
    assert!(search_tsv.starts_with("ENSEMBL\tUNIPROT\t"));
    assert!(search_tsv.contains("ENSG00000151623\tP11111\tR-RXN-1"));
}

#[test]
fn test_search_json_format() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = write_catalog(tmp.path());
    let input = tmp.path().join("proteins.txt");
    fs::write(&input, "P11111\n").unwrap();
    let out = tmp.path().join("out");

    cmd()
        .args(["search", "-t", "uniprot", "--format", "json"])
        .arg("-i")
        .arg(&input)
        .arg("-c")
        .arg(&catalog)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hit_pathways\": 1"))
        .stdout(predicate::str::contains("\"analysis\""));
}

#[test]
fn test_search_missing_catalog_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("proteins.txt");
    fs::write(&input, "P11111\n").unwrap();

    cmd()
        .args(["search", "-t", "uniprot"])
        .arg("-i")
        .arg(&input)
        .arg("-c")
        .arg(tmp.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

#[test]
fn test_search_rejects_unknown_policy() {
    cmd()
        .args([
            "search",
            "-t",
            "uniprot",
            "-i",
            "x.txt",
            "-c",
            "c.json",
            "-m",
            "fuzzy",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_catalog_command_reports_counts() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = write_catalog(tmp.path());

    cmd()
        .arg("catalog")
        .arg("-c")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Reactions:           2"))
        .stdout(predicate::str::contains("Pathways:            2"));
}
