//! Search command - the full pipeline: preprocess the input list, match it
//! against the catalog, expand matches through the relation chain, score
//! pathway over-representation, and write the result tables.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::analysis::{analyse, PathwayAnalysis};
use crate::catalog::MappingCatalog;
use crate::cli::OutputFormat;
use crate::core::types::{InputKind, MatchPolicy};
use crate::matching::engine::{MatchedEntities, MatchingConfig, MatchingEngine};
use crate::parsing::input::{read_input_file, InputEntities};
use crate::search::{search, SearchAccumulator, SearchRow};

const SEPARATOR: &str = "\t";

/// Arguments for the search command
#[derive(Args)]
pub struct SearchArgs {
    /// Kind of identifiers in the input file
    #[arg(short = 't', long, value_enum)]
    pub input_type: InputKind,

    /// Input file: one identifier per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Catalog file (JSON, optionally gzip-compressed)
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Output directory for search.tsv and analysis.tsv
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Proteoform match policy
    #[arg(short = 'm', long, value_enum, default_value_t = MatchPolicy::Superset)]
    pub match_policy: MatchPolicy,

    /// Allowed distance between PTM site coordinates
    #[arg(short = 'r', long, default_value = "0")]
    pub margin: u64,

    /// Compare proteoform subsequence start/end coordinates as well
    #[arg(long)]
    pub subsequence_ranges: bool,

    /// Show top-level pathway columns in the output
    #[arg(long = "top-level-pathways", alias = "tlp")]
    pub top_level_pathways: bool,
}

/// Execute the search command
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the input file cannot
/// be read, or the output files cannot be written. Unmatched identifiers and
/// missing associations are normal outcomes, not errors.
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Catalog load failure is fatal before any matching begins
    let catalog = MappingCatalog::load_from_file(&args.catalog)
        .with_context(|| format!("Failed to load catalog from {}", args.catalog.display()))?;
    if verbose {
        eprintln!(
            "Catalog: {} reactions, {} pathways, {} proteins, {} proteoforms",
            catalog.reactions.len(),
            catalog.pathways.len(),
            catalog.protein_universe(),
            catalog.proteoform_universe(),
        );
    }

    let entities = read_input_file(&args.input, args.input_type)
        .with_context(|| format!("Failed to read input from {}", args.input.display()))?;
    tracing::info!("Preprocessing complete: {} input entities", entities.len());

    let config = MatchingConfig {
        policy: args.match_policy,
        margin: args.margin,
        use_subsequence_ranges: args.subsequence_ranges,
    };
    let engine = MatchingEngine::with_config(&catalog, config);

    // The ORA universe follows the input kind: protein-backed runs score
    // against the protein universe, proteoform runs against the proteoform
    // universe.
    let (matched, universe) = match &entities {
        InputEntities::Identifiers(ids) => {
            let matched = match args.input_type {
                InputKind::Gene => engine.match_genes(ids),
                InputKind::Ensembl => engine.match_ensembl(ids),
                InputKind::Rsid => engine.match_rsids(ids),
                _ => engine.match_proteins(ids),
            };
            (matched, catalog.protein_universe())
        }
        InputEntities::Proteoforms(proteoforms) => {
            (engine.match_proteoforms(proteoforms), catalog.proteoform_universe())
        }
    };
    tracing::info!("Matching complete: {} reference entities matched", matched.len());

    let mut accumulator = SearchAccumulator::new();
    let rows = search(&matched, &catalog, args.top_level_pathways, &mut accumulator);
    tracing::info!(
        "Search complete: {} rows, {} pathways hit",
        rows.len(),
        accumulator.hit_pathways.len()
    );

    let analysis = analyse(&catalog, universe, &accumulator);
    tracing::info!("Analysis complete: {} pathways scored", analysis.len());

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output directory {}", args.output.display()))?;
    let search_path = args.output.join("search.tsv");
    let analysis_path = args.output.join("analysis.tsv");
    write_search_tsv(&search_path, &rows, args.input_type, args.top_level_pathways)
        .with_context(|| format!("Failed to write {}", search_path.display()))?;
    write_analysis_tsv(&analysis_path, &analysis)
        .with_context(|| format!("Failed to write {}", analysis_path.display()))?;

    match format {
        OutputFormat::Text => {
            println!("Matching results written to: {}", search_path.display());
            println!("Analysis results written to: {}", analysis_path.display());
            print_text_summary(&entities, &matched, &accumulator, &analysis);
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "input_entities": entities.len(),
                "matched_entities": matched.len(),
                "hit_pathways": accumulator.hit_pathways.len(),
                "search_rows": rows,
                "analysis": analysis,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Tsv => {
            let mut stdout = std::io::stdout().lock();
            write_analysis_table(&mut stdout, &analysis)?;
        }
    }

    Ok(())
}

fn print_text_summary(
    entities: &InputEntities,
    matched: &MatchedEntities,
    accumulator: &SearchAccumulator,
    analysis: &[PathwayAnalysis],
) {
    let significant = analysis.iter().filter(|a| a.significant).count();
    println!();
    println!("Input entities:    {}", entities.len());
    println!("Matched entities:  {}", matched.len());
    println!("Hit pathways:      {}", accumulator.hit_pathways.len());
    println!("Significant:       {significant} (p < 0.05)");
}

fn write_search_tsv(
    path: &std::path::Path,
    rows: &[SearchRow],
    input_kind: InputKind,
    with_top_level: bool,
) -> anyhow::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);

    // Normalized runs lead with the identifier the user submitted
    let source_column = match input_kind {
        InputKind::Gene => Some("GENE"),
        InputKind::Ensembl => Some("ENSEMBL"),
        InputKind::Rsid => Some("RSID"),
        InputKind::Uniprot | InputKind::Proteoform => None,
    };

    let mut header: Vec<&str> = Vec::new();
    if let Some(column) = source_column {
        header.push(column);
    }
    header.push("UNIPROT");
    if input_kind == InputKind::Proteoform {
        header.push("PROTEOFORM");
    }
    header.extend([
        "REACTION_STID",
        "REACTION_DISPLAY_NAME",
        "PATHWAY_STID",
        "PATHWAY_DISPLAY_NAME",
    ]);
    if with_top_level {
        header.extend(["TOP_LEVEL_PATHWAY_STID", "TOP_LEVEL_PATHWAY_DISPLAY_NAME"]);
    }
    writeln!(file, "{}", header.join(SEPARATOR))?;

    for row in rows {
        let mut fields: Vec<&str> = Vec::new();
        if source_column.is_some() {
            fields.push(row.source.as_deref().unwrap_or(""));
        }
        fields.push(row.accession.as_str());
        if input_kind == InputKind::Proteoform {
            fields.push(row.proteoform.as_deref().unwrap_or(""));
        }
        fields.extend([
            row.reaction_st_id.as_str(),
            row.reaction_name.as_str(),
            row.pathway_st_id.as_str(),
            row.pathway_name.as_str(),
        ]);
        if with_top_level {
            fields.push(row.top_level_st_id.as_deref().unwrap_or(""));
            fields.push(row.top_level_name.as_deref().unwrap_or(""));
        }
        writeln!(file, "{}", fields.join(SEPARATOR))?;
    }

    Ok(())
}

fn write_analysis_tsv(path: &std::path::Path, analysis: &[PathwayAnalysis]) -> anyhow::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_analysis_table(&mut file, analysis)?;
    Ok(())
}

fn write_analysis_table(out: &mut impl Write, analysis: &[PathwayAnalysis]) -> anyhow::Result<()> {
    let header = [
        "Pathway StId",
        "Pathway Name",
        "# Entities Found",
        "# Entities Total",
        "Entities Ratio",
        "Entities P-Value",
        "Significant",
        "Entities FDR",
        "# Reactions Found",
        "# Reactions Total",
        "Reactions Ratio",
        "Entities Found",
        "Reactions Found",
    ];
    writeln!(out, "{}", header.join(SEPARATOR))?;

    for a in analysis {
        let fields = [
            a.st_id.clone(),
            format!("\"{}\"", a.display_name),
            a.entities_found.to_string(),
            a.entities_total.to_string(),
            a.entities_ratio.to_string(),
            a.entities_p_value.to_string(),
            if a.significant { "Yes" } else { "No" }.to_string(),
            a.entities_fdr.to_string(),
            a.reactions_found.to_string(),
            a.reactions_total.to_string(),
            a.reactions_ratio.to_string(),
            a.found_entities.join(","),
            a.found_reactions.join(","),
        ];
        writeln!(out, "{}", fields.join(SEPARATOR))?;
    }

    Ok(())
}
