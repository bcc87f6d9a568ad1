//! Catalog command - inspect a catalog file and report its contents.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::catalog::MappingCatalog;
use crate::cli::OutputFormat;

/// Arguments for the catalog command
#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog file (JSON, optionally gzip-compressed)
    #[arg(short, long)]
    pub catalog: PathBuf,
}

/// Execute the catalog command
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn run(args: CatalogArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let catalog = MappingCatalog::load_from_file(&args.catalog)
        .with_context(|| format!("Failed to load catalog from {}", args.catalog.display()))?;

    let top_level_count = catalog
        .pathways_to_top_level
        .values()
        .flatten()
        .collect::<std::collections::BTreeSet<_>>()
        .len();

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "path": args.catalog.display().to_string(),
                "reactions": catalog.reactions.len(),
                "pathways": catalog.pathways.len(),
                "top_level_pathways": top_level_count,
                "proteins": catalog.protein_universe(),
                "proteoforms": catalog.proteoform_universe(),
                "genes": catalog.genes_to_proteins.len(),
                "rsids": catalog.rsids_to_proteins.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            println!("Catalog: {}", args.catalog.display());
            println!("  Reactions:           {}", catalog.reactions.len());
            println!("  Pathways:            {}", catalog.pathways.len());
            println!("  Top-level pathways:  {top_level_count}");
            println!("  Proteins:            {}", catalog.protein_universe());
            println!("  Proteoforms:         {}", catalog.proteoform_universe());
            println!("  Gene symbols:        {}", catalog.genes_to_proteins.len());
            println!("  Variant rsids:       {}", catalog.rsids_to_proteins.len());
        }
    }

    Ok(())
}
