//! Command-line interface for pathway-solver.
//!
//! Available commands:
//!
//! - **search**: match an identifier list against the catalog, expand the
//!   matches into reactions and pathways, and score pathway
//!   over-representation
//! - **catalog**: inspect a catalog file
//!
//! ## Usage
//!
//! ```text
//! # Proteins to pathways with enrichment statistics
//! pathway-solver search -t uniprot -i proteins.txt -c catalog.json -o out/
//!
//! # Proteoforms with a 3-residue site margin under the ONE policy
//! pathway-solver search -t proteoform -i proteoforms.txt -c catalog.json \
//!     -m one --margin 3 -o out/
//!
//! # Include top-level pathway columns
//! pathway-solver search -t gene -i genes.txt -c catalog.json --top-level-pathways
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod search;

#[derive(Parser)]
#[command(name = "pathway-solver")]
#[command(version)]
#[command(about = "Match proteins and proteoforms to curated pathways and score over-representation")]
#[command(
    long_about = "pathway-solver maps biological identifiers (proteins, genes, ensembl identifiers, variants, proteoforms) to curated pathway and reaction annotations from a static catalog, then scores which pathways are statistically over-represented among the matches.\n\nProteoform matching tolerates uncertainty in PTM site coordinates via a configurable margin and match policy (EXACT, ONE, SUPERSET)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for stdout
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the match -> search -> analysis pipeline over an input list
    Search(search::SearchArgs),

    /// Inspect a catalog file
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
