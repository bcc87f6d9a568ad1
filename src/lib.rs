//! # pathway-solver
//!
//! A library for mapping biological identifiers to curated pathway
//! annotations and scoring pathway over-representation.
//!
//! Given a list of proteins, genes, variants, or proteoforms, connecting them
//! to the reactions and pathways they participate in is harder than a plain
//! lookup: a phosphopeptide experiment reports modification sites with
//! positional uncertainty, and annotation databases record proteoforms at a
//! finer or coarser grain than the experiment measured.
//!
//! `pathway-solver` solves this by matching input entities against a static
//! catalog of reference annotations, with configurable tolerance for
//! proteoform modification sites, then expanding the matches through the
//! entity -> reaction -> pathway chain and scoring each hit pathway with an
//! over-representation test.
//!
//! ## Features
//!
//! - **Proteoform matching**: EXACT, ONE, and SUPERSET policies with a
//!   coordinate tolerance margin for PTM sites
//! - **Identifier normalization**: gene symbols, Ensembl identifiers, and
//!   variant rsids are mapped to protein accessions before matching, and
//!   output rows keep the submitted identifier
//! - **Relation expansion**: matched entities expand to reactions, pathways,
//!   and optionally top-level pathways
//! - **Enrichment statistics**: hypergeometric p-values with
//!   Benjamini-Hochberg FDR correction
//!
//! ## Example
//!
//! ```rust
//! use pathway_solver::{CatalogBuilder, MatchingEngine, Pathway, Reaction};
//! use pathway_solver::analysis::analyse;
//! use pathway_solver::search::{search, SearchAccumulator};
//!
//! let catalog = CatalogBuilder::new()
//!     .reaction(Reaction::new("R-RXN-1", "TP53 tetramerization"))
//!     .pathway(Pathway::new("R-HSA-1", "Signal Transduction", 3, 2))
//!     .protein_to_reaction("P04637", "R-RXN-1")
//!     .reaction_to_pathway("R-RXN-1", "R-HSA-1")
//!     .build();
//!
//! let engine = MatchingEngine::new(&catalog);
//! let inputs = vec!["P04637".to_string()];
//! let matched = engine.match_proteins(&inputs);
//!
//! let mut accumulator = SearchAccumulator::new();
//! let rows = search(&matched, &catalog, false, &mut accumulator);
//! let results = analyse(&catalog, catalog.protein_universe(), &accumulator);
//!
//! for r in &results {
//!     println!("{}: p = {:.4}", r.st_id, r.entities_p_value);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Mapping catalog storage, indexing, and construction
//! - [`core`]: Core data types for proteoforms, reactions, and pathways
//! - [`matching`]: Matching engine and proteoform comparison policies
//! - [`search`]: Relation-chain expansion and hit-set accumulation
//! - [`analysis`]: Over-representation statistics
//! - [`parsing`]: Input list parsing and validation
//! - [`cli`]: Command-line interface implementation

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod search;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::builder::CatalogBuilder;
pub use catalog::store::MappingCatalog;
pub use core::pathway::Pathway;
pub use core::proteoform::{Modification, Proteoform};
pub use core::reaction::Reaction;
pub use core::types::*;
pub use matching::engine::{MatchedEntities, MatchedEntity, MatchingConfig, MatchingEngine};
