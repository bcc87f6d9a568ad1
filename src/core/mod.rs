//! Core data types for proteoforms, reactions, and pathways.

pub mod pathway;
pub mod proteoform;
pub mod reaction;
pub mod types;

pub use pathway::Pathway;
pub use proteoform::{Modification, NotationError, Proteoform, UNKNOWN_MOD_TYPE};
pub use reaction::Reaction;
pub use types::{InputKind, MatchPolicy, Role};
