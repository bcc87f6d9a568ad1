//! Matching engine deciding which reference entities are equivalent to the
//! input set, including the policy-driven proteoform comparator.

pub mod engine;
pub mod proteoform;

pub use engine::{MatchedEntities, MatchedEntity, MatchingConfig, MatchingEngine};
pub use proteoform::{coordinates_match, matches};
