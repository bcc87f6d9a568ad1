//! Over-representation analysis: score every pathway reached by the search
//! stage for statistical enrichment of the hit entities.

pub mod hypergeometric;

use serde::Serialize;

use crate::catalog::store::MappingCatalog;
use crate::search::SearchAccumulator;

pub use hypergeometric::survival;

/// Fixed significance threshold for the per-pathway flag
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Statistics computed for one hit pathway
#[derive(Debug, Clone, Serialize)]
pub struct PathwayAnalysis {
    pub st_id: String,
    pub display_name: String,

    pub entities_found: usize,
    pub entities_total: usize,
    /// `K / N`: the pathway's share of the reference universe
    pub entities_ratio: f64,
    /// Upper-tail hypergeometric probability of the observed overlap
    pub entities_p_value: f64,
    /// `entities_p_value < 0.05`
    pub significant: bool,
    /// Benjamini-Hochberg adjusted p-value across all hit pathways
    pub entities_fdr: f64,

    pub reactions_found: usize,
    pub reactions_total: usize,
    pub reactions_ratio: f64,

    /// Distinct entity identifiers found in the pathway, sorted
    pub found_entities: Vec<String>,

    /// Distinct reaction identifiers found in the pathway, sorted
    pub found_reactions: Vec<String>,
}

/// Benjamini-Hochberg step-up adjustment.
///
/// Returns the adjusted values in the same order as the input: sort
/// ascending, scale rank `i` (1-based) of `m` by `m / i`, enforce
/// monotonicity with a running minimum from the largest rank down, clip to
/// `[0, 1]`.
#[must_use]
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    if m == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| {
        p_values[a]
            .partial_cmp(&p_values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut adjusted = vec![0.0_f64; m];
    let mut running_min = f64::INFINITY;
    for rank in (0..m).rev() {
        let idx = order[rank];
        let scaled = p_values[idx] * (m as f64) / ((rank + 1) as f64);
        running_min = running_min.min(scaled);
        adjusted[idx] = running_min.clamp(0.0, 1.0);
    }
    adjusted
}

/// Score every pathway in the accumulator's hit set.
///
/// `universe` is `N`, the number of distinct entities in the whole reference
/// universe; the sample size `n` is the number of distinct hit entities. The
/// result covers exactly the hit pathways, sorted by ascending p-value then
/// pathway id.
#[must_use]
pub fn analyse(
    catalog: &MappingCatalog,
    universe: usize,
    accumulator: &SearchAccumulator,
) -> Vec<PathwayAnalysis> {
    let sample = accumulator.hit_entity_count();

    let mut results: Vec<PathwayAnalysis> = Vec::with_capacity(accumulator.hit_pathways.len());
    for st_id in &accumulator.hit_pathways {
        let Some(pathway) = catalog.pathways.get(st_id) else {
            tracing::debug!("Hit pathway {st_id} has no catalog entry, skipping");
            continue;
        };

        let found_entities: Vec<String> = accumulator
            .entities_found
            .get(st_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        let found_reactions: Vec<String> = accumulator
            .reactions_found
            .get(st_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        let entities_found = found_entities.len();
        let reactions_found = found_reactions.len();

        let entities_total = pathway.num_entities_total;
        let reactions_total = pathway.num_reactions_total;

        let entities_ratio = ratio(entities_total, universe);
        let reactions_ratio = ratio(reactions_found, reactions_total);

        let entities_p_value = if entities_total == 0 {
            1.0
        } else {
            survival(universe, entities_total, sample, entities_found)
        };

        results.push(PathwayAnalysis {
            st_id: st_id.clone(),
            display_name: pathway.display_name.clone(),
            entities_found,
            entities_total,
            entities_ratio,
            entities_p_value,
            significant: entities_p_value < SIGNIFICANCE_THRESHOLD,
            entities_fdr: 1.0,
            reactions_found,
            reactions_total,
            reactions_ratio,
            found_entities,
            found_reactions,
        });
    }

    let p_values: Vec<f64> = results.iter().map(|r| r.entities_p_value).collect();
    for (result, fdr) in results.iter_mut().zip(benjamini_hochberg(&p_values)) {
        result.entities_fdr = fdr;
    }

    results.sort_by(|a, b| {
        a.entities_p_value
            .partial_cmp(&b.entities_p_value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.st_id.cmp(&b.st_id))
    });

    results
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 || numerator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builder::CatalogBuilder;
    use crate::core::pathway::Pathway;

    const EPS: f64 = 1e-6;

    fn accumulator_with(
        pathway: &str,
        entities: &[&str],
        reactions: &[&str],
        sample: &[&str],
    ) -> SearchAccumulator {
        let mut acc = SearchAccumulator::new();
        acc.hit_pathways.insert(pathway.to_string());
        for e in entities {
            acc.entities_found
                .entry(pathway.to_string())
                .or_default()
                .insert((*e).to_string());
        }
        for r in reactions {
            acc.reactions_found
                .entry(pathway.to_string())
                .or_default()
                .insert((*r).to_string());
        }
        for s in sample {
            acc.hit_proteins.insert((*s).to_string());
        }
        acc
    }

    #[test]
    fn test_reference_scenario() {
        // Universe N=100, pathway K=10 total entities, k=4 found, sample n=20
        let catalog = CatalogBuilder::new()
            .pathway(Pathway::new("R-HSA-P1", "Pathway one", 10, 5))
            .build();

        let sample: Vec<String> = (0..20).map(|i| format!("P{i:05}")).collect();
        let sample_refs: Vec<&str> = sample.iter().map(String::as_str).collect();
        let acc = accumulator_with(
            "R-HSA-P1",
            &["P00000", "P00001", "P00002", "P00003"],
            &["R-HSA-1", "R-HSA-2"],
            &sample_refs,
        );

        let results = analyse(&catalog, 100, &acc);
        assert_eq!(results.len(), 1);
        let r = &results[0];

        assert_eq!(r.entities_found, 4);
        assert!((r.entities_ratio - 0.10).abs() < EPS);
        assert!((r.entities_p_value - 0.109_572).abs() < EPS);
        assert!(!r.significant);
        // Single pathway: FDR equals the raw p-value
        assert!((r.entities_fdr - r.entities_p_value).abs() < EPS);
        assert!((r.reactions_ratio - 0.4).abs() < EPS);
        // Found identifier lists mirror the counts, sorted
        assert_eq!(r.found_entities, ["P00000", "P00001", "P00002", "P00003"]);
        assert_eq!(r.found_reactions, ["R-HSA-1", "R-HSA-2"]);
    }

    #[test]
    fn test_whole_universe_pathway_is_not_enriched() {
        // K = N and k = n: p-value must be exactly 1.0
        let catalog = CatalogBuilder::new()
            .pathway(Pathway::new("R-HSA-P1", "Everything", 50, 5))
            .build();

        let sample: Vec<String> = (0..10).map(|i| format!("P{i:05}")).collect();
        let sample_refs: Vec<&str> = sample.iter().map(String::as_str).collect();
        let acc = accumulator_with("R-HSA-P1", &sample_refs, &[], &sample_refs);

        let results = analyse(&catalog, 50, &acc);
        assert!((results[0].entities_p_value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_zero_found_entities() {
        let catalog = CatalogBuilder::new()
            .pathway(Pathway::new("R-HSA-P1", "Untouched", 10, 5))
            .build();
        let acc = accumulator_with("R-HSA-P1", &[], &[], &["P00001"]);

        let results = analyse(&catalog, 100, &acc);
        assert!((results[0].entities_p_value - 1.0).abs() < EPS);
        assert_eq!(results[0].entities_found, 0);
    }

    #[test]
    fn test_zero_total_entities() {
        // K = 0: ratio 0 and p-value 1.0
        let catalog = CatalogBuilder::new()
            .pathway(Pathway::new("R-HSA-P1", "Empty", 0, 0))
            .build();
        let acc = accumulator_with("R-HSA-P1", &[], &[], &["P00001"]);

        let results = analyse(&catalog, 100, &acc);
        assert!((results[0].entities_ratio - 0.0).abs() < EPS);
        assert!((results[0].entities_p_value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_empty_universe_or_sample_gives_p_one() {
        let catalog = CatalogBuilder::new()
            .pathway(Pathway::new("R-HSA-P1", "Pathway", 10, 5))
            .build();

        // Empty sample
        let acc = accumulator_with("R-HSA-P1", &[], &[], &[]);
        let results = analyse(&catalog, 100, &acc);
        assert!((results[0].entities_p_value - 1.0).abs() < EPS);

        // Empty universe
        let acc = accumulator_with("R-HSA-P1", &["P00001"], &[], &["P00001"]);
        let results = analyse(&catalog, 0, &acc);
        assert!((results[0].entities_p_value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_oversized_pathway_totals_score_as_unenriched() {
        // A catalog can claim more pathway entities than the universe holds;
        // the score falls back to 1.0 instead of indexing out of range
        let catalog = CatalogBuilder::new()
            .pathway(Pathway::new("R-HSA-P1", "Overstated", 50, 5))
            .build();
        let acc = accumulator_with("R-HSA-P1", &["P00001"], &[], &["P00001"]);

        let results = analyse(&catalog, 10, &acc);
        assert!((results[0].entities_p_value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_only_hit_pathways_are_scored() {
        let catalog = CatalogBuilder::new()
            .pathway(Pathway::new("R-HSA-P1", "Hit", 10, 5))
            .pathway(Pathway::new("R-HSA-P2", "Not hit", 10, 5))
            .build();
        let acc = accumulator_with("R-HSA-P1", &["P00001"], &[], &["P00001"]);

        let results = analyse(&catalog, 100, &acc);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].st_id, "R-HSA-P1");
    }

    #[test]
    fn test_benjamini_hochberg_known_values() {
        let adjusted = benjamini_hochberg(&[0.005, 0.05, 0.1]);
        assert!((adjusted[0] - 0.015).abs() < EPS);
        assert!((adjusted[1] - 0.075).abs() < EPS);
        assert!((adjusted[2] - 0.1).abs() < EPS);
    }

    #[test]
    fn test_benjamini_hochberg_running_minimum() {
        // Rank 2 scales above rank 3's value, the running minimum caps it
        let adjusted = benjamini_hochberg(&[0.01, 0.04, 0.042]);
        assert!((adjusted[0] - 0.03).abs() < EPS);
        assert!((adjusted[1] - 0.042).abs() < EPS);
        assert!((adjusted[2] - 0.042).abs() < EPS);
    }

    #[test]
    fn test_benjamini_hochberg_monotone_over_sorted_input() {
        let p = [0.001, 0.008, 0.039, 0.041, 0.042, 0.06, 0.074, 0.205];
        let adjusted = benjamini_hochberg(&p);
        // Input already sorted ascending: adjusted values are non-decreasing
        for pair in adjusted.windows(2) {
            assert!(pair[0] <= pair[1] + EPS);
        }
        // And clipped to [0, 1]
        assert!(adjusted.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_benjamini_hochberg_empty() {
        assert!(benjamini_hochberg(&[]).is_empty());
    }

    #[test]
    fn test_results_sorted_by_p_value() {
        let catalog = CatalogBuilder::new()
            .pathway(Pathway::new("R-HSA-P1", "Broad", 50, 5))
            .pathway(Pathway::new("R-HSA-P2", "Tight", 5, 5))
            .build();

        let mut acc = SearchAccumulator::new();
        for p in ["R-HSA-P1", "R-HSA-P2"] {
            acc.hit_pathways.insert(p.to_string());
        }
        for e in ["P00001", "P00002", "P00003"] {
            acc.hit_proteins.insert(e.to_string());
            acc.entities_found
                .entry("R-HSA-P2".to_string())
                .or_default()
                .insert(e.to_string());
        }
        acc.entities_found
            .entry("R-HSA-P1".to_string())
            .or_default()
            .insert("P00001".to_string());

        let results = analyse(&catalog, 1000, &acc);
        assert_eq!(results.len(), 2);
        // Three of three sample entities in a 5-entity pathway is the
        // stronger signal
        assert_eq!(results[0].st_id, "R-HSA-P2");
        assert!(results[0].entities_p_value <= results[1].entities_p_value);
        assert!(results[0].significant);
    }
}
