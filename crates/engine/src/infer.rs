//! Genus-based taxonomy inference for checklist species without records.

use crate::model::{Taxonomy, TaxonomySource};
use crate::names::genus_of;
use crate::records::RecordIndex;

/// Outcome of a genus-inference attempt.
#[derive(Debug, Clone)]
pub struct InferredTaxonomy {
    pub taxonomy: Taxonomy,
    pub source: TaxonomySource,
    /// Congener species the inference drew on, capped by the caller's limit.
    pub basis: Vec<String>,
}

/// Infer higher taxonomy for a species from congeners already in the record
/// index. Consensus requires every candidate tuple to agree on kingdom…family;
/// on disagreement the first-seen tuple is used and the source flagged.
pub fn infer_from_genus(
    species_normalized: &str,
    records: &RecordIndex,
    max_examples: usize,
) -> InferredTaxonomy {
    let genus = genus_of(species_normalized);

    let candidates = match records.genus_candidates.get(genus) {
        Some(list) if !list.is_empty() => list,
        _ => {
            return InferredTaxonomy {
                taxonomy: Taxonomy { genus: genus.to_string(), ..Taxonomy::default() },
                source: TaxonomySource::NoGenusData,
                basis: Vec::new(),
            }
        }
    };

    let first = &candidates[0];
    let consensus = candidates.iter().all(|c| c.taxonomy.same_higher_ranks(&first.taxonomy));

    InferredTaxonomy {
        taxonomy: Taxonomy { genus: genus.to_string(), ..first.taxonomy.clone() },
        source: if consensus {
            TaxonomySource::InferredFromGenus
        } else {
            TaxonomySource::InconsistentGenus
        },
        basis: candidates.iter().take(max_examples).map(|c| c.species.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GenusCandidate;

    fn candidate(species: &str, family: &str) -> GenusCandidate {
        GenusCandidate {
            species: species.into(),
            taxonomy: Taxonomy {
                kingdom: "Animalia".into(),
                phylum: "Arthropoda".into(),
                class: "Insecta".into(),
                order: "Odonata".into(),
                family: family.into(),
                genus: String::new(),
            },
        }
    }

    fn index_with(genus: &str, candidates: Vec<GenusCandidate>) -> RecordIndex {
        let mut index = RecordIndex::default();
        index.genus_candidates.insert(genus.into(), candidates);
        index
    }

    #[test]
    fn consensus_across_congeners() {
        let index = index_with(
            "anax",
            vec![candidate("anax imperator", "Aeshnidae"), candidate("anax junius", "Aeshnidae")],
        );
        let inferred = infer_from_genus("anax parthenope", &index, 5);
        assert_eq!(inferred.source, TaxonomySource::InferredFromGenus);
        assert_eq!(inferred.taxonomy.family, "Aeshnidae");
        assert_eq!(inferred.taxonomy.genus, "anax");
        assert_eq!(inferred.basis, vec!["anax imperator", "anax junius"]);
    }

    #[test]
    fn disagreement_uses_first_seen_and_flags() {
        let index = index_with(
            "anax",
            vec![candidate("anax imperator", "Aeshnidae"), candidate("anax junius", "Petaluridae")],
        );
        let inferred = infer_from_genus("anax parthenope", &index, 5);
        assert_eq!(inferred.source, TaxonomySource::InconsistentGenus);
        assert_eq!(inferred.taxonomy.family, "Aeshnidae");
    }

    #[test]
    fn unknown_genus_yields_no_data() {
        let index = RecordIndex::default();
        let inferred = infer_from_genus("trocheta pseudodina", &index, 5);
        assert_eq!(inferred.source, TaxonomySource::NoGenusData);
        assert_eq!(inferred.taxonomy.genus, "trocheta");
        assert!(inferred.taxonomy.family.is_empty());
        assert!(inferred.basis.is_empty());
    }

    #[test]
    fn basis_capped_at_limit() {
        let index = index_with(
            "anax",
            (0..8).map(|i| candidate(&format!("anax sp{i}"), "Aeshnidae")).collect(),
        );
        let inferred = infer_from_genus("anax parthenope", &index, 5);
        assert_eq!(inferred.basis.len(), 5);
    }
}
