use std::collections::BTreeMap;

use crate::model::{GapSummary, ResultRow, SpeciesCategory, TaxonomySource};

/// Compute summary statistics from the finished result rows.
pub fn compute_summary(rows: &[ResultRow]) -> GapSummary {
    let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut valid = 0;
    let mut synonyms = 0;
    let mut extra_species = 0;
    let mut extra_bins = 0;
    let mut graded = 0;
    let mut synonym_only_flags = 0;
    let mut inferred_taxonomy = 0;

    for row in rows {
        *category_counts.entry(row.category.to_string()).or_insert(0) += 1;

        match row.category {
            SpeciesCategory::Valid => valid += 1,
            SpeciesCategory::Synonym => synonyms += 1,
            SpeciesCategory::ExtraSpecies => extra_species += 1,
            SpeciesCategory::ExtraBin(_) => extra_bins += 1,
        }

        if !row.grade.is_empty() {
            graded += 1;
        }
        if row.representation.synonym_only {
            synonym_only_flags += 1;
        }
        if row.taxonomy_source != TaxonomySource::Direct {
            inferred_taxonomy += 1;
        }
    }

    GapSummary {
        total_rows: rows.len(),
        valid,
        synonyms,
        extra_species,
        extra_bins,
        graded,
        synonym_only_flags,
        inferred_taxonomy,
        category_counts,
    }
}
