//! Two-pass reconciliation over the union of checklist and record species.

use crate::classify::{
    categorize, checklist_cluster_pool, cluster_sharing, name_representation, sharer_analysis,
    split_clusters,
};
use crate::config::GapConfig;
use crate::grades::GradeEntry;
use crate::infer::infer_from_genus;
use crate::model::{
    ClusterSharing, GapInput, GapMeta, GapResult, NameRepresentation, ResultRow, SpeciesCategory,
    TaxonomySource,
};
use crate::names::format_species_name;
use crate::summary::compute_summary;

/// Run the reconciliation. Pass 1 walks the checklist in declaration order;
/// pass 2 picks up record-extract species the checklist never mentioned.
/// Rows are write-once: built in full here, never touched again.
pub fn run(config: &GapConfig, input: &GapInput) -> GapResult {
    let cluster_pool = checklist_cluster_pool(&input.checklist, &input.records);
    let empty_grade = GradeEntry::default();

    let mut rows: Vec<ResultRow> = Vec::new();

    // Pass 1: checklist species, with or without records.
    for entry in &input.checklist.entries {
        let sharing = cluster_sharing(&entry.valid, &entry.synonyms, &input.records);
        let representation = name_representation(&entry.valid, &entry.synonyms, &input.records);

        match input.records.taxa_by_species.get(&entry.valid) {
            Some(pairs) => {
                for (taxonid, taxonomy) in pairs {
                    let grade_entry = input.grades.get(taxonid).unwrap_or(&empty_grade);
                    let taxon_clusters = split_clusters(&grade_entry.clusters);
                    let category = categorize(
                        &entry.valid,
                        &taxon_clusters,
                        &input.checklist,
                        &cluster_pool,
                        &input.records,
                    );

                    rows.push(ResultRow {
                        species: format_species_name(&entry.valid),
                        synonyms: entry.synonyms.clone(),
                        category,
                        total_record_count: input.records.record_count(taxonid),
                        grade: grade_entry.grade.clone(),
                        cluster_ids: grade_entry.clusters.clone(),
                        co_occurring_names: grade_entry.sharers.clone(),
                        cluster_sharing: sharing.clone(),
                        representation: representation.clone(),
                        sharer_report: sharer_report_for(config, &entry.valid, grade_entry, input),
                        taxonomy: taxonomy.clone(),
                        taxonomy_source: TaxonomySource::Direct,
                        inference_basis: Vec::new(),
                    });
                }
            }
            None => {
                let inferred = infer_from_genus(
                    &entry.valid,
                    &input.records,
                    config.options.max_congener_examples,
                );

                rows.push(ResultRow {
                    species: format_species_name(&entry.valid),
                    synonyms: entry.synonyms.clone(),
                    category: SpeciesCategory::Valid,
                    total_record_count: 0,
                    grade: String::new(),
                    cluster_ids: String::new(),
                    co_occurring_names: String::new(),
                    cluster_sharing: sharing.clone(),
                    representation: representation.clone(),
                    sharer_report: None,
                    taxonomy: inferred.taxonomy,
                    taxonomy_source: inferred.source,
                    inference_basis: inferred.basis,
                });
            }
        }
    }

    // Pass 2: record-extract species absent from the checklist. Cluster
    // sharing and name representation are checklist-relative, so N/A here.
    for (species, pairs) in &input.records.taxa_by_species {
        if input.checklist.is_valid_name(species) {
            continue;
        }
        for (taxonid, taxonomy) in pairs {
            let grade_entry = input.grades.get(taxonid).unwrap_or(&empty_grade);
            let taxon_clusters = split_clusters(&grade_entry.clusters);
            let category = categorize(
                species,
                &taxon_clusters,
                &input.checklist,
                &cluster_pool,
                &input.records,
            );

            rows.push(ResultRow {
                species: format_species_name(species),
                synonyms: Vec::new(),
                category,
                total_record_count: input.records.record_count(taxonid),
                grade: grade_entry.grade.clone(),
                cluster_ids: grade_entry.clusters.clone(),
                co_occurring_names: grade_entry.sharers.clone(),
                cluster_sharing: ClusterSharing::not_applicable(),
                representation: NameRepresentation::not_applicable(format_species_name(species)),
                sharer_report: sharer_report_for(config, species, grade_entry, input),
                taxonomy: taxonomy.clone(),
                taxonomy_source: TaxonomySource::Direct,
                inference_basis: Vec::new(),
            });
        }
    }

    let summary = compute_summary(&rows);

    GapResult {
        meta: GapMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
    }
}

/// Co-occurrence analysis only applies to taxa carrying the multi-name grade.
fn sharer_report_for(
    config: &GapConfig,
    species_normalized: &str,
    grade_entry: &GradeEntry,
    input: &GapInput,
) -> Option<crate::model::SharerReport> {
    if grade_entry.grade != config.options.multi_name_grade {
        return None;
    }
    sharer_analysis(&grade_entry.sharers, species_normalized, &input.checklist)
}
