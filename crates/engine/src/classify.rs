//! Classification analyses: cluster sharing, name representation, species
//! category, co-occurring-name assessment. Pure functions over the built
//! indices.

use std::collections::BTreeSet;

use crate::checklist::ChecklistRegistry;
use crate::model::{
    ClusterSharing, ClusterSharingStatus, NameRepresentation, RepresentationStatus, SharerForm,
    SharerReport, SharerStatus, SpeciesCategory,
};
use crate::names::{format_species_name, is_well_formed_binomial, normalize};
use crate::records::RecordIndex;

/// Split a raw pipe-separated cluster field, discarding empties.
pub fn split_clusters(field: &str) -> BTreeSet<String> {
    field
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every cluster touched by any checklist species or synonym. Precomputed
/// once per run; membership here is what makes a non-checklist taxon an
/// "Extra BIN" instead of an "Extra species".
pub fn checklist_cluster_pool(
    checklist: &ChecklistRegistry,
    records: &RecordIndex,
) -> BTreeSet<String> {
    let mut pool = BTreeSet::new();
    for entry in &checklist.entries {
        if let Some(clusters) = records.clusters_of(&entry.valid) {
            pool.extend(clusters.iter().cloned());
        }
        for synonym in &entry.synonyms {
            if let Some(clusters) = records.clusters_of(&normalize(synonym)) {
                pool.extend(clusters.iter().cloned());
            }
        }
    }
    pool
}

/// Compare the valid name's cluster set against each synonym's.
///
/// A synonym confined to the valid name's clusters is expected; a synonym in
/// entirely different clusters is a taxonomic red flag. When both disjoint
/// and partially-overlapping synonyms exist, the more severe `Different BINs`
/// is reported.
pub fn cluster_sharing(
    valid_normalized: &str,
    synonyms: &[String],
    records: &RecordIndex,
) -> ClusterSharing {
    if synonyms.is_empty() {
        return ClusterSharing::not_applicable();
    }

    let valid_clusters = match records.clusters_of(valid_normalized) {
        Some(c) if !c.is_empty() => c,
        _ => {
            return ClusterSharing {
                status: ClusterSharingStatus::NoValidData,
                details: String::new(),
            }
        }
    };

    let mut with_data = 0usize;
    let mut disjoint = 0usize;
    let mut partial = 0usize;
    let mut details: Vec<String> = Vec::new();

    for synonym in synonyms {
        let synonym_clusters = match records.clusters_of(&normalize(synonym)) {
            Some(c) if !c.is_empty() => c,
            _ => continue,
        };
        with_data += 1;

        let shared = synonym_clusters.intersection(valid_clusters).count();
        let unique = synonym_clusters.difference(valid_clusters).count();
        if unique > 0 && shared == 0 {
            disjoint += 1;
        } else if unique > 0 {
            partial += 1;
        }

        let listing: Vec<&str> = synonym_clusters.iter().map(String::as_str).collect();
        details.push(format!("{synonym}:{}", listing.join(" | ")));
    }

    if with_data == 0 {
        return ClusterSharing {
            status: ClusterSharingStatus::NoSynonymData,
            details: String::new(),
        };
    }

    let status = if disjoint > 0 {
        ClusterSharingStatus::DifferentBins
    } else if partial > 0 {
        ClusterSharingStatus::PartialOverlap
    } else {
        ClusterSharingStatus::SameBin
    };

    ClusterSharing { status, details: details.join("; ") }
}

/// Determine whether records exist under the valid name, its synonyms, both,
/// or neither, and total the records filed under synonyms.
pub fn name_representation(
    valid_normalized: &str,
    synonyms: &[String],
    records: &RecordIndex,
) -> NameRepresentation {
    if synonyms.is_empty() {
        let names = if records.has_species(valid_normalized) {
            vec![format_species_name(valid_normalized)]
        } else {
            Vec::new()
        };
        return NameRepresentation {
            status: RepresentationStatus::NoSynonyms,
            names_with_records: names,
            synonym_record_count: 0,
            synonym_only: false,
        };
    }

    let valid_found = records.has_species(valid_normalized);

    let mut synonyms_found: Vec<String> = Vec::new();
    let mut synonym_record_count = 0u64;
    for synonym in synonyms {
        let key = normalize(synonym);
        if !records.has_species(&key) {
            continue;
        }
        synonyms_found.push(synonym.clone());
        if let Some(pairs) = records.taxa_by_species.get(&key) {
            for (taxonid, _) in pairs {
                synonym_record_count += records.record_count(taxonid);
            }
        }
    }

    let (status, names_with_records, synonym_only) = match (valid_found, synonyms_found.is_empty())
    {
        (true, false) => {
            let mut names = vec![format_species_name(valid_normalized)];
            names.extend(synonyms_found);
            (RepresentationStatus::ValidAndSynonyms, names, false)
        }
        (true, true) => (
            RepresentationStatus::ValidOnly,
            vec![format_species_name(valid_normalized)],
            false,
        ),
        (false, false) => (RepresentationStatus::SynonymOnly, synonyms_found, true),
        (false, true) => (RepresentationStatus::NoRecords, Vec::new(), false),
    };

    NameRepresentation { status, names_with_records, synonym_record_count, synonym_only }
}

/// Shared species classification, used for both passes.
///
/// Checklist names classify directly; everything else is judged by whether
/// its taxon's clusters intersect the checklist cluster pool. For an
/// `ExtraBin`, the checklist valid names reachable through the shared
/// clusters are resolved (synonyms back to their valid name), formatted,
/// sorted, and deduplicated.
pub fn categorize(
    species_normalized: &str,
    taxon_clusters: &BTreeSet<String>,
    checklist: &ChecklistRegistry,
    cluster_pool: &BTreeSet<String>,
    records: &RecordIndex,
) -> SpeciesCategory {
    if checklist.is_valid_name(species_normalized) {
        return SpeciesCategory::Valid;
    }
    if checklist.is_synonym(species_normalized) {
        return SpeciesCategory::Synonym;
    }
    if taxon_clusters.is_empty() {
        return SpeciesCategory::ExtraSpecies;
    }

    let shared: Vec<&String> = taxon_clusters.intersection(cluster_pool).collect();
    if shared.is_empty() {
        return SpeciesCategory::ExtraSpecies;
    }

    let mut associated: BTreeSet<String> = BTreeSet::new();
    for cluster in shared {
        let Some(members) = records.species_by_cluster.get(cluster) else {
            continue;
        };
        for member in members {
            if checklist.is_valid_name(member) {
                associated.insert(format_species_name(member));
            } else if let Some(valid) = checklist.resolve_synonym(member) {
                associated.insert(format_species_name(valid));
            }
        }
    }

    SpeciesCategory::ExtraBin(associated.into_iter().collect())
}

/// Analyze the co-occurring names of a multi-name cluster: are they known
/// checklist synonyms, and are they well-formed binomials? Returns `None`
/// when the raw field holds no names.
pub fn sharer_analysis(
    raw_sharers: &str,
    focal_normalized: &str,
    checklist: &ChecklistRegistry,
) -> Option<SharerReport> {
    let sharers: Vec<&str> =
        raw_sharers.split('|').map(str::trim).filter(|s| !s.is_empty()).collect();
    if sharers.is_empty() {
        return None;
    }

    let status = if !checklist.is_listed(focal_normalized) {
        SharerStatus::NotOnList
    } else {
        let mut known = 0usize;
        let mut unknown = 0usize;
        for sharer in &sharers {
            if checklist.is_listed(&normalize(sharer)) {
                known += 1;
            } else {
                unknown += 1;
            }
        }
        match (known, unknown) {
            (k, 0) if k > 0 => SharerStatus::AllKnownSynonyms,
            (k, u) if k > 0 && u > 0 => SharerStatus::Mixed,
            _ => SharerStatus::NoKnownSynonyms,
        }
    };

    let form = if sharers.iter().all(|s| is_well_formed_binomial(s)) {
        SharerForm::AllLinnean
    } else {
        SharerForm::ContainsNonLinnean
    };

    Some(SharerReport { status, form })
}
