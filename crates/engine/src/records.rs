//! Record Index — derived indices over the bulk specimen extract.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::ColumnNames;
use crate::error::GapError;
use crate::model::{GenusCandidate, Taxonomy};
use crate::names::{genus_of, normalize};

/// Subspecies field values meaning "no subspecies".
const NULL_SENTINELS: &[&str] = &["none", "null"];

/// Indices derived from one pass over the specimen extract.
/// Read-only after construction.
#[derive(Debug, Default)]
pub struct RecordIndex {
    /// species (normalized) → (taxonid, taxonomy) pairs, one per distinct
    /// taxonid under that species.
    pub taxa_by_species: BTreeMap<String, Vec<(String, Taxonomy)>>,
    /// taxonid → input row count. Counts every row, independent of the
    /// per-pair de-duplication above.
    pub record_counts: BTreeMap<String, u64>,
    /// species (normalized) → genetic cluster identifiers
    pub clusters_by_species: BTreeMap<String, BTreeSet<String>>,
    /// cluster identifier → species (normalized)
    pub species_by_cluster: BTreeMap<String, BTreeSet<String>>,
    /// every species name seen (normalized)
    pub species_seen: BTreeSet<String>,
    /// genus (normalized) → distinct higher-taxonomy candidates
    pub genus_candidates: BTreeMap<String, Vec<GenusCandidate>>,
    /// rows whose subspecies field promoted the name to a trinomial
    pub subspecies_rows: u64,
    /// rows skipped for missing species or taxonid
    pub skipped_rows: u64,
}

impl RecordIndex {
    /// Build the index from tab-delimited extract content.
    pub fn from_tsv(content: &str, columns: &ColumnNames) -> Result<RecordIndex, GapError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| GapError::Csv { input: "record extract".into(), message: e.to_string() })?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let idx = |name: &str| -> Result<usize, GapError> {
            headers.iter().position(|h| h == name).ok_or_else(|| GapError::MissingColumn {
                input: "record extract".into(),
                column: name.into(),
            })
        };

        let species_idx = idx("species")?;
        let subspecies_idx = idx("subspecies")?;
        let taxonid_idx = idx(&columns.taxonid)?;
        let cluster_idx = idx(&columns.cluster)?;
        let kingdom_idx = idx("kingdom")?;
        let phylum_idx = idx("phylum")?;
        let class_idx = idx("class")?;
        let order_idx = idx("order")?;
        let family_idx = idx("family")?;
        let genus_idx = idx("genus")?;

        let mut index = RecordIndex::default();

        for record in reader.records() {
            let record = record.map_err(|e| GapError::Csv {
                input: "record extract".into(),
                message: e.to_string(),
            })?;
            let field = |i: usize| record.get(i).unwrap_or("").trim();

            let species_raw = field(species_idx);
            let taxonid = field(taxonid_idx);
            if species_raw.is_empty() || taxonid.is_empty() {
                index.skipped_rows += 1;
                continue;
            }

            let species_key = match subspecies_epithet(field(subspecies_idx)) {
                Some(epithet) => {
                    index.subspecies_rows += 1;
                    normalize(&format!("{species_raw} {epithet}"))
                }
                None => normalize(species_raw),
            };

            *index.record_counts.entry(taxonid.to_string()).or_insert(0) += 1;
            index.species_seen.insert(species_key.clone());

            for cluster in field(cluster_idx).split('|').map(str::trim).filter(|c| !c.is_empty()) {
                index
                    .clusters_by_species
                    .entry(species_key.clone())
                    .or_default()
                    .insert(cluster.to_string());
                index
                    .species_by_cluster
                    .entry(cluster.to_string())
                    .or_default()
                    .insert(species_key.clone());
            }

            let pairs = index.taxa_by_species.entry(species_key.clone()).or_default();
            if pairs.iter().any(|(t, _)| t == taxonid) {
                continue;
            }

            let taxonomy = Taxonomy {
                kingdom: field(kingdom_idx).to_string(),
                phylum: field(phylum_idx).to_string(),
                class: field(class_idx).to_string(),
                order: field(order_idx).to_string(),
                family: field(family_idx).to_string(),
                genus: field(genus_idx).to_string(),
            };
            pairs.push((taxonid.to_string(), taxonomy.clone()));

            let genus = genus_of(&species_key).to_string();
            let candidates = index.genus_candidates.entry(genus).or_default();
            if !candidates.iter().any(|c| c.taxonomy.same_higher_ranks(&taxonomy)) {
                candidates.push(GenusCandidate { species: species_key.clone(), taxonomy });
            }
        }

        Ok(index)
    }

    pub fn clusters_of(&self, species_normalized: &str) -> Option<&BTreeSet<String>> {
        self.clusters_by_species.get(species_normalized)
    }

    pub fn record_count(&self, taxonid: &str) -> u64 {
        self.record_counts.get(taxonid).copied().unwrap_or(0)
    }

    pub fn has_species(&self, species_normalized: &str) -> bool {
        self.species_seen.contains(species_normalized)
    }

    pub fn total_records(&self) -> u64 {
        self.record_counts.values().sum()
    }
}

/// Extract the subspecies epithet from the subspecies field, if it names one.
/// The field may hold a full trinomial; only the last whitespace token is the
/// epithet.
fn subspecies_epithet(field: &str) -> Option<&str> {
    if field.is_empty() || NULL_SENTINELS.contains(&field.to_lowercase().as_str()) {
        return None;
    }
    field.split_whitespace().next_back()
}
