use std::collections::BTreeMap;

use serde::Serialize;

use crate::checklist::ChecklistRegistry;
use crate::grades::GradeIndex;
use crate::records::RecordIndex;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Pre-built indices for one reconciliation run. Each index is constructed
/// once by its builder and treated as immutable from here on.
pub struct GapInput {
    pub checklist: ChecklistRegistry,
    pub records: RecordIndex,
    pub grades: GradeIndex,
}

// ---------------------------------------------------------------------------
// Taxonomy
// ---------------------------------------------------------------------------

/// Six-rank taxonomy carried on every result row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    pub kingdom: String,
    pub phylum: String,
    pub class: String,
    pub order: String,
    pub family: String,
    pub genus: String,
}

impl Taxonomy {
    /// Structural identity over kingdom…family, ignoring genus.
    /// Used for genus-candidate de-duplication and consensus checks.
    pub fn same_higher_ranks(&self, other: &Taxonomy) -> bool {
        self.kingdom == other.kingdom
            && self.phylum == other.phylum
            && self.class == other.class
            && self.order == other.order
            && self.family == other.family
    }
}

/// One distinct higher-taxonomy tuple observed for a genus, with the species
/// that first contributed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenusCandidate {
    pub species: String,
    pub taxonomy: Taxonomy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomySource {
    Direct,
    InferredFromGenus,
    InconsistentGenus,
    NoGenusData,
}

impl std::fmt::Display for TaxonomySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "Direct"),
            Self::InferredFromGenus => write!(f, "Inferred from genus"),
            Self::InconsistentGenus => write!(f, "Inconsistent genus taxonomy"),
            Self::NoGenusData => write!(f, "No genus data"),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Where a species stands relative to the checklist. `ExtraBin` carries the
/// checklist valid names (display form, sorted, deduplicated) that share a
/// genetic cluster with the taxon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesCategory {
    Valid,
    Synonym,
    ExtraSpecies,
    ExtraBin(Vec<String>),
}

impl SpeciesCategory {
    /// Checklist species sharing clusters with this taxon, if any.
    pub fn associated_names(&self) -> &[String] {
        match self {
            Self::ExtraBin(names) => names,
            _ => &[],
        }
    }
}

impl std::fmt::Display for SpeciesCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "Valid"),
            Self::Synonym => write!(f, "Synonym"),
            Self::ExtraSpecies => write!(f, "Extra species"),
            Self::ExtraBin(_) => write!(f, "Extra BIN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterSharingStatus {
    SameBin,
    DifferentBins,
    PartialOverlap,
    NoSynonymData,
    NoValidData,
    NotApplicable,
}

impl std::fmt::Display for ClusterSharingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SameBin => write!(f, "Same BIN"),
            Self::DifferentBins => write!(f, "Different BINs"),
            Self::PartialOverlap => write!(f, "Partial overlap"),
            Self::NoSynonymData => write!(f, "No synonym data"),
            Self::NoValidData => write!(f, "No valid data"),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Cluster-sharing verdict plus the per-synonym cluster listing that backs it.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSharing {
    pub status: ClusterSharingStatus,
    pub details: String,
}

impl ClusterSharing {
    pub fn not_applicable() -> Self {
        Self { status: ClusterSharingStatus::NotApplicable, details: String::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentationStatus {
    ValidOnly,
    ValidAndSynonyms,
    SynonymOnly,
    NoRecords,
    NoSynonyms,
    NotApplicable,
}

impl std::fmt::Display for RepresentationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidOnly => write!(f, "Valid name only"),
            Self::ValidAndSynonyms => write!(f, "Valid + synonym(s)"),
            Self::SynonymOnly => write!(f, "Synonym only"),
            Self::NoRecords => write!(f, "No records"),
            Self::NoSynonyms => write!(f, "N/A - no synonyms"),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Which of {valid name, synonyms} actually carry records. `SynonymOnly` is
/// the curation red flag: data exists but never under the accepted name.
#[derive(Debug, Clone, Serialize)]
pub struct NameRepresentation {
    pub status: RepresentationStatus,
    pub names_with_records: Vec<String>,
    pub synonym_record_count: u64,
    pub synonym_only: bool,
}

impl NameRepresentation {
    pub fn not_applicable(display_name: String) -> Self {
        Self {
            status: RepresentationStatus::NotApplicable,
            names_with_records: vec![display_name],
            synonym_record_count: 0,
            synonym_only: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SharerStatus {
    AllKnownSynonyms,
    Mixed,
    NoKnownSynonyms,
    NotOnList,
}

impl std::fmt::Display for SharerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllKnownSynonyms => write!(f, "All known synonyms"),
            Self::Mixed => write!(f, "Mix (synonyms + extras)"),
            Self::NoKnownSynonyms => write!(f, "No known synonyms"),
            Self::NotOnList => write!(f, "N/A - not on list"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SharerForm {
    AllLinnean,
    ContainsNonLinnean,
}

impl std::fmt::Display for SharerForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllLinnean => write!(f, "All Linnean"),
            Self::ContainsNonLinnean => write!(f, "Contains non-Linnean"),
        }
    }
}

/// Analysis of the names co-occurring in a multi-name cluster.
#[derive(Debug, Clone, Serialize)]
pub struct SharerReport {
    pub status: SharerStatus,
    pub form: SharerForm,
}

// ---------------------------------------------------------------------------
// Result rows
// ---------------------------------------------------------------------------

/// One reconciled row per (species, taxon-identifier) pair. Write-once:
/// built in full by the engine and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub species: String,
    pub synonyms: Vec<String>,
    pub category: SpeciesCategory,
    pub total_record_count: u64,
    pub grade: String,
    pub cluster_ids: String,
    pub co_occurring_names: String,
    pub cluster_sharing: ClusterSharing,
    pub representation: NameRepresentation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharer_report: Option<SharerReport>,
    pub taxonomy: Taxonomy,
    pub taxonomy_source: TaxonomySource,
    pub inference_basis: Vec<String>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GapSummary {
    pub total_rows: usize,
    pub valid: usize,
    pub synonyms: usize,
    pub extra_species: usize,
    pub extra_bins: usize,
    pub graded: usize,
    pub synonym_only_flags: usize,
    pub inferred_taxonomy: usize,
    pub category_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapResult {
    pub meta: GapMeta,
    pub summary: GapSummary,
    pub rows: Vec<ResultRow>,
}
