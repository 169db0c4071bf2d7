//! Grade Index — the per-taxon quality assessment.

use std::collections::BTreeMap;

use crate::config::ColumnNames;
use crate::error::GapError;

/// Assessment for one taxon identifier. Cluster and co-occurring-name fields
/// are kept raw (pipe-separated); splitting happens at analysis time.
#[derive(Debug, Clone, Default)]
pub struct GradeEntry {
    pub grade: String,
    pub clusters: String,
    pub sharers: String,
}

/// taxonid → assessment, one entry per taxon identifier.
#[derive(Debug, Default)]
pub struct GradeIndex {
    pub by_taxon: BTreeMap<String, GradeEntry>,
}

impl GradeIndex {
    /// Build the index from tab-delimited assessment content.
    /// Rows with an empty taxon identifier are skipped; a taxon identifier
    /// appearing twice keeps the last row.
    pub fn from_tsv(content: &str, columns: &ColumnNames) -> Result<GradeIndex, GapError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| GapError::Csv { input: "grade file".into(), message: e.to_string() })?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let idx = |name: &str| -> Result<usize, GapError> {
            headers.iter().position(|h| h == name).ok_or_else(|| GapError::MissingColumn {
                input: "grade file".into(),
                column: name.into(),
            })
        };

        let taxonid_idx = idx(&columns.taxonid)?;
        let grade_idx = idx(&columns.grade)?;
        let cluster_idx = idx(&columns.cluster)?;
        let sharers_idx = idx(&columns.sharers)?;

        let mut index = GradeIndex::default();

        for record in reader.records() {
            let record = record.map_err(|e| GapError::Csv {
                input: "grade file".into(),
                message: e.to_string(),
            })?;
            let field = |i: usize| record.get(i).unwrap_or("").trim();

            let taxonid = field(taxonid_idx);
            if taxonid.is_empty() {
                continue;
            }

            index.by_taxon.insert(
                taxonid.to_string(),
                GradeEntry {
                    grade: field(grade_idx).to_string(),
                    clusters: field(cluster_idx).to_string(),
                    sharers: field(sharers_idx).to_string(),
                },
            );
        }

        Ok(index)
    }

    pub fn get(&self, taxonid: &str) -> Option<&GradeEntry> {
        self.by_taxon.get(taxonid)
    }

    pub fn len(&self) -> usize {
        self.by_taxon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_taxon.is_empty()
    }
}
