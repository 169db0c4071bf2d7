// Gap-analysis report writing (TSV)

use std::path::Path;

use taxgap_engine::model::ResultRow;

/// Report column set, in output order.
pub const REPORT_COLUMNS: &[&str] = &[
    "species",
    "synonyms",
    "species_category",
    "associated_input_species",
    "total_record_count",
    "grade",
    "cluster_ids",
    "co_occurring_names",
    "cluster_sharing_status",
    "cluster_sharing_details",
    "name_representation",
    "names_with_records",
    "synonym_record_count",
    "synonym_only_flag",
    "co_occurrence_sharer_status",
    "co_occurrence_sharer_type",
    "kingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "taxonomy_source",
    "inference_basis",
];

/// The marker flagging rows whose species is represented by synonyms only.
pub const SYNONYM_ONLY_MARKER: &str = "⚠️";

/// Write the reconciled rows as a tab-delimited report. The parent directory
/// is created if missing.
pub fn write_report(path: &Path, rows: &[ResultRow]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    writer
        .write_record(REPORT_COLUMNS)
        .map_err(|e| e.to_string())?;

    for row in rows {
        writer.write_record(record_fields(row)).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}

fn record_fields(row: &ResultRow) -> Vec<String> {
    let (sharer_status, sharer_form) = match &row.sharer_report {
        Some(report) => (report.status.to_string(), report.form.to_string()),
        None => (String::new(), String::new()),
    };

    vec![
        row.species.clone(),
        row.synonyms.join("|"),
        row.category.to_string(),
        row.category.associated_names().join(","),
        row.total_record_count.to_string(),
        row.grade.clone(),
        row.cluster_ids.clone(),
        row.co_occurring_names.clone(),
        row.cluster_sharing.status.to_string(),
        row.cluster_sharing.details.clone(),
        row.representation.status.to_string(),
        row.representation.names_with_records.join(","),
        row.representation.synonym_record_count.to_string(),
        if row.representation.synonym_only { SYNONYM_ONLY_MARKER.into() } else { String::new() },
        sharer_status,
        sharer_form,
        row.taxonomy.kingdom.clone(),
        row.taxonomy.phylum.clone(),
        row.taxonomy.class.clone(),
        row.taxonomy.order.clone(),
        row.taxonomy.family.clone(),
        row.taxonomy.genus.clone(),
        row.taxonomy_source.to_string(),
        row.inference_basis.join("|"),
    ]
}
