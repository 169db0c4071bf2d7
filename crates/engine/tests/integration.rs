use std::path::PathBuf;

use taxgap_engine::checklist::ChecklistRegistry;
use taxgap_engine::config::GapConfig;
use taxgap_engine::engine::run;
use taxgap_engine::grades::GradeIndex;
use taxgap_engine::model::{
    ClusterSharingStatus, GapInput, GapResult, RepresentationStatus, SharerForm, SharerStatus,
    SpeciesCategory, TaxonomySource,
};
use taxgap_engine::records::RecordIndex;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_and_run() -> (GapConfig, GapResult) {
    let dir = fixtures_dir();
    let config_str = std::fs::read_to_string(dir.join("odonata.gap.toml")).unwrap();
    let config = GapConfig::from_toml(&config_str).unwrap();
    config.validate().unwrap();

    let read = |name: &str| {
        std::fs::read_to_string(dir.join(name))
            .unwrap_or_else(|e| panic!("cannot read {name}: {e}"))
    };

    let input = GapInput {
        checklist: ChecklistRegistry::parse(&read(&config.inputs.checklist)),
        records: RecordIndex::from_tsv(&read(&config.inputs.records), &config.columns).unwrap(),
        grades: GradeIndex::from_tsv(&read(&config.inputs.grades), &config.columns).unwrap(),
    };

    let result = run(&config, &input);
    (config, result)
}

#[test]
fn fixture_produces_one_row_per_species_taxonid_pair() {
    let (config, result) = load_and_run();
    assert_eq!(result.meta.config_name, "Odonata fixture");
    assert_eq!(config.output.as_deref(), Some("gap_analysis.tsv"));

    // 4 checklist rows + 4 non-checklist record species
    assert_eq!(result.rows.len(), 8);
    assert_eq!(result.summary.total_rows, 8);
}

#[test]
fn checklist_rows_come_first_in_declaration_order() {
    let (_, result) = load_and_run();
    let leading: Vec<&str> = result.rows[..4].iter().map(|r| r.species.as_str()).collect();
    assert_eq!(
        leading,
        vec!["Anax parthenope", "Anax imperator", "Lestes viridis", "Coenagrion puella"]
    );
}

#[test]
fn direct_rows_carry_extract_taxonomy_and_counts() {
    let (_, result) = load_and_run();
    let parthenope = &result.rows[0];
    assert_eq!(parthenope.category, SpeciesCategory::Valid);
    assert_eq!(parthenope.total_record_count, 2);
    assert_eq!(parthenope.grade, "A");
    assert_eq!(parthenope.cluster_ids, "BOLD:AAA0001");
    assert_eq!(parthenope.taxonomy_source, TaxonomySource::Direct);
    assert_eq!(parthenope.taxonomy.family, "Aeshnidae");
    // No synonyms declared, so cluster sharing does not apply
    assert_eq!(parthenope.cluster_sharing.status, ClusterSharingStatus::NotApplicable);
}

#[test]
fn zero_record_species_never_direct() {
    let (_, result) = load_and_run();
    for row in result.rows.iter().filter(|r| r.total_record_count == 0) {
        assert_ne!(row.taxonomy_source, TaxonomySource::Direct, "{}", row.species);
        assert!(row.grade.is_empty());
    }
}

#[test]
fn genus_inference_from_congeners() {
    let (_, result) = load_and_run();

    let imperator = &result.rows[1];
    assert_eq!(imperator.taxonomy_source, TaxonomySource::InferredFromGenus);
    assert_eq!(imperator.taxonomy.family, "Aeshnidae");
    assert_eq!(imperator.taxonomy.genus, "anax");
    assert_eq!(imperator.inference_basis, vec!["anax parthenope"]);

    // The trinomial congener still informs the genus
    let puella = &result.rows[3];
    assert_eq!(puella.taxonomy_source, TaxonomySource::InferredFromGenus);
    assert_eq!(puella.taxonomy.family, "Coenagrionidae");

    // No congeners at all
    let viridis = &result.rows[2];
    assert_eq!(viridis.taxonomy_source, TaxonomySource::NoGenusData);
    assert_eq!(viridis.taxonomy.genus, "lestes");
}

#[test]
fn synonym_only_representation_flagged() {
    let (_, result) = load_and_run();
    let viridis = &result.rows[2];
    assert_eq!(viridis.representation.status, RepresentationStatus::SynonymOnly);
    assert!(viridis.representation.synonym_only);
    assert_eq!(viridis.representation.names_with_records, vec!["Chalcolestes viridis"]);
    assert_eq!(viridis.representation.synonym_record_count, 1);
    // Valid name has no clusters in the extract
    assert_eq!(viridis.cluster_sharing.status, ClusterSharingStatus::NoValidData);
}

#[test]
fn non_checklist_rows_classified() {
    let (_, result) = load_and_run();
    let by_species = |name: &str| result.rows.iter().find(|r| r.species == name).unwrap();

    let ephippiger = by_species("Anax ephippiger");
    assert_eq!(
        ephippiger.category,
        SpeciesCategory::ExtraBin(vec!["Anax parthenope".into()])
    );
    assert_eq!(ephippiger.cluster_sharing.status, ClusterSharingStatus::NotApplicable);
    assert_eq!(ephippiger.representation.status, RepresentationStatus::NotApplicable);

    let chalcolestes = by_species("Chalcolestes viridis");
    assert_eq!(chalcolestes.category, SpeciesCategory::Synonym);

    let gammarus = by_species("Gammarus fossarum");
    assert_eq!(gammarus.category, SpeciesCategory::ExtraSpecies);

    // Trinomial from the subspecies column is its own species key
    let trinomial = by_species("Coenagrion puella puella");
    assert_eq!(trinomial.category, SpeciesCategory::ExtraSpecies);
    assert_eq!(trinomial.total_record_count, 1);
}

#[test]
fn extra_bin_associations_are_sorted_checklist_names() {
    let (_, result) = load_and_run();
    for row in &result.rows {
        if let SpeciesCategory::ExtraBin(names) = &row.category {
            assert!(!names.is_empty());
            let mut sorted = names.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(&sorted, names);
        }
    }
}

#[test]
fn multi_name_grade_gets_sharer_analysis() {
    let (_, result) = load_and_run();
    let by_species = |name: &str| result.rows.iter().find(|r| r.species == name).unwrap();

    let ephippiger = by_species("Anax ephippiger");
    let report = ephippiger.sharer_report.as_ref().unwrap();
    // Focal species is not on the checklist
    assert_eq!(report.status, SharerStatus::NotOnList);
    assert_eq!(report.form, SharerForm::ContainsNonLinnean);

    // Grade A rows get none
    assert!(by_species("Anax parthenope").sharer_report.is_none());
}

#[test]
fn summary_matches_rows() {
    let (_, result) = load_and_run();
    assert_eq!(result.summary.valid, 4);
    assert_eq!(result.summary.synonyms, 1);
    assert_eq!(result.summary.extra_species, 2);
    assert_eq!(result.summary.extra_bins, 1);
    assert_eq!(result.summary.synonym_only_flags, 1);
    assert_eq!(result.summary.inferred_taxonomy, 3);
    assert_eq!(result.summary.graded, 5);
}
