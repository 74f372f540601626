#![allow(missing_docs)]

use cbio_model::{
    ConvertOptions, DatasetMetadata, DictionaryRecord, DisplayOrder, GeneticAlterationType,
    MissingValueSet, NameCase, OmicsProfileMetadata, Taxonomy, ValueDomain,
};
use serde_json::json;

#[test]
fn test_convert_options_defaults() {
    let options = ConvertOptions::default();
    assert_eq!(options.organization, "Unassigned");
    assert_eq!(options.version, "v0.0.1");
    assert_eq!(options.uploader, "BioMiner");
    assert_eq!(options.url_base, "minio://processed-data/OmicsDatasets");
    assert_eq!(options.missing_values, MissingValueSet::Baseline);
    assert_eq!(options.clinical_case, NameCase::Lower);
    assert_eq!(options.omics_case, NameCase::Preserve);
    assert!(options.max_allowed_values.is_none());
    assert!(options.license.is_empty());
}

#[test]
fn test_convert_options_partial_document_fills_defaults() {
    let options: ConvertOptions =
        serde_json::from_value(json!({"organization": "FUDAN", "missing_values": "extended"}))
            .unwrap();
    assert_eq!(options.organization, "FUDAN");
    assert_eq!(options.missing_values, MissingValueSet::Extended);
    assert_eq!(options.version, "v0.0.1");
}

#[test]
fn test_dataset_metadata_tags_serialize_sorted() {
    let mut meta = DatasetMetadata {
        key: "luad_demo".to_string(),
        total: 3,
        ..DatasetMetadata::default()
    };
    meta.tags.insert("org:Unassigned".to_string());
    meta.tags.insert("disease:Lung Adenocarcinoma".to_string());

    let value = serde_json::to_value(&meta).unwrap();
    assert_eq!(
        value["tags"],
        json!(["disease:Lung Adenocarcinoma", "org:Unassigned"])
    );
    assert_eq!(value["total"], 3);
    assert_eq!(value["is_filebased"], false);
}

#[test]
fn test_dataset_metadata_without_license_is_empty_string() {
    let value = serde_json::to_value(DatasetMetadata::default()).unwrap();
    assert_eq!(value["license"], json!(""));
}

#[test]
fn test_profile_metadata_takes_id_column_from_type() {
    let meta = OmicsProfileMetadata::new(
        "MUTATIONS",
        "Mutation data",
        "MAF",
        GeneticAlterationType::MutationExtended,
    );
    let value = serde_json::to_value(&meta).unwrap();
    assert_eq!(value["genetic_alteration_type"], "MUTATION_EXTENDED");
    assert_eq!(value["id_column_name"], "Tumor_Sample_Barcode");
}

#[test]
fn test_string_record_lists_allowed_values() {
    let record = DictionaryRecord {
        key: "status".to_string(),
        name: "Status".to_string(),
        description: String::new(),
        data_type: cbio_model::DataType::String,
        notes: String::new(),
        allowed_values: ValueDomain::Values(vec![json!("LIVING"), json!("DECEASED")]),
        order: DisplayOrder::Raw("n/a".to_string()),
    };
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["allowed_values"], json!(["LIVING", "DECEASED"]));
    assert_eq!(value["order"], "n/a");
}

#[test]
fn test_taxonomy_from_mappings_lookup_is_case_insensitive() {
    let taxonomy = Taxonomy::from_mappings(
        [("BRCA".to_string(), "Invasive Breast Carcinoma".to_string())].into(),
        [("BRCA".to_string(), "Breast".to_string())].into(),
    );
    assert_eq!(taxonomy.organ("brca"), Some("Breast"));
    assert!(Taxonomy::empty().disease("BRCA").is_none());
}
