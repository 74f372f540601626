//! End-to-end tests for study and omics conversion.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use cbio_cli::omics::BatchDriver;
use cbio_cli::pipeline::{convert_all, convert_study};
use cbio_cli::types::PairStatus;
use cbio_model::{ConvertOptions, Taxonomy};
use polars::prelude::{ParquetReader, SerReader};
use serde_json::{Value, json};
use tempfile::TempDir;

const PATIENTS: &str = "\
#Patient Identifier\tDiagnosis Age\tOverall Survival Status
#Identifier to uniquely specify a patient\tAge at diagnosis\tVital status
#STRING\tNUMBER\tSTRING
#1\t1\t1
PATIENT_ID\tAGE\tSTATUS
P1\t40\tALIVE
P2\t55\tDECEASED
P3\t62\tALIVE
";

fn write_study(root: &Path, dir_name: &str, key: &str) -> PathBuf {
    let dir = root.join(dir_name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("meta_study.txt"),
        format!(
            "type_of_cancer: brca\ncancer_study_identifier: {key}\nname: Demo Study\n\
             groups: PUBLIC;;GDAC\n"
        ),
    )
    .unwrap();
    fs::write(dir.join("data_clinical_patient.txt"), PATIENTS).unwrap();
    dir
}

fn taxonomy() -> Taxonomy {
    Taxonomy::from_mappings(
        BTreeMap::from([("BRCA".to_string(), "Invasive Breast Carcinoma".to_string())]),
        BTreeMap::from([("BRCA".to_string(), "Breast".to_string())]),
    )
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn converts_study_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let study = write_study(tmp.path(), "brca_demo", "brca_demo");
    let out = tmp.path().join("out");

    let result = convert_study(&study, &out, &ConvertOptions::default(), &taxonomy()).unwrap();
    assert_eq!(result.rows, 3);
    assert_eq!(result.columns, 3);
    assert!(!result.skipped);

    let version_dir = out.join("v0.0.1");
    let frame = ParquetReader::new(File::open(version_dir.join("metadata_table.parquet")).unwrap())
        .finish()
        .unwrap();
    assert_eq!(frame.height(), 3);

    let dictionary = read_json(&version_dir.join("metadata_dictionary.json"));
    let age = dictionary
        .as_array()
        .unwrap()
        .iter()
        .find(|record| record["key"] == "age")
        .unwrap();
    assert_eq!(age["data_type"], "NUMBER");
    assert_eq!(age["allowed_values"], json!([40.0, 62.0]));
    assert_eq!(age["name"], "Diagnosis Age");

    let dataset = read_json(&version_dir.join("dataset.json"));
    assert_eq!(dataset["total"], 3);
    assert_eq!(dataset["key"], "brca_demo");
    assert_eq!(dataset["groups"], json!(["PUBLIC", "GDAC"]));
    assert_eq!(dataset["license"], "");
    let tags = dataset["tags"].as_array().unwrap();
    assert!(tags.contains(&json!("disease:Invasive Breast Carcinoma")));
    assert!(tags.contains(&json!("organ:Breast")));
    assert!(tags.contains(&json!("org:Unassigned")));

    for name in ["brca_demo.tar.gz", "datafile.tsv", "README.md", "LICENSE.md"] {
        assert!(version_dir.join(name).is_file(), "missing {name}");
    }
}

#[test]
fn key_mismatch_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let study = write_study(tmp.path(), "foo", "bar");
    let out = tmp.path().join("out");

    let err = convert_study(&study, &out, &ConvertOptions::default(), &Taxonomy::empty())
        .unwrap_err();
    assert!(format!("{err:#}").contains("does not match"));
    assert!(!out.exists());
}

#[test]
fn missing_clinical_files_remove_output() {
    let tmp = TempDir::new().unwrap();
    let study = write_study(tmp.path(), "demo", "demo");
    fs::remove_file(study.join("data_clinical_patient.txt")).unwrap();
    let out = tmp.path().join("out");

    assert!(convert_study(&study, &out, &ConvertOptions::default(), &Taxonomy::empty()).is_err());
    assert!(!out.join("v0.0.1").exists());
}

#[test]
fn skip_rerun_keeps_identity() {
    let tmp = TempDir::new().unwrap();
    let study = write_study(tmp.path(), "demo", "demo");
    let out = tmp.path().join("out");
    let options = ConvertOptions::default().with_skip(true);

    let first = convert_study(&study, &out, &options, &Taxonomy::empty()).unwrap();
    let manifest = fs::read(out.join("v0.0.1").join("datafile.tsv")).unwrap();
    let second = convert_study(&study, &out, &options, &Taxonomy::empty()).unwrap();

    assert!(first.guid.is_some());
    assert!(second.skipped);
    assert_eq!(
        fs::read(out.join("v0.0.1").join("datafile.tsv")).unwrap(),
        manifest
    );
}

#[test]
fn bulk_run_continues_past_failures() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("studies");
    write_study(&root, "alpha", "alpha");
    write_study(&root, "beta", "not_beta");
    let out = tmp.path().join("out");

    let entries = convert_all(&root, &out, &ConvertOptions::default(), &Taxonomy::empty()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "alpha");
    assert!(entries[0].outcome.is_ok());
    assert!(entries[1].outcome.is_err());
    assert!(out.join("alpha").join("v0.0.1").join("dataset.json").is_file());
}

#[test]
fn omics_batch_isolates_failures() {
    let tmp = TempDir::new().unwrap();
    let study = tmp.path().join("demo");
    fs::create_dir_all(&study).unwrap();
    fs::write(
        study.join("data_cna.txt"),
        "Hugo_Symbol\tEntrez_Gene_Id\tS1\tS2\nTP53\t7157\t-1\t0\nBRCA1\t672\t2\tNA\n",
    )
    .unwrap();
    fs::write(
        study.join("meta_cna.txt"),
        "genetic_alteration_type: COPY_NUMBER_ALTERATION\ndatatype: DISCRETE\n\
         stable_id: gistic\nprofile_description: Copy number\n",
    )
    .unwrap();
    fs::write(
        study.join("data_mutations.txt"),
        "Hugo_Symbol\tTumor_Sample_Barcode\nTP53\tS1\textra\n",
    )
    .unwrap();
    fs::write(
        study.join("meta_mutations.txt"),
        "genetic_alteration_type: MUTATION_EXTENDED\n",
    )
    .unwrap();
    fs::write(study.join("data_sv.txt"), "Sample_Id\nS1\n").unwrap();
    let out = tmp.path().join("datafiles");

    let options = ConvertOptions::default();
    let summary = BatchDriver::new(&options).unwrap().run(&study, &out).unwrap();
    assert_eq!(summary.pairs.len(), 2);
    assert_eq!(summary.converted(), 1);
    assert_eq!(summary.failed(), 1);

    let cna = summary.pairs.iter().find(|pair| pair.prefix == "cna").unwrap();
    assert_eq!(cna.status, PairStatus::Converted);
    assert_eq!(cna.rows, 2);
    assert_eq!(cna.columns, 3);

    let tsv = fs::read_to_string(out.join("cna.tsv")).unwrap();
    assert_eq!(tsv.lines().next().unwrap(), "sample_id\tTP53\tBRCA1");
    let metadata = read_json(&out.join("cna_metadata.json"));
    assert_eq!(metadata["title"], "GISTIC");
    assert_eq!(metadata["id_column_name"], "sample_id");
    assert!(out.join("cna_dictionary.json").is_file());
    assert!(!out.join("mutations.parquet").exists());

    let options = options.with_skip(true);
    let rerun = BatchDriver::new(&options).unwrap().run(&study, &out).unwrap();
    let cna = rerun.pairs.iter().find(|pair| pair.prefix == "cna").unwrap();
    assert_eq!(cna.status, PairStatus::Skipped);
}
