//! Integration tests for archive, manifest and layout outputs.

use std::fs;
use std::path::Path;

use cbio_output::{
    ContentIdentity, DATAFILE_TSV, ManifestSettings, StudyLayout, build_datafile, build_tarball,
    write_datafile_tsv,
};
use tempfile::TempDir;

fn write_study(dir: &Path) {
    fs::create_dir_all(dir.join("case_lists")).unwrap();
    fs::write(dir.join("meta_study.txt"), "cancer_study_identifier: demo\n").unwrap();
    fs::write(
        dir.join("data_clinical_patient.txt"),
        "PATIENT_ID\tAGE\nP1\t40\n",
    )
    .unwrap();
    fs::write(dir.join("case_lists").join("cases_all.txt"), "P1\n").unwrap();
}

#[test]
fn identical_trees_share_manifest_identity() {
    let tmp = TempDir::new().unwrap();
    let first = tmp.path().join("first");
    let second = tmp.path().join("second");
    write_study(&first);
    write_study(&second);

    let first_tar = tmp.path().join("a.tar.gz");
    let second_tar = tmp.path().join("b.tar.gz");
    build_tarball(&first, &first_tar).unwrap();
    build_tarball(&second, &second_tar).unwrap();

    let settings = ManifestSettings {
        filename: "demo.tar.gz",
        uploader: "BioMiner",
        url_base: "minio://processed-data/OmicsDatasets",
    };
    let a = build_datafile(&first_tar, &settings).unwrap();
    let b = build_datafile(&second_tar, &settings).unwrap();
    assert_eq!(a.guid, b.guid);
    assert_eq!(a.baseid, b.baseid);
    assert_eq!(a.rev, b.rev);
    assert!(a.guid.starts_with("biominer.fudan-pgx/"));
}

#[test]
fn manifest_hash_matches_archive_bytes() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("study");
    write_study(&source);
    let layout = StudyLayout::new(&tmp.path().join("out"), "v0.0.1", "demo");
    layout.create().unwrap();
    build_tarball(&source, &layout.tarball_path()).unwrap();

    let datafile = build_datafile(
        &layout.tarball_path(),
        &ManifestSettings {
            filename: &layout.tarball_name(),
            uploader: "BioMiner",
            url_base: "minio://processed-data/OmicsDatasets",
        },
    )
    .unwrap();
    let bytes = fs::read(layout.tarball_path()).unwrap();
    let identity = ContentIdentity::from_bytes(&bytes);
    assert_eq!(datafile.hashes[0].hash, identity.md5);
    assert_eq!(datafile.size, bytes.len() as u64);

    let path = write_datafile_tsv(&datafile, layout.dir()).unwrap();
    assert_eq!(path, layout.datafile_path());
    assert!(path.ends_with(DATAFILE_TSV));
    let content = fs::read_to_string(&path).unwrap();
    let header = content.lines().next().unwrap();
    assert!(header.contains("url_0_url"));
    assert!(header.contains("hash_0_hash_type"));
    assert!(!header.contains("alias_0_name"));
}
