//! Manifest (`datafile.tsv`) generation for a packaged dataset.

use std::fs;
use std::path::{Path, PathBuf};

use cbio_model::{Access, DataFile, FileHash, FileStatus, FileUrl};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{OutputError, Result};
use crate::identity::{ContentIdentity, HashAlgorithm};

pub const DATAFILE_TSV: &str = "datafile.tsv";
pub const MANIFEST_VERSION: u32 = 1;

/// Settings that do not derive from the archive itself.
#[derive(Debug, Clone)]
pub struct ManifestSettings<'a> {
    pub filename: &'a str,
    pub uploader: &'a str,
    pub url_base: &'a str,
}

/// Builds the manifest record of an archive.
///
/// Identity fields come from the archive bytes; size and timestamps from
/// its filesystem metadata.
pub fn build_datafile(archive_path: &Path, settings: &ManifestSettings<'_>) -> Result<DataFile> {
    let metadata = fs::metadata(archive_path).map_err(|source| OutputError::Io {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let created_at = metadata
        .modified()
        .map(|time| DateTime::<Utc>::from(time).timestamp())
        .unwrap_or_default();
    let identity = ContentIdentity::from_file(archive_path)?;

    let url = format!("{}/{}", settings.url_base.trim_end_matches('/'), settings.filename);
    let datafile = DataFile {
        guid: identity.guid.clone(),
        filename: settings.filename.to_string(),
        size: metadata.len(),
        created_at,
        updated_at: created_at,
        status: FileStatus::Pending,
        baseid: identity.baseid,
        rev: identity.rev,
        version: MANIFEST_VERSION,
        uploader: settings.uploader.to_string(),
        access: Access::Public,
        acl: None,
        urls: vec![FileUrl {
            url,
            created_at,
            status: FileStatus::Pending,
            uploader: settings.uploader.to_string(),
            file: Some(identity.guid.clone()),
        }],
        hashes: vec![FileHash {
            hash_type: HashAlgorithm::Md5.to_string(),
            hash: identity.md5,
            file: Some(identity.guid),
        }],
        aliases: Vec::new(),
        tags: Vec::new(),
    };
    info!(guid = %datafile.guid, baseid = %datafile.baseid, "manifest built");
    Ok(datafile)
}

/// Writes the flattened record as a one-row TSV with a header.
pub fn write_datafile_tsv(datafile: &DataFile, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(DATAFILE_TSV);
    let csv_err = |source| OutputError::Csv {
        path: path.clone(),
        source,
    };
    let flat = datafile.flatten();

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&path)
        .map_err(csv_err)?;
    writer
        .write_record(flat.iter().map(|(key, _)| key.as_str()))
        .map_err(csv_err)?;
    writer
        .write_record(flat.iter().map(|(_, value)| value.as_str()))
        .map_err(csv_err)?;
    writer.flush().map_err(|source| OutputError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_and_write_manifest() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("brca.tar.gz");
        fs::write(&archive, b"hello cbio").unwrap();

        let datafile = build_datafile(
            &archive,
            &ManifestSettings {
                filename: "brca.tar.gz",
                uploader: "BioMiner",
                url_base: "minio://processed-data/OmicsDatasets/",
            },
        )
        .unwrap();

        assert_eq!(
            datafile.guid,
            "biominer.fudan-pgx/234024d9-c201-54fd-9881-df8dd9012a32"
        );
        assert_eq!(datafile.baseid, "4ab1587d-2861-52d9-9af0-bb7c382475e4");
        assert_eq!(datafile.rev, "234024d9");
        assert_eq!(datafile.size, 10);
        assert_eq!(datafile.version, 1);
        assert_eq!(
            datafile.urls[0].url,
            "minio://processed-data/OmicsDatasets/brca.tar.gz"
        );
        assert_eq!(datafile.hashes[0].hash_type, "md5");
        assert_eq!(datafile.hashes[0].hash, "238417d152e8fe38735adf6b8930ebd8");

        let path = write_datafile_tsv(&datafile, tmp.path()).unwrap();
        let content = fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        let header: Vec<&str> = lines.next().unwrap().split('\t').collect();
        let row: Vec<&str> = lines.next().unwrap().split('\t').collect();
        assert_eq!(header.len(), row.len());
        assert_eq!(header[0], "guid");
        let status = header.iter().position(|h| *h == "status").unwrap();
        assert_eq!(row[status], "pending");
        assert!(header.contains(&"url_0_url"));
        assert!(header.contains(&"hash_0_hash"));
    }
}
