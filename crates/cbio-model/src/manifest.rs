//! Manifest entry describing one produced archive.

use serde::{Deserialize, Serialize};

use crate::enums::{Access, FileStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUrl {
    pub url: String,
    pub created_at: i64,
    pub status: FileStatus,
    pub uploader: String,
    /// GUID of the owning file.
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHash {
    pub hash_type: String,
    pub hash: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAlias {
    pub name: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTag {
    pub field_name: String,
    pub field_value: String,
    pub file: Option<String>,
}

/// A content-addressed manifest record (`datafile.tsv`).
///
/// `guid` and `baseid` derive from the archive bytes only, so identical
/// archives always produce identical records apart from timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFile {
    pub guid: String,
    pub filename: String,
    pub size: u64,
    pub created_at: i64,
    pub updated_at: i64,
    pub status: FileStatus,
    pub baseid: String,
    pub rev: String,
    pub version: u32,
    pub uploader: String,
    pub access: Access,
    pub acl: Option<String>,
    pub urls: Vec<FileUrl>,
    pub hashes: Vec<FileHash>,
    pub aliases: Vec<FileAlias>,
    pub tags: Vec<FileTag>,
}

impl DataFile {
    /// Flattens the record into ordered `(column, value)` pairs.
    ///
    /// Sub-lists are expanded with an index suffix, e.g. `url_0_url`,
    /// `hash_0_hash_type`.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut flat = vec![
            ("guid".to_string(), self.guid.clone()),
            ("filename".to_string(), self.filename.clone()),
            ("size".to_string(), self.size.to_string()),
            ("created_at".to_string(), self.created_at.to_string()),
            ("updated_at".to_string(), self.updated_at.to_string()),
            ("status".to_string(), self.status.to_string()),
            ("baseid".to_string(), self.baseid.clone()),
            ("rev".to_string(), self.rev.clone()),
            ("version".to_string(), self.version.to_string()),
            ("uploader".to_string(), self.uploader.clone()),
            ("access".to_string(), self.access.to_string()),
            ("acl".to_string(), self.acl.clone().unwrap_or_default()),
        ];
        for (i, url) in self.urls.iter().enumerate() {
            flat.push((format!("url_{i}_url"), url.url.clone()));
            flat.push((format!("url_{i}_created_at"), url.created_at.to_string()));
            flat.push((format!("url_{i}_status"), url.status.to_string()));
            flat.push((format!("url_{i}_uploader"), url.uploader.clone()));
        }
        for (i, hash) in self.hashes.iter().enumerate() {
            flat.push((format!("hash_{i}_hash_type"), hash.hash_type.clone()));
            flat.push((format!("hash_{i}_hash"), hash.hash.clone()));
        }
        for (i, alias) in self.aliases.iter().enumerate() {
            flat.push((format!("alias_{i}_name"), alias.name.clone()));
        }
        for (i, tag) in self.tags.iter().enumerate() {
            flat.push((format!("tag_{i}_field_name"), tag.field_name.clone()));
            flat.push((format!("tag_{i}_field_value"), tag.field_value.clone()));
        }
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFile {
        let guid = "biominer.fudan-pgx/0f8fad5b-d9cb-569f-a165-70867728950e".to_string();
        DataFile {
            guid: guid.clone(),
            filename: "brca.tar.gz".to_string(),
            size: 1024,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
            status: FileStatus::Pending,
            baseid: "6ba7b811-9dad-51d1-80b4-00c04fd430c8".to_string(),
            rev: "0f8fad5b".to_string(),
            version: 1,
            uploader: "BioMiner".to_string(),
            access: Access::Public,
            acl: None,
            urls: vec![FileUrl {
                url: "minio://processed-data/OmicsDatasets/brca.tar.gz".to_string(),
                created_at: 1_700_000_000,
                status: FileStatus::Pending,
                uploader: "BioMiner".to_string(),
                file: Some(guid.clone()),
            }],
            hashes: vec![FileHash {
                hash_type: "md5".to_string(),
                hash: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
                file: Some(guid),
            }],
            aliases: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_flatten_expands_indexed_sublists() {
        let flat = sample().flatten();
        let keys: Vec<&str> = flat.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(&keys[..3], ["guid", "filename", "size"]);
        assert!(keys.contains(&"url_0_url"));
        assert!(keys.contains(&"url_0_uploader"));
        assert!(keys.contains(&"hash_0_hash_type"));
        assert!(!keys.iter().any(|key| key.starts_with("alias_")));
        let status = flat.iter().find(|(key, _)| key == "status").unwrap();
        assert_eq!(status.1, "pending");
        let acl = flat.iter().find(|(key, _)| key == "acl").unwrap();
        assert_eq!(acl.1, "");
    }
}
