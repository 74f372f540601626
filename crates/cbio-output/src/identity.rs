//! Content-derived identifiers.
//!
//! The GUID is a version-5 UUID over the sha1 hex digest of the content,
//! prefixed with [`NAMESPACE_PREFIX`]. The base-id is the same derivation
//! over the md5 hex digest. Both namespaces are fixed so identifiers stay
//! stable across runs and implementations.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use tracing::debug;
use uuid::Uuid;

use crate::error::{OutputError, Result};

/// Organizational prefix of every GUID.
pub const NAMESPACE_PREFIX: &str = "biominer.fudan-pgx";

/// UUID namespace of every derivation.
pub const ID_NAMESPACE: Uuid = Uuid::NAMESPACE_URL;

/// Length of the short revision tag.
pub const REV_LEN: usize = 8;

/// Buffer size for reading files during hashing.
const BUFFER_SIZE: usize = 65536; // 64 KB

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(OutputError::UnsupportedHash(s.to_string())),
        }
    }
}

/// Hex digest of `bytes`.
pub fn digest(bytes: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Md5 => format!("{:x}", md5::compute(bytes)),
        HashAlgorithm::Sha1 => hex::encode(Sha1::digest(bytes)),
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
        HashAlgorithm::Sha512 => hex::encode(Sha512::digest(bytes)),
    }
}

/// Hex digest by algorithm name; unknown names are an error.
pub fn digest_named(bytes: &[u8], algorithm: &str) -> Result<String> {
    Ok(digest(bytes, algorithm.parse()?))
}

/// Version-5 UUID of a hex digest string under [`ID_NAMESPACE`].
pub fn uuid_for_digest(hex_digest: &str) -> Uuid {
    Uuid::new_v5(&ID_NAMESPACE, hex_digest.as_bytes())
}

/// Identifier derived from the sha1 digest of `bytes`.
pub fn deterministic_id(bytes: &[u8]) -> Uuid {
    uuid_for_digest(&digest(bytes, HashAlgorithm::Sha1))
}

/// `<prefix>/<uuid>` for a sha1 hex digest.
pub fn guid_from_sha1(sha1_hex: &str) -> String {
    format!("{NAMESPACE_PREFIX}/{}", uuid_for_digest(sha1_hex))
}

/// Base-id for an md5 hex digest.
pub fn baseid_from_md5(md5_hex: &str) -> String {
    uuid_for_digest(md5_hex).to_string()
}

/// First [`REV_LEN`] characters of the UUID part of `guid`.
pub fn rev_from_guid(guid: &str) -> String {
    let id = guid.rsplit_once('/').map_or(guid, |(_, id)| id);
    id.chars().take(REV_LEN).collect()
}

/// Digests and identifiers of one piece of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentIdentity {
    pub md5: String,
    pub sha1: String,
    pub guid: String,
    pub baseid: String,
    pub rev: String,
}

impl ContentIdentity {
    fn from_digests(md5: String, sha1: String) -> Self {
        let guid = guid_from_sha1(&sha1);
        let baseid = baseid_from_md5(&md5);
        let rev = rev_from_guid(&guid);
        Self {
            md5,
            sha1,
            guid,
            baseid,
            rev,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_digests(
            digest(bytes, HashAlgorithm::Md5),
            digest(bytes, HashAlgorithm::Sha1),
        )
    }

    /// Hashes a file in one buffered pass.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Computing identity for: {}", path.display());
        let io_err = |source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let mut md5 = md5::Context::new();
        let mut sha1 = Sha1::new();
        let mut buffer = vec![0u8; BUFFER_SIZE];

        loop {
            let bytes_read = reader.read(&mut buffer).map_err(io_err)?;
            if bytes_read == 0 {
                break;
            }
            md5.consume(&buffer[..bytes_read]);
            sha1.update(&buffer[..bytes_read]);
        }

        let identity = Self::from_digests(
            format!("{:x}", md5.compute()),
            hex::encode(sha1.finalize()),
        );
        debug!(guid = %identity.guid, baseid = %identity.baseid, "identity computed");
        Ok(identity)
    }
}
