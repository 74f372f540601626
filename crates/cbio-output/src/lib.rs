//! Output generation for converted datasets.
//!
//! - **identity**: digests, GUID, base-id and revision tags
//! - **archive**: deterministic tar.gz of a source tree
//! - **manifest**: `datafile.tsv` records
//! - **writers**: Parquet, TSV and JSON writers
//! - **layout**: output paths and skip checks

pub mod archive;
pub mod error;
pub mod identity;
pub mod layout;
pub mod manifest;
pub mod writers;

pub use archive::build_tarball;
pub use error::{OutputError, Result};
pub use identity::{
    ContentIdentity, HashAlgorithm, NAMESPACE_PREFIX, baseid_from_md5, deterministic_id, digest,
    digest_named, guid_from_sha1, rev_from_guid,
};
pub use layout::{DATAFILES_DIR, OmicsLayout, StudyLayout};
pub use manifest::{DATAFILE_TSV, ManifestSettings, build_datafile, write_datafile_tsv};
pub use writers::{write_json, write_parquet, write_tsv};
