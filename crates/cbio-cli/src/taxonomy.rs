//! Fetching and caching the disease/organ taxonomy.
//!
//! The tumor-type tree is downloaded once, flattened into two mappings and
//! cached as JSON. Later runs read the cache.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use cbio_model::Taxonomy;
use directories::BaseDirs;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing::{debug, info, warn};

pub const DEFAULT_TAXONOMY_URL: &str =
    "https://oncotree.mskcc.org/api/tumorTypes/tree/?&version=oncotree_latest_stable";

/// Overrides the default cache directory.
pub const TAXONOMY_DIR_ENV: &str = "CBIO_TAXONOMY_DIR";

pub const DISEASE_MAPPING_FILE: &str = "code_to_disease_mapping.json";
pub const ORGAN_MAPPING_FILE: &str = "code_to_organ_mapping.json";

const CACHE_DIR_NAME: &str = ".biominer-indexd";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// `$CBIO_TAXONOMY_DIR`, else `~/.biominer-indexd`.
pub fn default_cache_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(TAXONOMY_DIR_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CACHE_DIR_NAME))
}

/// Where the taxonomy comes from.
#[derive(Debug, Clone)]
pub struct TaxonomySource {
    pub url: String,
    pub cache_dir: Option<PathBuf>,
    /// Use an empty lookup instead of the network or cache.
    pub offline: bool,
}

impl Default for TaxonomySource {
    fn default() -> Self {
        Self {
            url: DEFAULT_TAXONOMY_URL.to_string(),
            cache_dir: default_cache_dir(),
            offline: false,
        }
    }
}

impl TaxonomySource {
    /// Cached mappings when both files exist, otherwise a fresh fetch that
    /// is written back to the cache.
    pub fn load(&self) -> Result<Taxonomy> {
        if self.offline {
            info!("offline mode, taxonomy lookups disabled");
            return Ok(Taxonomy::empty());
        }
        if let Some(dir) = &self.cache_dir
            && let Some(taxonomy) = load_cache(dir)?
        {
            info!(path = %dir.display(), codes = taxonomy.len(), "loaded cached taxonomy");
            return Ok(taxonomy);
        }
        self.refresh()
    }

    /// Fetches the tree and rewrites the cache.
    pub fn refresh(&self) -> Result<Taxonomy> {
        let tree = fetch_tree(&self.url)?;
        let taxonomy = Taxonomy::from_tree(&tree).context("flatten taxonomy tree")?;
        info!(codes = taxonomy.len(), "fetched taxonomy");
        match &self.cache_dir {
            Some(dir) => save_cache(&taxonomy, dir)?,
            None => warn!("no cache directory available, taxonomy not cached"),
        }
        Ok(taxonomy)
    }
}

pub fn fetch_tree(url: &str) -> Result<Value> {
    debug!(%url, "fetching taxonomy tree");
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("build HTTP client")?;
    let response = client
        .get(url)
        .header(USER_AGENT, format!("cbio-convert/{}", env!("CARGO_PKG_VERSION")))
        .header(ACCEPT, "application/json")
        .send()
        .with_context(|| format!("request {url}"))?;
    if !response.status().is_success() {
        bail!("taxonomy request to {url} failed with status {}", response.status());
    }
    response.json().context("decode taxonomy tree")
}

/// Reads both mapping files; `None` unless both exist.
pub fn load_cache(dir: &Path) -> Result<Option<Taxonomy>> {
    let disease_path = dir.join(DISEASE_MAPPING_FILE);
    let organ_path = dir.join(ORGAN_MAPPING_FILE);
    if !(disease_path.is_file() && organ_path.is_file()) {
        return Ok(None);
    }
    let disease = read_mapping(&disease_path)?;
    let organ = read_mapping(&organ_path)?;
    Ok(Some(Taxonomy::from_mappings(disease, organ)))
}

pub fn save_cache(taxonomy: &Taxonomy, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    write_mapping(&dir.join(DISEASE_MAPPING_FILE), &taxonomy.code_to_disease)?;
    write_mapping(&dir.join(ORGAN_MAPPING_FILE), &taxonomy.code_to_organ)?;
    info!(path = %dir.display(), "cached taxonomy");
    Ok(())
}

fn read_mapping(path: &Path) -> Result<BTreeMap<String, String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}

fn write_mapping(path: &Path, mapping: &BTreeMap<String, String>) -> Result<()> {
    let content = serde_json::to_string_pretty(mapping).context("serialize taxonomy mapping")?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Taxonomy {
        Taxonomy::from_mappings(
            BTreeMap::from([("BRCA".to_string(), "Invasive Breast Carcinoma".to_string())]),
            BTreeMap::from([("BRCA".to_string(), "Breast".to_string())]),
        )
    }

    #[test]
    fn test_cache_round_trip() {
        let tmp = TempDir::new().unwrap();
        save_cache(&sample(), tmp.path()).unwrap();
        let loaded = load_cache(tmp.path()).unwrap().unwrap();
        assert_eq!(loaded.disease("brca"), Some("Invasive Breast Carcinoma"));
        assert_eq!(loaded.organ("BRCA"), Some("Breast"));
    }

    #[test]
    fn test_partial_cache_is_ignored() {
        let tmp = TempDir::new().unwrap();
        save_cache(&sample(), tmp.path()).unwrap();
        fs::remove_file(tmp.path().join(ORGAN_MAPPING_FILE)).unwrap();
        assert!(load_cache(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn test_cached_source_does_not_fetch() {
        let tmp = TempDir::new().unwrap();
        save_cache(&sample(), tmp.path()).unwrap();
        let source = TaxonomySource {
            url: "http://127.0.0.1:9/unreachable".to_string(),
            cache_dir: Some(tmp.path().to_path_buf()),
            offline: false,
        };
        assert_eq!(source.load().unwrap().len(), 1);
    }

    #[test]
    fn test_offline_is_empty() {
        let source = TaxonomySource {
            offline: true,
            ..TaxonomySource::default()
        };
        assert!(source.load().unwrap().is_empty());
    }
}
