//! Conversion options from an optional TOML file plus command-line
//! overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cbio_model::{ConvertOptions, MissingValueSet};
use tracing::info;

/// Values given explicitly on the command line. `None` keeps the file or
/// default value.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub organization: Option<String>,
    pub version: Option<String>,
    pub skip: bool,
    pub missing_values: Option<MissingValueSet>,
    pub max_allowed_values: Option<usize>,
    pub uploader: Option<String>,
    pub url_base: Option<String>,
    pub license: Option<String>,
}

/// Reads a TOML options file. Missing keys take their defaults.
pub fn load_options_file(path: &Path) -> Result<ConvertOptions> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let options: ConvertOptions = toml::from_str(&content)
        .with_context(|| format!("parse config file {}", path.display()))?;
    info!(path = %path.display(), "loaded config file");
    Ok(options)
}

/// File values (or defaults) with command-line overrides applied on top.
pub fn resolve_options(config: Option<&Path>, overrides: &OptionOverrides) -> Result<ConvertOptions> {
    let mut options = match config {
        Some(path) => load_options_file(path)?,
        None => ConvertOptions::default(),
    };
    if let Some(organization) = &overrides.organization {
        options.organization.clone_from(organization);
    }
    if let Some(version) = &overrides.version {
        options.version.clone_from(version);
    }
    if overrides.skip {
        options.skip = true;
    }
    if let Some(set) = overrides.missing_values {
        options.missing_values = set;
    }
    if overrides.max_allowed_values.is_some() {
        options.max_allowed_values = overrides.max_allowed_values;
    }
    if let Some(uploader) = &overrides.uploader {
        options.uploader.clone_from(uploader);
    }
    if let Some(url_base) = &overrides.url_base {
        options.url_base.clone_from(url_base);
    }
    if let Some(license) = &overrides.license {
        options.license.clone_from(license);
    }
    Ok(options)
}
