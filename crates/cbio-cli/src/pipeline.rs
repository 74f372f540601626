//! Single-study and bulk conversion.
//!
//! A study is converted in three stages:
//!
//! 1. **Ingest**: read `meta_study.txt`, check the dataset key against the
//!    directory name, merge the clinical files.
//! 2. **Transform**: apply the missing-value policy, coerce column types,
//!    build the data dictionary.
//! 3. **Output**: write the table, dictionary and dataset document, archive
//!    the source tree, write the manifest and placeholder docs.
//!
//! Nothing is written before the key check passes. A failure after the
//! output directory exists removes it unless the primary artifacts made it
//! to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cbio_ingest::{MergedTable, load_clinical_table, read_meta_file, study_metadata};
use cbio_model::{ConvertOptions, DatasetMetadata, DiagnosticReport, Taxonomy};
use cbio_output::{
    ManifestSettings, StudyLayout, build_datafile, build_tarball, write_datafile_tsv, write_json,
    write_parquet,
};
use cbio_transform::{DictionaryBuilder, MissingValuePolicy, TypeCoercionEngine};
use tracing::{error, info, info_span, warn};

use crate::types::{BulkEntry, StudyResult};

pub const META_STUDY_FILE: &str = "meta_study.txt";

/// Converts `study_dir` into `<output_root>/<version>/`.
pub fn convert_study(
    study_dir: &Path,
    output_root: &Path,
    options: &ConvertOptions,
    taxonomy: &Taxonomy,
) -> Result<StudyResult> {
    let meta = read_meta_file(&study_dir.join(META_STUDY_FILE)).context("read study metadata")?;
    let dataset = study_metadata(&meta, taxonomy, &options.organization);
    check_study_key(&dataset.key, study_dir)?;

    let span = info_span!("study", key = %dataset.key);
    let _guard = span.enter();
    let layout = StudyLayout::new(output_root, &options.version, dataset.key.as_str());

    if options.skip && layout.is_complete() {
        info!(path = %layout.dir().display(), "outputs complete, skipping");
        return Ok(StudyResult {
            key: dataset.key,
            output_dir: layout.dir().to_path_buf(),
            rows: 0,
            columns: 0,
            skipped: true,
            guid: None,
            report: DiagnosticReport::new("clinical"),
        });
    }

    layout.create().context("create output directory")?;
    let result = write_study(study_dir, &layout, dataset, options);
    if result.is_err() {
        match layout.remove_if_incomplete() {
            Ok(true) => warn!(path = %layout.dir().display(), "conversion failed, output removed"),
            Ok(false) => {}
            Err(cleanup) => warn!(%cleanup, "failed to remove incomplete output"),
        }
    }
    result
}

fn write_study(
    study_dir: &Path,
    layout: &StudyLayout,
    mut dataset: DatasetMetadata,
    options: &ConvertOptions,
) -> Result<StudyResult> {
    // Stage 1: Ingest
    let MergedTable {
        table,
        provenance,
        mut report,
    } = load_clinical_table(study_dir, options.clinical_case).context("load clinical tables")?;

    // Stage 2: Transform
    let engine = TypeCoercionEngine::new(MissingValuePolicy::new(options.missing_values));
    let mut typed = engine
        .coerce(&table, &provenance, &mut report)
        .context("coerce clinical table")?;
    let dictionary = DictionaryBuilder::new()
        .with_max_allowed_values(options.max_allowed_values)
        .build(&typed, &provenance, &mut report);

    dataset.total = typed.height();
    dataset.version.clone_from(&options.version);
    dataset.license.clone_from(&options.license);

    // Stage 3: Output
    write_parquet(&mut typed.data, &layout.table_path()).context("write metadata table")?;
    write_json(&dictionary, &layout.dictionary_path()).context("write data dictionary")?;
    write_json(&dataset, &layout.dataset_path()).context("write dataset metadata")?;

    let tarball = layout.tarball_path();
    if tarball.exists() {
        info!(path = %tarball.display(), "archive exists, reusing");
    } else {
        let entries = build_tarball(study_dir, &tarball).context("archive study directory")?;
        info!(path = %tarball.display(), entries, "archived study directory");
    }
    let tarball_name = layout.tarball_name();
    let datafile = build_datafile(
        &tarball,
        &ManifestSettings {
            filename: &tarball_name,
            uploader: &options.uploader,
            url_base: &options.url_base,
        },
    )
    .context("build manifest")?;
    write_datafile_tsv(&datafile, layout.dir()).context("write manifest")?;
    layout
        .ensure_placeholder_docs()
        .context("create placeholder docs")?;

    info!(
        rows = typed.height(),
        columns = typed.width(),
        warnings = report.warning_count(),
        errors = report.error_count(),
        "study converted"
    );
    Ok(StudyResult {
        key: dataset.key,
        output_dir: layout.dir().to_path_buf(),
        rows: typed.height(),
        columns: typed.width(),
        skipped: false,
        guid: Some(datafile.guid),
        report,
    })
}

/// Fails unless `key` equals the base name of `study_dir`.
pub fn check_study_key(key: &str, study_dir: &Path) -> Result<()> {
    let name = directory_name(study_dir)
        .with_context(|| format!("resolve directory name of {}", study_dir.display()))?;
    if name != key {
        bail!(
            "dataset key '{key}' does not match study directory name '{name}' ({})",
            study_dir.display()
        );
    }
    Ok(())
}

fn directory_name(dir: &Path) -> Result<String> {
    let resolved = match dir.file_name() {
        Some(_) => dir.to_path_buf(),
        None => fs::canonicalize(dir)?,
    };
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("path has no final component")
}

/// Immediate sub-directories of `root`, sorted by name.
pub fn study_directories(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("read {}", root.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Converts every study under `root` into `<output_root>/<name>/`.
///
/// A failing study is logged and recorded; the remaining studies still run.
pub fn convert_all(
    root: &Path,
    output_root: &Path,
    options: &ConvertOptions,
    taxonomy: &Taxonomy,
) -> Result<Vec<BulkEntry>> {
    let dirs = study_directories(root)?;
    info!(root = %root.display(), studies = dirs.len(), "bulk conversion");
    let mut entries = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let outcome = convert_study(&dir, &output_root.join(&name), options, taxonomy)
            .map_err(|err| {
                error!(study = %name, "{err:#}");
                format!("{err:#}")
            });
        entries.push(BulkEntry { name, outcome });
    }
    Ok(entries)
}
