//! Batch conversion of omics data/meta pairs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cbio_ingest::{
    AnnotatedFile, OmicsDirectoryScanner, OmicsPair, profile_metadata, read_annotated_file,
    read_meta_file,
};
use cbio_model::ConvertOptions;
use cbio_output::{OmicsLayout, write_json, write_parquet, write_tsv};
use cbio_transform::{DictionaryBuilder, MissingValuePolicy, TypeCoercionEngine, format_profile};
use tracing::{error, info, info_span};

use crate::types::{BatchSummary, PairOutcome, PairStatus};

/// Converts every omics pair of a study directory, isolating failures per
/// pair.
#[derive(Debug)]
pub struct BatchDriver<'a> {
    options: &'a ConvertOptions,
    scanner: OmicsDirectoryScanner,
}

impl<'a> BatchDriver<'a> {
    pub fn new(options: &'a ConvertOptions) -> Result<Self> {
        let scanner = OmicsDirectoryScanner::new().context("compile omics file patterns")?;
        Ok(Self { options, scanner })
    }

    /// Scans `study_dir` and writes each pair's artifacts to `output_dir`.
    ///
    /// Only a failure to scan the input or create the output directory is
    /// returned as an error.
    pub fn run(&self, study_dir: &Path, output_dir: &Path) -> Result<BatchSummary> {
        let pairs = self
            .scanner
            .scan(study_dir)
            .context("scan for omics files")?;
        info!(dir = %study_dir.display(), pairs = pairs.len(), "found omics pairs");
        fs::create_dir_all(output_dir)
            .with_context(|| format!("create {}", output_dir.display()))?;

        let mut summary = BatchSummary {
            output_dir: output_dir.to_path_buf(),
            pairs: Vec::with_capacity(pairs.len()),
        };
        for pair in &pairs {
            let span = info_span!("omics", prefix = %pair.prefix);
            let _guard = span.enter();
            let outcome = match self.convert_pair(pair, output_dir) {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!("{err:#}");
                    PairOutcome::failed(&pair.prefix, format!("{err:#}"))
                }
            };
            summary.pairs.push(outcome);
        }
        info!(
            converted = summary.converted(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "omics batch finished"
        );
        Ok(summary)
    }

    /// Converts one pair into `<prefix>.parquet`, `<prefix>.tsv`,
    /// `<prefix>_dictionary.json` and `<prefix>_metadata.json`.
    pub fn convert_pair(&self, pair: &OmicsPair, output_dir: &Path) -> Result<PairOutcome> {
        let layout = OmicsLayout::new(output_dir, pair.prefix.as_str());
        if self.options.skip && layout.is_complete() {
            info!("outputs complete, skipping");
            return Ok(PairOutcome::skipped(&pair.prefix));
        }

        let meta = read_meta_file(&pair.meta_path).context("read profile metadata")?;
        let profile = profile_metadata(&meta);
        let mut file = read_annotated_file(&pair.data_path, self.options.omics_case)
            .context("read omics data file")?;
        let provenance = file.provenance();
        let AnnotatedFile {
            table, mut report, ..
        } = file;

        let policy = MissingValuePolicy::new(self.options.missing_values);
        let table = format_profile(
            table,
            &profile.genetic_alteration_type,
            &policy,
            self.options.omics_case,
            &mut report,
        )
        .context("format profile table")?;

        let engine = TypeCoercionEngine::new(policy);
        let mut typed = engine
            .coerce(&table, &provenance, &mut report)
            .context("coerce omics table")?;
        let dictionary = DictionaryBuilder::new()
            .with_max_allowed_values(self.options.max_allowed_values)
            .build(&typed, &provenance, &mut report);

        write_parquet(&mut typed.data, &layout.parquet_path()).context("write parquet")?;
        write_tsv(&mut typed.data, &layout.tsv_path()).context("write tsv")?;
        write_json(&dictionary, &layout.dictionary_path()).context("write dictionary")?;
        write_json(&profile, &layout.metadata_path()).context("write profile metadata")?;

        info!(
            profile = %profile.genetic_alteration_type,
            rows = typed.height(),
            columns = typed.width(),
            "omics pair converted"
        );
        Ok(PairOutcome {
            prefix: pair.prefix.clone(),
            status: PairStatus::Converted,
            profile_type: Some(profile.genetic_alteration_type.to_string()),
            rows: typed.height(),
            columns: typed.width(),
            report,
            error: None,
        })
    }
}
