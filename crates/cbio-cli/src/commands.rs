use anyhow::{Context, Result};
use cbio_model::{ConvertOptions, MissingValueSet, Taxonomy};
use cbio_output::StudyLayout;
use tracing::info;

use cbio_cli::config::{OptionOverrides, resolve_options};
use cbio_cli::omics::BatchDriver;
use cbio_cli::pipeline::{convert_all, convert_study};
use cbio_cli::taxonomy::{TaxonomySource, default_cache_dir};
use cbio_cli::types::{BatchSummary, BulkEntry, StudyResult};

use crate::cli::{BulkArgs, ConvertArgs, MissingValuesArg, OmicsArgs, OptionArgs, TaxonomyArgs};

pub fn run_convert(args: &ConvertArgs) -> Result<(StudyResult, Option<BatchSummary>)> {
    let options = resolve(&args.options)?;
    let taxonomy = load_taxonomy(&args.taxonomy)?;
    let result = convert_study(&args.study_dir, &args.output_dir, &options, &taxonomy)
        .with_context(|| format!("convert {}", args.study_dir.display()))?;
    let omics = if args.with_omics {
        let datafiles =
            StudyLayout::new(&args.output_dir, &options.version, result.key.as_str()).datafiles_dir();
        Some(BatchDriver::new(&options)?.run(&args.study_dir, &datafiles)?)
    } else {
        None
    };
    Ok((result, omics))
}

pub fn run_bulk(args: &BulkArgs) -> Result<Vec<BulkEntry>> {
    let options = resolve(&args.options)?;
    let taxonomy = load_taxonomy(&args.taxonomy)?;
    convert_all(&args.root_dir, &args.output_dir, &options, &taxonomy)
}

pub fn run_omics(args: &OmicsArgs) -> Result<BatchSummary> {
    let options = resolve(&args.options)?;
    BatchDriver::new(&options)?.run(&args.study_dir, &args.output_dir)
}

pub fn run_taxonomy(args: &TaxonomyArgs) -> Result<Taxonomy> {
    let taxonomy = taxonomy_source(args).refresh()?;
    info!(codes = taxonomy.len(), "taxonomy refreshed");
    Ok(taxonomy)
}

fn resolve(args: &OptionArgs) -> Result<ConvertOptions> {
    let overrides = OptionOverrides {
        organization: args.organization.clone(),
        version: args.dataset_version.clone(),
        skip: args.skip,
        missing_values: args.missing_values.map(|set| match set {
            MissingValuesArg::Baseline => MissingValueSet::Baseline,
            MissingValuesArg::Extended => MissingValueSet::Extended,
        }),
        max_allowed_values: args.max_allowed_values,
        uploader: args.uploader.clone(),
        url_base: args.url_base.clone(),
        license: args.license.clone(),
    };
    resolve_options(args.config.as_deref(), &overrides)
}

fn taxonomy_source(args: &TaxonomyArgs) -> TaxonomySource {
    TaxonomySource {
        url: args.taxonomy_url.clone(),
        cache_dir: args.taxonomy_cache.clone().or_else(default_cache_dir),
        offline: args.offline,
    }
}

fn load_taxonomy(args: &TaxonomyArgs) -> Result<Taxonomy> {
    taxonomy_source(args).load().context("load taxonomy")
}
