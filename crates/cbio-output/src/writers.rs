//! Table and document writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use serde::Serialize;
use tracing::debug;

use crate::error::{OutputError, Result};

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = create(path)?;
    ParquetWriter::new(&mut file)
        .finish(df)
        .map_err(|source| OutputError::Table {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), rows = df.height(), "parquet written");
    Ok(())
}

/// Tab-separated with a header row; nulls are written as empty cells.
pub fn write_tsv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b'\t')
        .finish(df)
        .map_err(|source| OutputError::Table {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), rows = df.height(), "tsv written");
    Ok(())
}

/// Pretty-printed JSON with a trailing newline.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(create(path)?);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), "json written");
    Ok(())
}
