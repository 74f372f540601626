//! Deterministic tar.gz packaging of a source tree.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::{Compression, GzBuilder};
use tar::{Builder, HeaderMode};
use tracing::{debug, info};

use crate::error::{OutputError, Result};

/// Packs `source_dir` into `tarball_path` under its own directory name.
///
/// Entries are added in sorted path order with normalized tar headers and
/// a zero gzip timestamp, so identical trees produce identical bytes.
/// A partially written archive is removed on failure.
pub fn build_tarball(source_dir: &Path, tarball_path: &Path) -> Result<u64> {
    let root_name = source_dir
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dataset"));
    if let Some(parent) = tarball_path.parent() {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let result = write_tarball(source_dir, &root_name, tarball_path);
    if result.is_err() {
        let _ = fs::remove_file(tarball_path);
    }
    let entries = result?;
    info!(
        path = %tarball_path.display(),
        entries,
        "tarball written"
    );
    Ok(entries)
}

fn write_tarball(source_dir: &Path, root_name: &Path, tarball_path: &Path) -> Result<u64> {
    let write_err = |source| OutputError::Write {
        path: tarball_path.to_path_buf(),
        source,
    };

    let file = File::create(tarball_path).map_err(write_err)?;
    let encoder = GzBuilder::new()
        .mtime(0)
        .write(BufWriter::new(file), Compression::default());
    let mut builder = Builder::new(encoder);
    builder.mode(HeaderMode::Deterministic);
    builder.follow_symlinks(false);

    let mut entries = 0u64;
    builder
        .append_dir(root_name, source_dir)
        .map_err(write_err)?;
    entries += 1;

    for path in sorted_tree(source_dir)? {
        if path == tarball_path {
            continue;
        }
        let Ok(relative) = path.strip_prefix(source_dir) else {
            continue;
        };
        let name = root_name.join(relative);
        if path.is_dir() {
            builder.append_dir(&name, &path).map_err(write_err)?;
        } else {
            builder
                .append_path_with_name(&path, &name)
                .map_err(write_err)?;
        }
        debug!(entry = %name.display(), "archived");
        entries += 1;
    }

    let encoder = builder.into_inner().map_err(write_err)?;
    let mut writer = encoder.finish().map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    Ok(entries)
}

/// Every path below `dir`, depth first, siblings sorted by name.
fn sorted_tree(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut children = fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_err)?;
    children.sort();

    let mut paths = Vec::new();
    for child in children {
        let is_dir = fs::symlink_metadata(&child)
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        paths.push(child.clone());
        if is_dir {
            paths.extend(sorted_tree(&child)?);
        }
    }
    Ok(paths)
}
