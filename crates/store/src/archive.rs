//! ZIP archive build-or-extend.
//!
//! The `zip` crate is synchronous; the store drives this module from
//! `spawn_blocking` and serializes calls per identifier.

use crate::error::StoreResult;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Bring the archive's member set up to date with the folder's current files.
///
/// Regular files directly inside `folder` (non-recursive) whose names are not
/// yet members are appended, using the filename as the member name. Existing
/// members are never touched or pruned. A first call on a folder with no
/// files still creates an empty, valid archive.
pub(crate) fn build_or_extend(folder: &Path, archive_path: &Path) -> StoreResult<()> {
    let mut current = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            current.push((name, entry.path()));
        }
    }
    // Deterministic member order across rebuilds.
    current.sort_by(|a, b| a.0.cmp(&b.0));

    let exists = archive_path.exists();
    let members: HashSet<String> = if exists {
        ZipArchive::new(File::open(archive_path)?)?
            .file_names()
            .map(str::to_string)
            .collect()
    } else {
        HashSet::new()
    };

    let missing: Vec<_> = current
        .into_iter()
        .filter(|(name, _)| !members.contains(name))
        .collect();
    if missing.is_empty() && exists {
        return Ok(());
    }

    let mut writer = if exists {
        let file = OpenOptions::new().read(true).write(true).open(archive_path)?;
        ZipWriter::new_append(file)?
    } else {
        ZipWriter::new(File::create(archive_path)?)
    };

    let options = SimpleFileOptions::default();
    for (name, path) in missing {
        writer.start_file(name, options)?;
        let mut src = File::open(path)?;
        std::io::copy(&mut src, &mut writer)?;
    }
    writer.finish()?;
    Ok(())
}
