use crate::constants::{EPUB_EXTENSION, MIMETYPE_ENTRY, OUTPUT_SUFFIX};
use crate::error::{Result, ZipperError};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Directory holding one unpacked archive.
///
/// The tree is removed when the value is dropped, whether the pipeline that
/// owns it finished, failed or panicked. Removal errors are ignored.
#[derive(Debug)]
pub struct ExtractedDir {
    path: PathBuf,
}

impl ExtractedDir {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ExtractedDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Builds `<stem>_zipped.epub`.
pub fn zipped_name(stem: &str) -> String {
    format!("{}{}.{}", stem, OUTPUT_SUFFIX, EPUB_EXTENSION)
}

/// Unpacks `archive_path` into `<out_dir>/<file stem>`.
///
/// A previous extraction with the same name is removed first, unless that
/// directory holds the archive itself. The returned guard owns the directory
/// from the moment it is created, so a failed extraction leaves nothing behind.
pub fn unpack_epub(archive_path: &Path, out_dir: &Path) -> Result<ExtractedDir> {
    let stem = archive_path
        .file_stem()
        .ok_or_else(|| ZipperError::InvalidFileName(archive_path.to_path_buf()))?;
    let target = out_dir.join(stem);

    if contains_path(&target, archive_path) {
        return Err(ZipperError::ExtractionOverlapsInput(target));
    }

    let _ = fs::remove_dir_all(&target);
    fs::create_dir(&target)?;
    let extracted = ExtractedDir { path: target };

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ZipperError::UnsafeArchivePath(entry.name().to_string()))?;
        let dest = extracted.path.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest)?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&dest)?);
        io::copy(&mut entry, &mut writer)?;
    }

    Ok(extracted)
}

/// Whether `path` lies inside `dir`, comparing resolved paths when both exist.
fn contains_path(dir: &Path, path: &Path) -> bool {
    let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    path.starts_with(dir)
}

fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Zips the contents of `dir` into `<parent of dir>/<dir name>_zipped.epub`.
///
/// Entry names are relative to `dir`. A top-level `mimetype` file goes first
/// and is stored uncompressed; everything else is deflated in file-name order.
pub fn repack_epub(dir: &Path) -> Result<PathBuf> {
    let name = dir
        .file_name()
        .ok_or_else(|| ZipperError::InvalidFileName(dir.to_path_buf()))?;
    let parent = dir
        .parent()
        .ok_or_else(|| ZipperError::InvalidFileName(dir.to_path_buf()))?;
    let output_path = parent.join(zipped_name(&name.to_string_lossy()));

    let _ = fs::remove_file(&output_path);
    let mut writer = ZipWriter::new(BufWriter::new(File::create(&output_path)?));

    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mimetype = dir.join(MIMETYPE_ENTRY);
    if mimetype.is_file() {
        writer.start_file(MIMETYPE_ENTRY, stored)?;
        io::copy(&mut File::open(&mimetype)?, &mut writer)?;
    }

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.path() == mimetype {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|_| ZipperError::InvalidFileName(entry.path().to_path_buf()))?;
        writer.start_file(entry_name(relative), deflated)?;
        io::copy(&mut File::open(entry.path())?, &mut writer)?;
    }

    let mut inner = writer.finish()?;
    inner.flush()?;
    Ok(output_path)
}
