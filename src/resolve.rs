use crate::error::{Result, ZipperError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Source and output locations after validation, plus the inputs to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub source: PathBuf,
    pub output: PathBuf,
    pub inputs: Vec<PathBuf>,
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Resolves the `--src` argument against `cwd`. The path must exist.
pub fn resolve_source(cwd: &Path, src: &Path) -> Result<PathBuf> {
    let source = absolutize(cwd, src);
    if !source.exists() {
        return Err(ZipperError::FileNotFound(source));
    }
    Ok(source)
}

/// Resolves the `--out` argument.
///
/// Without an explicit value the output lands next to the source: the source
/// itself when it is a directory, its parent otherwise. An explicit value must
/// name an existing directory.
pub fn resolve_output(cwd: &Path, source: &Path, out: Option<&Path>) -> Result<PathBuf> {
    let Some(out) = out else {
        if source.is_dir() {
            return Ok(source.to_path_buf());
        }
        return source
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| ZipperError::InvalidOutputPath(source.to_path_buf()));
    };

    let output = absolutize(cwd, out);
    let metadata = fs::metadata(&output).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ZipperError::FileNotFound(output.clone()),
        _ => ZipperError::Io(e),
    })?;
    if !metadata.is_dir() {
        return Err(ZipperError::InvalidOutputPath(output));
    }
    Ok(output)
}

/// Lists the files to process: every non-directory entry of a source directory
/// (not recursive, sorted by name), or the source file itself.
pub fn collect_inputs(source: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    if source.is_dir() {
        for entry in fs::read_dir(source)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                inputs.push(entry.path());
            }
        }
        inputs.sort();
    } else {
        inputs.push(source.to_path_buf());
    }

    if inputs.is_empty() {
        return Err(ZipperError::NoFilesFound(source.to_path_buf()));
    }
    Ok(inputs)
}

pub fn resolve_paths(cwd: &Path, src: &Path, out: Option<&Path>) -> Result<ResolvedPaths> {
    let source = resolve_source(cwd, src)?;
    let output = resolve_output(cwd, &source, out)?;
    let inputs = collect_inputs(&source)?;
    Ok(ResolvedPaths {
        source,
        output,
        inputs,
    })
}
