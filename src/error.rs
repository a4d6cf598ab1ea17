use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZipperError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid output path: {0}")]
    InvalidOutputPath(PathBuf),

    #[error("no files found in {0}")]
    NoFilesFound(PathBuf),

    #[error("Invalid ratio: {0}. Must be greater than 0 and at most 1")]
    InvalidRatio(f64),

    #[error("Invalid concurrency: {0}. Must be at least 1")]
    InvalidConcurrency(usize),

    #[error("Invalid file name: {0}")]
    InvalidFileName(PathBuf),

    #[error("Extraction directory {0} would contain the input file")]
    ExtractionOverlapsInput(PathBuf),

    #[error("Archive entry escapes the extraction directory: {0}")]
    UnsafeArchivePath(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("{failed} of {total} files failed")]
    BatchFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, ZipperError>;
