use crate::archive::{repack_epub, unpack_epub, ExtractedDir};
use crate::error::Result;
use crate::imaging::{resize_image_file, scan_images};
use crate::options::ZipperOptions;
use crate::progress::{ProgressReporter, Stage};
use std::fs;
use std::path::{Path, PathBuf};

/// What one successful pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub images: usize,
    pub original_size: u64,
    pub output_size: u64,
}

/// Unpacks `input` under `out_dir`, shrinks every image, repacks it as
/// `<stem>_zipped.epub` in `out_dir` and removes the extracted tree.
///
/// The extracted tree is removed on every exit path, including when resizing
/// or repacking fails.
pub fn process_file(
    input: &Path,
    out_dir: &Path,
    options: &ZipperOptions,
    reporter: &dyn ProgressReporter,
) -> Result<ProcessedFile> {
    let original_size = fs::metadata(input)?.len();

    reporter.stage(Stage::Unzipping);
    let extracted = unpack_epub(input, out_dir)?;

    let result = shrink_and_repack(&extracted, options, reporter);

    reporter.stage(Stage::Cleaning);
    drop(extracted);

    let (output, images) = result?;
    let output_size = fs::metadata(&output)?.len();
    Ok(ProcessedFile {
        input: input.to_path_buf(),
        output,
        images,
        original_size,
        output_size,
    })
}

fn shrink_and_repack(
    extracted: &ExtractedDir,
    options: &ZipperOptions,
    reporter: &dyn ProgressReporter,
) -> Result<(PathBuf, usize)> {
    reporter.stage(Stage::Scanning);
    let images = scan_images(extracted.path())?;
    let total = images.len();

    reporter.advance(0, total);
    for (index, image_path) in images.iter().enumerate() {
        reporter.stage(Stage::Resizing);
        resize_image_file(image_path, options.ratio)?;
        reporter.advance(index + 1, total);
    }

    reporter.stage(Stage::Zipping);
    let output = repack_epub(extracted.path())?;
    Ok((output, total))
}
