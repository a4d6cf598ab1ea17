use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "epub-zipper",
    about = "Shrink EPUB files by downscaling their embedded images",
    long_about = "epub-zipper unpacks EPUB archives, downscales every JPEG and PNG image inside \
                  by a fixed ratio and repacks them as <name>_zipped.epub. It accepts a single \
                  file or a directory of files and can process several files in parallel.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    epub-zipper -s book.epub\n  \
    epub-zipper -s ./library -o ./shrunk -r 0.3 -c 4\n  \
    epub-zipper -s ./library --fail-fast"
)]
pub struct Args {
    #[arg(
        short = 's',
        long,
        default_value = ".",
        help = "Path of the EPUB source file or directory",
        long_help = "An EPUB file, or a directory whose files (not subdirectories) are all processed. \
                     Relative paths are resolved against the current directory."
    )]
    pub src: PathBuf,

    #[arg(
        short = 'o',
        long,
        help = "Output directory (default: next to the source)",
        long_help = "Existing directory receiving <name>_zipped.epub. Defaults to the source \
                     directory, or the directory containing the source file."
    )]
    pub out: Option<PathBuf>,

    #[arg(
        short = 'r',
        long,
        default_value_t = crate::constants::DEFAULT_RATIO,
        help = "Scale applied to image width and height (0 < ratio <= 1)"
    )]
    pub ratio: f64,

    #[arg(
        short = 'c',
        long,
        default_value_t = crate::constants::DEFAULT_CONCURRENCY,
        help = "Number of files processed in parallel"
    )]
    pub concurrency: usize,

    #[arg(
        long,
        help = "Process files one at a time and stop at the first failure",
        long_help = "Process files sequentially and abort the whole run on the first error. \
                     Without it a failing file is reported and the others carry on."
    )]
    pub fail_fast: bool,

    #[arg(short = 'q', long, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print extra details", conflicts_with = "quiet")]
    pub verbose: bool,
}
