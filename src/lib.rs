pub mod app;
pub mod archive;
pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod imaging;
pub mod logger;
pub mod options;
pub mod pipeline;
pub mod progress;
pub mod resolve;
pub mod utils;

pub use archive::{repack_epub, unpack_epub, zipped_name, ExtractedDir};
pub use batch::{process_batch, process_concurrent, process_sequential, BatchReport, FileOutcome};
pub use error::{Result, ZipperError};
pub use imaging::{is_image_asset, resize_image, resize_image_file, scaled_dimensions, scan_images};
pub use options::ZipperOptions;
pub use pipeline::{process_file, ProcessedFile};
pub use progress::{format_prefix, BarReporter, NoopReporter, ProgressReporter, Stage};
pub use resolve::{collect_inputs, resolve_output, resolve_paths, resolve_source, ResolvedPaths};
