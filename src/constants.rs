pub const DEFAULT_RATIO: f64 = 0.5;
pub const DEFAULT_CONCURRENCY: usize = 1;

pub const EPUB_EXTENSION: &str = "epub";
pub const OUTPUT_SUFFIX: &str = "_zipped";
pub const MIMETYPE_ENTRY: &str = "mimetype";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// Quality used when re-encoding JPEG assets.
pub const JPEG_QUALITY: u8 = 95;

pub const MAX_PREFIX_LENGTH: usize = 15;
pub const PREFIX_ELLIPSIS: &str = "...";

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{prefix:15.bold} [{bar:40.cyan/blue}] {percent:>3}% {msg}";
pub const PROGRESS_BAR_CHARS: &str = "#>-";

// Common output message prefixes
pub const SIZE_PREFIX: &str = "📊";
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const ERROR_PREFIX: &str = "❌";
pub const VERBOSE_PREFIX: &str = "🔍";
