use crate::constants::{
    MAX_PREFIX_LENGTH, PREFIX_ELLIPSIS, PROGRESS_BAR_CHARS, PROGRESS_BAR_TEMPLATE,
};
use crate::error::ZipperError;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;

/// Steps of the per-file pipeline, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unzipping,
    Scanning,
    Resizing,
    Zipping,
    Cleaning,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Unzipping => "unzipping...",
            Stage::Scanning => "scanning...",
            Stage::Resizing => "resizing...",
            Stage::Zipping => "zipping...",
            Stage::Cleaning => "cleaning...",
        }
    }
}

/// Receives progress for a single input file.
///
/// The pipeline only talks to this trait, so it does not care whether the
/// updates end up on a terminal, in a test recorder or nowhere.
pub trait ProgressReporter: Send + Sync {
    fn stage(&self, stage: Stage);

    /// `done` of `total` images have been resized.
    fn advance(&self, done: usize, total: usize);

    fn finished(&self, output: &Path);

    fn failed(&self, error: &ZipperError);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn stage(&self, _stage: Stage) {}
    fn advance(&self, _done: usize, _total: usize) {}
    fn finished(&self, _output: &Path) {}
    fn failed(&self, _error: &ZipperError) {}
}

/// Shortens a file name to fit the bar prefix column.
pub fn format_prefix(name: &str) -> String {
    if name.chars().count() <= MAX_PREFIX_LENGTH {
        return name.to_string();
    }
    let keep = MAX_PREFIX_LENGTH - PREFIX_ELLIPSIS.len();
    let head: String = name.chars().take(keep).collect();
    format!("{}{}", head, PREFIX_ELLIPSIS)
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(PROGRESS_BAR_CHARS)
}

/// One terminal progress bar per input, drawn through a shared `MultiProgress`
/// so parallel runs each keep their own line.
#[derive(Clone)]
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new(multi: &MultiProgress, input: &Path) -> Self {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string_lossy().into_owned());

        let bar = multi.add(ProgressBar::new(1));
        bar.set_style(bar_style());
        bar.set_prefix(format_prefix(&name));
        bar.set_message("waiting...");
        Self { bar }
    }

    #[cfg(test)]
    fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl ProgressReporter for BarReporter {
    fn stage(&self, stage: Stage) {
        self.bar.set_message(stage.label());
    }

    fn advance(&self, done: usize, total: usize) {
        self.bar.set_length(total.max(1) as u64);
        self.bar.set_position(done as u64);
    }

    fn finished(&self, _output: &Path) {
        self.bar.finish_with_message("finished.");
    }

    fn failed(&self, error: &ZipperError) {
        self.bar.abandon_with_message(error.to_string());
    }
}
