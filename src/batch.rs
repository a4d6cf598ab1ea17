use crate::error::{Result, ZipperError};
use crate::options::ZipperOptions;
use crate::pipeline::{process_file, ProcessedFile};
use crate::progress::ProgressReporter;
use crate::utils::calculate_size_reduction;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result of one input within a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<ProcessedFile>,
}

/// Outcomes in input order, plus the wall-clock time of the whole batch.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn processed(&self) -> impl Iterator<Item = &ProcessedFile> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = (&Path, &ZipperError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.input.as_path(), e)))
    }

    pub fn succeeded(&self) -> usize {
        self.processed().count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn total_original_size(&self) -> u64 {
        self.processed().map(|p| p.original_size).sum()
    }

    pub fn total_output_size(&self) -> u64 {
        self.processed().map(|p| p.output_size).sum()
    }

    pub fn size_reduction(&self) -> f64 {
        calculate_size_reduction(self.total_original_size(), self.total_output_size())
    }

    /// `Ok` when every input succeeded, `BatchFailed` otherwise.
    pub fn into_result(self) -> Result<Self> {
        let failed = self.failed();
        if failed > 0 {
            return Err(ZipperError::BatchFailed {
                failed,
                total: self.total(),
            });
        }
        Ok(self)
    }
}

fn run_one<F, R>(input: &Path, out_dir: &Path, options: &ZipperOptions, make_reporter: &F) -> FileOutcome
where
    F: Fn(&Path) -> R,
    R: ProgressReporter,
{
    let reporter = make_reporter(input);
    let result = process_file(input, out_dir, options, &reporter);
    match &result {
        Ok(processed) => reporter.finished(&processed.output),
        Err(e) => reporter.failed(e),
    }
    FileOutcome {
        input: input.to_path_buf(),
        result,
    }
}

/// Processes the inputs one after another and stops at the first failure.
pub fn process_sequential<F, R>(
    inputs: &[PathBuf],
    out_dir: &Path,
    options: &ZipperOptions,
    make_reporter: F,
) -> Result<BatchReport>
where
    F: Fn(&Path) -> R,
    R: ProgressReporter,
{
    let start_time = Instant::now();
    let mut outcomes = Vec::with_capacity(inputs.len());

    for input in inputs {
        let outcome = run_one(input, out_dir, options, &make_reporter);
        match outcome.result {
            Ok(processed) => outcomes.push(FileOutcome {
                input: outcome.input,
                result: Ok(processed),
            }),
            Err(e) => return Err(e),
        }
    }

    Ok(BatchReport {
        outcomes,
        elapsed: start_time.elapsed(),
    })
}

/// Processes the inputs on a pool of `options.concurrency` threads.
///
/// Returns once every input has been handled. A failing input is recorded in
/// its own outcome and reported to its own reporter; the others carry on.
pub fn process_concurrent<F, R>(
    inputs: &[PathBuf],
    out_dir: &Path,
    options: &ZipperOptions,
    make_reporter: F,
) -> Result<BatchReport>
where
    F: Fn(&Path) -> R + Sync,
    R: ProgressReporter,
{
    let start_time = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.concurrency)
        .thread_name(|index| format!("epub-zipper-{}", index))
        .build()
        .map_err(|e| ZipperError::ThreadPool(e.to_string()))?;

    let outcomes: Vec<FileOutcome> = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| run_one(input, out_dir, options, &make_reporter))
            .collect()
    });

    Ok(BatchReport {
        outcomes,
        elapsed: start_time.elapsed(),
    })
}

/// Sequential fail-fast run when `options.fail_fast` is set, worker pool otherwise.
pub fn process_batch<F, R>(
    inputs: &[PathBuf],
    out_dir: &Path,
    options: &ZipperOptions,
    make_reporter: F,
) -> Result<BatchReport>
where
    F: Fn(&Path) -> R + Sync,
    R: ProgressReporter,
{
    if options.fail_fast {
        process_sequential(inputs, out_dir, options, make_reporter)
    } else {
        process_concurrent(inputs, out_dir, options, make_reporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{NoopReporter, Stage};
    use std::fs::{self, File};
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_plain_book(path: &Path) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        zip.start_file("mimetype", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"application/epub+zip").unwrap();
        zip.start_file("OEBPS/ch1.xhtml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<html/>").unwrap();
        zip.finish().unwrap();
    }

    struct CountingReporter<'a> {
        finished: &'a AtomicUsize,
        failed: &'a AtomicUsize,
    }

    impl ProgressReporter for CountingReporter<'_> {
        fn stage(&self, _stage: Stage) {}
        fn advance(&self, _done: usize, _total: usize) {}
        fn finished(&self, _output: &Path) {
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
        fn failed(&self, _error: &ZipperError) {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn setup_inputs(temp_dir: &Path, good: usize, with_broken: bool) -> Vec<PathBuf> {
        let mut inputs = Vec::new();
        for i in 0..good {
            let path = temp_dir.join(format!("book{}.epub", i));
            write_plain_book(&path);
            inputs.push(path);
        }
        if with_broken {
            let path = temp_dir.join("broken.epub");
            fs::write(&path, b"not a zip").unwrap();
            inputs.insert(0, path);
        }
        inputs
    }

    #[test]
    fn test_process_concurrent_all_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let inputs = setup_inputs(temp_dir.path(), 4, false);
        let options = ZipperOptions::new(None, Some(3), false).unwrap();

        let report =
            process_concurrent(&inputs, temp_dir.path(), &options, |_| NoopReporter).unwrap();

        assert_eq!(report.total(), 4);
        assert_eq!(report.succeeded(), 4);
        for i in 0..4 {
            assert!(temp_dir
                .path()
                .join(format!("book{}_zipped.epub", i))
                .exists());
        }
        let order: Vec<&PathBuf> = report.outcomes.iter().map(|o| &o.input).collect();
        assert_eq!(order, inputs.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_process_concurrent_failure_does_not_stop_others() {
        let temp_dir = TempDir::new().unwrap();
        let inputs = setup_inputs(temp_dir.path(), 2, true);
        let options = ZipperOptions::new(None, Some(2), false).unwrap();
        let finished = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        let report = process_concurrent(&inputs, temp_dir.path(), &options, |_| {
            CountingReporter {
                finished: &finished,
                failed: &failed,
            }
        })
        .unwrap();

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(finished.load(Ordering::SeqCst), 2);
        assert_eq!(failed.load(Ordering::SeqCst), 1);
        assert_eq!(report.errors().next().unwrap().0, inputs[0].as_path());
        assert!(!temp_dir.path().join("broken").exists());

        assert!(matches!(
            report.into_result(),
            Err(ZipperError::BatchFailed { failed: 1, total: 3 })
        ));
    }

    #[test]
    fn test_process_sequential_stops_at_first_error() {
        let temp_dir = TempDir::new().unwrap();
        let inputs = setup_inputs(temp_dir.path(), 2, true);
        let options = ZipperOptions::new(None, None, true).unwrap();

        let result = process_sequential(&inputs, temp_dir.path(), &options, |_| NoopReporter);

        assert!(matches!(result, Err(ZipperError::Archive(_))));
        assert!(!temp_dir.path().join("book0_zipped.epub").exists());
        assert!(!temp_dir.path().join("book1_zipped.epub").exists());
    }

    #[test]
    fn test_process_sequential_all_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let inputs = setup_inputs(temp_dir.path(), 2, false);

        let report = process_batch(
            &inputs,
            temp_dir.path(),
            &ZipperOptions::new(None, None, true).unwrap(),
            |_| NoopReporter,
        )
        .unwrap();

        assert_eq!(report.succeeded(), 2);
        assert!(report.total_original_size() > 0);
        assert!(report.total_output_size() > 0);
        assert!(report.into_result().is_ok());
    }
}
