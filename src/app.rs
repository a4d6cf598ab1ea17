use crate::batch::{process_batch, BatchReport};
use crate::cli::Args;
use crate::constants::{SIZE_PREFIX, SUCCESS_PREFIX};
use crate::logger;
use crate::options::ZipperOptions;
use crate::progress::BarReporter;
use crate::resolve::resolve_paths;
use crate::utils::{display_name, format_file_size};
use crate::{error, status, verbose, warn};
use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressDrawTarget};

/// Runs the whole command: resolve paths, process every input, print a summary.
///
/// Fails when any input failed, after the summary has been printed.
pub fn run(args: Args) -> Result<()> {
    logger::init(args.quiet, args.verbose);

    let options = ZipperOptions::new(Some(args.ratio), Some(args.concurrency), args.fail_fast)?;
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let paths = resolve_paths(&cwd, &args.src, args.out.as_deref())?;

    status!(
        "🚀 Shrinking {} file(s) from {}",
        paths.inputs.len(),
        paths.source.display()
    );
    verbose!("Output directory: {}", paths.output.display());
    verbose!(
        "Ratio: {}, concurrency: {}, fail fast: {}",
        options.ratio,
        options.concurrency,
        options.fail_fast
    );

    let draw_target = if logger::is_quiet() {
        ProgressDrawTarget::hidden()
    } else {
        ProgressDrawTarget::stdout()
    };
    let multi = MultiProgress::with_draw_target(draw_target);

    let report = process_batch(&paths.inputs, &paths.output, &options, |input| {
        BarReporter::new(&multi, input)
    })?;

    print_summary(&report);
    report.into_result()?;
    Ok(())
}

fn print_summary(report: &BatchReport) {
    for processed in report.processed() {
        verbose!(
            "{} -> {} ({} image(s))",
            display_name(&processed.input),
            processed.output.display(),
            processed.images
        );
        if processed.images == 0 {
            warn!("{}: no images found", display_name(&processed.input));
        }
    }

    status!("\n{} Summary:", SIZE_PREFIX);
    status!(
        "  📁 Files processed: {}/{}",
        report.succeeded(),
        report.total()
    );
    status!(
        "  📦 Original size: {}",
        format_file_size(report.total_original_size())
    );
    status!(
        "  📦 Output size: {}",
        format_file_size(report.total_output_size())
    );
    status!("  🎯 Size reduction: {:.1}%", report.size_reduction());
    status!("  ⏱️  Total time: {:.2?}", report.elapsed);

    for (input, e) in report.errors() {
        error!("{}: {}", display_name(input), e);
    }
    if report.failed() == 0 {
        status!("{} All files finished", SUCCESS_PREFIX);
    }
}
