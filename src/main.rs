use clap::Parser;
use epub_zipper::app;
use epub_zipper::cli::Args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
