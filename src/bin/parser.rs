// src/bin/parser.rs
use clap::Parser;
use color_eyre::eyre::WrapErr;
use marathon_scrape::{cli::ParserArgs, config::AppOptions, log, progress::LogProgress, runner};
use tracing::info;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init();

    let args = ParserArgs::parse();
    let mut opts = AppOptions::load().wrap_err("loading configuration")?;
    args.apply(&mut opts);

    let mut progress = LogProgress::default();
    let summary = runner::run(&opts, Some(&mut progress))?;

    for path in &summary.files_written {
        info!(path = %path.display(), "wrote");
    }
    info!(rows = summary.rows, "done");
    Ok(())
}
