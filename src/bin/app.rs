// src/bin/app.rs
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use marathon_scrape::{
    cli::AppArgs,
    config::AppOptions,
    dashboard::{self, DashboardContext},
    log,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init();

    let args = AppArgs::parse();
    let mut opts = AppOptions::load().wrap_err("loading configuration")?;
    args.apply(&mut opts);

    let ctx = DashboardContext::load(&opts.dashboard)?;
    dashboard::serve(&opts.dashboard, Arc::new(ctx)).await?;
    Ok(())
}
