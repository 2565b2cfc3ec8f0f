// Copyright (C) 2017 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};
use transit_mode_split::{
    configuration::read_config, gtfs::GtfsStore, modes::ModeHeuristics, sink::ZipSink, Result,
};

lazy_static::lazy_static! {
    pub static ref GIT_VERSION: String = transit_mode_split::binary_full_version(env!("CARGO_PKG_VERSION"));
}

fn get_version() -> &'static str {
    &GIT_VERSION
}

#[derive(Debug, Parser)]
#[command(
    name = "feeds2gtfs",
    about = "Merge several GTFS feeds into one GTFS archive, with one route per transport mode.",
    version = get_version()
)]
struct Opt {
    /// JSON file listing the feeds to merge.
    config: PathBuf,

    /// Output GTFS zip archive.
    output: PathBuf,

    /// Current date (YYYY-MM-DD), the written calendar starts the day before.
    #[arg(short = 'x', long, default_value = &**transit_mode_split::CURRENT_DATE)]
    current_date: NaiveDate,
}

fn write_archive(opt: &Opt, store: &GtfsStore, heuristics: &ModeHeuristics) -> Result<()> {
    let file = File::create(&opt.output)
        .with_context(|| format!("Error creating {:?}", opt.output))?;
    let mut sink = ZipSink::new(file);
    transit_mode_split::rewrite(store, &mut sink, heuristics, opt.current_date)?;
    sink.finish()?;
    Ok(())
}

fn run(opt: &Opt) -> Result<()> {
    info!("Launching feeds2gtfs...");
    let configuration = read_config(&opt.config)?;
    let store = GtfsStore::load(&configuration)?;

    if let Err(err) = write_archive(opt, &store, &configuration.mode_heuristics) {
        // no partial archive is left behind
        if let Err(e) = std::fs::remove_file(&opt.output) {
            warn!("cannot remove {:?}: {}", opt.output, e);
        }
        return Err(err);
    }
    info!("GTFS written in {:?}", opt.output);
    Ok(())
}

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter_subscriber = EnvFilter::try_new(rust_log).unwrap_or_else(|e| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            e,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter_subscriber)
        .init();
}

fn main() {
    init_logger();
    if let Err(err) = run(&Opt::parse()) {
        for cause in err.chain() {
            eprintln!("{}", cause);
        }
        std::process::exit(1);
    }
}
