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
//! Configuration of a run: the feeds to merge and the mode heuristics.

use crate::{modes::ModeHeuristics, Result};
use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// A source feed
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FeedConfiguration {
    /// Prefix of the identifiers coming from this feed
    pub feed_id: String,
    /// GTFS directory or zip archive
    pub path: PathBuf,
}

/// Everything needed to run a conversion
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Source feeds, the first one providing `feed_info.txt` is used for the
    /// output
    pub feeds: Vec<FeedConfiguration>,
    /// Tokens used to infer the mode of the trips
    #[serde(default)]
    pub mode_heuristics: ModeHeuristics,
}

impl Configuration {
    fn validate(&self) -> Result<()> {
        if self.feeds.is_empty() {
            bail!("no feed configured");
        }
        let mut feed_ids = HashSet::new();
        for feed in &self.feeds {
            if feed.feed_id.is_empty() {
                bail!("empty feed_id for feed {:?}", feed.path);
            }
            if !feed_ids.insert(feed.feed_id.as_str()) {
                bail!("feed_id '{}' is configured more than once", feed.feed_id);
            }
        }
        Ok(())
    }
}

/// Read a JSON configuration file.
///
/// Relative feed paths are relative to the directory of the configuration
/// file. Below is an example of this file
/// ```text
/// {
///     "feeds": [
///         { "feed_id": "ter", "path": "export_gtfs_voyages.zip" },
///         { "feed_id": "ic", "path": "/data/intercites" }
///     ],
///     "mode_heuristics": {
///         "bus_tokens": ["Car"],
///         "tram_tokens": ["TramTrain"]
///     }
/// }
/// ```
pub fn read_config<P: AsRef<Path>>(config_path: P) -> Result<Configuration> {
    let config_path = config_path.as_ref();
    info!("Reading configuration from {:?}", config_path);
    let json_config_file =
        File::open(config_path).with_context(|| format!("Error reading {:?}", config_path))?;
    let mut config: Configuration = serde_json::from_reader(json_config_file)
        .with_context(|| format!("Error reading {:?}", config_path))?;
    config.validate()?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    for feed in &mut config.feeds {
        if feed.path.is_relative() {
            feed.path = base_dir.join(&feed.path);
        }
    }
    Ok(config)
}
