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

//! [GTFS](http://gtfs.org/) feeds as source, and GTFS archive as output.

mod read;
mod write;

pub use write::{
    write_agencies, write_calendar_dates, write_feed_infos, write_routes, write_stop_times,
    write_stops, write_trips,
};

use crate::configuration::Configuration;
use crate::file_handler::{PathFileHandler, ZipHandler};
use crate::objects::{Agency, Date, FeedInfo, Route, ServiceDate, Stop, Trip};
use crate::store::FeedStore;
use crate::Result;
use anyhow::{anyhow, Context};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// All the objects of a GTFS feed, trips being joined with their route and
/// stop times
#[derive(Debug, Default)]
pub struct Feed {
    /// Identifier of the feed, prefix of its trips and routes in the output
    pub id: String,
    /// Content of `agency.txt`
    pub agencies: Vec<Agency>,
    /// Content of `stops.txt`
    pub stops: Vec<Stop>,
    /// Content of `routes.txt`
    pub routes: Vec<Route>,
    /// Content of `trips.txt`, joined with the routes and `stop_times.txt`
    pub trips: Vec<Trip>,
    /// Content of `feed_info.txt`
    pub feed_infos: Vec<FeedInfo>,
    /// Days of each service, from `calendar.txt` and `calendar_dates.txt`
    pub service_dates: BTreeMap<String, BTreeSet<Date>>,
}

/// Read a GTFS feed from a directory or a zip archive
pub fn read_feed<P: AsRef<Path>>(feed_id: &str, path: P) -> Result<Feed> {
    let p = path.as_ref();
    info!("Reading feed '{}' from {:?}", feed_id, p);
    let feed = if p.is_file() {
        File::open(p)
            .with_context(|| format!("Error reading {:?}", p))
            .and_then(|reader| ZipHandler::new(reader, p))
            .and_then(|mut file_handler| read::read_feed(feed_id, &mut file_handler))
    } else if p.is_dir() {
        let mut file_handler = PathFileHandler::new(p.to_path_buf());
        read::read_feed(feed_id, &mut file_handler)
    } else {
        Err(anyhow!(
            "file {:?} is neither a file nor a directory, cannot read a gtfs from it",
            p
        ))
    };
    feed.with_context(|| format!("Error reading feed '{}'", feed_id))
}

/// A [`FeedStore`] keeping every feed in memory
#[derive(Debug, Default)]
pub struct GtfsStore {
    feeds: Vec<Feed>,
}

impl GtfsStore {
    /// Load all the feeds of the configuration
    pub fn load(configuration: &Configuration) -> Result<Self> {
        let mut store = GtfsStore::default();
        for feed in &configuration.feeds {
            store.push(read_feed(&feed.feed_id, &feed.path)?);
        }
        Ok(store)
    }

    /// Add a feed
    pub fn push(&mut self, feed: Feed) {
        self.feeds.push(feed);
    }
}

impl FeedStore for GtfsStore {
    fn trips(&self) -> Result<Vec<Trip>> {
        Ok(self
            .feeds
            .iter()
            .flat_map(|feed| feed.trips.iter().cloned())
            .collect())
    }

    fn routes(&self) -> Result<Vec<Route>> {
        Ok(self
            .feeds
            .iter()
            .flat_map(|feed| feed.routes.iter().cloned())
            .collect())
    }

    fn stops(&self) -> Result<Vec<Stop>> {
        Ok(self
            .feeds
            .iter()
            .flat_map(|feed| feed.stops.iter().cloned())
            .collect())
    }

    fn agencies(&self) -> Result<Vec<Agency>> {
        Ok(self
            .feeds
            .iter()
            .flat_map(|feed| feed.agencies.iter().cloned())
            .collect())
    }

    fn feed_infos(&self) -> Result<Vec<FeedInfo>> {
        Ok(self
            .feeds
            .iter()
            .flat_map(|feed| feed.feed_infos.iter().cloned())
            .collect())
    }

    fn service_dates_between(&self, start: Date, end: Date) -> Result<Vec<ServiceDate>> {
        let mut service_dates = Vec::new();
        for feed in &self.feeds {
            for (service_id, dates) in &feed.service_dates {
                service_dates.extend(dates.range(start..=end).map(|date| ServiceDate {
                    feed_id: feed.id.clone(),
                    service_id: service_id.clone(),
                    date: *date,
                }));
            }
        }
        Ok(service_dates)
    }
}
