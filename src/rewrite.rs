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

//! Merge all the feeds of a store into a single GTFS archive.

use crate::calendars::{calendar_exceptions, calendar_window};
use crate::dedup::deduplicate;
use crate::gtfs;
use crate::modes::ModeHeuristics;
use crate::objects::Date;
use crate::routes::RouteModeUsage;
use crate::sink::ArchiveSink;
use crate::stop_times::rewrite_stop_times;
use crate::store::FeedStore;
use crate::trips::transform_trips;
use crate::Result;
use tracing::{info, warn};

/// Write in `sink` the GTFS archive made of all the feeds of `store`.
///
/// Trips are split by mode, which splits their routes into one route per
/// mode. Stops and agencies are deduplicated by identifier, only the first
/// feed info is kept and `calendar_dates.txt` only lists the days around
/// `today`.
///
/// Files are added in this order: `trips.txt`, `routes.txt`,
/// `stop_times.txt`, `feed_info.txt`, `stops.txt`, `calendar_dates.txt`
/// and `agency.txt`. An error stops the process, the files already added are
/// left in the sink.
pub fn rewrite<S, K>(store: &S, sink: &mut K, heuristics: &ModeHeuristics, today: Date) -> Result<()>
where
    S: FeedStore,
    K: ArchiveSink,
{
    let mut usage = RouteModeUsage::default();
    let trips = transform_trips(store.trips()?, heuristics, &mut usage)?;
    gtfs::write_trips(sink, &trips)?;

    let unused_routes = store
        .routes()?
        .into_iter()
        .filter(|route| usage.modes(&route.feed_id, &route.id).is_empty())
        .count();
    if unused_routes > 0 {
        warn!("{} routes are used by no trip, they are dropped", unused_routes);
    }
    let routes = usage.into_routes();
    info!("{} trips on {} routes", trips.len(), routes.len());
    gtfs::write_routes(sink, &routes)?;

    gtfs::write_stop_times(sink, &rewrite_stop_times(&trips))?;
    gtfs::write_feed_infos(sink, &store.feed_infos()?)?;
    gtfs::write_stops(sink, &deduplicate(store.stops()?))?;

    let (start, end) = calendar_window(today);
    let service_dates = store.service_dates_between(start, end)?;
    gtfs::write_calendar_dates(sink, &calendar_exceptions(service_dates))?;

    gtfs::write_agencies(sink, &deduplicate(store.agencies()?))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs::{Feed, GtfsStore};
    use crate::objects::{Agency, FeedInfo};
    use crate::sink::MemorySink;
    use crate::test_utils::{route, stop, stop_time, trip};
    use crate::trips::PreconditionError;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn agency() -> Agency {
        Agency {
            id: "SNCF".to_string(),
            name: "SNCF".to_string(),
            url: "http://www.sncf.com".to_string(),
            timezone: "Europe/Paris".to_string(),
            ..Default::default()
        }
    }

    fn feed_info(publisher: &str) -> FeedInfo {
        FeedInfo {
            feed_publisher_name: publisher.to_string(),
            feed_publisher_url: "http://www.sncf.com".to_string(),
            feed_lang: "fr".to_string(),
            ..Default::default()
        }
    }

    fn feed(id: &str) -> Feed {
        let car = stop("StopPoint:OCECar-1", "Paris");
        let train = stop("StopPoint:OCETrain-2", "Lyon");
        let mut feed = Feed {
            id: id.to_string(),
            agencies: vec![agency()],
            stops: vec![car.clone(), train.clone()],
            routes: vec![route(id, "R1"), route(id, "R2")],
            trips: vec![
                trip(
                    id,
                    "T1",
                    route(id, "R1"),
                    "4242",
                    vec![
                        stop_time("T1", 1, Some(car.clone())),
                        stop_time("T1", 2, Some(train.clone())),
                    ],
                ),
                trip(
                    id,
                    "T2",
                    route(id, "R1"),
                    "4243",
                    vec![
                        stop_time("T2", 1, Some(train.clone())),
                        stop_time("T2", 2, Some(car.clone())),
                    ],
                ),
            ],
            feed_infos: vec![feed_info(id)],
            ..Default::default()
        };
        feed.service_dates.insert(
            "S1".to_string(),
            vec![date(2024, 5, 30), date(2024, 6, 1), date(2025, 6, 2)]
                .into_iter()
                .collect(),
        );
        feed
    }

    fn content(sink: &MemorySink, name: &str) -> String {
        String::from_utf8(sink.file(name).unwrap().to_vec()).unwrap()
    }

    #[test]
    fn merge_two_feeds() {
        let mut store = GtfsStore::default();
        store.push(feed("F1"));
        store.push(feed("F2"));
        let mut sink = MemorySink::default();
        rewrite(
            &store,
            &mut sink,
            &ModeHeuristics::default(),
            date(2024, 6, 1),
        )
        .unwrap();

        assert_eq!(
            vec![
                "agency.txt",
                "calendar_dates.txt",
                "feed_info.txt",
                "routes.txt",
                "stop_times.txt",
                "stops.txt",
                "trips.txt",
            ],
            sink.file_names().collect::<Vec<_>>()
        );

        let trips = content(&sink, "trips.txt");
        assert!(trips.contains("F1-b-R1,S1,F1-T1,Lyon,4242,,,\n"));
        assert!(trips.contains("F1-r-R1,S1,F1-T2,Paris,4243,,,\n"));
        assert!(trips.contains("F2-b-R1,S1,F2-T1,Lyon,4242,,,\n"));

        let route_ids: Vec<_> = content(&sink, "routes.txt")
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap().to_string())
            .collect();
        assert_eq!(vec!["F1-r-R1", "F1-b-R1", "F2-r-R1", "F2-b-R1"], route_ids);

        let stop_times = content(&sink, "stop_times.txt");
        assert_eq!(9, stop_times.lines().count());
        assert!(stop_times.contains("F2-T2,,,StopPoint:OCETrain-2,1,,,\n"));

        // same stops and agency in both feeds
        assert_eq!(3, content(&sink, "stops.txt").lines().count());
        assert_eq!(2, content(&sink, "agency.txt").lines().count());

        let feed_info = content(&sink, "feed_info.txt");
        assert!(feed_info.contains("F1,"));
        assert!(!feed_info.contains("F2,"));

        // 2024-05-30 is before the window, 2025-06-02 after it
        assert_eq!(
            "service_id,date,exception_type\nS1,20240601,1\n",
            content(&sink, "calendar_dates.txt")
        );
    }

    #[test]
    fn invalid_trip_stops_the_rewrite() {
        let mut f1 = feed("F1");
        f1.trips[1].stop_times[1].stop = None;
        let mut store = GtfsStore::default();
        store.push(f1);
        let mut sink = MemorySink::default();
        let error = rewrite(
            &store,
            &mut sink,
            &ModeHeuristics::default(),
            date(2024, 6, 1),
        )
        .unwrap_err();
        assert_eq!(
            Some(&PreconditionError::MissingStop {
                feed_id: "F1".to_string(),
                trip_id: "T2".to_string(),
                stop_sequence: 2,
            }),
            error.downcast_ref::<PreconditionError>()
        );
        assert_eq!(0, sink.file_names().count());
    }

    #[test]
    fn no_feed_info_fails_after_stop_times() {
        let mut f1 = feed("F1");
        f1.feed_infos.clear();
        let mut store = GtfsStore::default();
        store.push(f1);
        let mut sink = MemorySink::default();
        assert!(rewrite(
            &store,
            &mut sink,
            &ModeHeuristics::default(),
            date(2024, 6, 1)
        )
        .is_err());
        assert_eq!(
            vec!["routes.txt", "stop_times.txt", "trips.txt"],
            sink.file_names().collect::<Vec<_>>()
        );
    }

    #[test]
    fn no_service_in_window_keeps_calendar_header() {
        let mut store = GtfsStore::default();
        store.push(feed("F1"));
        let mut sink = MemorySink::default();
        rewrite(
            &store,
            &mut sink,
            &ModeHeuristics::default(),
            date(2030, 1, 1),
        )
        .unwrap();
        assert_eq!(
            "service_id,date,exception_type\n",
            content(&sink, "calendar_dates.txt")
        );
    }

    #[test]
    fn custom_heuristics() {
        let mut store = GtfsStore::default();
        store.push(feed("F1"));
        let mut sink = MemorySink::default();
        let heuristics = ModeHeuristics {
            bus_tokens: vec![],
            tram_tokens: vec!["OCETrain".to_string()],
        };
        rewrite(&store, &mut sink, &heuristics, date(2024, 6, 1)).unwrap();
        let route_ids: Vec<_> = content(&sink, "routes.txt")
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap().to_string())
            .collect();
        assert_eq!(vec!["F1-t-R1", "F1-r-R1"], route_ids);
    }
}
