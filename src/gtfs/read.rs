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

use super::Feed;
use crate::calendars::{self, Calendar, CalendarDate};
use crate::file_handler::{read_objects, FileHandler};
use crate::objects::{self, Route, Stop, StopTime};
use crate::Result;
use anyhow::{anyhow, bail};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

#[derive(Deserialize, Debug)]
struct Trip {
    route_id: String,
    service_id: String,
    #[serde(rename = "trip_id")]
    id: String,
    #[serde(rename = "trip_headsign", default)]
    headsign: String,
    #[serde(rename = "trip_short_name", default)]
    short_name: String,
    direction_id: Option<u8>,
    block_id: Option<String>,
    shape_id: Option<String>,
}

pub(super) fn read_feed<H>(feed_id: &str, file_handler: &mut H) -> Result<Feed>
where
    for<'a> &'a mut H: FileHandler,
{
    let agencies = read_objects(file_handler, "agency.txt", true)?;
    let stops: Vec<Stop> = read_objects(file_handler, "stops.txt", true)?;
    let mut routes: Vec<Route> = read_objects(file_handler, "routes.txt", true)?;
    for route in &mut routes {
        route.feed_id = feed_id.to_string();
    }
    let trips: Vec<Trip> = read_objects(file_handler, "trips.txt", true)?;
    let stop_times: Vec<StopTime> = read_objects(file_handler, "stop_times.txt", true)?;

    let calendars: Vec<Calendar> = read_objects(file_handler, "calendar.txt", false)?;
    let calendar_dates: Vec<CalendarDate> =
        read_objects(file_handler, "calendar_dates.txt", false)?;
    if calendars.is_empty() && calendar_dates.is_empty() {
        bail!("no service found in calendar.txt or calendar_dates.txt");
    }
    let feed_infos = read_objects(file_handler, "feed_info.txt", false)?;

    let trips = join_trips(feed_id, trips, stop_times, &routes, &stops)?;
    info!(
        "Feed '{}': {} routes, {} trips, {} stops",
        feed_id,
        routes.len(),
        trips.len(),
        stops.len()
    );

    Ok(Feed {
        id: feed_id.to_string(),
        agencies,
        stops,
        routes,
        trips,
        feed_infos,
        service_dates: calendars::service_dates(&calendars, &calendar_dates),
    })
}

/// Attach to each trip its route and its stop times, and to each stop time
/// its stop. A stop time whose stop does not exist is kept without stop.
fn join_trips(
    feed_id: &str,
    trips: Vec<Trip>,
    stop_times: Vec<StopTime>,
    routes: &[Route],
    stops: &[Stop],
) -> Result<Vec<objects::Trip>> {
    let routes_by_id: HashMap<&str, &Route> = routes.iter().map(|r| (r.id.as_str(), r)).collect();
    let stops_by_id: HashMap<&str, &Stop> = stops.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut stop_times_by_trip: HashMap<String, Vec<StopTime>> = HashMap::new();
    for mut stop_time in stop_times {
        stop_time.stop = stops_by_id.get(stop_time.stop_id.as_str()).cloned().cloned();
        if stop_time.stop.is_none() {
            warn!(
                "stop '{}' of trip '{}' of feed '{}' not found",
                stop_time.stop_id, stop_time.trip_id, feed_id
            );
        }
        stop_times_by_trip
            .entry(stop_time.trip_id.clone())
            .or_default()
            .push(stop_time);
    }

    let mut trip_ids = HashSet::new();
    let mut joined_trips = Vec::with_capacity(trips.len());
    for trip in trips {
        if !trip_ids.insert(trip.id.clone()) {
            bail!("trip '{}' of feed '{}' is declared more than once", trip.id, feed_id);
        }
        let route = routes_by_id.get(trip.route_id.as_str()).ok_or_else(|| {
            anyhow!(
                "trip '{}' of feed '{}' references unknown route '{}'",
                trip.id,
                feed_id,
                trip.route_id
            )
        })?;
        let mut stop_times = stop_times_by_trip.remove(&trip.id).unwrap_or_default();
        stop_times.sort_by_key(|stop_time| stop_time.stop_sequence);
        joined_trips.push(objects::Trip {
            feed_id: feed_id.to_string(),
            route_id: trip.route_id,
            service_id: trip.service_id,
            id: trip.id,
            headsign: trip.headsign,
            short_name: trip.short_name,
            direction_id: trip.direction_id,
            block_id: trip.block_id,
            shape_id: trip.shape_id,
            route: (*route).clone(),
            stop_times,
        });
    }
    if !stop_times_by_trip.is_empty() {
        warn!(
            "{} trips of feed '{}' only exist in stop_times.txt, their stop times are ignored",
            stop_times_by_trip.len(),
            feed_id
        );
    }
    Ok(joined_trips)
}
