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

use crate::calendars::CalendarDate;
use crate::objects::{Agency, FeedInfo, Route, Stop, StopTime, Trip};
use crate::sink::ArchiveSink;
use crate::Result;
use anyhow::{bail, Context};
use serde::Serialize;
use tracing::info;

const TRIPS_HEADER: &[&str] = &[
    "route_id",
    "service_id",
    "trip_id",
    "trip_headsign",
    "trip_short_name",
    "direction_id",
    "block_id",
    "shape_id",
];
const ROUTES_HEADER: &[&str] = &[
    "route_id",
    "agency_id",
    "route_short_name",
    "route_long_name",
    "route_desc",
    "route_type",
    "route_url",
    "route_color",
    "route_text_color",
    "route_sort_order",
];
const STOP_TIMES_HEADER: &[&str] = &[
    "trip_id",
    "arrival_time",
    "departure_time",
    "stop_id",
    "stop_sequence",
    "stop_headsign",
    "pickup_type",
    "drop_off_type",
];
const FEED_INFO_HEADER: &[&str] = &[
    "feed_publisher_name",
    "feed_publisher_url",
    "feed_lang",
    "default_lang",
    "feed_start_date",
    "feed_end_date",
    "feed_version",
    "feed_contact_email",
    "feed_contact_url",
];
const STOPS_HEADER: &[&str] = &[
    "stop_id",
    "stop_code",
    "stop_name",
    "stop_desc",
    "stop_lat",
    "stop_lon",
    "zone_id",
    "stop_url",
    "location_type",
    "parent_station",
    "stop_timezone",
    "wheelchair_boarding",
    "level_id",
    "platform_code",
];
const CALENDAR_DATES_HEADER: &[&str] = &["service_id", "date", "exception_type"];
const AGENCY_HEADER: &[&str] = &[
    "agency_id",
    "agency_name",
    "agency_url",
    "agency_timezone",
    "agency_lang",
    "agency_phone",
    "agency_fare_url",
    "agency_email",
];

/// Write `objects` as CSV in `file`. The header comes from the first
/// serialized object, `header` is only written when there is none.
fn write_objects<'a, K, O, I>(
    sink: &mut K,
    file: &str,
    header: &[&str],
    objects: I,
) -> Result<()>
where
    K: ArchiveSink,
    O: Serialize + 'a,
    I: IntoIterator<Item = &'a O>,
{
    info!(file_name = %file, "Writing");
    let mut wtr = csv::Writer::from_writer(vec![]);
    let mut is_empty = true;
    for object in objects {
        wtr.serialize(object)
            .with_context(|| format!("Error writing {}", file))?;
        is_empty = false;
    }
    if is_empty {
        wtr.write_record(header)
            .with_context(|| format!("Error writing {}", file))?;
    }
    let content = wtr
        .into_inner()
        .with_context(|| format!("Error writing {}", file))?;
    sink.add_file(file, &content)
}

/// Write `trips.txt`
pub fn write_trips<K: ArchiveSink>(sink: &mut K, trips: &[Trip]) -> Result<()> {
    write_objects(sink, "trips.txt", TRIPS_HEADER, trips)
}

/// Write `routes.txt`
pub fn write_routes<K: ArchiveSink>(sink: &mut K, routes: &[Route]) -> Result<()> {
    write_objects(sink, "routes.txt", ROUTES_HEADER, routes)
}

/// Write `stop_times.txt`
pub fn write_stop_times<K: ArchiveSink>(sink: &mut K, stop_times: &[StopTime]) -> Result<()> {
    write_objects(sink, "stop_times.txt", STOP_TIMES_HEADER, stop_times)
}

/// Write `feed_info.txt`, made of the first given feed info only. The
/// output describes a single feed, so the others are dropped.
pub fn write_feed_infos<K: ArchiveSink>(sink: &mut K, feed_infos: &[FeedInfo]) -> Result<()> {
    let first = match feed_infos.first() {
        Some(feed_info) => feed_info,
        None => bail!("no feed_info.txt in any feed, cannot write feed_info.txt"),
    };
    if feed_infos.len() > 1 {
        info!(
            "{} feed infos found, only the first one is written",
            feed_infos.len()
        );
    }
    write_objects(sink, "feed_info.txt", FEED_INFO_HEADER, std::iter::once(first))
}

/// Write `stops.txt`
pub fn write_stops<K: ArchiveSink>(sink: &mut K, stops: &[Stop]) -> Result<()> {
    write_objects(sink, "stops.txt", STOPS_HEADER, stops)
}

/// Write `calendar_dates.txt`
pub fn write_calendar_dates<K: ArchiveSink>(
    sink: &mut K,
    calendar_dates: &[CalendarDate],
) -> Result<()> {
    write_objects(sink, "calendar_dates.txt", CALENDAR_DATES_HEADER, calendar_dates)
}

/// Write `agency.txt`
pub fn write_agencies<K: ArchiveSink>(sink: &mut K, agencies: &[Agency]) -> Result<()> {
    write_objects(sink, "agency.txt", AGENCY_HEADER, agencies)
}
