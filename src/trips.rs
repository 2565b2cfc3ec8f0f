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

//! Rewrite the trips: infer their mode, prefix their identifiers and swap
//! the headsign for the name of the last stop.

use crate::modes::ModeHeuristics;
use crate::objects::{Mode, Stop, StopTime, Trip};
use crate::routes::{feed_route_id, RouteModeUsage};
use thiserror::Error;

/// A trip that cannot be rewritten. The loading of the feeds must never
/// produce such trips.
#[derive(Debug, Error, PartialEq)]
pub enum PreconditionError {
    /// The trip has no stop time
    #[error("trip '{trip_id}' of feed '{feed_id}' has no stop time")]
    NoStopTimes {
        /// Feed of the trip
        feed_id: String,
        /// Original identifier of the trip
        trip_id: String,
    },
    /// A stop time of the trip references a stop that could not be found
    #[error("stop time {stop_sequence} of trip '{trip_id}' of feed '{feed_id}' has no stop")]
    MissingStop {
        /// Feed of the trip
        feed_id: String,
        /// Original identifier of the trip
        trip_id: String,
        /// Sequence of the stop time
        stop_sequence: u32,
    },
}

/// Identifier of a trip in the output archive
pub fn feed_trip_id(feed_id: &str, trip_id: &str) -> String {
    format!("{}-{}", feed_id, trip_id)
}

fn stop_of<'a>(trip: &Trip, stop_time: &'a StopTime) -> Result<&'a Stop, PreconditionError> {
    stop_time
        .stop
        .as_ref()
        .ok_or_else(|| PreconditionError::MissingStop {
            feed_id: trip.feed_id.clone(),
            trip_id: trip.id.clone(),
            stop_sequence: stop_time.stop_sequence,
        })
}

/// Mode of a trip, given by its first stop
pub fn trip_mode(trip: &Trip, heuristics: &ModeHeuristics) -> Result<Mode, PreconditionError> {
    let first_stop_time = trip
        .stop_times
        .first()
        .ok_or_else(|| no_stop_times(trip))?;
    Ok(heuristics.classify_stop(stop_of(trip, first_stop_time)?))
}

fn no_stop_times(trip: &Trip) -> PreconditionError {
    PreconditionError::NoStopTimes {
        feed_id: trip.feed_id.clone(),
        trip_id: trip.id.clone(),
    }
}

/// Rewrite one trip and record the mode it uses for its route.
///
/// - the short name becomes the original headsign
/// - the headsign becomes the name of the last stop
/// - the trip is renamed `{feed}-{trip}`
/// - the route reference becomes `{feed}-{mode}-{route}`
///
/// The stop times are kept untouched, see `stop_times::rewrite_stop_times`.
pub fn transform_trip(
    mut trip: Trip,
    heuristics: &ModeHeuristics,
    usage: &mut RouteModeUsage,
) -> Result<Trip, PreconditionError> {
    let mode = trip_mode(&trip, heuristics)?;
    let last_stop_name = {
        let last_stop_time = trip.stop_times.last().ok_or_else(|| no_stop_times(&trip))?;
        stop_of(&trip, last_stop_time)?.name.clone()
    };

    usage.record(&trip.route, mode);

    trip.short_name = std::mem::replace(&mut trip.headsign, last_stop_name);
    trip.route_id = feed_route_id(&trip.feed_id, mode, &trip.route_id);
    trip.id = feed_trip_id(&trip.feed_id, &trip.id);
    Ok(trip)
}

/// Rewrite all the trips, in order. The first invalid trip stops the
/// process.
pub fn transform_trips(
    trips: Vec<Trip>,
    heuristics: &ModeHeuristics,
    usage: &mut RouteModeUsage,
) -> Result<Vec<Trip>, PreconditionError> {
    trips
        .into_iter()
        .map(|trip| transform_trip(trip, heuristics, usage))
        .collect()
}
