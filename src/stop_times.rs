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

//! Point the stop times to the rewritten trips.

use crate::objects::{StopTime, Trip};
use crate::trips::feed_trip_id;

/// Stop times of all the trips, in trip order then in stop order, with
/// their `trip_id` prefixed by the feed of the trip.
pub fn rewrite_stop_times(trips: &[Trip]) -> Vec<StopTime> {
    trips
        .iter()
        .flat_map(|trip| {
            trip.stop_times.iter().map(move |stop_time| StopTime {
                trip_id: feed_trip_id(&trip.feed_id, &stop_time.trip_id),
                ..stop_time.clone()
            })
        })
        .collect()
}
