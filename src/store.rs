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

//! Where the source objects come from.

use crate::objects::{Agency, Date, FeedInfo, Route, ServiceDate, Stop, Trip};
use crate::Result;

/// Bulk access to the objects of all the source feeds.
///
/// Stops and agencies are returned once per feed they appear in, they may
/// thus be duplicated.
pub trait FeedStore {
    /// All the trips, each joined with its route and its stop times, each
    /// stop time being joined with its stop when it exists
    fn trips(&self) -> Result<Vec<Trip>>;
    /// All the routes, used by a trip or not
    fn routes(&self) -> Result<Vec<Route>>;
    /// All the stops
    fn stops(&self) -> Result<Vec<Stop>>;
    /// All the agencies
    fn agencies(&self) -> Result<Vec<Agency>>;
    /// Metadata of the feeds, in feed order
    fn feed_infos(&self) -> Result<Vec<FeedInfo>>;
    /// Days between `start` and `end` (both included) at which a service runs
    fn service_dates_between(&self, start: Date, end: Date) -> Result<Vec<ServiceDate>>;
}
