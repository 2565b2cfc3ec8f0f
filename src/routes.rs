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

//! Split the routes per mode.
//!
//! The modes used by the trips of each route are collected in a
//! [`RouteModeUsage`] while the trips are rewritten. Once every trip is
//! processed, the usage is consumed to produce one route per mode.

use crate::objects::{Mode, Route, RouteType};
use std::collections::BTreeMap;
use tracing::debug;

/// Identifier of a route in the output archive
pub fn feed_route_id(feed_id: &str, mode: Mode, route_id: &str) -> String {
    format!("{}-{}-{}", feed_id, mode.prefix(), route_id)
}

#[derive(Debug, Clone, PartialEq)]
struct ModeUsage {
    route: Route,
    tram: bool,
    heavy_rail: bool,
    bus: bool,
}

impl ModeUsage {
    fn new(route: Route) -> Self {
        ModeUsage {
            route,
            tram: false,
            heavy_rail: false,
            bus: false,
        }
    }

    fn set(&mut self, mode: Mode) {
        match mode {
            Mode::Tram => self.tram = true,
            Mode::HeavyRail => self.heavy_rail = true,
            Mode::Bus => self.bus = true,
        }
    }

    fn is_used(&self, mode: Mode) -> bool {
        match mode {
            Mode::Tram => self.tram,
            Mode::HeavyRail => self.heavy_rail,
            Mode::Bus => self.bus,
        }
    }
}

/// Modes used by the trips of each route, keyed by (feed id, route id)
#[derive(Debug, Default)]
pub struct RouteModeUsage {
    usages: BTreeMap<(String, String), ModeUsage>,
}

impl RouteModeUsage {
    /// Record that a trip of `route` runs with `mode`.
    /// The stored route is replaced by the given one.
    pub fn record(&mut self, route: &Route, mode: Mode) {
        self.usages
            .entry((route.feed_id.clone(), route.id.clone()))
            .and_modify(|usage| usage.route = route.clone())
            .or_insert_with(|| ModeUsage::new(route.clone()))
            .set(mode);
    }

    /// Modes recorded for a route, in split order
    pub fn modes(&self, feed_id: &str, route_id: &str) -> Vec<Mode> {
        self.usages
            .get(&(feed_id.to_string(), route_id.to_string()))
            .map(|usage| {
                Mode::ALL
                    .iter()
                    .copied()
                    .filter(|&mode| usage.is_used(mode))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of routes recorded
    pub fn len(&self) -> usize {
        self.usages.len()
    }

    /// No route recorded
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    /// Produce one route per recorded mode (tram, then heavy rail, then bus)
    /// of each route, ordered by feed and route identifier. The produced
    /// route has the inferred mode as `route_type` and is renamed
    /// `{feed}-{mode}-{route}`.
    pub fn into_routes(self) -> Vec<Route> {
        let mut routes = Vec::new();
        for usage in self.usages.into_values() {
            let modes: Vec<Mode> = Mode::ALL
                .iter()
                .copied()
                .filter(|&mode| usage.is_used(mode))
                .collect();
            if modes.len() > 1 {
                let names: Vec<String> = modes.iter().map(Mode::to_string).collect();
                debug!(
                    "route '{}' of feed '{}' split into {}",
                    usage.route.id,
                    usage.route.feed_id,
                    names.join(", ")
                );
            }
            for mode in modes {
                let mut route = usage.route.clone();
                route.id = feed_route_id(&route.feed_id, mode, &route.id);
                route.route_type = RouteType::from(mode);
                routes.push(route);
            }
        }
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::route;
    use pretty_assertions::assert_eq;

    fn ids_and_types(routes: &[Route]) -> Vec<(&str, RouteType)> {
        routes
            .iter()
            .map(|route| (route.id.as_str(), route.route_type))
            .collect()
    }

    #[test]
    fn one_route_per_used_mode() {
        let mut usage = RouteModeUsage::default();
        let r1 = route("F1", "R1");
        usage.record(&r1, Mode::HeavyRail);
        usage.record(&r1, Mode::Bus);
        usage.record(&r1, Mode::HeavyRail);

        let routes = usage.into_routes();
        assert_eq!(
            vec![("F1-r-R1", RouteType::Rail), ("F1-b-R1", RouteType::Bus)],
            ids_and_types(&routes)
        );
        for r in &routes {
            assert_eq!(r1.long_name, r.long_name);
            assert_eq!(r1.agency_id, r.agency_id);
            assert_eq!(r1.feed_id, r.feed_id);
        }
    }

    #[test]
    fn three_modes_in_fixed_order() {
        let mut usage = RouteModeUsage::default();
        let r1 = route("F1", "R1");
        usage.record(&r1, Mode::Bus);
        usage.record(&r1, Mode::HeavyRail);
        usage.record(&r1, Mode::Tram);
        assert_eq!(
            vec![Mode::Tram, Mode::HeavyRail, Mode::Bus],
            usage.modes("F1", "R1")
        );

        let routes = usage.into_routes();
        assert_eq!(
            vec![
                ("F1-t-R1", RouteType::Tramway),
                ("F1-r-R1", RouteType::Rail),
                ("F1-b-R1", RouteType::Bus),
            ],
            ids_and_types(&routes)
        );
    }

    #[test]
    fn routes_are_keyed_by_feed() {
        let mut usage = RouteModeUsage::default();
        usage.record(&route("F2", "R1"), Mode::Bus);
        usage.record(&route("F1", "R1"), Mode::Tram);
        assert_eq!(2, usage.len());
        assert_eq!(vec![Mode::Tram], usage.modes("F1", "R1"));
        assert_eq!(Vec::<Mode>::new(), usage.modes("F3", "R1"));

        let routes = usage.into_routes();
        assert_eq!(
            vec![("F1-t-R1", RouteType::Tramway), ("F2-b-R1", RouteType::Bus)],
            ids_and_types(&routes)
        );
    }

    #[test]
    fn last_recorded_route_is_kept() {
        let mut usage = RouteModeUsage::default();
        let mut r1 = route("F1", "R1");
        usage.record(&r1, Mode::Bus);
        r1.long_name = "Renamed".to_string();
        usage.record(&r1, Mode::Bus);

        let routes = usage.into_routes();
        assert_eq!(1, routes.len());
        assert_eq!("Renamed", routes[0].long_name);
    }

    #[test]
    fn empty_usage() {
        assert!(RouteModeUsage::default().into_routes().is_empty());
    }
}
