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

//! The different objects read from the source feeds and written in the
//! output archive. Their serialization matches the GTFS columns.

use crate::serde_utils::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar day
pub type Date = chrono::NaiveDate;

/// Transport mode inferred for a trip
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// Tramway, tram-train
    Tram,
    /// Any kind of train
    HeavyRail,
    /// Bus and coach
    Bus,
}

impl Mode {
    /// Every mode, in the order routes are split
    pub const ALL: [Mode; 3] = [Mode::Tram, Mode::HeavyRail, Mode::Bus];

    /// Short code inserted in the route identifiers
    pub fn prefix(self) -> &'static str {
        match self {
            Mode::Tram => "t",
            Mode::HeavyRail => "r",
            Mode::Bus => "b",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Tram => write!(f, "tram"),
            Mode::HeavyRail => write!(f, "heavy-rail"),
            Mode::Bus => write!(f, "bus"),
        }
    }
}

/// The `route_type` column of `routes.txt`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum RouteType {
    Tramway,
    Metro,
    Rail,
    Bus,
    Ferry,
    CableTram,
    SuspendedCableCar,
    Funicular,
    Trolleybus,
    Monorail,
    Other(u16),
}

impl RouteType {
    fn to_gtfs_value(self) -> u16 {
        match self {
            RouteType::Tramway => 0,
            RouteType::Metro => 1,
            RouteType::Rail => 2,
            RouteType::Bus => 3,
            RouteType::Ferry => 4,
            RouteType::CableTram => 5,
            RouteType::SuspendedCableCar => 6,
            RouteType::Funicular => 7,
            RouteType::Trolleybus => 11,
            RouteType::Monorail => 12,
            RouteType::Other(i) => i,
        }
    }
}

impl From<u16> for RouteType {
    fn from(i: u16) -> Self {
        match i {
            0 => RouteType::Tramway,
            1 => RouteType::Metro,
            2 => RouteType::Rail,
            3 => RouteType::Bus,
            4 => RouteType::Ferry,
            5 => RouteType::CableTram,
            6 => RouteType::SuspendedCableCar,
            7 => RouteType::Funicular,
            11 => RouteType::Trolleybus,
            12 => RouteType::Monorail,
            _ => RouteType::Other(i),
        }
    }
}

impl From<Mode> for RouteType {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Tram => RouteType::Tramway,
            Mode::HeavyRail => RouteType::Rail,
            Mode::Bus => RouteType::Bus,
        }
    }
}

impl Serialize for RouteType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.to_gtfs_value())
    }
}

impl<'de> Deserialize<'de> for RouteType {
    fn deserialize<D>(deserializer: D) -> Result<RouteType, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(RouteType::from)
    }
}

/// Errors when parsing a `Time`
#[derive(Debug, Error, PartialEq)]
pub enum TimeError {
    /// The time is not in the HH:MM:SS format
    #[error("'{0}' is not a valid time; HH:MM:SS format is expected")]
    WrongFormat(String),
}

/// Time of the day, counted in seconds from the midnight of the service day.
/// It can exceed 24 hours for trips running after midnight.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(u32);

impl Time {
    /// Build a time from hours, minutes and seconds
    pub fn new(h: u32, m: u32, s: u32) -> Time {
        Time(h * 60 * 60 + m * 60 + s)
    }
    /// Hours, not bounded to 24
    pub fn hours(self) -> u32 {
        self.0 / 60 / 60
    }
    /// Minutes in the hour
    pub fn minutes(self) -> u32 {
        self.0 / 60 % 60
    }
    /// Seconds in the minute
    pub fn seconds(self) -> u32 {
        self.0 % 60
    }
}

impl FromStr for Time {
    type Err = TimeError;
    fn from_str(time: &str) -> Result<Self, Self::Err> {
        let wrong_format = || TimeError::WrongFormat(time.to_string());
        let mut parts = time.trim().split(':');
        let mut next_number = || -> Result<u32, TimeError> {
            parts
                .next()
                .and_then(|part| part.parse().ok())
                .ok_or_else(wrong_format)
        };
        let hours = next_number()?;
        let minutes = next_number()?;
        let seconds = next_number()?;
        if parts.next().is_some() || minutes > 59 || seconds > 59 {
            return Err(wrong_format());
        }
        hours
            .checked_mul(60 * 60)
            .and_then(|total| total.checked_add(minutes * 60 + seconds))
            .map(Time)
            .ok_or_else(wrong_format)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Time, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let time = String::deserialize(deserializer)?;
        time.parse().map_err(serde::de::Error::custom)
    }
}

/// The `exception_type` column of `calendar_dates.txt`
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExceptionType {
    /// The service runs at that date
    #[serde(rename = "1")]
    Add,
    /// The service does not run at that date
    #[serde(rename = "2")]
    Remove,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[allow(missing_docs)]
pub struct Agency {
    #[serde(rename = "agency_id", default)]
    pub id: String,
    #[serde(rename = "agency_name")]
    pub name: String,
    #[serde(rename = "agency_url")]
    pub url: String,
    #[serde(rename = "agency_timezone")]
    pub timezone: String,
    #[serde(rename = "agency_lang")]
    pub lang: Option<String>,
    #[serde(rename = "agency_phone")]
    pub phone: Option<String>,
    #[serde(rename = "agency_fare_url")]
    pub fare_url: Option<String>,
    #[serde(rename = "agency_email")]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[allow(missing_docs)]
pub struct Stop {
    #[serde(rename = "stop_id")]
    pub id: String,
    #[serde(rename = "stop_code")]
    pub code: Option<String>,
    #[serde(rename = "stop_name", default)]
    pub name: String,
    #[serde(rename = "stop_desc")]
    pub desc: Option<String>,
    // coordinates are passed through as written in the source feed
    #[serde(rename = "stop_lat", default)]
    pub lat: String,
    #[serde(rename = "stop_lon", default)]
    pub lon: String,
    #[serde(rename = "zone_id")]
    pub fare_zone_id: Option<String>,
    #[serde(rename = "stop_url")]
    pub url: Option<String>,
    pub location_type: Option<u8>,
    pub parent_station: Option<String>,
    #[serde(rename = "stop_timezone")]
    pub timezone: Option<String>,
    pub wheelchair_boarding: Option<u8>,
    pub level_id: Option<String>,
    pub platform_code: Option<String>,
}

/// A line of `feed_info.txt`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[allow(missing_docs)]
pub struct FeedInfo {
    pub feed_publisher_name: String,
    pub feed_publisher_url: String,
    pub feed_lang: String,
    pub default_lang: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_option_date_string",
        serialize_with = "ser_option_naive_date"
    )]
    pub feed_start_date: Option<Date>,
    #[serde(
        default,
        deserialize_with = "de_option_date_string",
        serialize_with = "ser_option_naive_date"
    )]
    pub feed_end_date: Option<Date>,
    pub feed_version: Option<String>,
    pub feed_contact_email: Option<String>,
    pub feed_contact_url: Option<String>,
}

/// A route of a source feed.
///
/// The declared `route_type` is not trusted: the written routes get the mode
/// inferred from their trips.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct Route {
    #[serde(skip)]
    pub feed_id: String,
    #[serde(rename = "route_id")]
    pub id: String,
    pub agency_id: Option<String>,
    #[serde(rename = "route_short_name", default)]
    pub short_name: String,
    #[serde(rename = "route_long_name", default)]
    pub long_name: String,
    #[serde(rename = "route_desc")]
    pub desc: Option<String>,
    pub route_type: RouteType,
    #[serde(rename = "route_url")]
    pub url: Option<String>,
    #[serde(rename = "route_color")]
    pub color: Option<String>,
    #[serde(rename = "route_text_color")]
    pub text_color: Option<String>,
    #[serde(rename = "route_sort_order")]
    pub sort_order: Option<u32>,
}

/// A stop time of a trip, joined with its stop when the stop exists
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct StopTime {
    pub trip_id: String,
    pub arrival_time: Option<Time>,
    pub departure_time: Option<Time>,
    pub stop_id: String,
    pub stop_sequence: u32,
    pub stop_headsign: Option<String>,
    pub pickup_type: Option<u8>,
    pub drop_off_type: Option<u8>,
    #[serde(skip)]
    pub stop: Option<Stop>,
}

/// A trip of a source feed, joined with its route and its stop times
/// (ordered by `stop_sequence`).
#[derive(Serialize, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct Trip {
    #[serde(skip)]
    pub feed_id: String,
    pub route_id: String,
    pub service_id: String,
    #[serde(rename = "trip_id")]
    pub id: String,
    #[serde(rename = "trip_headsign")]
    pub headsign: String,
    #[serde(rename = "trip_short_name")]
    pub short_name: String,
    pub direction_id: Option<u8>,
    pub block_id: Option<String>,
    pub shape_id: Option<String>,
    #[serde(skip)]
    pub route: Route,
    #[serde(skip)]
    pub stop_times: Vec<StopTime>,
}

/// A day at which a service of a feed runs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub struct ServiceDate {
    pub feed_id: String,
    pub service_id: String,
    pub date: Date,
}
