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
//! Services of the source feeds are read from `calendar.txt` and
//! `calendar_dates.txt`, then written back as a flat list of dates in
//! `calendar_dates.txt`, restricted to a window around the current day.

use crate::objects::{Date, ExceptionType, ServiceDate};
use crate::serde_utils::*;
use chrono::{Datelike, Duration, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Number of past days written in `calendar_dates.txt`
pub const DAYS_BEFORE_TODAY: i64 = 1;
/// Number of future days written in `calendar_dates.txt`
pub const DAYS_AFTER_TODAY: i64 = 365;

/// Structure to serialize/deserialize the file calendar_dates.txt
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalendarDate {
    /// Identifiers of the Service
    pub service_id: String,
    #[serde(
        deserialize_with = "de_from_date_string",
        serialize_with = "ser_from_naive_date"
    )]
    /// Date at which the CalendarDate applies
    pub date: Date,
    /// Is the CalendarDate included or excluded
    pub exception_type: ExceptionType,
}

/// Structure to deserialize the file calendar.txt
#[derive(Deserialize, Debug, PartialEq)]
pub struct Calendar {
    #[serde(rename = "service_id")]
    id: String,
    #[serde(deserialize_with = "de_from_u8")]
    monday: bool,
    #[serde(deserialize_with = "de_from_u8")]
    tuesday: bool,
    #[serde(deserialize_with = "de_from_u8")]
    wednesday: bool,
    #[serde(deserialize_with = "de_from_u8")]
    thursday: bool,
    #[serde(deserialize_with = "de_from_u8")]
    friday: bool,
    #[serde(deserialize_with = "de_from_u8")]
    saturday: bool,
    #[serde(deserialize_with = "de_from_u8")]
    sunday: bool,
    #[serde(deserialize_with = "de_from_date_string")]
    start_date: Date,
    #[serde(deserialize_with = "de_from_date_string")]
    end_date: Date,
}

impl Calendar {
    fn runs_on(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    fn valid_dates(&self) -> BTreeSet<Date> {
        let duration = self.end_date - self.start_date;
        (0..=duration.num_days())
            .map(|i| self.start_date + Duration::days(i))
            .filter(|d| self.runs_on(d.weekday()))
            .collect()
    }
}

/// Dates of each service, from the weekly patterns of `calendar.txt`
/// amended by `calendar_dates.txt`
pub fn service_dates(
    calendars: &[Calendar],
    calendar_dates: &[CalendarDate],
) -> BTreeMap<String, BTreeSet<Date>> {
    let mut dates_by_service: BTreeMap<String, BTreeSet<Date>> = calendars
        .iter()
        .map(|calendar| (calendar.id.clone(), calendar.valid_dates()))
        .collect();
    for calendar_date in calendar_dates {
        let dates = dates_by_service
            .entry(calendar_date.service_id.clone())
            .or_default();
        match calendar_date.exception_type {
            ExceptionType::Add => {
                dates.insert(calendar_date.date);
            }
            ExceptionType::Remove => {
                dates.remove(&calendar_date.date);
            }
        }
    }
    dates_by_service.retain(|_, dates| !dates.is_empty());
    dates_by_service
}

/// First and last days (both included) written in `calendar_dates.txt`
pub fn calendar_window(today: Date) -> (Date, Date) {
    (
        today - Duration::days(DAYS_BEFORE_TODAY),
        today + Duration::days(DAYS_AFTER_TODAY),
    )
}

/// One added exception per service and date, ordered by service then date.
pub fn calendar_exceptions(service_dates: Vec<ServiceDate>) -> Vec<CalendarDate> {
    service_dates
        .into_iter()
        .map(|service_date| (service_date.service_id, service_date.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|(service_id, date)| CalendarDate {
            service_id,
            date,
            exception_type: ExceptionType::Add,
        })
        .collect()
}
