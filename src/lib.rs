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

//! The `transit_mode_split` crate merges several [GTFS](http://gtfs.org/)
//! feeds into one and fixes feeds whose routes mix several transport modes.
//!
//! Each trip gets a mode inferred from its first stop, every route is split
//! into one route per mode actually used by its trips, and all the trip and
//! route identifiers are prefixed by the identifier of their feed so that
//! several feeds can live in the same output archive.

#![deny(missing_docs)]

pub mod calendars;
pub mod configuration;
pub mod dedup;
pub mod file_handler;
pub mod gtfs;
pub mod modes;
pub mod objects;
pub mod rewrite;
pub mod routes;
pub(crate) mod serde_utils;
pub mod sink;
pub mod stop_times;
pub mod store;
#[doc(hidden)]
pub mod test_utils;
pub mod trips;

lazy_static::lazy_static! {
    /// Current date (UTC), formatted as `YYYY-MM-DD`
    pub static ref CURRENT_DATE: String = chrono::Utc::now().format("%F").to_string();
}

/// The error type used by the crate.
pub type Error = anyhow::Error;

/// The corresponding result type used by the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub use crate::rewrite::rewrite;

/// Version of a binary, completed with the git revision it was built from
pub fn binary_full_version(binary_version: &str) -> String {
    let git_version = git_version::git_version!(
        args = ["--always", "--dirty=-modified"],
        fallback = "unknown"
    );
    format!("v{} ({})", binary_version, git_version)
}
