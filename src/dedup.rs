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

//! Stops and agencies are read once per feed, the same object can thus
//! appear several times. Only one of them is written.

use crate::objects::{Agency, Stop};
use std::collections::BTreeMap;
use tracing::debug;

/// An object identified by a natural key
pub trait Id {
    /// The key
    fn id(&self) -> &str;
}

impl Id for Stop {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Id for Agency {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Keep one object per identifier, the last one seen. Objects are returned
/// ordered by identifier.
///
/// Duplicates with different values are not reconciled.
pub fn deduplicate<T: Id>(objects: Vec<T>) -> Vec<T> {
    let count = objects.len();
    let mut by_id = BTreeMap::new();
    for obj in objects {
        by_id.insert(obj.id().to_string(), obj);
    }
    if by_id.len() < count {
        debug!("{} duplicated objects dropped", count - by_id.len());
    }
    by_id.into_values().collect()
}
