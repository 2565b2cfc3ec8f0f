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

//! Some utilities for tests.
#![allow(missing_docs)]

use crate::objects::{Route, RouteType, Stop, StopTime, Trip};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

pub fn test_in_tmp_dir<F>(func: F)
where
    F: FnOnce(&Path),
{
    let tmp_dir = tempfile::tempdir().expect("create temp dir");
    {
        let path = tmp_dir.as_ref();
        func(path);
    }
    tmp_dir.close().expect("delete temp dir");
}

pub fn create_file_with_content(path: &Path, file_name: &str, content: &str) -> File {
    let file_path = path.join(file_name);
    let mut f = File::create(&file_path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    File::open(file_path).unwrap()
}

/// Content of every file of a zip archive, by name
pub fn zip_content<R: Read + Seek>(reader: R) -> BTreeMap<String, String> {
    let mut archive = zip::ZipArchive::new(reader).expect("read zip archive");
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = String::new();
            file.read_to_string(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

pub fn compare_zip_with_expected<P: AsRef<Path>, Q: AsRef<Path>>(
    zip_path: P,
    files_to_check: &[&str],
    work_dir_expected: Q,
) {
    let zip_path = zip_path.as_ref();
    let file = File::open(zip_path).unwrap_or_else(|_| panic!("file {:?} not found", zip_path));
    let content = zip_content(file);
    for filename in files_to_check {
        let output_contents = content
            .get(*filename)
            .unwrap_or_else(|| panic!("file {} not found in {:?}", filename, zip_path));
        let expected_path = work_dir_expected.as_ref().join(filename);
        let expected_contents = std::fs::read_to_string(&expected_path)
            .unwrap_or_else(|_| panic!("file {:?} not found", expected_path));
        assert_eq!(&expected_contents, output_contents, "{}", filename);
    }
}

pub fn route(feed_id: &str, id: &str) -> Route {
    Route {
        feed_id: feed_id.to_string(),
        id: id.to_string(),
        agency_id: Some("SNCF".to_string()),
        short_name: String::new(),
        long_name: format!("Line {}", id),
        desc: None,
        route_type: RouteType::Rail,
        url: None,
        color: None,
        text_color: None,
        sort_order: None,
    }
}

pub fn stop(id: &str, name: &str) -> Stop {
    Stop {
        id: id.to_string(),
        name: name.to_string(),
        lat: "48.84".to_string(),
        lon: "2.37".to_string(),
        ..Default::default()
    }
}

pub fn stop_time(trip_id: &str, stop_sequence: u32, stop: Option<Stop>) -> StopTime {
    StopTime {
        trip_id: trip_id.to_string(),
        arrival_time: None,
        departure_time: None,
        stop_id: stop
            .as_ref()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        stop_sequence,
        stop_headsign: None,
        pickup_type: None,
        drop_off_type: None,
        stop,
    }
}

pub fn trip(
    feed_id: &str,
    id: &str,
    route: Route,
    headsign: &str,
    stop_times: Vec<StopTime>,
) -> Trip {
    Trip {
        feed_id: feed_id.to_string(),
        route_id: route.id.clone(),
        service_id: "S1".to_string(),
        id: id.to_string(),
        headsign: headsign.to_string(),
        short_name: String::new(),
        direction_id: None,
        block_id: None,
        shape_id: None,
        route,
        stop_times,
    }
}
