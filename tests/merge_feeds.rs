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

use pretty_assertions::assert_eq;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use transit_mode_split::{
    configuration::read_config,
    gtfs::{self, GtfsStore},
    modes::ModeHeuristics,
    objects::Date,
    sink::ZipSink,
    test_utils::*,
};

const FILES: [&str; 7] = [
    "trips.txt",
    "routes.txt",
    "stop_times.txt",
    "feed_info.txt",
    "stops.txt",
    "calendar_dates.txt",
    "agency.txt",
];

fn today() -> Date {
    Date::from_ymd_opt(2024, 6, 1).unwrap()
}

fn merge(store: &GtfsStore, heuristics: &ModeHeuristics, output: &Path) {
    let mut sink = ZipSink::new(File::create(output).unwrap());
    transit_mode_split::rewrite(store, &mut sink, heuristics, today()).unwrap();
    sink.finish().unwrap();
}

#[test]
fn merge_two_feeds() {
    test_in_tmp_dir(|path| {
        let config = read_config("tests/fixtures/feeds2gtfs/input/config.json").unwrap();
        let store = GtfsStore::load(&config).unwrap();
        let output = path.join("gtfs.zip");
        merge(&store, &config.mode_heuristics, &output);
        compare_zip_with_expected(&output, &FILES, "tests/fixtures/feeds2gtfs/output");
    });
}

#[test]
fn files_written_in_order() {
    test_in_tmp_dir(|path| {
        let config = read_config("tests/fixtures/feeds2gtfs/input/config.json").unwrap();
        let store = GtfsStore::load(&config).unwrap();
        let output = path.join("gtfs.zip");
        merge(&store, &config.mode_heuristics, &output);

        let mut archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(FILES.to_vec(), names);
    });
}

#[test]
fn zipped_feed_with_sub_directory() {
    test_in_tmp_dir(|path| {
        let input = Path::new("tests/fixtures/feeds2gtfs/input/ic");
        let zip_path = path.join("ic.zip");
        {
            let mut zip = zip::ZipWriter::new(File::create(&zip_path).unwrap());
            for file in &[
                "agency.txt",
                "stops.txt",
                "routes.txt",
                "trips.txt",
                "stop_times.txt",
                "calendar.txt",
            ] {
                zip.start_file(
                    format!("export/{}", file),
                    zip::write::SimpleFileOptions::default(),
                )
                .unwrap();
                zip.write_all(&std::fs::read(input.join(file)).unwrap())
                    .unwrap();
            }
            zip.finish().unwrap();
        }
        let from_zip = gtfs::read_feed("IC", &zip_path).unwrap();
        let from_dir = gtfs::read_feed("IC", input).unwrap();
        assert_eq!(from_dir.trips, from_zip.trips);
        assert_eq!(from_dir.stops, from_zip.stops);
        assert_eq!(from_dir.service_dates, from_zip.service_dates);
        assert!(from_zip.feed_infos.is_empty());
    });
}

#[test]
fn configured_tokens() {
    test_in_tmp_dir(|path| {
        create_file_with_content(
            path,
            "config.json",
            &format!(
                r#"{{
                    "feeds": [{{ "feed_id": "TER", "path": "{}" }}],
                    "mode_heuristics": {{ "bus_tokens": [], "tram_tokens": ["Car"] }}
                }}"#,
                std::fs::canonicalize("tests/fixtures/feeds2gtfs/input/ter")
                    .unwrap()
                    .display()
            ),
        );
        let config = read_config(path.join("config.json")).unwrap();
        let store = GtfsStore::load(&config).unwrap();
        let output = path.join("gtfs.zip");
        merge(&store, &config.mode_heuristics, &output);

        let content = zip_content(File::open(&output).unwrap());
        let route_ids: Vec<&str> = content["routes.txt"]
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').next())
            .collect();
        assert_eq!(
            vec!["TER-t-OCE1506035", "TER-r-OCE1506035", "TER-r-OCE1506036"],
            route_ids
        );
    });
}

#[test]
fn missing_required_file() {
    test_in_tmp_dir(|path| {
        create_file_with_content(
            path,
            "agency.txt",
            "agency_id,agency_name,agency_url,agency_timezone\n",
        );
        let error = gtfs::read_feed("F1", path).unwrap_err();
        let causes: Vec<String> = error.chain().map(|cause| cause.to_string()).collect();
        assert_eq!("Error reading feed 'F1'", causes[0]);
        assert!(causes[1].contains("stops.txt"));
    });
}
