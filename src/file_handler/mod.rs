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

//! Access to the files of a feed, stored in a directory or in a zip archive.

use crate::Result;
use anyhow::{anyhow, Context};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{Read, Seek},
    path::{Path, PathBuf},
};
use tracing::info;

/// Opens the files of a feed by name
pub trait FileHandler
where
    Self: std::marker::Sized,
{
    /// Reader of one file
    type Reader: Read;

    /// Open the file `name`, giving back its path for error messages. The
    /// reader is `None` when the feed has no such file.
    fn get_file_if_exists(self, name: &str) -> Result<(Option<Self::Reader>, PathBuf)>;
}

/// Files of a feed stored in a directory
pub struct PathFileHandler<P: AsRef<Path>> {
    feed_dir: P,
}

impl<P: AsRef<Path>> PathFileHandler<P> {
    /// Read the files of `feed_dir`
    pub fn new(feed_dir: P) -> Self {
        PathFileHandler { feed_dir }
    }
}

impl<'a, P: AsRef<Path>> FileHandler for &'a mut PathFileHandler<P> {
    type Reader = File;
    fn get_file_if_exists(self, name: &str) -> Result<(Option<Self::Reader>, PathBuf)> {
        let path = self.feed_dir.as_ref().join(name);
        if !path.exists() {
            return Ok((None, path));
        }
        let file = File::open(&path).with_context(|| format!("Error reading {:?}", path))?;
        Ok((Some(file), path))
    }
}

/// Files of a feed stored in a zip archive.
///
/// Files are looked up by their base name: producers often zip the feed
/// inside a directory (`export/stops.txt`). Two entries with the same base
/// name cannot be told apart, the last one is used.
pub struct ZipHandler<R: Seek + Read> {
    archive: zip::ZipArchive<R>,
    archive_path: PathBuf,
    entries: BTreeMap<String, usize>,
}

impl<R> ZipHandler<R>
where
    R: Seek + Read,
{
    /// Open the archive, `path` being only used in error messages
    pub fn new<P: AsRef<Path>>(reader: R, path: P) -> Result<Self> {
        let archive_path = path.as_ref().to_path_buf();
        let mut archive = zip::ZipArchive::new(reader)
            .with_context(|| format!("Error reading {:?}", archive_path))?;
        let mut entries = BTreeMap::new();
        for index in 0..archive.len() {
            let entry = archive
                .by_index(index)
                .with_context(|| format!("Error reading {:?}", archive_path))?;
            if let Some(base_name) = Path::new(entry.name()).file_name().and_then(|n| n.to_str())
            {
                entries.insert(base_name.to_string(), index);
            }
        }
        Ok(ZipHandler {
            archive,
            archive_path,
            entries,
        })
    }
}

impl<'a, R> FileHandler for &'a mut ZipHandler<R>
where
    R: Seek + Read,
{
    type Reader = Box<dyn Read + 'a>;
    fn get_file_if_exists(self, name: &str) -> Result<(Option<Self::Reader>, PathBuf)> {
        let path = self.archive_path.join(name);
        let index = match self.entries.get(name) {
            Some(index) => *index,
            None => return Ok((None, path)),
        };
        let file = self
            .archive
            .by_index(index)
            .with_context(|| format!("Error reading {:?}", path))?;
        Ok((Some(Box::new(file)), path))
    }
}

/// Read a vector of objects from a file of a file handler.
/// A missing file is an error if `required`, and no object otherwise.
pub fn read_objects<H, O>(file_handler: &mut H, file_name: &str, required: bool) -> Result<Vec<O>>
where
    for<'a> &'a mut H: FileHandler,
    O: for<'de> serde::Deserialize<'de>,
{
    let (reader, path) = file_handler.get_file_if_exists(file_name)?;
    let reader = match reader {
        Some(reader) => reader,
        None if required => return Err(anyhow!("file {:?} not found", path)),
        None => {
            info!("Skipping {}", file_name);
            return Ok(vec![]);
        }
    };
    info!(file_name = %file_name, "Reading");
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    rdr.deserialize()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Error reading {:?}", path))
}
