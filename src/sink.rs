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

//! Destination of the written files.

use crate::Result;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::{Seek, Write};
use tracing::debug;

/// Something files can be added to
pub trait ArchiveSink {
    /// Add a file named `name` with the given content
    fn add_file(&mut self, name: &str, content: &[u8]) -> Result<()>;
}

/// Write the files in a zip archive
pub struct ZipSink<W: Write + Seek> {
    zip: zip::ZipWriter<W>,
}

impl<W: Write + Seek> ZipSink<W> {
    /// Start a new archive
    pub fn new(writer: W) -> Self {
        ZipSink {
            zip: zip::ZipWriter::new(writer),
        }
    }

    /// Write the end of the archive and give back the writer
    pub fn finish(self) -> Result<W> {
        self.zip.finish().context("Error finishing zip archive")
    }
}

impl<W: Write + Seek> ArchiveSink for ZipSink<W> {
    fn add_file(&mut self, name: &str, content: &[u8]) -> Result<()> {
        debug!("adding {} to the archive", name);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        self.zip
            .start_file(name, options)
            .with_context(|| format!("Error adding {} to zip archive", name))?;
        self.zip
            .write_all(content)
            .with_context(|| format!("Error writing {} in zip archive", name))?;
        Ok(())
    }
}

/// Keep the files in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    /// Content of a file, if it was added
    pub fn file(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    /// Names of the added files, in alphabetical order
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl ArchiveSink for MemorySink {
    fn add_file(&mut self, name: &str, content: &[u8]) -> Result<()> {
        self.files.insert(name.to_string(), content.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Read};

    #[test]
    fn zip_sink() {
        let mut sink = ZipSink::new(Cursor::new(Vec::new()));
        sink.add_file("trips.txt", b"trip_id\nT1\n").unwrap();
        sink.add_file("routes.txt", b"route_id\n").unwrap();
        let buffer = sink.finish().unwrap();

        let mut archive = zip::ZipArchive::new(buffer).unwrap();
        assert_eq!(2, archive.len());
        let mut content = String::new();
        archive
            .by_name("trips.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!("trip_id\nT1\n", content);
    }

    #[test]
    fn memory_sink() {
        let mut sink = MemorySink::default();
        sink.add_file("b.txt", b"b").unwrap();
        sink.add_file("a.txt", b"a").unwrap();
        assert_eq!(vec!["a.txt", "b.txt"], sink.file_names().collect::<Vec<_>>());
        assert_eq!(Some(&b"b"[..]), sink.file("b.txt"));
        assert_eq!(None, sink.file("c.txt"));
    }
}
