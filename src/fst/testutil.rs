#![forbid(unsafe_code)]

//! In-memory FST tables and disc images for tests.

use std::io::Cursor;

use crate::fst::format::{CONTAINER_FILE_AREA, CONTAINER_FST_START, CONTAINER_MAGIC, CONTAINER_VIRTUAL_FILE_AREA};

enum Record {
    Dir { name: String, parent: u32 },
    File { name: String, offset: u32, size: u32 },
}

/// Builds raw FST bytes: root record, records in push order, string table.
#[derive(Default)]
pub(crate) struct FstBuilder {
    records: Vec<Record>,
}

impl FstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, name: &str, parent: u32) -> Self {
        self.records.push(Record::Dir {
            name: name.into(),
            parent,
        });
        self
    }

    pub fn file(mut self, name: &str, offset: u32, size: u32) -> Self {
        self.records.push(Record::File {
            name: name.into(),
            offset,
            size,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut table = Vec::new();
        let mut strings = Vec::new();

        table.push(1u8);
        table.extend_from_slice(&[0, 0, 0]);
        table.extend_from_slice(&0u32.to_be_bytes());
        table.extend_from_slice(&(self.records.len() as u32 + 1).to_be_bytes());

        for rec in &self.records {
            let (kind, name, a, b) = match rec {
                Record::Dir { name, parent } => (1u8, name, *parent, 0u32),
                Record::File { name, offset, size } => (0u8, name, *offset, *size),
            };
            let name_offset = strings.len() as u32;
            strings.extend_from_slice(name.as_bytes());
            strings.push(0);

            table.push(kind);
            table.extend_from_slice(&name_offset.to_be_bytes()[1..]);
            table.extend_from_slice(&a.to_be_bytes());
            table.extend_from_slice(&b.to_be_bytes());
        }

        table.extend_from_slice(&strings);
        table
    }
}

/// Zero-filled image with helpers to place bytes at absolute offsets.
pub(crate) struct Image {
    pub bytes: Vec<u8>,
}

impl Image {
    pub fn new(len: usize) -> Self {
        Self { bytes: vec![0u8; len] }
    }

    /// Disc with the FST pointer at 0x424 set to `fst_at`.
    pub fn disc(len: usize, fst_at: u32, fst: &[u8]) -> Self {
        let mut img = Self::new(len);
        img.put_u32(0x0424, fst_at);
        img.put(fst_at as usize, fst);
        img
    }

    pub fn put(&mut self, at: usize, data: &[u8]) -> &mut Self {
        if self.bytes.len() < at + data.len() {
            self.bytes.resize(at + data.len(), 0);
        }
        self.bytes[at..at + data.len()].copy_from_slice(data);
        self
    }

    pub fn put_u32(&mut self, at: usize, v: u32) -> &mut Self {
        self.put(at, &v.to_be_bytes())
    }

    /// Writes a container header at `at`, with its FST placed at `at + fst_rel`.
    pub fn container(&mut self, at: usize, fst_rel: u32, file_area: u32, virtual_file_area: u32, fst: &[u8]) -> &mut Self {
        self.put(at, &CONTAINER_MAGIC);
        self.put_u32(at + CONTAINER_FST_START as usize, fst_rel);
        self.put_u32(at + CONTAINER_FILE_AREA as usize, file_area);
        self.put_u32(at + CONTAINER_VIRTUAL_FILE_AREA as usize, virtual_file_area);
        self.put(at + fst_rel as usize, fst)
    }

    /// Fills `[at, at + len)` with a byte pattern derived from the offset.
    pub fn pattern(&mut self, at: usize, len: usize) -> &mut Self {
        let data: Vec<u8> = (at..at + len).map(|i| (i % 251) as u8).collect();
        self.put(at, &data)
    }

    pub fn cursor(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes.clone())
    }
}
