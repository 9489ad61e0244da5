#![forbid(unsafe_code)]

use crate::fst::error::FstResult;
use crate::fst::format::{Entry, ListedEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
}

impl ListFormat {
    /// File name used when the listing is written to a directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ListFormat::Text => "FileList.txt",
            ListFormat::Json => "FileList.json",
        }
    }
}

/// Files only, ascending by offset. Ties keep table order.
pub fn listing(files: &[Entry]) -> Vec<ListedEntry> {
    let mut out: Vec<ListedEntry> = files
        .iter()
        .filter(|e| e.is_file())
        .map(|e| ListedEntry {
            file_offset: e.file_offset,
            size: e.size,
            name: e.name.clone(),
            full_name: e.full_name.clone(),
        })
        .collect();
    out.sort_by_key(|e| e.file_offset);
    out
}

pub fn render(list: &[ListedEntry], format: ListFormat) -> FstResult<String> {
    match format {
        ListFormat::Text => Ok(render_text(list)),
        ListFormat::Json => render_json(list),
    }
}

/// Column table: offset, size, name, full name.
pub fn render_text(list: &[ListedEntry]) -> String {
    let size_w = list.iter().map(|e| e.size.to_string().len()).max().unwrap_or(0);
    let name_w = list.iter().map(|e| e.name.len()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>10} {:>size_w$} {:<name_w$} {}\n",
        "FileOffset", "Size", "Name", "FullName"
    ));
    out.push_str(&format!(
        "{:<10} {:>size_w$} {:<name_w$} {}\n",
        "-".repeat(10),
        "-".repeat(4),
        "-".repeat(4),
        "-".repeat(8)
    ));
    for e in list {
        out.push_str(&format!(
            "{:>10} {:>size_w$} {:<name_w$} {}\n",
            e.file_offset, e.size, e.name, e.full_name
        ));
    }
    out
}

pub fn render_json(list: &[ListedEntry]) -> FstResult<String> {
    Ok(serde_json::to_string_pretty(list)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::container::read_disc;
    use crate::fst::testutil::{FstBuilder, Image};

    fn listed() -> Vec<ListedEntry> {
        let fst = FstBuilder::new()
            .file("bb.dat", 0x2000, 1024)
            .dir("sub", 0)
            .file("a.bin", 0x1000, 32)
            .build();
        let img = Image::disc(0x3000, 0x440, &fst);
        let files = read_disc(&mut img.cursor()).unwrap();
        listing(&files)
    }

    #[test]
    fn sorted_by_offset_without_directories() {
        let list = listed();
        let offsets: Vec<u64> = list.iter().map(|e| e.file_offset).collect();
        assert_eq!(offsets, vec![0x1000, 0x2000]);
        assert!(list.iter().all(|e| !e.full_name.ends_with('/')));
    }

    #[test]
    fn directories_in_input_are_skipped() {
        let fst = FstBuilder::new().dir("d", 0).file("f", 0x10, 1).build();
        let img = Image::disc(0x1000, 0x440, &fst);
        let mut entries = crate::fst::read::read_table(&mut img.cursor(), 0x440, 0, "").unwrap();
        crate::fst::path::resolve_paths(&mut entries).unwrap();

        let list = listing(&entries);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].full_name, "/d/f");
    }

    #[test]
    fn text_layout() {
        let text = render_text(&listed());
        let expected = "\
FileOffset Size Name   FullName
---------- ---- ----   --------
      4096   32 a.bin  /sub/a.bin
      8192 1024 bb.dat /bb.dat
";
        assert_eq!(text, expected);
    }

    #[test]
    fn text_of_empty_list_is_header_only() {
        let text = render_text(&[]);
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn json_uses_pascal_case_keys() {
        let json = render_json(&listed()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &v[0];
        assert_eq!(first["FileOffset"], 4096);
        assert_eq!(first["Size"], 32);
        assert_eq!(first["Name"], "a.bin");
        assert_eq!(first["FullName"], "/sub/a.bin");
        assert_eq!(v.as_array().unwrap().len(), 2);
    }

    #[test]
    fn file_names_per_format() {
        assert_eq!(ListFormat::Text.file_name(), "FileList.txt");
        assert_eq!(ListFormat::Json.file_name(), "FileList.json");
    }
}
