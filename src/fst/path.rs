#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use crate::fst::error::{FstError, FstResult};
use crate::fst::format::Entry;

/// Assigns `path` and `full_name` to every entry of one decoded table.
///
/// Entries sharing a parent share a path, so each parent chain is walked
/// once. Running this again over the same entries gives the same result.
pub(crate) fn resolve_paths(entries: &mut [Entry]) -> FstResult<()> {
    let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (idx, e) in entries.iter().enumerate() {
        groups.entry(e.parent_dir_pos).or_default().push(idx);
    }

    for (parent, members) in groups {
        let path = parent_path(entries, parent)?;
        for idx in members {
            entries[idx].path = path.clone();
        }
    }

    for e in entries.iter_mut() {
        let mut full = format!("{}{}{}", e.owner, e.path, e.name);
        if e.is_dir() {
            full.push('/');
        }
        e.full_name = full;
    }

    Ok(())
}

/// Slash-separated chain of directory names from the root down to `parent`.
fn parent_path(entries: &[Entry], parent: u32) -> FstResult<String> {
    let mut names: Vec<&str> = Vec::new();
    let mut cur = parent;

    while cur != 0 {
        let dir = entries
            .get(cur as usize - 1)
            .ok_or_else(|| FstError::Invalid(format!("parent position {cur} is out of range")))?;
        if !dir.is_dir() {
            return Err(FstError::Invalid(format!("parent position {cur} is not a directory")));
        }
        // strictly decreasing positions bound the walk by the nesting depth
        if dir.parent_dir_pos >= cur {
            return Err(FstError::Invalid(format!(
                "directory {cur} has parent {}, which is not an earlier entry",
                dir.parent_dir_pos
            )));
        }
        names.push(&dir.name);
        cur = dir.parent_dir_pos;
    }

    let mut path = String::from("/");
    for name in names.iter().rev() {
        path.push_str(name);
        path.push('/');
    }
    Ok(path)
}
