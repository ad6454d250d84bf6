//! FILENAME: core/persistence/src/header.rs
//! PURPOSE: Turns a raw header row into unique column keys.

use std::collections::HashSet;

/// Key given to a blank header cell.
pub const EMPTY_HEADER_KEY: &str = "__EMPTY";

/// Makes every header usable as a unique column key.
///
/// Header text is kept as written, surrounding spaces included. Blank
/// headers become `__EMPTY`, `__EMPTY_1`, ...; a repeated name gets the first
/// free `_1`, `_2`, ... suffix.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut keys = Vec::new();

    for header in raw {
        let text = header.as_ref();
        let base = if text.trim().is_empty() { EMPTY_HEADER_KEY } else { text };

        let mut key = base.to_string();
        let mut suffix = 1;
        while seen.contains(&key) {
            key = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        if key != base {
            log::warn!(target: "PARSE", "header {:?} renamed to {:?}", base, key);
        }

        seen.insert(key.clone());
        keys.push(key);
    }
    keys
}
