//! Tags for INI-style configuration files.

use std::fs;

use camino::Utf8Path;

use super::{TagEntry, TagScript};
use crate::error::TaglistError;

/// Kind letter for `[section]` headers.
const SECTION_KIND: char = 's';
/// Kind letter for `key = value` entries.
const KEY_KIND: char = 'k';

/// Lists sections and keys of INI files.
///
/// Lines starting with `;` or `#` are comments. Keys are split on the first
/// `=` or `:`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IniTagScript;

impl IniTagScript {
    /// Extracts tags from INI text attributed to `file`.
    #[must_use]
    pub fn scan(file: &Utf8Path, contents: &str) -> Vec<TagEntry> {
        contents
            .lines()
            .zip(1_u32..)
            .filter_map(|(text, line)| {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.starts_with([';', '#']) {
                    return None;
                }
                if let Some(section) = trimmed
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                {
                    return Some(TagEntry::new(
                        section.trim(),
                        file,
                        text,
                        SECTION_KIND,
                        line,
                    ));
                }
                let (key, _) = trimmed.split_once(['=', ':'])?;
                let name = key.trim();
                (!name.is_empty()).then(|| TagEntry::new(name, file, text, KEY_KIND, line))
            })
            .collect()
    }
}

impl TagScript for IniTagScript {
    fn language(&self) -> &'static str {
        "ini"
    }

    fn tags(&self, file: &Utf8Path) -> Result<Vec<TagEntry>, TaglistError> {
        let contents = fs::read_to_string(file).map_err(|err| TaglistError::read(file, err))?;
        Ok(Self::scan(file, &contents))
    }
}
