//! In-process tag scripts and the Vim taglist output format.
//!
//! A [`TagScript`] produces [`TagEntry`] values for one language without
//! running the external tool. [`render_vim`] writes them in the
//! tab-separated layout Vim's taglist plugin reads from `ctags -f -`.

mod ini;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::TaglistError;

pub use self::ini::IniTagScript;

/// One tag produced by a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    name: String,
    file: Utf8PathBuf,
    pattern: String,
    kind: char,
    line: u32,
}

impl TagEntry {
    /// Creates a tag for `name` on `line` of `file`.
    ///
    /// `source_line` is the full text of that line; it becomes an anchored
    /// search pattern.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        file: impl Into<Utf8PathBuf>,
        source_line: &str,
        kind: char,
        line: u32,
    ) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            pattern: search_pattern(source_line),
            kind,
            line,
        }
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file the tag was found in.
    #[must_use]
    pub fn file(&self) -> &Utf8Path {
        &self.file
    }

    /// Returns the `/^...$/` search pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the single-letter tag kind.
    #[must_use]
    pub const fn kind(&self) -> char {
        self.kind
    }

    /// Returns the one-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

/// Produces tags for one language in process.
pub trait TagScript: Send + Sync {
    /// Returns the language the script handles.
    fn language(&self) -> &str;

    /// Lists the tags defined in `file`.
    ///
    /// # Errors
    ///
    /// Returns [`TaglistError::Read`] if the file cannot be read.
    fn tags(&self, file: &Utf8Path) -> Result<Vec<TagEntry>, TaglistError>;
}

/// Sorts tags by name, keeping file order among equal names.
pub fn sort_by_name(entries: &mut [TagEntry]) {
    entries.sort_by(|left, right| left.name.cmp(&right.name));
}

/// Renders tags one per line as `name<TAB>file<TAB>pattern;"<TAB>kind<TAB>line:N`.
#[must_use]
pub fn render_vim(entries: &[TagEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\t{}\t{};\"\t{}\tline:{}\n",
                entry.name, entry.file, entry.pattern, entry.kind, entry.line
            )
        })
        .collect()
}

fn search_pattern(source_line: &str) -> String {
    let escaped = source_line.replace('\\', "\\\\").replace('/', "\\/");
    format!("/^{escaped}$/")
}
