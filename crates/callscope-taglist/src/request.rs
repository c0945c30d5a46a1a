//! Taglist request parsing.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::TaglistError;

/// Option selecting the language of the target file.
const LANGUAGE_OPTION: &str = "--language-force";
/// Option enabling sorted output.
const SORT_OPTION: &str = "--sort";

/// A taglist request: the user's argument vector, interpreted.
///
/// The last argument names the target file. The full vector is forwarded to
/// the external tool unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaglistRequest {
    args: Vec<String>,
    file: Utf8PathBuf,
    language: Option<String>,
    sort: bool,
}

impl TaglistRequest {
    /// Interprets an argument vector.
    ///
    /// # Errors
    ///
    /// Returns [`TaglistError::InvalidRequest`] if `args` is empty.
    pub fn parse(args: Vec<String>) -> Result<Self, TaglistError> {
        let file = args
            .last()
            .map(Utf8PathBuf::from)
            .ok_or_else(|| TaglistError::invalid_request("no target file given"))?;

        let mut language = None;
        let mut sort = false;
        for arg in &args {
            if let Some(value) = option_value(arg, LANGUAGE_OPTION) {
                language = Some(value.to_owned());
            } else if let Some(value) = option_value(arg, SORT_OPTION) {
                sort = value == "yes";
            }
        }

        Ok(Self {
            args,
            file,
            language,
            sort,
        })
    }

    /// Returns the target file.
    #[must_use]
    pub fn file(&self) -> &Utf8Path {
        &self.file
    }

    /// Returns the forced language, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Returns `true` when tags should be sorted by name.
    #[must_use]
    pub const fn sort(&self) -> bool {
        self.sort
    }

    /// Returns the arguments forwarded to the external tool.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn option_value<'arg>(arg: &'arg str, option: &str) -> Option<&'arg str> {
    arg.strip_prefix(option)?.strip_prefix('=')
}
