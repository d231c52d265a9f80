//! Filename patterns: identifier extraction and fallback years.

use crate::consts::{FALLBACK_YEAR_REGEX, ID_REGEX};
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use regex::Regex;

/// Years recovered from a filename when the store has no edition for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackYears {
    /// Year the text was written.
    pub text_year: String,
    /// Year of the printing; the text year when the filename carries only one.
    pub year: String,
}

/// The two compiled filename patterns used during resolution.
///
/// [`Default`] uses [`ID_PATTERN`](crate::ID_PATTERN) and
/// [`FALLBACK_YEAR_PATTERN`](crate::FALLBACK_YEAR_PATTERN). Custom patterns
/// must keep the same capture groups: one for the identifier, two for the
/// years (the second optional).
#[derive(Debug, Clone)]
pub struct Patterns {
    id: Regex,
    fallback_year: Regex,
}
impl Default for Patterns {
    fn default() -> Self {
        Self { id: ID_REGEX.clone(), fallback_year: FALLBACK_YEAR_REGEX.clone() }
    }
}
impl Patterns {
    /// Compile custom patterns, checking their capture groups.
    pub fn new(id: &str, fallback_year: &str) -> Result<Self> {
        let id = Regex::new(id).or_raise(|| ErrorKind::Pattern("identifier"))?;
        // Group zero is the whole match.
        if id.captures_len() < 2 {
            exn::bail!(ErrorKind::Pattern("identifier"));
        }
        let fallback_year = Regex::new(fallback_year).or_raise(|| ErrorKind::Pattern("fallback year"))?;
        if fallback_year.captures_len() < 3 {
            exn::bail!(ErrorKind::Pattern("fallback year"));
        }
        Ok(Self { id, fallback_year })
    }

    /// Derive the stable identifier (`name.ext`) of a corpus file.
    ///
    /// Fails with [`ErrorKind::IdExtraction`] when the filename does not match.
    pub fn id(&self, filename: &str) -> Result<String> {
        self.id
            .captures(filename)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_raise(|| ErrorKind::IdExtraction(filename.to_string()))
    }

    /// Recover the written and printed years embedded in a filename.
    pub fn fallback_years(&self, filename: &str) -> Option<FallbackYears> {
        let captures = self.fallback_year.captures(filename)?;
        let text_year = captures.get(1)?.as_str().to_string();
        let year = captures.get(2).map_or_else(|| text_year.clone(), |m| m.as_str().to_string());
        Some(FallbackYears { text_year, year })
    }
}
