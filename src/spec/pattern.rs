//! Match rules: the static file pattern plus an optional date capture.
//!
//! A match rule answers two questions about a candidate path:
//!
//! - does the static part (one or more glob patterns over directory and
//!   filename) match at all, and how specifically?
//! - does the filename embed a date token, and what date does it denote?
//!
//! Patterns without a path separator match against the file's basename.
//! Patterns with a separator match against the full path, anchored either
//! at the start or at any directory boundary.

use chrono::NaiveDate;
use globset::{Glob, GlobMatcher};
use regex::Regex;

use super::errors::{SpecError, SpecResult};

/// One compiled glob pattern with its specificity score.
#[derive(Debug, Clone)]
struct CompiledPattern {
    raw: String,
    /// Count of glob metacharacters. Zero means a literal filename.
    wildcards: u32,
    matcher: GlobMatcher,
    /// Same pattern prefixed with `**/`, for suffix matches on full paths.
    /// Only built for patterns containing a separator.
    anchored: Option<GlobMatcher>,
}

impl CompiledPattern {
    fn compile(raw: &str) -> SpecResult<Self> {
        let compile = |pat: &str| -> SpecResult<GlobMatcher> {
            Glob::new(pat)
                .map(|g| g.compile_matcher())
                .map_err(|e| SpecError::Pattern {
                    pattern: raw.to_string(),
                    detail: e.to_string(),
                })
        };

        let anchored = if raw.contains('/') {
            Some(compile(&format!("**/{raw}"))?)
        } else {
            None
        };

        Ok(Self {
            raw: raw.to_string(),
            wildcards: raw.chars().filter(|c| matches!(c, '*' | '?' | '[')).count() as u32,
            matcher: compile(raw)?,
            anchored,
        })
    }

    fn matches(&self, path: &str, basename: &str) -> bool {
        match &self.anchored {
            // Pattern addresses directories: match the full path.
            Some(anchored) => self.matcher.is_match(path) || anchored.is_match(path),
            // Bare filename pattern: match the basename only.
            None => self.matcher.is_match(basename),
        }
    }
}

/// The matching half of a specification: static glob patterns and an
/// optional regex extracting a date token from the filename.
#[derive(Debug, Clone)]
pub struct MatchRule {
    patterns: Vec<CompiledPattern>,
    date_capture: Option<Regex>,
}

impl MatchRule {
    /// Compiles a match rule from raw glob patterns and an optional date
    /// capture regex (which must contain at least one capture group).
    pub fn new(patterns: &[String], date_capture: Option<&str>) -> SpecResult<Self> {
        if patterns.is_empty() {
            return Err(SpecError::NoPattern);
        }

        let compiled = patterns
            .iter()
            .map(|p| CompiledPattern::compile(p))
            .collect::<SpecResult<Vec<_>>>()?;

        let date_capture = match date_capture {
            None => None,
            Some(raw) => {
                let re = Regex::new(raw).map_err(|e| SpecError::DateCapture {
                    regex: raw.to_string(),
                    detail: e.to_string(),
                })?;
                if re.captures_len() < 2 {
                    return Err(SpecError::DateCaptureNoGroup(raw.to_string()));
                }
                Some(re)
            }
        };

        Ok(Self {
            patterns: compiled,
            date_capture,
        })
    }

    /// Returns true if any static pattern matches the path.
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize(path);
        let base = basename(&path);
        self.patterns.iter().any(|p| p.matches(&path, base))
    }

    /// Specificity of this rule for a path it matches: the lowest wildcard
    /// count among the matching patterns. `Some(0)` is a literal filename.
    /// `None` if no pattern matches.
    pub fn specificity_for(&self, path: &str) -> Option<u32> {
        let path = normalize(path);
        let base = basename(&path);
        self.patterns
            .iter()
            .filter(|p| p.matches(&path, base))
            .map(|p| p.wildcards)
            .min()
    }

    /// Returns true if the rule declares a date capture.
    pub fn has_date_capture(&self) -> bool {
        self.date_capture.is_some()
    }

    /// Extracts the date token from the path's filename, if the rule
    /// declares a capture and it matches.
    pub fn date_token<'p>(&self, path: &'p str) -> Option<&'p str> {
        let re = self.date_capture.as_ref()?;
        re.captures(path)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Extracts and parses the date embedded in the path, if any.
    pub fn date_from_path(&self, path: &str) -> Option<NaiveDate> {
        let token = {
            let re = self.date_capture.as_ref()?;
            re.captures(path)?.get(1)?.as_str()
        };
        parse_date_token(token)
    }

    /// The raw pattern strings, for diagnostics.
    pub fn pattern_strings(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.raw.as_str()).collect()
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parses a date token captured from a filename.
///
/// Dashes are stripped first, then the remaining digits are interpreted by
/// length: `yyyymm` (first of the month), `yyyymmdd`, or `yyyymmddhhmmss`
/// (time part discarded).
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let digits: String = token.chars().filter(|c| *c != '-').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    match digits.len() {
        6 => NaiveDate::parse_from_str(&format!("{digits}01"), "%Y%m%d").ok(),
        8 => NaiveDate::parse_from_str(&digits, "%Y%m%d").ok(),
        14 => NaiveDate::parse_from_str(&digits[..8], "%Y%m%d").ok(),
        _ => None,
    }
}
