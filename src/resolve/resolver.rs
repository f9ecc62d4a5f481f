//! Choosing the one spec that governs a path.
//!
//! The priority chain over static-matching candidates:
//!
//! 1. validity: the window must contain the date token the spec captures
//!    from the path, or be unconstrained
//! 2. specificity: a literal filename beats a pattern, fewer wildcards
//!    beat more
//! 3. narrowest validity window: bounded beats half-open beats open
//! 4. most recently registered
//!
//! Resolution is pure: no side effects, no internal caching, and the same
//! path against the same index generation always yields the same spec.
//! If the chain cannot single out one candidate the result is
//! [`ResolutionError::Ambiguous`], never an arbitrary pick.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::index::{Candidate, SpecIndex};
use crate::spec::SpecDefinition;

use super::errors::{ResolutionError, ResolveResult};

/// Resolves the spec governing `path`, or fails.
pub fn resolve(path: &str, index: &SpecIndex) -> ResolveResult<Arc<SpecDefinition>> {
    resolve_at(path, index, None)
}

/// Like [`resolve`], but additionally requires each candidate's validity
/// window to contain `effective_date` when one is supplied. This is how
/// callers load historical data as of a specific date.
pub fn resolve_at(
    path: &str,
    index: &SpecIndex,
    effective_date: Option<NaiveDate>,
) -> ResolveResult<Arc<SpecDefinition>> {
    let mut candidates: Vec<Candidate> = index
        .candidates_for(path)
        .into_iter()
        .filter(|c| window_admits(&c.spec, path, effective_date))
        .collect();

    let chosen = match candidates.len() {
        0 => return Err(ResolutionError::NoMatch(path.to_string())),
        1 => candidates.remove(0).spec,
        _ => break_ties(path, candidates)?,
    };

    debug!(spec = %chosen.id, path, "resolved");
    Ok(chosen)
}

/// Validity filter: a constrained window must contain the date token the
/// spec extracts from the path (specs that declare a capture but find no
/// token in this path are excluded), and the effective date when given.
fn window_admits(spec: &SpecDefinition, path: &str, effective_date: Option<NaiveDate>) -> bool {
    if let Some(date) = effective_date {
        if !spec.validity.contains(date) {
            return false;
        }
    }

    if spec.validity.is_open() {
        return true;
    }

    match spec.match_rule.date_from_path(path) {
        Some(file_date) => spec.validity.contains(file_date),
        None => !spec.match_rule.has_date_capture(),
    }
}

/// Applies the priority chain to two or more validity-admitted candidates.
fn break_ties(path: &str, candidates: Vec<Candidate>) -> ResolveResult<Arc<SpecDefinition>> {
    // Tier 1: most specific static match.
    let best_specificity = candidates
        .iter()
        .filter_map(|c| c.spec.match_rule.specificity_for(path))
        .min();
    let mut candidates: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.spec.match_rule.specificity_for(path) == best_specificity)
        .collect();
    if candidates.len() == 1 {
        return Ok(candidates.remove(0).spec);
    }

    // Tier 2: narrowest validity window.
    let best_narrowness = candidates
        .iter()
        .map(|c| c.spec.validity.narrowness())
        .min()
        .unwrap_or((u8::MAX, i64::MAX));
    let mut candidates: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.spec.validity.narrowness() == best_narrowness)
        .collect();
    if candidates.len() == 1 {
        return Ok(candidates.remove(0).spec);
    }

    // Tier 3: most recently registered. A shared sequence number cannot
    // come out of a single load, but if it ever appears the answer is a
    // hard error, not a pick.
    let best_seq = candidates.iter().map(|c| c.seq).max().unwrap_or(0);
    let mut last: Vec<Candidate> = candidates.into_iter().filter(|c| c.seq == best_seq).collect();

    if last.len() == 1 {
        return Ok(last.remove(0).spec);
    }

    Err(ResolutionError::Ambiguous {
        path: path.to_string(),
        candidates: last.into_iter().map(|c| c.spec.id.clone()).collect(),
    })
}
