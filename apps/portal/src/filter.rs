//! Candidate Filter Engine — derives the visible subset of a candidate pool
//! from the recruiter's criteria.
//!
//! Conjunctive: a candidate must pass every active predicate. Stable: the
//! original relative order is preserved (this is a filter, not a sort).
//! Predicates short-circuit per candidate; evaluation order affects cost,
//! never the result. An empty result is a valid outcome, not an error — the
//! view owns the "no matches" placeholder.

use serde::{Deserialize, Serialize};

use crate::models::candidate::Candidate;

/// Optional constraints narrowing a candidate list. Unset fields impose no
/// constraint. Owned by the active view and reset on unmount; never persisted
/// across sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact job title (trimmed, case-sensitive) or a numeric job id.
    pub job: Option<String>,
    /// Inclusive floor on the overall score, 0–100.
    pub min_score: Option<u8>,
    /// Substring looked for in full name, email, or job title.
    ///
    /// Matching is case-sensitive. That reproduces the observed portal
    /// behavior; see DESIGN.md before "fixing" it.
    pub search: Option<String>,
}

impl FilterCriteria {
    /// No active predicates: `apply` becomes the identity.
    pub fn is_empty(&self) -> bool {
        self.job.as_deref().map_or(true, |j| j.trim().is_empty())
            && self.min_score.is_none()
            && self.search.as_deref().map_or(true, str::is_empty)
    }
}

/// Applies `criteria` to `candidates`, keeping relative order.
pub fn apply<'a>(candidates: &'a [Candidate], criteria: &FilterCriteria) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|candidate| matches(candidate, criteria))
        .collect()
}

fn matches(candidate: &Candidate, criteria: &FilterCriteria) -> bool {
    matches_job(candidate, criteria.job.as_deref())
        && matches_min_score(candidate, criteria.min_score)
        && matches_search(candidate, criteria.search.as_deref())
}

/// Title equality on the trimmed string, or id equality when the criterion
/// parses as an integer.
fn matches_job(candidate: &Candidate, job: Option<&str>) -> bool {
    let Some(job) = job else { return true };
    let wanted = job.trim();
    if wanted.is_empty() {
        return true;
    }
    if let Ok(id) = wanted.parse::<i64>() {
        if candidate.job_id == Some(id) {
            return true;
        }
    }
    candidate
        .job_title
        .as_deref()
        .map_or(false, |title| title.trim() == wanted)
}

fn matches_min_score(candidate: &Candidate, min_score: Option<u8>) -> bool {
    let Some(min_score) = min_score else {
        return true;
    };
    // Absent or unparsable overall scores rank as 0, so any positive floor
    // excludes them.
    candidate.overall_score() >= f32::from(min_score)
}

fn matches_search(candidate: &Candidate, search: Option<&str>) -> bool {
    let Some(needle) = search else { return true };
    if needle.is_empty() {
        return true;
    }
    candidate.full_name.contains(needle)
        || candidate
            .email
            .as_deref()
            .map_or(false, |email| email.contains(needle))
        || candidate
            .job_title
            .as_deref()
            .map_or(false, |title| title.contains(needle))
}
