//! Dashboard aggregates — pure summaries over the fetched collections.
//! Rendering belongs to the view layer; this module only computes.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::candidate::Candidate;
use crate::models::job::JobPosting;

/// Headline numbers for the recruiter landing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_jobs: usize,
    pub total_applicants: usize,
    pub open_positions: usize,
    pub closed_positions: usize,
}

pub fn summarize(
    jobs: &[JobPosting],
    applicants: &[Candidate],
    today: NaiveDate,
) -> DashboardSummary {
    let open_positions = jobs.iter().filter(|job| job.is_open_on(today)).count();
    DashboardSummary {
        total_jobs: jobs.len(),
        total_applicants: applicants.len(),
        open_positions,
        closed_positions: jobs.len() - open_positions,
    }
}

/// Top `n` applicants by overall score, descending. Ties keep fetch order;
/// unscored applicants rank as 0.
pub fn top_rated(applicants: &[Candidate], n: usize) -> Vec<&Candidate> {
    let mut ranked: Vec<&Candidate> = applicants.iter().collect();
    ranked.sort_by(|a, b| {
        b.overall_score()
            .partial_cmp(&a.overall_score())
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// The `n` most recently received applicants (the feed arrives newest-first).
pub fn most_recent(applicants: &[Candidate], n: usize) -> Vec<&Candidate> {
    applicants.iter().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{Score, ScoreCard};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn job(id: i64, closing: Option<NaiveDate>) -> JobPosting {
        let mut posting: JobPosting = serde_json::from_str(
            r#"{"id": 0, "job_title": "Software Engineer", "description": "d"}"#,
        )
        .unwrap();
        posting.id = id;
        posting.closing_date = closing;
        posting
    }

    fn applicant(id: i64, name: &str, overall: Option<f32>) -> Candidate {
        Candidate {
            id,
            full_name: name.to_string(),
            email: None,
            job_title: None,
            job_id: None,
            resume_path: None,
            scores: ScoreCard {
                overall: overall.map_or_else(Score::absent, Score::new),
                ..ScoreCard::default()
            },
            missing_skills: vec![],
        }
    }

    #[test]
    fn test_summarize_splits_open_and_closed() {
        let today = date(2025, 4, 16);
        let jobs = vec![
            job(1, None),
            job(2, Some(date(2025, 4, 16))),
            job(3, Some(date(2025, 4, 15))),
        ];
        let applicants = vec![applicant(1, "Jane Doe", Some(85.0))];

        let summary = summarize(&jobs, &applicants, today);
        assert_eq!(summary.total_jobs, 3);
        assert_eq!(summary.total_applicants, 1);
        // A posting closing today is still open; yesterday's is closed.
        assert_eq!(summary.open_positions, 2);
        assert_eq!(summary.closed_positions, 1);
    }

    #[test]
    fn test_top_rated_orders_descending_and_truncates() {
        let applicants = vec![
            applicant(1, "Tom Lee", Some(40.0)),
            applicant(2, "Jane Doe", Some(85.0)),
            applicant(3, "Ana Silva", Some(60.0)),
        ];
        let top = top_rated(&applicants, 2);
        let names: Vec<&str> = top.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, vec!["Jane Doe", "Ana Silva"]);
    }

    #[test]
    fn test_top_rated_ties_keep_fetch_order_and_unscored_rank_last() {
        let applicants = vec![
            applicant(1, "First Tie", Some(70.0)),
            applicant(2, "Unscored", None),
            applicant(3, "Second Tie", Some(70.0)),
        ];
        let top = top_rated(&applicants, 3);
        let names: Vec<&str> = top.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, vec!["First Tie", "Second Tie", "Unscored"]);
    }

    #[test]
    fn test_most_recent_takes_head_of_feed() {
        let applicants = vec![
            applicant(1, "Newest", Some(10.0)),
            applicant(2, "Older", Some(20.0)),
            applicant(3, "Oldest", Some(30.0)),
        ];
        let recent = most_recent(&applicants, 2);
        let names: Vec<&str> = recent.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, vec!["Newest", "Older"]);
    }
}
