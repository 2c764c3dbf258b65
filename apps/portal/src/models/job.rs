use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Relative weight a recruiter assigns to a scoring category when creating a
/// posting. The backend consumes these when (re)scoring candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A job opening with the requirements, skills, and priorities used for
/// candidate scoring. Backend-owned; the client holds a read-only copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub job_title: String,
    #[serde(default)]
    pub reference_number: Option<String>,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    /// Ordered as entered on the creation form.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub skills_priority: Priority,
    #[serde(default)]
    pub requirements_priority: Priority,
    #[serde(default)]
    pub education_priority: Priority,
    #[serde(default)]
    pub closing_date: Option<NaiveDate>,
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
    #[serde(default = "default_positions")]
    pub number_of_positions: i32,
}

fn default_positions() -> i32 {
    1
}

impl JobPosting {
    /// A posting with no closing date, or one closing today or later, is open.
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        self.closing_date.map_or(true, |closing| closing >= today)
    }
}

/// Payload for `POST /job_offers` — the recruiter's creation form.
#[derive(Debug, Clone, Serialize)]
pub struct NewJobPosting {
    pub job_title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<NaiveDate>,
    pub number_of_positions: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    pub skills: Vec<String>,
    pub skills_priority: Priority,
    pub requirements_priority: Priority,
    pub education_priority: Priority,
}

impl NewJobPosting {
    pub fn new(job_title: impl Into<String>, description: impl Into<String>) -> Self {
        NewJobPosting {
            job_title: job_title.into(),
            description: description.into(),
            closing_date: None,
            number_of_positions: 1,
            reference_number: None,
            requirements: None,
            education: None,
            skills: Vec::new(),
            skills_priority: Priority::default(),
            requirements_priority: Priority::default(),
            education_priority: Priority::default(),
        }
    }
}

/// Partial payload for `PUT /job_offers/{id}`; unset fields stay untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobPostingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_positions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
}
