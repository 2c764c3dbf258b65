//! Applicant records as served by `GET /applicants` (camelCase wire shape).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One score percentage as the backend reports it: a JSON number, a numeric
/// string, or a string with a trailing `%`. Anything else counts as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Score(Option<f32>);

impl Score {
    pub fn new(value: f32) -> Self {
        Score(Some(value))
    }

    pub fn absent() -> Self {
        Score(None)
    }

    /// Missing or unparsable scores rank as 0, so any positive threshold
    /// excludes them.
    pub fn value_or_zero(&self) -> f32 {
        self.0.unwrap_or(0.0)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(value) => serializer.serialize_f32(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(Score(raw.as_ref().and_then(parse_score_value)))
    }
}

fn parse_score_value(value: &Value) -> Option<f32> {
    match value {
        Value::Number(n) => n.as_f64().map(|v| v as f32),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f32>().ok(),
        _ => None,
    }
}

/// Nested `scores` object. Every field is optional on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreCard {
    pub overall: Score,
    pub skills: Score,
    pub requirements: Score,
    pub education: Score,
}

/// A person who has submitted a resume against a posting. Read-only cached
/// copy per fetch cycle; the backend owns the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_id: Option<i64>,
    /// Locator for the stored resume (Drive URL or backend path).
    #[serde(default)]
    pub resume_path: Option<String>,
    #[serde(default)]
    pub scores: ScoreCard,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

impl Candidate {
    pub fn overall_score(&self) -> f32 {
        self.scores.overall.value_or_zero()
    }
}
