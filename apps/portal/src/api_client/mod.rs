//! Portal API client — the single point of entry for all data-plane calls.
//!
//! Views never touch HTTP directly: session state comes from the Session
//! Manager, everything else goes through here with the authorization header
//! merged in unconditionally. Idempotent reads retry transient failures with
//! exponential backoff; a 401 on any protected call drops the session so the
//! next gate evaluation lands back on the login view.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{read_error_message, PortalError};
use crate::models::candidate::Candidate;
use crate::models::job::{JobPosting, JobPostingUpdate, NewJobPosting};
use crate::session::SessionManager;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct ScoreCandidateRequest {
    candidate_id: i64,
    job_id: i64,
}

/// An anonymous application: resume file plus the applicant's contact
/// details and the posting applied against.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub full_name: String,
    pub email: String,
    pub job_offer_id: i64,
    pub resume_path: PathBuf,
}

/// What the backend extracted from a submitted resume.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "missingSkills", default)]
    pub missing_skills: Vec<String>,
    #[serde(rename = "extraSkills", default)]
    pub extra_skills: Vec<String>,
    #[serde(rename = "skillScore", default)]
    pub skill_score: u32,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: impl Into<String>, session: Arc<SessionManager>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            client,
            base_url,
            session,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .headers(self.session.authorization_header())
    }

    /// Maps a non-success response to the error taxonomy. A 401 means the
    /// backend no longer honors our token, so the session is cleared before
    /// the error propagates.
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, PortalError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = read_error_message(response).await;
        if status == StatusCode::UNAUTHORIZED {
            warn!("authorization rejected by backend; dropping session");
            self.session.logout();
        }
        Err(PortalError::from_status(status, message))
    }

    /// GETs `path`, retrying connect failures and 5xx answers with
    /// exponential backoff. Only used for idempotent reads.
    async fn get_with_retry(&self, path: &str) -> Result<reqwest::Response, PortalError> {
        let mut last_error: Option<PortalError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Backoff: 250ms, 500ms
                let delay = Duration::from_millis(250 * (1 << (attempt - 1)));
                warn!(path, attempt, "retrying after {}ms", delay.as_millis());
                tokio::time::sleep(delay).await;
            }

            let response = match self.request(Method::GET, path).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(PortalError::Network(e));
                    continue;
                }
            };

            if response.status().is_server_error() {
                let status = response.status();
                let message = read_error_message(response).await;
                last_error = Some(PortalError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            return self.check(response).await;
        }

        Err(last_error.unwrap_or(PortalError::Api {
            status: 0,
            message: format!("GET {path} failed after {MAX_RETRIES} attempts"),
        }))
    }

    pub async fn list_job_offers(&self) -> Result<Vec<JobPosting>, PortalError> {
        let response = self.get_with_retry("/job_offers").await?;
        let postings: Vec<JobPosting> = response.json().await?;
        debug!(count = postings.len(), "fetched job offers");
        Ok(postings)
    }

    pub async fn create_job_offer(&self, posting: &NewJobPosting) -> Result<JobPosting, PortalError> {
        let response = self
            .request(Method::POST, "/job_offers")
            .json(posting)
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn update_job_offer(
        &self,
        id: i64,
        update: &JobPostingUpdate,
    ) -> Result<JobPosting, PortalError> {
        let response = self
            .request(Method::PUT, &format!("/job_offers/{id}"))
            .json(update)
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_job_offer(&self, id: i64) -> Result<(), PortalError> {
        let response = self
            .request(Method::DELETE, &format!("/job_offers/{id}"))
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    /// Lists applicants, optionally server-narrowed to one posting. Any
    /// further narrowing is the filter engine's job, client-side.
    pub async fn list_applicants(
        &self,
        job_offer_id: Option<i64>,
    ) -> Result<Vec<Candidate>, PortalError> {
        let path = match job_offer_id {
            Some(id) => format!("/applicants?job_offer_id={id}"),
            None => "/applicants".to_string(),
        };
        let response = self.get_with_retry(&path).await?;
        let candidates: Vec<Candidate> = response.json().await?;
        debug!(count = candidates.len(), "fetched applicants");
        Ok(candidates)
    }

    /// Asks the backend to (re)score one candidate against a posting.
    pub async fn score_candidate(&self, candidate_id: i64, job_id: i64) -> Result<(), PortalError> {
        let response = self
            .request(Method::POST, "/score_candidate")
            .json(&ScoreCandidateRequest { candidate_id, job_id })
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    /// Bulk rescoring of every candidate attached to a posting.
    pub async fn score_all_candidates(&self, job_id: i64) -> Result<(), PortalError> {
        let response = self
            .request(Method::POST, &format!("/score_all_candidates/{job_id}"))
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    /// Submits a resume against a posting. The one unauthenticated write in
    /// the API: applicants have no account.
    pub async fn submit_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationReceipt, PortalError> {
        let file_name = application
            .resume_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());
        let bytes = tokio::fs::read(&application.resume_path).await?;

        let form = multipart::Form::new()
            .text("fullName", application.full_name)
            .text("email", application.email)
            .text("job_offer_id", application.job_offer_id.to_string())
            .part(
                "file",
                multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("application/pdf")?,
            );

        let response = self
            .client
            .post(format!("{}/apply", self.base_url))
            .multipart(form)
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }
}
