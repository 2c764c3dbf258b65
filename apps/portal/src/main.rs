use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portal::api_client::ApiClient;
use portal::config::Config;
use portal::dashboard;
use portal::filter::{self, FilterCriteria};
use portal::gate::{AccessGate, GateDecision, Route};
use portal::session::SessionManager;
use portal::store::FileCredentialStore;

/// Headless recruiter console: sign in (or reuse the persisted session),
/// pass the gate, fetch postings and applicants, and print the dashboard
/// summary plus the filtered applicant table.
#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portal console v{}", env!("CARGO_PKG_VERSION"));

    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    let store = Arc::new(FileCredentialStore::new(&config.credentials_path));
    let session = Arc::new(SessionManager::new(
        http.clone(),
        config.api_base_url.as_str(),
        store,
    ));
    let api = ApiClient::new(http, config.api_base_url.as_str(), session.clone());

    // Credentials in the environment take precedence over a persisted session.
    if let (Ok(username), Ok(password)) = (
        std::env::var("PORTAL_USERNAME"),
        std::env::var("PORTAL_PASSWORD"),
    ) {
        session.login(&username, &password).await?;
    }

    // The applicants view is recruiter-only; the gate decides before anything
    // is fetched or rendered.
    let gate = AccessGate::new();
    match gate.evaluate_route(&session, Route::Applicants) {
        GateDecision::Admitted => {}
        GateDecision::Unauthenticated { redirect_to } => {
            warn!("not signed in; set PORTAL_USERNAME/PORTAL_PASSWORD or visit {redirect_to}");
            return Ok(());
        }
        GateDecision::AuthenticatedWrongRole { redirect_to } => {
            warn!("recruiter access required; back to {redirect_to}");
            return Ok(());
        }
    }

    let jobs = api.list_job_offers().await?;
    let applicants = api.list_applicants(None).await?;

    let today = chrono::Utc::now().date_naive();
    let summary = dashboard::summarize(&jobs, &applicants, today);
    println!(
        "jobs: {} ({} open / {} closed)   applicants: {}",
        summary.total_jobs, summary.open_positions, summary.closed_positions, summary.total_applicants
    );

    let criteria = FilterCriteria {
        job: std::env::var("PORTAL_JOB").ok(),
        min_score: std::env::var("PORTAL_MIN_SCORE")
            .ok()
            .and_then(|v| v.parse().ok()),
        search: std::env::var("PORTAL_SEARCH").ok(),
    };
    let visible = filter::apply(&applicants, &criteria);

    if visible.is_empty() {
        println!("No matching applicants");
    } else {
        for candidate in visible {
            println!(
                "{:>5.1}%  {:<24} {:<28} {}",
                candidate.overall_score(),
                candidate.full_name,
                candidate.email.as_deref().unwrap_or("-"),
                candidate.job_title.as_deref().unwrap_or("-"),
            );
        }
    }

    Ok(())
}
