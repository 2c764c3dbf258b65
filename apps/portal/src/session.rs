//! Session lifecycle — registration, login, logout, and the authorization
//! predicates every guarded surface consults.
//!
//! All session state writes funnel through here; nothing else touches the
//! credential store. The predicates are synchronous local reads, so a route
//! guard never waits on the network.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{read_error_message, PortalError};
use crate::models::user::{Role, UserProfile};
use crate::store::CredentialStore;

/// The authenticated identity and token pair currently active in the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    is_recruiter: bool,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    user: Option<UserProfile>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: UserProfile,
}

/// Owner of authentication operations against the identity backend and of
/// the persisted session pair.
pub struct SessionManager {
    client: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl SessionManager {
    pub fn new(client: Client, base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        SessionManager {
            client,
            base_url,
            store,
        }
    }

    /// Registers a new account. Does not create a session; callers log in
    /// afterwards. Conflicts (duplicate username/email) and malformed input
    /// surface as `Validation` with the backend message kept verbatim.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<UserProfile, PortalError> {
        debug!(username, "registering");
        let response = self
            .client
            .post(format!("{}/register", self.base_url))
            .json(&RegisterRequest {
                username,
                email,
                password,
                is_recruiter: role.is_recruiter(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = read_error_message(response).await;
            warn!(username, %status, "registration rejected");
            return Err(PortalError::from_status(status, message));
        }

        let body: RegisterResponse = response.json().await?;
        // Older backend generations answer with only a confirmation message;
        // synthesize the profile from what we submitted.
        let profile = body.user.unwrap_or_else(|| UserProfile {
            id: 0,
            username: username.to_string(),
            email: email.to_string(),
            role,
        });
        info!(username = %profile.username, "registered");
        Ok(profile)
    }

    /// Logs in and persists the returned token and profile as one atomic
    /// store update before the session is handed back.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, PortalError> {
        debug!(username, "logging in");
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = read_error_message(response).await;
            warn!(username, %status, "login rejected");
            return Err(if status == StatusCode::BAD_REQUEST {
                PortalError::Validation(message)
            } else {
                PortalError::Auth(message)
            });
        }

        let body: LoginResponse = response.json().await?;
        self.store.save(&body.token, &body.user)?;
        info!(username = %body.user.username, role = ?body.user.role, "login succeeded");
        Ok(Session {
            token: body.token,
            user: body.user,
        })
    }

    /// Client-side-only invalidation: clears the store unconditionally and
    /// never fails. The backend is not contacted, and the mutation completes
    /// before this returns, so the next guarded navigation sees it.
    pub fn logout(&self) {
        self.store.clear();
        info!("logged out");
    }

    /// True iff a token is present. Purely local, no network round trip.
    pub fn is_authenticated(&self) -> bool {
        self.store.load_token().is_some()
    }

    /// True iff a session exists and its profile carries `role`. An absent
    /// session is `false`, not an error.
    pub fn has_role(&self, role: Role) -> bool {
        self.store.load_user().map_or(false, |user| user.role == role)
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.store.load_user()
    }

    /// `Authorization: Bearer <token>` when a token exists, empty otherwise.
    /// Callers merge this into every protected request without branching.
    pub fn authorization_header(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.store.load_token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("stored token is not a valid header value; sending no header"),
            }
        }
        headers
    }
}
