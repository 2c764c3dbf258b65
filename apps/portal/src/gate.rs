//! Access Gate — the guard evaluated before a role-restricted view renders.
//!
//! The decision is a synchronous read of local session state and must resolve
//! before any guarded content is produced: a protected subtree is never
//! painted and then redirected after the fact. Nothing is cached across
//! navigations, so a logout is visible on the very next evaluation.

use crate::models::user::Role;
use crate::session::SessionManager;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

/// Access requirement attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Authenticated,
    RecruiterOnly,
}

/// The client's route table. Applicants see the public surface; everything
/// recruiters use to review candidate pools sits behind the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Apply,
    Dashboard,
    Jobs,
    Applicants,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => HOME_ROUTE,
            Route::Login => LOGIN_ROUTE,
            Route::Register => "/register",
            Route::Apply => "/apply",
            Route::Dashboard => "/dashboard",
            Route::Jobs => "/jobs",
            Route::Applicants => "/applicants",
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Home | Route::Login | Route::Register | Route::Apply => RouteAccess::Public,
            Route::Dashboard | Route::Jobs | Route::Applicants => RouteAccess::RecruiterOnly,
        }
    }
}

/// Outcome of evaluating the gate for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the nested protected content.
    Admitted,
    /// No token present; go to the login view.
    Unauthenticated { redirect_to: String },
    /// Logged in but lacking the recruiter role; back to the default view.
    AuthenticatedWrongRole { redirect_to: String },
}

/// Route-level guard. Holds only redirect targets — never a cached decision.
pub struct AccessGate {
    login_route: String,
    home_route: String,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessGate {
    pub fn new() -> Self {
        AccessGate {
            login_route: LOGIN_ROUTE.to_string(),
            home_route: HOME_ROUTE.to_string(),
        }
    }

    /// Overrides where unauthenticated navigations are sent.
    pub fn with_login_route(mut self, path: impl Into<String>) -> Self {
        self.login_route = path.into();
        self
    }

    /// The transition function, evaluated fresh per guarded navigation:
    /// no session → login; session without the recruiter role on a
    /// recruiter-only route → home; otherwise admit.
    pub fn evaluate(&self, session: &SessionManager, recruiter_only: bool) -> GateDecision {
        if !session.is_authenticated() {
            return GateDecision::Unauthenticated {
                redirect_to: self.login_route.clone(),
            };
        }
        if recruiter_only && !session.has_role(Role::Recruiter) {
            return GateDecision::AuthenticatedWrongRole {
                redirect_to: self.home_route.clone(),
            };
        }
        GateDecision::Admitted
    }

    /// Table-driven form of `evaluate` for a navigation to `route`.
    pub fn evaluate_route(&self, session: &SessionManager, route: Route) -> GateDecision {
        match route.access() {
            RouteAccess::Public => GateDecision::Admitted,
            RouteAccess::Authenticated => self.evaluate(session, false),
            RouteAccess::RecruiterOnly => self.evaluate(session, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::user::UserProfile;
    use crate::store::{CredentialStore, InMemoryCredentialStore};

    fn session_with(role: Option<Role>) -> SessionManager {
        let store = Arc::new(InMemoryCredentialStore::default());
        if let Some(role) = role {
            let user = UserProfile {
                id: 1,
                username: "u".to_string(),
                email: "u@example.com".to_string(),
                role,
            };
            store.save("tok", &user).unwrap();
        }
        SessionManager::new(reqwest::Client::new(), "http://localhost:5000/api", store)
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let session = session_with(None);
        let gate = AccessGate::new();
        assert_eq!(
            gate.evaluate(&session, true),
            GateDecision::Unauthenticated {
                redirect_to: "/login".to_string()
            }
        );
        // Plain guarded routes redirect the same way.
        assert!(matches!(
            gate.evaluate(&session, false),
            GateDecision::Unauthenticated { .. }
        ));
    }

    #[test]
    fn test_wrong_role_redirects_home() {
        let session = session_with(Some(Role::Applicant));
        let gate = AccessGate::new();
        assert_eq!(
            gate.evaluate(&session, true),
            GateDecision::AuthenticatedWrongRole {
                redirect_to: "/".to_string()
            }
        );
    }

    #[test]
    fn test_recruiter_is_admitted() {
        let session = session_with(Some(Role::Recruiter));
        let gate = AccessGate::new();
        assert_eq!(gate.evaluate(&session, true), GateDecision::Admitted);
        assert_eq!(gate.evaluate(&session, false), GateDecision::Admitted);
    }

    #[test]
    fn test_authenticated_applicant_passes_plain_guard() {
        let session = session_with(Some(Role::Applicant));
        let gate = AccessGate::new();
        assert_eq!(gate.evaluate(&session, false), GateDecision::Admitted);
    }

    #[test]
    fn test_logout_is_visible_on_next_evaluation() {
        let session = session_with(Some(Role::Recruiter));
        let gate = AccessGate::new();
        assert_eq!(gate.evaluate(&session, true), GateDecision::Admitted);

        session.logout();
        assert!(matches!(
            gate.evaluate(&session, true),
            GateDecision::Unauthenticated { .. }
        ));
    }

    #[test]
    fn test_route_table_matches_client_surface() {
        assert_eq!(Route::Apply.access(), RouteAccess::Public);
        assert_eq!(Route::Login.access(), RouteAccess::Public);
        assert_eq!(Route::Dashboard.access(), RouteAccess::RecruiterOnly);
        assert_eq!(Route::Applicants.access(), RouteAccess::RecruiterOnly);
        assert_eq!(Route::Applicants.path(), "/applicants");
    }

    #[test]
    fn test_public_route_never_consults_the_session() {
        let session = session_with(None);
        let gate = AccessGate::new();
        assert_eq!(
            gate.evaluate_route(&session, Route::Apply),
            GateDecision::Admitted
        );
    }

    #[test]
    fn test_custom_login_redirect_path() {
        let session = session_with(None);
        let gate = AccessGate::new().with_login_route("/signin");
        assert_eq!(
            gate.evaluate(&session, true),
            GateDecision::Unauthenticated {
                redirect_to: "/signin".to_string()
            }
        );
    }
}
