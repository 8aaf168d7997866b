use tracing::debug;

use shared_models::{Session, UserRole};

/// Outcome of a route-guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Role-guarded navigation. Each role owns a route namespace; a missing
/// session on a guarded path redirects to /login, and a session visiting
/// another role's namespace redirects to its own home path.
pub struct RouteGuard;

const PUBLIC_PATHS: &[&str] = &["/", "/login", "/register"];

impl RouteGuard {
    pub fn check(path: &str, session: Option<&Session>) -> GuardDecision {
        if PUBLIC_PATHS.contains(&path) {
            return GuardDecision::Allow;
        }

        let Some(session) = session else {
            debug!("Unauthenticated access to {}, redirecting to /login", path);
            return GuardDecision::Redirect("/login".to_string());
        };

        match Self::namespace_of(path) {
            Some(owner) if owner == session.role => GuardDecision::Allow,
            Some(_) => {
                debug!(
                    "Role {} has no access to {}, redirecting home",
                    session.role, path
                );
                GuardDecision::Redirect(session.role.home_path().to_string())
            }
            // Paths outside every role namespace are shared authenticated
            // screens (profile, settings).
            None => GuardDecision::Allow,
        }
    }

    fn namespace_of(path: &str) -> Option<UserRole> {
        [UserRole::Patient, UserRole::Doctor, UserRole::Admin]
            .into_iter()
            .find(|role| {
                let ns = role.namespace();
                path == ns || path.starts_with(&format!("{}/", ns))
            })
    }
}
