pub mod auth;
pub mod guard;
pub mod store;

pub use auth::AuthService;
pub use guard::{GuardDecision, RouteGuard};
pub use store::SessionStore;
