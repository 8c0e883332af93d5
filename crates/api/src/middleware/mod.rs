//! Authentication and authorization extractors.
//!
//! - [`auth::AuthAdmin`] -- Extracts the signed-in admin from the session cookie.
//! - [`rbac::RequireManager`] -- Requires the `superadmin` or `admin` role.
//! - [`rate_limit::LoginThrottle`], [`rate_limit::ForgotPasswordThrottle`]
//!   -- Per-IP budgets for the public auth endpoints.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
