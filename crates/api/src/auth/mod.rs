//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and validation.
//! - [`cookie`] -- the `admin_token` cookie carrying the session token.
//! - [`reset`] -- single-use password reset tokens.

pub mod cookie;
pub mod jwt;
pub mod password;
pub mod reset;
