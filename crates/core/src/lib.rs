//! Domain types and pure policies shared by the database and API crates.
//!
//! Nothing in this crate touches the network, the filesystem, or the
//! database. Everything here can be unit tested in isolation.

pub mod content;
pub mod error;
pub mod event_status;
pub mod ordering;
pub mod roles;
pub mod search;
pub mod types;
pub mod uploads;
