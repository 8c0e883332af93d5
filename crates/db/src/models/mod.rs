//! Row structs (`FromRow`) and request DTOs (`Deserialize`) for every table.
//!
//! Input DTOs carry raw client values. Handlers validate required fields;
//! repositories trim text and turn blank strings into `NULL`.

pub mod achievement;
pub mod admin;
pub mod contact;
pub mod core_vision;
pub mod ente_nadu;
pub mod event;
pub mod event_type;
pub mod hero;
pub mod local_body;
pub mod manifesto;
pub mod media_centre;
pub mod project;
pub mod recognition;
pub mod sector;
pub mod timeline;
pub mod visual_story;
