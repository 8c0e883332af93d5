//! Repository layer: one zero-sized struct per table (or table pair) with
//! async functions taking `&PgPool`.
//!
//! List functions return `(rows, total)` where `total` comes from a
//! `COUNT(*)` sharing the exact `WHERE` clause of the page query.

pub mod achievement_repo;
pub mod admin_repo;
pub mod contact_repo;
pub mod core_vision_repo;
pub mod ente_nadu_repo;
pub mod event_repo;
pub mod event_type_repo;
pub mod gallery_repo;
pub mod hero_repo;
pub mod local_body_repo;
pub mod manifesto_repo;
pub mod media_centre_repo;
pub mod project_repo;
pub mod recognition_repo;
pub mod sector_repo;
pub mod testimonial_repo;
pub mod timeline_repo;
pub mod visual_story_repo;
pub mod ward_repo;

pub use achievement_repo::AchievementRepo;
pub use admin_repo::{AdminRepo, PasswordResetRepo};
pub use contact_repo::{CommunicationRepo, EnquiryRepo};
pub use core_vision_repo::PillarRepo;
pub use ente_nadu_repo::EnteNaduCardRepo;
pub use event_repo::EventRepo;
pub use event_type_repo::EventTypeRepo;
pub use gallery_repo::GalleryRepo;
pub use hero_repo::HeroRepo;
pub use local_body_repo::LocalBodyRepo;
pub use manifesto_repo::{DevelopmentGoalRepo, LongTermCommitmentRepo};
pub use media_centre_repo::{MediaPostRepo, MediaSectionRepo};
pub use project_repo::ProjectRepo;
pub use recognition_repo::RecognitionRepo;
pub use sector_repo::SectorRepo;
pub use testimonial_repo::TestimonialRepo;
pub use timeline_repo::TimelineRepo;
pub use visual_story_repo::VisualStoryRepo;
pub use ward_repo::WardRepo;
