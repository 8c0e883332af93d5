//! Outbound notifications: transactional email over SMTP and enquiry
//! follow-ups over SMS, WhatsApp, and voice.
//!
//! Every channel is optional. Each `from_env` constructor returns `None` when
//! its credentials are missing, and callers skip that channel.

pub mod email;
pub mod messaging;
pub mod sms;
pub mod templates;
pub mod voice;
pub mod whatsapp;

pub use email::{EmailConfig, EmailError, Mailer};
pub use messaging::{MessagingError, Messengers};
