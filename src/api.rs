//! Endpoint bindings grouped per backend domain.
//!
//! Every binding is a method on [`SessionManager`](crate::session::SessionManager) so the
//! refresh-on-401 protocol and the error taxonomy apply uniformly. Admin endpoints expect an
//! account carrying the admin flag; the backend enforces authorization and the bindings simply
//! surface its rejections.

pub mod admin;
pub mod auth;
pub mod learner;

pub use admin::SalespersonDraft;
