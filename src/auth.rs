//! Credentials, issued token grants, and account profile models.

pub mod grant;
pub mod profile;
pub mod secret;

pub use grant::*;
pub use profile::*;
pub use secret::*;
