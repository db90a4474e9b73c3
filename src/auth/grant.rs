//! Credential payloads and token grants exchanged with the `/auth` endpoints.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Username and password pair submitted to open a session.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
	/// Backend login name.
	pub username: String,
	/// Account password.
	pub password: String,
}
impl LoginCredentials {
	/// Builds a credential pair.
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self { username: username.into(), password: password.into() }
	}
}
impl Debug for LoginCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginCredentials")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Token pair issued by `POST /auth/token/`.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenGrant {
	/// Short-lived access token attached to every authorized call.
	pub access: TokenSecret,
	/// Long-lived refresh token used to mint replacement access tokens.
	pub refresh: TokenSecret,
}

/// Replacement access token issued by `POST /auth/refresh/`.
///
/// The refresh token that minted it stays valid and is kept as-is in the vault.
#[derive(Clone, Debug, Deserialize)]
pub struct RefreshGrant {
	/// Replacement access token.
	pub access: TokenSecret,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credentials_debug_redacts_password() {
		let credentials = LoginCredentials::new("vendedor", "hunter2");

		assert!(!format!("{credentials:?}").contains("hunter2"));
	}

	#[test]
	fn grants_decode_wire_payloads() {
		let grant = serde_json::from_str::<TokenGrant>(r#"{"access":"a-1","refresh":"r-1"}"#)
			.expect("Token grant should decode.");

		assert_eq!(grant.access.expose(), "a-1");
		assert_eq!(grant.refresh.expose(), "r-1");

		let refreshed = serde_json::from_str::<RefreshGrant>(r#"{"access":"a-2"}"#)
			.expect("Refresh grant should decode.");

		assert_eq!(refreshed.access.expose(), "a-2");
	}
}
