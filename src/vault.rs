//! Persistence contracts and built-in vaults for the session snapshot.

pub mod file;
pub mod memory;

pub use file::FileVault;
pub use memory::MemoryVault;

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, UserProfile},
};

/// Future type returned by [`SessionVault`] operations.
pub type VaultFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, VaultError>> + 'a + Send>>;

/// Persistence contract for the open session.
///
/// The snapshot is written and cleared as one unit so the access token, refresh token, and
/// cached profile never drift apart.
pub trait SessionVault
where
	Self: Send + Sync,
{
	/// Persists or replaces the session snapshot.
	fn save(&self, snapshot: SessionSnapshot) -> VaultFuture<'_, ()>;

	/// Fetches the current snapshot, if a session is open.
	fn load(&self) -> VaultFuture<'_, Option<SessionSnapshot>>;

	/// Destroys the snapshot, leaving no credential behind.
	fn clear(&self) -> VaultFuture<'_, ()>;
}

/// Unit of persistence: the open session's credentials plus the cached profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
	/// Access token attached to authorized calls.
	pub access: TokenSecret,
	/// Refresh token used to mint replacement access tokens.
	pub refresh: Option<TokenSecret>,
	/// Cached account profile.
	pub profile: Option<UserProfile>,
	/// Moment the access token was (re)issued.
	#[serde(with = "time::serde::rfc3339")]
	pub issued_at: OffsetDateTime,
}
impl SessionSnapshot {
	/// Builds a snapshot issued now with no cached profile.
	pub fn new(access: TokenSecret, refresh: Option<TokenSecret>) -> Self {
		Self { access, refresh, profile: None, issued_at: OffsetDateTime::now_utc() }
	}

	/// Replaces the access token, renewing the issuance instant.
	pub fn renew_access(&mut self, access: TokenSecret) {
		self.access = access;
		self.issued_at = OffsetDateTime::now_utc();
	}
}

/// Error type produced by [`SessionVault`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum VaultError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
