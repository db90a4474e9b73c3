//! Account session bindings: login, logout, and profile access.

// self
use crate::{
	_prelude::*,
	auth::{LoginCredentials, TokenGrant, UserProfile},
	error::ConfigError,
	http::{ApiHttpClient, HttpMethod, TransportErrorMapper},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::SessionManager,
	vault::SessionSnapshot,
};

impl<C, M> SessionManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Opens a session: exchanges the credentials for a token pair, persists the snapshot, and
	/// caches the account profile.
	///
	/// Any previously stored session is replaced. Returns the fresh profile so callers can
	/// route the account by role immediately.
	pub async fn login(&self, credentials: &LoginCredentials) -> Result<UserProfile> {
		const KIND: CallKind = CallKind::Login;

		let span = CallSpan::new(KIND, "login");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let body =
					serde_json::to_value(credentials).map_err(ConfigError::SerializeBody)?;
				let grant: TokenGrant =
					self.request_json(HttpMethod::Post, "/auth/token/", Some(body)).await?;

				self.vault
					.save(SessionSnapshot::new(grant.access, Some(grant.refresh)))
					.await?;

				self.current_user().await
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Closes the session, destroying the persisted credentials and cached profile.
	pub async fn logout(&self) -> Result<()> {
		self.vault.clear().await?;

		Ok(())
	}

	/// Fetches the account profile from the backend and refreshes the cached copy.
	pub async fn current_user(&self) -> Result<UserProfile> {
		let profile: UserProfile =
			self.request_json(HttpMethod::Get, "/auth/usuarios/", None).await?;

		if let Some(mut snapshot) = self.vault.load().await? {
			snapshot.profile = Some(profile.clone());
			self.vault.save(snapshot).await?;
		}

		Ok(profile)
	}

	/// Returns the cached profile without touching the network.
	pub async fn cached_profile(&self) -> Result<Option<UserProfile>> {
		Ok(self.vault.load().await?.and_then(|snapshot| snapshot.profile))
	}

	/// Returns `true` while the vault holds an open session.
	pub async fn is_authenticated(&self) -> Result<bool> {
		Ok(self.vault.load().await?.is_some())
	}
}
