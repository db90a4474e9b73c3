//! Session orchestration: bearer attachment, silent refresh, and request replay.
//!
//! [`SessionManager`] is the crate's entry point. It owns the vault, the transport, and the
//! refresh mutex, so a clone shares all session state with its siblings. Every API binding in
//! [`api`](crate::api) goes through [`SessionManager::request`], which transparently recovers
//! from expired access tokens: the first 401 starts a single refresh exchange shared by all
//! concurrent requests, and each affected request replays at most once with the renewed token.

mod metrics;

pub use metrics::SessionMetrics;

// crates.io
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{RefreshGrant, TokenSecret},
	error::{ApiRejection, ConfigError, DecodeError},
	http::{ApiHttpClient, HttpMethod, TransportErrorMapper, WireRequest, WireResponse},
	notify::{Notifier, NullNotifier},
	obs::{self, CallKind, CallOutcome, CallSpan},
	vault::SessionVault,
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Session manager specialized for the crate's default reqwest transport stack.
pub type ReqwestSession = SessionManager<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Coordinates authorized calls against one backend deployment.
///
/// The manager owns the HTTP client, the session vault, the notifier, and the refresh mutex so
/// the API bindings can focus on endpoint-specific logic. Cloning is cheap and every clone
/// shares the same session: a refresh won by one clone renews the access token for all of them,
/// and a teardown logs all of them out.
pub struct SessionManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound backend request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Vault implementation that persists the session snapshot.
	pub vault: Arc<dyn SessionVault>,
	/// Base URL the endpoint paths are appended to.
	pub base_url: Url,
	/// Sink for user-facing progress messages.
	pub notifier: Arc<dyn Notifier>,
	/// Shared metrics recorder for refresh outcomes and request replays.
	pub session_metrics: Arc<SessionMetrics>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<C, M> SessionManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a session manager that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		vault: Arc<dyn SessionVault>,
		base_url: Url,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			vault,
			base_url,
			notifier: Arc::new(NullNotifier),
			session_metrics: Default::default(),
			refresh_guard: Default::default(),
		}
	}

	/// Sets or replaces the sink that receives user-facing progress messages.
	pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = notifier;

		self
	}

	/// Resolves an endpoint path against the base URL.
	///
	/// Paths are appended textually, so absolute paths like `/auth/token/` land under the base
	/// URL instead of resetting to the host root.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let base = self.base_url.as_str().trim_end_matches('/');
		let raw = format!("{base}/{}", path.trim_start_matches('/'));

		Url::parse(&raw).map_err(|e| ConfigError::InvalidEndpoint { path: path.into(), source: e })
	}

	/// Executes an authorized call, transparently refreshing the access token on a 401.
	///
	/// At most one refresh exchange runs at a time. A request observing a 401 while an exchange
	/// is in flight parks on the shared mutex and then replays once with whatever access token
	/// the winning exchange left in the vault. When the exchange fails, every parked request
	/// rejects with its own original 401 and the vault is cleared as one unit. A 401 on the
	/// replay is surfaced unmodified, so no request retries more than once.
	pub async fn request(
		&self,
		method: HttpMethod,
		path: &str,
		body: Option<Value>,
	) -> Result<WireResponse> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "request");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoint(path)?;
				let sent_access = self.vault.load().await?.map(|snapshot| snapshot.access);
				let response =
					self.dispatch(KIND, method, &url, sent_access.clone(), body.as_ref()).await?;

				if !response.is_unauthorized() {
					return Self::settle(response);
				}

				let rejection = ApiRejection::from_response(&response);
				// Unauthenticated calls have nothing to refresh.
				let Some(sent_access) = sent_access else {
					return Err(rejection.into());
				};
				let Some(snapshot) = self.vault.load().await? else {
					return Err(rejection.into());
				};

				if snapshot.refresh.is_none() {
					return Err(rejection.into());
				}

				{
					let _singleflight = self.refresh_guard.lock().await;
					// Revalidate after acquiring: a concurrent exchange may have settled the
					// session while this request was parked.
					let Some(mut snapshot) = self.vault.load().await? else {
						return Err(rejection.into());
					};

					if snapshot.access == sent_access {
						let Some(refresh) = snapshot.refresh.clone() else {
							return Err(rejection.into());
						};

						self.session_metrics.record_refresh_attempt();

						match self.exchange_refresh(&refresh).await {
							Ok(grant) => {
								snapshot.renew_access(grant.access);
								self.vault.save(snapshot).await?;
								self.session_metrics.record_refresh_success();
							},
							Err(_) => {
								self.session_metrics.record_refresh_failure();
								self.vault.clear().await?;

								return Err(rejection.into());
							},
						}
					}
				}

				let Some(renewed) = self.vault.load().await?.map(|snapshot| snapshot.access)
				else {
					return Err(rejection.into());
				};

				self.session_metrics.record_replay();

				let replayed = self.dispatch(KIND, method, &url, Some(renewed), body.as_ref()).await?;

				Self::settle(replayed)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Executes an authorized call and decodes the JSON success body.
	pub async fn request_json<T>(
		&self,
		method: HttpMethod,
		path: &str,
		body: Option<Value>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.request(method, path, body).await?;

		Self::decode(&response)
	}

	pub(crate) fn decode<T>(response: &WireResponse) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|e| DecodeError { source: e, status: response.status }.into())
	}

	async fn dispatch(
		&self,
		kind: CallKind,
		method: HttpMethod,
		url: &Url,
		bearer: Option<TokenSecret>,
		body: Option<&Value>,
	) -> Result<WireResponse> {
		let mut request = WireRequest::new(method, url.clone());

		if let Some(bearer) = bearer {
			request = request.with_bearer(bearer);
		}
		if let Some(body) = body {
			request = request.with_body(body.clone());
		}

		self.http_client
			.execute(request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(kind, err))
	}

	fn settle(response: WireResponse) -> Result<WireResponse> {
		if response.is_success() {
			Ok(response)
		} else {
			Err(ApiRejection::from_response(&response).into())
		}
	}

	/// Exchanges the refresh token for a replacement access token.
	///
	/// The exchange is deliberately unauthenticated; sending the expired bearer alongside the
	/// refresh token would get the exchange itself rejected.
	async fn exchange_refresh(&self, refresh: &TokenSecret) -> Result<RefreshGrant> {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "exchange_refresh");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.endpoint("/auth/refresh/")?;
				let body = serde_json::json!({ "refresh": refresh.expose() });
				let response = self.dispatch(KIND, HttpMethod::Post, &url, None, Some(&body)).await?;
				let response = Self::settle(response)?;

				Self::decode(&response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl SessionManager<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a session manager talking to the provided backend base URL.
	///
	/// The manager provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly. Use [`SessionManager::with_notifier`] to surface progress
	/// messages somewhere visible.
	pub fn new(vault: Arc<dyn SessionVault>, base_url: Url) -> Self {
		Self::with_http_client(
			vault,
			base_url,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}

	/// Creates a session manager from a textual base URL.
	pub fn for_base_url(vault: Arc<dyn SessionVault>, base_url: &str) -> Result<Self, ConfigError> {
		let base = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl { source: e })?;

		Ok(Self::new(vault, base))
	}
}
impl<C, M> Clone for SessionManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			vault: self.vault.clone(),
			base_url: self.base_url.clone(),
			notifier: self.notifier.clone(),
			session_metrics: self.session_metrics.clone(),
			refresh_guard: self.refresh_guard.clone(),
		}
	}
}
impl<C, M> Debug for SessionManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionManager").field("base_url", &self.base_url.as_str()).finish()
	}
}
