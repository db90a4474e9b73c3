//! Transport primitives for backend API calls.
//!
//! The module exposes [`ApiHttpClient`], the session's only dependency on an HTTP stack,
//! alongside [`TransportErrorMapper`] so downstream crates can integrate custom transports
//! and decide how their failures surface as client errors. The default [`ReqwestHttpClient`]
//! captures the status, body, and Retry-After hint of every response into a [`WireResponse`]
//! before the session layer interprets it.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde_json::Value;
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, auth::TokenSecret, obs::CallKind};
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Future type returned by [`ApiHttpClient`] implementations.
pub type WireFuture<'a, E> = Pin<Box<dyn Future<Output = Result<WireResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing backend API calls.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared behind `Arc` across
/// session clones, and the futures they return must own whatever state they need so they stay
/// `Send` for the lifetime of the in-flight request. A transport only reports transport-level
/// failures through its error type; non-success HTTP statuses are data, returned inside the
/// [`WireResponse`] for the session layer to interpret.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes one request, resolving to the raw response or a transport failure.
	fn execute(&self, request: WireRequest) -> WireFuture<'_, Self::TransportError>;
}

/// Maps transport-layer failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts a transport error raised during the given call into a client error.
	fn map_transport_error(&self, call: CallKind, error: E) -> Error;
}

/// HTTP verbs used by the backend bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// Idempotent reads.
	Get,
	/// Creations and command-style endpoints.
	Post,
	/// Partial updates.
	Patch,
}
impl HttpMethod {
	/// Returns the verb as it appears on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Patch => "PATCH",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request description handed to transport implementations.
#[derive(Clone, Debug)]
pub struct WireRequest {
	/// HTTP verb to dispatch with.
	pub method: HttpMethod,
	/// Fully resolved endpoint URL.
	pub url: Url,
	/// Bearer credential attached as `Authorization: Bearer <token>`, when present.
	pub bearer: Option<TokenSecret>,
	/// JSON body, when the endpoint takes one.
	pub body: Option<Value>,
}
impl WireRequest {
	/// Creates a request with no bearer credential and no body.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self { method, url, bearer: None, body: None }
	}

	/// Attaches the bearer credential.
	pub fn with_bearer(mut self, bearer: TokenSecret) -> Self {
		self.bearer = Some(bearer);

		self
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: Value) -> Self {
		self.body = Some(body);

		self
	}
}

/// Raw response captured from the transport before the session layer decodes it.
#[derive(Clone, Debug)]
pub struct WireResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body bytes.
	pub body: Vec<u8>,
	/// Retry-After hint expressed as a relative duration, if supplied.
	pub retry_after: Option<Duration>,
}
impl WireResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns `true` when the backend refused the bearer credential.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The wrapped client is reused for every backend call; configure timeouts, proxies, or TLS
/// settings on the [`ReqwestClient`] before handing it over.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: WireRequest) -> WireFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = match request.method {
				HttpMethod::Get => client.get(request.url),
				HttpMethod::Post => client.post(request.url),
				HttpMethod::Patch => client.patch(request.url),
			};

			if let Some(bearer) = &request.bearer {
				builder = builder.bearer_auth(bearer.expose());
			}
			if let Some(body) = &request.body {
				builder = builder.json(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok(WireResponse { status, body, retry_after })
		})
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, call: CallKind, error: ReqwestError) -> Error {
		// Reserved for mappers that classify failures per call kind.
		let _ = call;

		if error.is_builder() {
			return ConfigError::from(error).into();
		}

		TransportError::from(error).into()
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(secs as i64));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
