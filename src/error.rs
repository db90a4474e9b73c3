//! Client-level error types shared across the session, gate, and vault layers.

// self
use crate::{_prelude::*, http::WireResponse};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Vault-layer failure.
	#[error("{0}")]
	Vault(
		#[from]
		#[source]
		crate::vault::VaultError,
	),
	/// Gate-level rule violation; user guidance, not a system fault.
	#[error("{0}")]
	Gate(
		#[from]
		#[source]
		crate::gate::GateError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Backend refused the request with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiRejection),
	/// Backend answered successfully but the payload could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Joining an endpoint path onto the base URL produced an invalid URL.
	#[error("Endpoint path `{path}` does not form a valid URL.")]
	InvalidEndpoint {
		/// Endpoint path that failed to join.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	SerializeBody(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Non-success HTTP response surfaced to the caller unmodified.
#[derive(Clone, Debug, ThisError)]
#[error("Backend rejected the request with HTTP {status}: {reason}.")]
pub struct ApiRejection {
	/// HTTP status code returned by the backend.
	pub status: u16,
	/// Human-readable reason extracted from the response body.
	pub reason: String,
	/// Retry-After hint from upstream, if supplied.
	pub retry_after: Option<Duration>,
}
impl ApiRejection {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Builds a rejection from a raw response.
	///
	/// The backend reports validation and business errors under a `detail` or `erro` key; when
	/// neither is present the reason falls back to a truncated preview of the body text. The
	/// backend's messages end with their own period, which the Display already supplies, so one
	/// trailing period is stripped here.
	pub fn from_response(response: &WireResponse) -> Self {
		let reason = extract_reason(&response.body)
			.unwrap_or_else(|| truncate_preview(String::from_utf8_lossy(&response.body).trim()));
		let reason =
			if reason.is_empty() { "no error detail was provided".to_owned() } else { reason };
		let reason = match reason.strip_suffix('.') {
			Some(stripped) => stripped.to_owned(),
			None => reason,
		};

		Self { status: response.status, reason, retry_after: response.retry_after }
	}

	/// Returns `true` when the backend refused the bearer credential.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}
}

/// Malformed JSON payload on an otherwise successful response.
#[derive(Debug, ThisError)]
#[error("Backend returned a malformed JSON payload.")]
pub struct DecodeError {
	/// Structured parsing failure carrying the offending path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// HTTP status code of the response that failed to decode.
	pub status: u16,
}

fn extract_reason(body: &[u8]) -> Option<String> {
	let value: serde_json::Value = serde_json::from_slice(body).ok()?;
	let reason = value.get("detail").or_else(|| value.get("erro"))?.as_str()?;

	Some(reason.to_owned())
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= ApiRejection::BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= ApiRejection::BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}

		buf.push(ch);
	}

	buf
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, body: &str) -> WireResponse {
		WireResponse { status, body: body.as_bytes().to_vec(), retry_after: None }
	}

	#[test]
	fn rejection_prefers_detail_key() {
		let rejection =
			ApiRejection::from_response(&response(400, "{\"detail\":\"Usuário já existe.\"}"));

		assert_eq!(rejection.status, 400);
		assert_eq!(rejection.reason, "Usuário já existe");
		assert_eq!(
			rejection.to_string(),
			"Backend rejected the request with HTTP 400: Usuário já existe.",
			"The backend's own trailing period must not double up in the rendered message."
		);
	}

	#[test]
	fn rejection_falls_back_to_erro_key() {
		let rejection =
			ApiRejection::from_response(&response(403, "{\"erro\":\"Sem permissão.\"}"));

		assert_eq!(rejection.reason, "Sem permissão");
	}

	#[test]
	fn rejection_previews_unstructured_bodies() {
		let rejection = ApiRejection::from_response(&response(502, "upstream exploded"));

		assert_eq!(rejection.reason, "upstream exploded");

		let long = "x".repeat(400);
		let truncated = ApiRejection::from_response(&response(502, &long));

		assert_eq!(truncated.reason.chars().count(), ApiRejection::BODY_PREVIEW_LIMIT + 1);
		assert!(truncated.reason.ends_with('…'));
	}

	#[test]
	fn rejection_handles_empty_bodies() {
		let rejection = ApiRejection::from_response(&response(401, ""));

		assert_eq!(rejection.reason, "no error detail was provided");
		assert!(rejection.is_unauthorized());
	}

	#[test]
	fn vault_error_converts_with_source() {
		let vault_error =
			crate::vault::VaultError::Backend { message: "disk unplugged".into() };
		let error: Error = vault_error.clone().into();

		assert!(matches!(error, Error::Vault(_)));
		assert!(error.to_string().contains("disk unplugged"));

		let source = StdError::source(&error)
			.expect("Client error should expose the original vault error as its source.");

		assert_eq!(source.to_string(), vault_error.to_string());
	}
}
