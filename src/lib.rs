//! Typed async client for the treinamento sales-training backend, covering bearer session
//! management with singleflight refresh, advisory module-consumption gating, and quiz scoring
//! bindings.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod error;
pub mod gate;
pub mod http;
pub mod model;
pub mod notify;
pub mod obs;
pub mod session;
pub mod vault;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// crates.io
	pub use parking_lot::Mutex;
	// self
	use crate::{
		http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
		session::SessionManager,
		vault::{MemoryVault, SessionVault},
	};

	/// Session type alias used by reqwest-backed tests.
	pub type ReqwestTestSession = SessionManager<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`SessionManager`] backed by an in-memory vault and the reqwest transport
	/// used across tests.
	pub fn build_reqwest_test_session(base_url: &str) -> (ReqwestTestSession, Arc<MemoryVault>) {
		let vault_backend = Arc::new(MemoryVault::default());
		let vault: Arc<dyn SessionVault> = vault_backend.clone();
		let base = Url::parse(base_url).expect("Test base URL should parse successfully.");
		let session = SessionManager::with_http_client(
			vault,
			base,
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		);

		(session, vault_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
