//! Account profile model returned by the account endpoint.

// self
use crate::{_prelude::*, model::UserId};

/// Account profile returned by `GET /auth/usuarios/`.
///
/// Fields this client does not model are preserved under [`extra`](Self::extra) so callers can
/// reach backend additions without waiting for a client upgrade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Account identifier.
	pub id: UserId,
	/// Login name.
	pub username: String,
	/// Contact email.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Given name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Whether the account manages training modules.
	#[serde(default)]
	pub is_treinamento_admin: bool,
	/// Whether the account consumes training modules as a salesperson.
	#[serde(default)]
	pub is_treinamento_vendedor: bool,
	/// Backend fields outside this model.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}
impl UserProfile {
	/// Returns the name to greet the account with, falling back to the login name.
	pub fn display_name(&self) -> &str {
		self.first_name.as_deref().filter(|name| !name.is_empty()).unwrap_or(&self.username)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn profile_keeps_unmodeled_fields() {
		let profile = serde_json::from_str::<UserProfile>(
			r#"{
				"id": 7,
				"username": "ana.souza",
				"first_name": "Ana",
				"is_treinamento_vendedor": true,
				"celular": "+55 11 99999-0000"
			}"#,
		)
		.expect("Profile should decode.");

		assert_eq!(profile.id, UserId(7));
		assert_eq!(profile.display_name(), "Ana");
		assert!(profile.is_treinamento_vendedor);
		assert!(!profile.is_treinamento_admin);
		assert_eq!(
			profile.extra.get("celular").and_then(|value| value.as_str()),
			Some("+55 11 99999-0000")
		);
	}

	#[test]
	fn display_name_falls_back_to_username() {
		let profile = serde_json::from_str::<UserProfile>(
			r#"{"id": 1, "username": "gestor", "first_name": ""}"#,
		)
		.expect("Profile should decode.");

		assert_eq!(profile.display_name(), "gestor");
	}
}
