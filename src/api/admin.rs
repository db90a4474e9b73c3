//! Administrative bindings: module authoring, consumption metrics, and salesperson onboarding.

// self
use crate::{
	_prelude::*,
	auth::UserProfile,
	error::ConfigError,
	http::{ApiHttpClient, HttpMethod, TransportErrorMapper},
	model::{
		ModuleDetail, ModuleDraft, ModuleId, ModuleMetrics, ModuleSummary, ModuleUpdate, UserId,
	},
	session::SessionManager,
};

impl<C, M> SessionManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists every module in the catalog.
	pub async fn list_modules(&self) -> Result<Vec<ModuleSummary>> {
		self.request_json(HttpMethod::Get, "/treinamento/modulos/", None).await
	}

	/// Creates a module with its contents and quiz in one call.
	pub async fn create_module(&self, draft: &ModuleDraft) -> Result<ModuleDetail> {
		let body = serde_json::to_value(draft).map_err(ConfigError::SerializeBody)?;

		self.request_json(HttpMethod::Post, "/treinamento/modulos/criar/", Some(body)).await
	}

	/// Applies a partial update to a module; unset fields stay untouched on the backend.
	pub async fn update_module(
		&self,
		module: ModuleId,
		update: &ModuleUpdate,
	) -> Result<ModuleDetail> {
		let body = serde_json::to_value(update).map_err(ConfigError::SerializeBody)?;
		let path = format!("/treinamento/modulos/{module}/atualizar/");

		self.request_json(HttpMethod::Patch, &path, Some(body)).await
	}

	/// Fetches aggregate consumption metrics for a module.
	pub async fn module_metrics(&self, module: ModuleId) -> Result<ModuleMetrics> {
		let path = format!("/treinamento/modulos/{module}/metricas/");

		self.request_json(HttpMethod::Get, &path, None).await
	}

	/// Registers a salesperson account, returning the created profile.
	pub async fn create_salesperson(&self, draft: &SalespersonDraft) -> Result<UserProfile> {
		let body = serde_json::to_value(draft).map_err(ConfigError::SerializeBody)?;

		self.request_json(HttpMethod::Post, "/auth/usuarios/vendedores/", Some(body)).await
	}
}

/// Payload for registering a salesperson account.
#[derive(Clone, Serialize)]
pub struct SalespersonDraft {
	/// Login name.
	pub username: String,
	/// Contact email.
	pub email: String,
	/// Initial password.
	pub password: String,
	/// Given name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Mobile phone.
	#[serde(rename = "celular", skip_serializing_if = "Option::is_none")]
	pub mobile_phone: Option<String>,
	/// CPF document number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cpf: Option<String>,
	/// CNPJ document number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cnpj: Option<String>,
	/// Job title.
	#[serde(rename = "cargo", skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Business-area identifier.
	#[serde(rename = "area_atuacao", skip_serializing_if = "Option::is_none")]
	pub business_area: Option<u64>,
	/// Supervisor account.
	#[serde(rename = "superior_id", skip_serializing_if = "Option::is_none")]
	pub supervisor: Option<UserId>,
}
impl SalespersonDraft {
	/// Starts a draft from the required account fields.
	pub fn new(
		username: impl Into<String>,
		email: impl Into<String>,
		password: impl Into<String>,
	) -> Self {
		Self {
			username: username.into(),
			email: email.into(),
			password: password.into(),
			first_name: None,
			last_name: None,
			mobile_phone: None,
			cpf: None,
			cnpj: None,
			role: None,
			business_area: None,
			supervisor: None,
		}
	}

	/// Sets the given and family names.
	pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
		self.first_name = Some(first.into());
		self.last_name = Some(last.into());

		self
	}

	/// Sets the job title.
	pub fn with_role(mut self, role: impl Into<String>) -> Self {
		self.role = Some(role.into());

		self
	}

	/// Sets the supervisor account.
	pub fn with_supervisor(mut self, supervisor: UserId) -> Self {
		self.supervisor = Some(supervisor);

		self
	}
}
impl Debug for SalespersonDraft {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SalespersonDraft")
			.field("username", &self.username)
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn salesperson_draft_redacts_and_renames() {
		let draft = SalespersonDraft::new("carlos.lima", "carlos@example.com", "hunter2")
			.with_name("Carlos", "Lima")
			.with_supervisor(UserId(3));

		assert!(!format!("{draft:?}").contains("hunter2"));

		let payload = serde_json::to_value(&draft).expect("Draft should serialize.");

		assert_eq!(
			payload,
			serde_json::json!({
				"username": "carlos.lima",
				"email": "carlos@example.com",
				"password": "hunter2",
				"first_name": "Carlos",
				"last_name": "Lima",
				"superior_id": 3
			})
		);
	}
}
