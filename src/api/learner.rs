//! Learner-facing bindings: progress listing, content consumption, and quiz submission.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	gate::ModuleGate,
	http::{ApiHttpClient, HttpMethod, TransportErrorMapper},
	model::{ContentId, ModuleDetail, ModuleId, ModuleProgress, QuizOutcome, QuizReplies},
	session::SessionManager,
};

impl<C, M> SessionManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the learner's assigned modules with their recorded progress.
	pub async fn my_modules(&self) -> Result<Vec<ModuleProgress>> {
		self.request_json(HttpMethod::Get, "/treinamento/me/modulos/", None).await
	}

	/// Fetches the full module record, contents and quiz included.
	pub async fn module_detail(&self, module: ModuleId) -> Result<ModuleDetail> {
		self.request_json(HttpMethod::Get, &format!("/treinamento/modulos/{module}/"), None).await
	}

	/// Records the consumption of one content item.
	pub async fn consume_content(&self, module: ModuleId, content: ContentId) -> Result<()> {
		let path = format!("/treinamento/modulos/{module}/conteudos/{content}/consumir/");

		self.request(HttpMethod::Post, &path, Some(serde_json::json!({}))).await?;

		Ok(())
	}

	/// Submits quiz answers for authoritative scoring.
	pub async fn submit_quiz(
		&self,
		module: ModuleId,
		replies: &QuizReplies,
	) -> Result<QuizOutcome> {
		let body = serde_json::to_value(replies).map_err(ConfigError::SerializeBody)?;
		let path = format!("/treinamento/modulos/{module}/quiz/responder/");

		self.request_json(HttpMethod::Post, &path, Some(body)).await
	}

	/// Loads a module and seeds a consumption gate from the learner's recorded progress.
	pub async fn open_module(&self, module: ModuleId) -> Result<ModuleGate<C, M>> {
		let detail = self.module_detail(module).await?;
		let progress = self.my_modules().await?;
		let seed = progress.into_iter().find(|entry| entry.id == module);

		Ok(ModuleGate::assemble(self.clone(), detail, seed.as_ref()))
	}
}
