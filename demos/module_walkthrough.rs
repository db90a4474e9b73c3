//! Walks a sequential module end to end against a mocked backend: consume the video, confirm
//! readiness, and submit the quiz, with gate progress reported through a stdout notifier.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use treinamento_client::{
	auth::LoginCredentials,
	gate::{AnswerSheet, QuizAccess, Stage},
	model::ModuleId,
	notify::Notifier,
	session::SessionManager,
	vault::{MemoryVault, SessionVault},
};

struct StdoutNotifier;
impl Notifier for StdoutNotifier {
	fn info(&self, message: &str) {
		println!("[info] {message}");
	}

	fn warning(&self, message: &str) {
		println!("[warning] {message}");
	}

	fn error(&self, message: &str) {
		println!("[error] {message}");
	}

	fn success(&self, message: &str) {
		println!("[success] {message}");
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access\":\"demo-access\",\"refresh\":\"demo-refresh\"}");
		})
		.await;
	let _profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/usuarios/");
			then.status(200).header("content-type", "application/json").body(
				"{\"id\":7,\"username\":\"ana.souza\",\"is_treinamento_vendedor\":true}",
			);
		})
		.await;
	let _detail = server
		.mock_async(|when, then| {
			when.method(GET).path("/treinamento/modulos/1/");
			then.status(200).header("content-type", "application/json").body(
				"{\"id\":1,\"titulo\":\"Técnicas de fechamento\",\"exigir_consumo_antes_quiz\":true,\
				 \"conteudos\":[{\"id\":10,\"tipo\":\"VIDEO\",\"url\":\"https://cdn.example/fechamento.mp4\"}],\
				 \"perguntas\":[{\"id\":20,\"titulo\":\"Qual a primeira etapa?\",\
				 \"respostas\":[{\"id\":30,\"texto\":\"Ouvir o cliente\"},{\"id\":31,\"texto\":\"Apresentar o preço\"}]}]}",
			);
		})
		.await;
	let _listing = server
		.mock_async(|when, then| {
			when.method(GET).path("/treinamento/me/modulos/");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":1,\"titulo\":\"Técnicas de fechamento\",\"exigir_consumo_antes_quiz\":true}]");
		})
		.await;
	let _consume = server
		.mock_async(|when, then| {
			when.method(POST).path("/treinamento/modulos/1/conteudos/10/consumir/");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let _responder = server
		.mock_async(|when, then| {
			when.method(POST).path("/treinamento/modulos/1/quiz/responder/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"score\":1,\"total\":1,\"aprovado\":true}");
		})
		.await;
	let vault: Arc<dyn SessionVault> = Arc::new(MemoryVault::default());
	let session = SessionManager::for_base_url(vault, &server.base_url())?
		.with_notifier(Arc::new(StdoutNotifier));

	session.login(&LoginCredentials::new("ana.souza", "hunter2")).await?;

	let mut gate = session.open_module(ModuleId(1)).await?;

	println!("Opened \"{}\" on the {} stage.", gate.module().title, gate.active_stage());

	gate.mark_consumed(Stage::Video).await?;

	if gate.request_quiz_access()? == QuizAccess::ConfirmationRequired {
		println!("All content consumed; confirming readiness for the quiz.");
		gate.confirm_ready()?;
	}

	let mut sheet = AnswerSheet::new();

	for question in gate.module().questions.clone() {
		if let Some(option) = question.answers.first() {
			sheet.select(question.id, option.id);
		}
	}

	let outcome = gate.submit_quiz(&sheet).await?;

	println!(
		"Scored {}/{} ({}).",
		outcome.score,
		outcome.total,
		if outcome.approved { "approved" } else { "not approved" },
	);

	Ok(())
}
