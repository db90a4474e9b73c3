#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use treinamento_client::{
	_preludet::*,
	api::SalespersonDraft,
	auth::{LoginCredentials, TokenSecret},
	model::{ContentId, DraftAnswer, DraftQuestion, ModuleDraft, ModuleId, ModuleUpdate},
	vault::{MemoryVault, SessionSnapshot, SessionVault},
};

async fn seed_session(vault: &MemoryVault, access: &str) {
	let snapshot = SessionSnapshot::new(TokenSecret::new(access), Some(TokenSecret::new("refresh-1")));

	vault.save(snapshot).await.expect("Failed to seed session snapshot into the vault.");
}

#[tokio::test]
async fn login_persists_the_snapshot_and_caches_the_profile() {
	let server = MockServer::start_async().await;
	let (session, vault) = build_reqwest_test_session(&server.base_url());
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/auth/token/")
				.json_body(json!({"username": "ana.souza", "password": "hunter2"}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access\":\"access-1\",\"refresh\":\"refresh-1\"}");
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/usuarios/").header("authorization", "Bearer access-1");
			then.status(200).header("content-type", "application/json").body(
				"{\"id\":7,\"username\":\"ana.souza\",\"first_name\":\"Ana\",\"is_treinamento_vendedor\":true}",
			);
		})
		.await;
	let user = session
		.login(&LoginCredentials::new("ana.souza", "hunter2"))
		.await
		.expect("Login should succeed against the mock backend.");

	token.assert_async().await;
	profile.assert_async().await;

	assert_eq!(user.display_name(), "Ana");
	assert!(user.is_treinamento_vendedor);
	assert!(session.is_authenticated().await.expect("Authentication check should succeed."));

	let snapshot = vault
		.load()
		.await
		.expect("Vault load should succeed after login.")
		.expect("Login must leave a persisted snapshot behind.");

	assert_eq!(snapshot.access.expose(), "access-1");
	assert_eq!(snapshot.refresh.as_ref().map(TokenSecret::expose), Some("refresh-1"));
	assert_eq!(snapshot.profile.as_ref().map(|cached| cached.username.as_str()), Some("ana.souza"));

	let cached = session
		.cached_profile()
		.await
		.expect("Cached profile lookup should succeed.")
		.expect("Login must cache the fetched profile.");

	assert_eq!(cached, user);

	session.logout().await.expect("Logout should clear the vault.");

	assert!(!session.is_authenticated().await.expect("Authentication check should succeed."));
	assert!(
		session.cached_profile().await.expect("Cached profile lookup should succeed.").is_none(),
		"Logout must destroy the cached profile together with the tokens."
	);
}

#[tokio::test]
async fn duplicate_salesperson_surfaces_the_backend_detail() {
	let server = MockServer::start_async().await;
	let (session, vault) = build_reqwest_test_session(&server.base_url());

	seed_session(&vault, "access-admin").await;

	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/usuarios/vendedores/");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"detail\":\"Usuário já existe.\"}");
		})
		.await;
	let draft = SalespersonDraft::new("carlos.lima", "carlos@example.com", "hunter2")
		.with_name("Carlos", "Lima");
	let err = session
		.create_salesperson(&draft)
		.await
		.expect_err("Duplicate usernames must surface the backend's validation message.");

	create.assert_async().await;

	match err {
		Error::Api(rejection) => {
			assert_eq!(rejection.status, 400);
			assert_eq!(rejection.reason, "Usuário já existe");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn module_authoring_round_trip() {
	let server = MockServer::start_async().await;
	let (session, vault) = build_reqwest_test_session(&server.base_url());

	seed_session(&vault, "access-admin").await;

	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/treinamento/modulos/criar/").json_body(json!({
				"titulo": "Objeções comuns",
				"conteudos": {"video_url": "https://cdn.example/objecoes.mp4"},
				"regras": {"exigir_consumo_antes_quiz": true},
				"quiz": {
					"perguntas": [{
						"titulo": "Cliente pede desconto. E agora?",
						"respostas": [
							{"texto": "Cede imediatamente", "correta": false},
							{"texto": "Reforça o valor antes de negociar", "correta": true}
						]
					}]
				}
			}));
			then.status(201).header("content-type", "application/json").body(
				"{\"id\":3,\"titulo\":\"Objeções comuns\",\"exigir_consumo_antes_quiz\":true}",
			);
		})
		.await;
	let update = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/treinamento/modulos/3/atualizar/")
				.json_body(json!({"ativo": false}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":3,\"titulo\":\"Objeções comuns\",\"ativo\":false}");
		})
		.await;
	let metrics = server
		.mock_async(|when, then| {
			when.method(GET).path("/treinamento/modulos/3/metricas/");
			then.status(200).header("content-type", "application/json").body(
				"{\"modulo_id\":3,\"titulo\":\"Objeções comuns\",\"total_usuarios\":12,\"concluidos\":4,\"media_score_quiz\":null,\"usuarios\":[]}",
			);
		})
		.await;
	let listing = server
		.mock_async(|when, then| {
			when.method(GET).path("/treinamento/modulos/");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":3,\"titulo\":\"Objeções comuns\"}]");
		})
		.await;
	let draft = ModuleDraft::new("Objeções comuns")
		.with_video_url("https://cdn.example/objecoes.mp4")
		.with_sequential_consumption(true)
		.with_question(DraftQuestion::new("Cliente pede desconto. E agora?", [
			DraftAnswer::new("Cede imediatamente", false),
			DraftAnswer::new("Reforça o valor antes de negociar", true),
		]));
	let created =
		session.create_module(&draft).await.expect("Module creation should succeed.");

	create.assert_async().await;

	assert_eq!(created.id, ModuleId(3));
	assert!(created.sequential_consumption);

	let updated = session
		.update_module(created.id, &ModuleUpdate::new().with_active(false))
		.await
		.expect("Partial module update should succeed.");

	update.assert_async().await;

	assert!(!updated.active);

	let reported = session
		.module_metrics(created.id)
		.await
		.expect("Module metrics fetch should succeed.");

	metrics.assert_async().await;

	assert_eq!(reported.total_users, 12);
	assert_eq!(reported.completed_users, 4);
	assert_eq!(reported.average_quiz_score, None);

	let catalog = session.list_modules().await.expect("Module listing should succeed.");

	listing.assert_async().await;

	assert_eq!(catalog.len(), 1);
	assert_eq!(catalog[0].title, "Objeções comuns");
}

#[tokio::test]
async fn learner_bindings_follow_the_wire_shapes() {
	let server = MockServer::start_async().await;
	let (session, vault) = build_reqwest_test_session(&server.base_url());

	seed_session(&vault, "access-vendedor").await;

	let listing = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/treinamento/me/modulos/")
				.header("authorization", "Bearer access-vendedor");
			then.status(200).header("content-type", "application/json").body(
				"[{\"id\":1,\"titulo\":\"Funil de vendas\",\"video_ok\":true,\"progresso_percent\":33.3}]",
			);
		})
		.await;
	let consume = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/treinamento/modulos/1/conteudos/10/consumir/")
				.json_body(json!({}));
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let progress = session.my_modules().await.expect("Progress listing should succeed.");

	listing.assert_async().await;

	assert_eq!(progress.len(), 1);
	assert!(progress[0].video_done);
	assert!(!progress[0].pdf_done);

	session
		.consume_content(progress[0].id, ContentId(10))
		.await
		.expect("Consumption call should succeed.");

	consume.assert_async().await;
}
