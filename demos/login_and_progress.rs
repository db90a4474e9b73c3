//! Signs into a mocked treinamento backend with the default reqwest transport and prints the
//! learner's per-module progress.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use treinamento_client::{
	auth::LoginCredentials,
	session::SessionManager,
	vault::{MemoryVault, SessionVault},
};

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
				"{\"id\":7,\"username\":\"ana.souza\",\"first_name\":\"Ana\",\"is_treinamento_vendedor\":true}",
			);
		})
		.await;
	let _listing = server
		.mock_async(|when, then| {
			when.method(GET).path("/treinamento/me/modulos/");
			then.status(200).header("content-type", "application/json").body(
				"[{\"id\":1,\"titulo\":\"Funil de vendas\",\"progresso_percent\":66.6,\"video_ok\":true,\"pdf_ok\":true},\
				 {\"id\":2,\"titulo\":\"Técnicas de fechamento\",\"progresso_percent\":0.0}]",
			);
		})
		.await;
	let vault: Arc<dyn SessionVault> = Arc::new(MemoryVault::default());
	let session = SessionManager::for_base_url(vault, &server.base_url())?;
	let profile = session.login(&LoginCredentials::new("ana.souza", "hunter2")).await?;

	println!("Signed in as {}.", profile.display_name());

	for module in session.my_modules().await? {
		println!(
			"- {} ({:.0}% complete{})",
			module.title,
			module.progress_percent,
			if module.completed { ", done" } else { "" },
		);
	}

	session.logout().await?;

	Ok(())
}
