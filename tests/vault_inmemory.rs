// self
use treinamento_client::{
	auth::{TokenSecret, UserProfile},
	vault::{MemoryVault, SessionSnapshot, SessionVault},
};

fn make_snapshot(access: &str, refresh: Option<&str>) -> SessionSnapshot {
	SessionSnapshot::new(TokenSecret::new(access), refresh.map(TokenSecret::new))
}

fn make_profile() -> UserProfile {
	serde_json::from_str(r#"{"id": 7, "username": "ana.souza", "is_treinamento_vendedor": true}"#)
		.expect("Profile fixture should decode.")
}

#[tokio::test]
async fn save_and_load_round_trip() {
	let vault = MemoryVault::default();

	assert!(
		vault.load().await.expect("Loading an empty vault should succeed.").is_none(),
		"A fresh vault holds no session."
	);

	let mut snapshot = make_snapshot("access-1", Some("refresh-1"));

	snapshot.profile = Some(make_profile());

	vault.save(snapshot).await.expect("Saving snapshot into memory vault should succeed.");

	let loaded = vault
		.load()
		.await
		.expect("Loading snapshot from memory vault should succeed.")
		.expect("Stored snapshot should remain present.");

	assert_eq!(loaded.access.expose(), "access-1");
	assert_eq!(loaded.refresh.as_ref().map(TokenSecret::expose), Some("refresh-1"));
	assert_eq!(loaded.profile.as_ref().map(|profile| profile.username.as_str()), Some("ana.souza"));
}

#[tokio::test]
async fn save_replaces_the_previous_session() {
	let vault = MemoryVault::default();

	vault
		.save(make_snapshot("access-old", Some("refresh-old")))
		.await
		.expect("Saving the first snapshot should succeed.");
	vault
		.save(make_snapshot("access-new", None))
		.await
		.expect("Saving the replacement snapshot should succeed.");

	let loaded = vault
		.load()
		.await
		.expect("Loading the replacement snapshot should succeed.")
		.expect("Replacement snapshot should remain present.");

	assert_eq!(loaded.access.expose(), "access-new");
	assert!(loaded.refresh.is_none(), "The replaced refresh token must not linger.");
}

#[tokio::test]
async fn clear_destroys_every_stored_field_at_once() {
	let vault = MemoryVault::default();
	let mut snapshot = make_snapshot("access-1", Some("refresh-1"));

	snapshot.profile = Some(make_profile());

	vault.save(snapshot).await.expect("Saving snapshot into memory vault should succeed.");
	vault.clear().await.expect("Clearing the memory vault should succeed.");

	assert!(
		vault.load().await.expect("Loading the cleared vault should succeed.").is_none(),
		"Tokens and profile are destroyed as one unit."
	);
}

#[tokio::test]
async fn clones_share_the_same_slot() {
	let vault = MemoryVault::default();
	let sibling = vault.clone();

	vault
		.save(make_snapshot("access-shared", None))
		.await
		.expect("Saving through the original handle should succeed.");

	let loaded = sibling
		.load()
		.await
		.expect("Loading through the cloned handle should succeed.")
		.expect("Clones must observe snapshots saved by their siblings.");

	assert_eq!(loaded.access.expose(), "access-shared");

	sibling.clear().await.expect("Clearing through the cloned handle should succeed.");

	assert!(
		vault.load().await.expect("Loading after the sibling cleared should succeed.").is_none(),
		"A clear issued by any clone logs every clone out."
	);
}
