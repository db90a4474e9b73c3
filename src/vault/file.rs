//! File-backed [`SessionVault`] for desktop-style deployments.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	vault::{SessionSnapshot, SessionVault, VaultError, VaultFuture},
};

/// Persists the session snapshot to a JSON file after each mutation.
///
/// Writes go through a temporary sibling file that is synced and renamed into place, so a crash
/// mid-write never leaves a truncated snapshot behind.
#[derive(Clone, Debug)]
pub struct FileVault {
	path: PathBuf,
	inner: Arc<RwLock<Option<SessionSnapshot>>>,
}
impl FileVault {
	/// Opens (or creates) a vault at the provided path, eagerly loading an existing snapshot.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, VaultError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	fn load_snapshot(path: &Path) -> Result<Option<SessionSnapshot>, VaultError> {
		if !path.exists() {
			return Ok(None);
		}

		let metadata = path.metadata().map_err(|e| VaultError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(None);
		}

		let bytes = fs::read(path).map_err(|e| VaultError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		serde_json::from_slice(&bytes).map_err(|e| VaultError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), VaultError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| VaultError::Backend {
				message: format!("Failed to create vault directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist_locked(&self, contents: &Option<SessionSnapshot>) -> Result<(), VaultError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| VaultError::Serialization {
				message: format!("Failed to serialize vault snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| VaultError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| VaultError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| VaultError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| VaultError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl SessionVault for FileVault {
	fn save(&self, snapshot: SessionSnapshot) -> VaultFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			*guard = Some(snapshot);
			self.persist_locked(&guard)?;

			Ok(())
		})
	}

	fn load(&self) -> VaultFuture<'_, Option<SessionSnapshot>> {
		Box::pin(async move { Ok(self.inner.read().clone()) })
	}

	fn clear(&self) -> VaultFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			*guard = None;
			self.persist_locked(&guard)?;

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;
	use crate::auth::TokenSecret;

	fn temp_path() -> PathBuf {
		let unique = format!(
			"treinamento_client_file_vault_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[test]
	fn save_reload_and_clear_round_trip() {
		let path = temp_path();
		let vault = FileVault::open(&path).expect("Failed to open file vault snapshot.");
		let snapshot =
			SessionSnapshot::new(TokenSecret::new("access-1"), Some(TokenSecret::new("refresh-1")));
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file vault test.");

		rt.block_on(vault.save(snapshot))
			.expect("Failed to save session snapshot to file vault.");
		drop(vault);

		let reopened = FileVault::open(&path).expect("Failed to reopen file vault snapshot.");
		let loaded = rt
			.block_on(reopened.load())
			.expect("Failed to load session snapshot from file vault.")
			.expect("File vault lost the snapshot after reopen.");

		assert_eq!(loaded.access.expose(), "access-1");
		assert_eq!(loaded.refresh.as_ref().map(TokenSecret::expose), Some("refresh-1"));

		rt.block_on(reopened.clear()).expect("Failed to clear file vault.");
		drop(reopened);

		let cleared = FileVault::open(&path).expect("Failed to reopen cleared file vault.");

		assert!(
			rt.block_on(cleared.load()).expect("Failed to load cleared vault.").is_none(),
			"Cleared vault should hold no snapshot after reopen."
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file vault snapshot {}: {e}", path.display())
		});
	}
}
