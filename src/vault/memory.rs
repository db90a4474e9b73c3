//! Thread-safe in-memory [`SessionVault`] for local development and tests.

// self
use crate::{
	_prelude::*,
	vault::{SessionSnapshot, SessionVault, VaultError, VaultFuture},
};

type VaultSlot = Arc<RwLock<Option<SessionSnapshot>>>;

/// Thread-safe vault keeping the snapshot in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryVault(VaultSlot);
impl MemoryVault {
	fn save_now(slot: VaultSlot, snapshot: SessionSnapshot) -> Result<(), VaultError> {
		*slot.write() = Some(snapshot);

		Ok(())
	}

	fn load_now(slot: VaultSlot) -> Option<SessionSnapshot> {
		slot.read().clone()
	}

	fn clear_now(slot: VaultSlot) -> Result<(), VaultError> {
		*slot.write() = None;

		Ok(())
	}
}
impl SessionVault for MemoryVault {
	fn save(&self, snapshot: SessionSnapshot) -> VaultFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move { Self::save_now(slot, snapshot) })
	}

	fn load(&self) -> VaultFuture<'_, Option<SessionSnapshot>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(Self::load_now(slot)) })
	}

	fn clear(&self) -> VaultFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move { Self::clear_now(slot) })
	}
}
