//! User-facing notification seam for progress messages.
//!
//! The crate reports gate progress (content consumed, quiz unlocked, quiz outcome) through
//! [`Notifier`]; failures are returned as [`Error`](crate::error::Error) values and never pass
//! through this seam. Embedders bridge the trait to whatever surface greets the user.

/// Sink for user-facing progress messages, one method per severity.
pub trait Notifier
where
	Self: Send + Sync,
{
	/// Reports neutral information.
	fn info(&self, message: &str);

	/// Reports a recoverable concern.
	fn warning(&self, message: &str);

	/// Reports a failure the user must act on.
	fn error(&self, message: &str);

	/// Reports a completed action.
	fn success(&self, message: &str);
}

/// Notifier that discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;
impl Notifier for NullNotifier {
	fn info(&self, _: &str) {}

	fn warning(&self, _: &str) {}

	fn error(&self, _: &str) {}

	fn success(&self, _: &str) {}
}

/// Notifier that forwards messages as `tracing` events.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;
#[cfg(feature = "tracing")]
impl Notifier for TracingNotifier {
	fn info(&self, message: &str) {
		tracing::info!(target: "treinamento_client", "{message}");
	}

	fn warning(&self, message: &str) {
		tracing::warn!(target: "treinamento_client", "{message}");
	}

	fn error(&self, message: &str) {
		tracing::error!(target: "treinamento_client", "{message}");
	}

	fn success(&self, message: &str) {
		tracing::info!(target: "treinamento_client", outcome = "success", "{message}");
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Arc;
	// self
	use super::*;

	#[test]
	fn null_notifier_is_object_safe() {
		let notifier: Arc<dyn Notifier> = Arc::new(NullNotifier);

		notifier.info("discarded");
		notifier.success("discarded");
	}
}
