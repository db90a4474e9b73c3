//! Training-domain data models shared across the API bindings.

pub mod id;
pub mod module;
pub mod progress;

pub use id::*;
pub use module::*;
pub use progress::*;
