pub mod charset;
pub mod cli;
pub mod clipboard;
pub mod error;
pub mod generator;
pub mod models;
pub mod store;
pub mod strength;

// Re-export commonly used types for tests and external use
pub use error::{Error, Result};
pub use generator::{generate, ClassSelection};
pub use models::Credential;
pub use store::Store;
pub use strength::{classify, Strength};
