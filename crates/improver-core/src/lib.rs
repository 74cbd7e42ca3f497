pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod secret;
pub mod version;

// Re-export common error type
pub use error::{ImproverError, Result};

pub use backend::PromptBackend;
pub use gateway::{CompletionGateway, CompletionRequest};
pub use secret::SecretService;
pub use version::{Version, VersionId, VersionRole, next_stamp};
