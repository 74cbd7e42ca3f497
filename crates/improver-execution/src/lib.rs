pub mod bootstrap;
pub mod logging;
pub mod tracing_layer;

pub use bootstrap::{load_config, local_backend};
pub use logging::{init_logging, init_logging_with_progress};
pub use tracing_layer::{ProgressEvent, ProgressEventLayer};
