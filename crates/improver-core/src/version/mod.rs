pub mod model;

pub use model::{Version, VersionId, VersionRole, next_stamp};
