pub mod store;

pub use store::{validate_default_names, CacheConfig, SynchronousMode};
