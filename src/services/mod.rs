pub mod joiner;
pub mod loader;
pub mod snapshot;
pub mod tables;
