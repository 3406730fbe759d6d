pub mod task;
pub mod project;
pub mod snapshot;
pub mod config;

pub use task::*;
pub use project::*;
pub use snapshot::*;
pub use config::*;
