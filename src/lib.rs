pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "cli")]
pub mod shell;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{FileStore, MemoryStore};
pub use config::{DirectoryConfig, DirectoryOptions, EmptySubscriberPolicy};
pub use crate::core::{Directory, SaveStatus, Store, Subscriber};
pub use utils::error::{DirectoryError, Result};
