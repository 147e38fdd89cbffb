pub mod codec;
pub mod directory;

pub use crate::domain::model::Subscriber;
pub use crate::domain::ports::Store;
pub use crate::utils::error::Result;
pub use directory::{Directory, SaveStatus};
