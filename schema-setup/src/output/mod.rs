//! Output storage: the directory/file contract and the local temp directory

mod directory;
mod lock;

pub use directory::*;
pub use lock::*;
