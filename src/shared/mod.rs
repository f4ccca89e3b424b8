/// Shared kernel - error types and the crate-wide result alias
pub mod error;
mod result;

pub use error::{ExitCode, HubError};
pub use result::Result;
