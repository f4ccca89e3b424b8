/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven ports exist: the use cases in [`crate::application`] are called
/// directly by the CLI and by library users.
pub mod outbound;
