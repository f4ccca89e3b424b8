/// Application layer - Use cases and DTOs
///
/// The use cases drive the hub services through the outbound ports; the
/// CLI and library callers only talk to this layer.
pub mod dto;
pub mod use_cases;
