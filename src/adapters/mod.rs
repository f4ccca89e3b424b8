/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the hub REST client, the
/// system clock and the stderr reporter.
pub mod outbound;
